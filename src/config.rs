//! Diagram configuration and builder
//!
//! A configuration is a small `Copy` value. The same configuration and the
//! same input points always produce the same diagram, including weights.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoronoiError};
use crate::geom::Rect;

/// Upper limit on Lloyd relaxation passes
pub const MAX_LLOYD_ITERATIONS: usize = 20;

/// Configuration for building a diagram
///
/// # Example
///
/// ```rust
/// use fortune_voronoi::*;
///
/// let config = VoronoiConfigBuilder::new()
///     .seed(42)
///     .bounds(Rect::new(0.0, 0.0, 640.0, 480.0))
///     .unwrap()
///     .site_count(200)
///     .build()
///     .unwrap();
///
/// # #[cfg(feature = "serde")]
/// # {
/// let json = serde_json::to_string(&config).unwrap();
/// let restored: VoronoiConfig = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, restored);
/// # }
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoronoiConfig {
    /// Seed for site weights and random site placement
    pub seed: u32,

    /// Clipping rectangle. `None` means the bounding box of the input points.
    pub bounds: Option<Rect>,

    /// Weights are integers drawn uniformly from `[0, max_weight)`
    pub max_weight: u32,

    /// Number of sites placed by random generation
    pub site_count: usize,

    /// Lloyd relaxation passes applied after random generation
    ///
    /// - 0: raw random sites (irregular regions)
    /// - 2-3: noticeably more even
    /// - 10+: diminishing returns
    pub lloyd_iterations: usize,

    /// Early-stop threshold for Lloyd relaxation, as a fraction of the bounds diagonal
    ///
    /// Relaxation stops once no site moves further than
    /// `lloyd_convergence * bounds.diagonal()`. 0.0 runs every pass.
    pub lloyd_convergence: f64,
}

impl Default for VoronoiConfig {
    fn default() -> Self {
        VoronoiConfigBuilder::new().finish(rand::random())
    }
}

/// Builder for [`VoronoiConfig`] with validation
///
/// Setters that can reject their input return `Result<Self>`.
///
/// ```rust
/// use fortune_voronoi::*;
///
/// let config = VoronoiConfigBuilder::new()
///     .seed(7)
///     .max_weight(10)
///     .unwrap()
///     .lloyd_iterations(3)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(config.max_weight, 10);
/// ```
#[derive(Debug, Clone)]
pub struct VoronoiConfigBuilder {
    seed: Option<u32>,
    bounds: Option<Rect>,
    max_weight: u32,
    site_count: usize,
    lloyd_iterations: usize,
    lloyd_convergence: f64,
}

impl VoronoiConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: random
    /// - bounds: none (use the points' bounding box)
    /// - max_weight: 100
    /// - site_count: 1000
    /// - lloyd_iterations: 0
    /// - lloyd_convergence: 0.001
    pub fn new() -> Self {
        Self {
            seed: None,
            bounds: None,
            max_weight: 100,
            site_count: 1000,
            lloyd_iterations: 0,
            lloyd_convergence: 0.001,
        }
    }

    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the clipping rectangle
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless every field is finite and the width
    /// and height are positive
    pub fn bounds(mut self, bounds: Rect) -> Result<Self> {
        validate_bounds(&bounds)?;
        self.bounds = Some(bounds);
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if `max_weight` is 0
    pub fn max_weight(mut self, max_weight: u32) -> Result<Self> {
        if max_weight == 0 {
            return Err(VoronoiError::InvalidConfig(
                "max weight must be positive".to_string(),
            ));
        }
        self.max_weight = max_weight;
        Ok(self)
    }

    pub fn site_count(mut self, count: usize) -> Self {
        self.site_count = count;
        self
    }

    /// Set the number of Lloyd relaxation passes
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if iterations > 20
    pub fn lloyd_iterations(mut self, iterations: usize) -> Result<Self> {
        if iterations > MAX_LLOYD_ITERATIONS {
            return Err(VoronoiError::InvalidConfig(format!(
                "Lloyd iterations must be <= {} (got {})",
                MAX_LLOYD_ITERATIONS, iterations
            )));
        }
        self.lloyd_iterations = iterations;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if the threshold is negative or not finite
    pub fn lloyd_convergence(mut self, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(VoronoiError::InvalidConfig(format!(
                "Lloyd convergence threshold must be >= 0 (got {})",
                threshold
            )));
        }
        self.lloyd_convergence = threshold;
        Ok(self)
    }

    /// Build the configuration, drawing a random seed if none was given
    pub fn build(self) -> Result<VoronoiConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);
        Ok(self.finish(seed))
    }

    fn finish(self, seed: u32) -> VoronoiConfig {
        VoronoiConfig {
            seed,
            bounds: self.bounds,
            max_weight: self.max_weight,
            site_count: self.site_count,
            lloyd_iterations: self.lloyd_iterations,
            lloyd_convergence: self.lloyd_convergence,
        }
    }
}

impl Default for VoronoiConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn validate_bounds(bounds: &Rect) -> Result<()> {
    let finite = [bounds.x, bounds.y, bounds.width, bounds.height]
        .iter()
        .all(|v| v.is_finite());
    if !finite || bounds.width <= 0.0 || bounds.height <= 0.0 {
        return Err(VoronoiError::InvalidConfig(format!(
            "bounds must be finite with positive size (got {:?})",
            bounds
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = VoronoiConfigBuilder::new().build().unwrap();
        assert_eq!(config.bounds, None);
        assert_eq!(config.max_weight, 100);
        assert_eq!(config.site_count, 1000);
        assert_eq!(config.lloyd_iterations, 0);
        assert_eq!(config.lloyd_convergence, 0.001);
    }

    #[test]
    fn test_builder_custom() {
        let bounds = Rect::new(-10.0, -10.0, 20.0, 20.0);
        let config = VoronoiConfigBuilder::new()
            .seed(42)
            .bounds(bounds)
            .unwrap()
            .site_count(50)
            .lloyd_iterations(3)
            .unwrap()
            .lloyd_convergence(0.0)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.seed, 42);
        assert_eq!(config.bounds, Some(bounds));
        assert_eq!(config.site_count, 50);
        assert_eq!(config.lloyd_iterations, 3);
        assert_eq!(config.lloyd_convergence, 0.0);
    }

    #[test]
    fn test_lloyd_iterations_validation() {
        assert!(VoronoiConfigBuilder::new().lloyd_iterations(20).is_ok());
        let result = VoronoiConfigBuilder::new().lloyd_iterations(21);
        assert!(matches!(result, Err(VoronoiError::InvalidConfig(_))));
    }

    #[test]
    fn test_convergence_validation() {
        assert!(VoronoiConfigBuilder::new().lloyd_convergence(-0.1).is_err());
        assert!(VoronoiConfigBuilder::new()
            .lloyd_convergence(f64::NAN)
            .is_err());
    }

    #[test]
    fn test_bounds_validation() {
        let builder = VoronoiConfigBuilder::new;
        assert!(builder().bounds(Rect::new(0.0, 0.0, 0.0, 10.0)).is_err());
        assert!(builder().bounds(Rect::new(0.0, 0.0, 10.0, -1.0)).is_err());
        assert!(builder()
            .bounds(Rect::new(f64::INFINITY, 0.0, 10.0, 10.0))
            .is_err());
        assert!(builder().bounds(Rect::new(5.0, 5.0, 1.0, 1.0)).is_ok());
    }

    #[test]
    fn test_max_weight_validation() {
        assert!(VoronoiConfigBuilder::new().max_weight(0).is_err());
        assert_eq!(
            VoronoiConfigBuilder::new()
                .max_weight(5)
                .unwrap()
                .build()
                .unwrap()
                .max_weight,
            5
        );
    }

    #[test]
    fn test_seed_is_kept() {
        let a = VoronoiConfigBuilder::new().seed(9).build().unwrap();
        let b = VoronoiConfigBuilder::new().seed(9).build().unwrap();
        assert_eq!(a, b);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serde_roundtrip() {
        let config = VoronoiConfigBuilder::new()
            .seed(3)
            .bounds(Rect::new(0.0, 0.0, 8.0, 6.0))
            .unwrap()
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let restored: VoronoiConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
