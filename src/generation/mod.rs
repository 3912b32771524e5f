//! Site generation
//!
//! Seeded random placement inside the bounds, optionally evened out by
//! Lloyd relaxation.

mod lloyd;
mod points;

pub use lloyd::{lloyd_relaxation, lloyd_relaxation_with_options, LloydOptions};
pub use points::random_points;

use crate::config::VoronoiConfig;
use crate::error::{Result, VoronoiError};
use crate::geom::Point;

/// Generate the sites described by `config` (without building the diagram)
///
/// # Errors
///
/// Returns `InvalidConfig` if `config.bounds` is not set
pub fn generate_sites(config: &VoronoiConfig) -> Result<Vec<Point>> {
    let bounds = config.bounds.ok_or_else(|| {
        VoronoiError::InvalidConfig("random generation needs explicit bounds".to_string())
    })?;

    // Step 1: random points inside the bounds
    let points = random_points(config.site_count, bounds, config.seed);

    // Step 2: relax
    if config.lloyd_iterations > 0 {
        let options = LloydOptions {
            max_iterations: config.lloyd_iterations,
            convergence_threshold: config.lloyd_convergence,
        };
        lloyd_relaxation_with_options(points, bounds, options)
    } else {
        Ok(points)
    }
}
