//! Lloyd relaxation for evenly spread sites
//!
//! Each pass moves every site to the centroid of its clipped region and
//! rebuilds the diagram, which evens out region sizes.

use crate::config::VoronoiConfigBuilder;
use crate::error::Result;
use crate::geom::{Point, Polygon, Rect};
use crate::voronoi::Voronoi;

/// Options for Lloyd relaxation
#[derive(Debug, Clone, Copy)]
pub struct LloydOptions {
    /// Maximum number of passes to run
    pub max_iterations: usize,
    /// Stop once no site moves further than this fraction of the bounds
    /// diagonal. 0.0 disables early termination.
    pub convergence_threshold: f64,
}

impl Default for LloydOptions {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            convergence_threshold: 0.001,
        }
    }
}

/// Apply `iterations` passes of Lloyd relaxation to `points` within `bounds`
///
/// The result is returned in sweep order (sorted by y, then x), not in the
/// order of the input.
pub fn lloyd_relaxation(points: Vec<Point>, bounds: Rect, iterations: usize) -> Result<Vec<Point>> {
    let options = LloydOptions {
        max_iterations: iterations,
        ..Default::default()
    };
    lloyd_relaxation_with_options(points, bounds, options)
}

/// Apply Lloyd relaxation with explicit options
///
/// # Errors
///
/// Returns `InvalidConfig` if `bounds` is empty or not finite
pub fn lloyd_relaxation_with_options(
    mut points: Vec<Point>,
    bounds: Rect,
    options: LloydOptions,
) -> Result<Vec<Point>> {
    let config = VoronoiConfigBuilder::new().seed(0).bounds(bounds)?.build()?;
    let convergence_threshold = options.convergence_threshold * bounds.diagonal();

    log::debug!(
        "lloyd: {} points, max {} iterations, threshold {:.4} (abs {:.4})",
        points.len(),
        options.max_iterations,
        options.convergence_threshold,
        convergence_threshold
    );

    for iteration in 0..options.max_iterations {
        let voronoi = Voronoi::with_config(&points, config)?;
        let (relaxed, max_displacement) = relax_once(&voronoi);
        points = relaxed;

        log::debug!(
            "lloyd: iteration {}: max displacement {:.4}",
            iteration + 1,
            max_displacement
        );

        if convergence_threshold > 0.0 && max_displacement < convergence_threshold {
            log::debug!(
                "lloyd: converged at iteration {} ({:.4} < {:.4})",
                iteration + 1,
                max_displacement,
                convergence_threshold
            );
            break;
        }
    }

    Ok(points)
}

/// Move every site to its region centroid, returning the new sites and the
/// largest distance any of them moved
fn relax_once(voronoi: &Voronoi) -> (Vec<Point>, f64) {
    let mut max_displacement: f64 = 0.0;
    let points = voronoi
        .sites()
        .iter()
        .map(|site| {
            let old = site.coord();
            let region = site.region(voronoi.edges(), &voronoi.bounds());
            let new = Polygon::new(region).centroid().unwrap_or(old);
            max_displacement = max_displacement.max(old.distance(new));
            new
        })
        .collect();
    (points, max_displacement)
}
