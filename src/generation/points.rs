//! Seeded random site placement

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::geom::{Point, Rect};

/// Generate `count` points uniformly distributed inside `bounds`
///
/// The same seed always yields the same points.
///
/// # Example
///
/// ```rust
/// use fortune_voronoi::generation::random_points;
/// use fortune_voronoi::Rect;
///
/// let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
/// let points = random_points(1000, bounds, 42);
/// assert_eq!(points.len(), 1000);
/// assert!(points.iter().all(|p| bounds.contains(*p)));
/// ```
pub fn random_points(count: usize, bounds: Rect, seed: u32) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
    (0..count)
        .map(|_| {
            Point::new(
                bounds.x + rng.gen::<f64>() * bounds.width,
                bounds.y + rng.gen::<f64>() * bounds.height,
            )
        })
        .collect()
}
