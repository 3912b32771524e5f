//! Nearest-site lookups
//!
//! This module is only available with the `spatial-index` feature.

use kiddo::immutable::float::kdtree::ImmutableKdTree;
use kiddo::SquaredEuclidean;

use crate::geom::Point;

/// KD-tree over site coordinates
///
/// The site containing a point is the nearest site, so one lookup answers
/// "which region is this point in" in O(log n).
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
}

impl SpatialIndex {
    /// Build the index; item `i` of the tree is `coords[i]`.
    ///
    /// ```
    /// use fortune_voronoi::{Point, SpatialIndex};
    ///
    /// let index = SpatialIndex::new(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
    /// assert_eq!(index.find_nearest(Point::new(7.0, 1.0)), 1);
    /// ```
    pub fn new(coords: &[Point]) -> Self {
        let points: Vec<[f64; 2]> = coords.iter().map(|c| [c.x, c.y]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Index of the coordinate closest to `position`
    pub fn find_nearest(&self, position: Point) -> usize {
        let query = [position.x, position.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}
