//! Voronoi vertices
//!
//! A vertex starts out tentative, predicted by two beach-line arcs that are
//! about to converge. It only receives an index when its circle event fires
//! and it becomes a permanent corner of the diagram.

use crate::edge::Edge;
use crate::geom::{compare_y_then_x, Point, Side};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Determinants smaller than this in magnitude are treated as parallel lines
pub const PARALLEL_TOLERANCE: f64 = 1.0e-10;

/// A point equidistant from three sites
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    point: Point,
    index: Option<usize>,
}

impl Vertex {
    pub(crate) fn tentative(point: Point) -> Self {
        Self { point, index: None }
    }

    /// Make the vertex permanent under the given index
    pub(crate) fn resolve(self, index: usize) -> Self {
        Self {
            point: self.point,
            index: Some(index),
        }
    }

    #[inline]
    pub fn point(&self) -> Point {
        self.point
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.point.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.point.y
    }

    /// Creation-order index, `None` while the vertex is still tentative
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.index
    }
}

/// One end of an edge as seen by consumers of the finished diagram
///
/// An end that was never resolved by a circle event lies at infinity.
/// `AtInfinity` compares unequal to every finite vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VertexRef {
    Finite(Vertex),
    AtInfinity,
}

impl VertexRef {
    #[inline]
    pub fn is_at_infinity(&self) -> bool {
        matches!(self, VertexRef::AtInfinity)
    }

    pub fn point(&self) -> Option<Point> {
        match self {
            VertexRef::Finite(v) => Some(v.point()),
            VertexRef::AtInfinity => None,
        }
    }
}

impl From<Option<Vertex>> for VertexRef {
    fn from(v: Option<Vertex>) -> Self {
        v.map_or(VertexRef::AtInfinity, VertexRef::Finite)
    }
}

/// Where the arcs carried by two adjacent halfedges converge.
///
/// Returns `None` when both edges bisect with the same right site, when the
/// bisectors are parallel (within [`PARALLEL_TOLERANCE`]), or when the
/// intersection lies on the side of the lower right site that the halfedge
/// orientation rules out.
pub(crate) fn intersect(edge0: &Edge, side0: Side, edge1: &Edge, side1: Side) -> Option<Point> {
    if edge0.right_site() == edge1.right_site() {
        return None;
    }

    let determinant = edge0.a() * edge1.b() - edge0.b() * edge1.a();
    if determinant.abs() < PARALLEL_TOLERANCE {
        return None;
    }

    let x = (edge0.c() * edge1.b() - edge1.c() * edge0.b()) / determinant;
    let y = (edge1.c() * edge0.a() - edge0.c() * edge1.a()) / determinant;

    let (edge, side) = if compare_y_then_x(
        edge0.site_point(Side::Right),
        edge1.site_point(Side::Right),
    )
    .is_lt()
    {
        (edge0, side0)
    } else {
        (edge1, side1)
    };

    let right_of_site = x >= edge.site_point(Side::Right).x;
    if (right_of_site && side == Side::Left) || (!right_of_site && side == Side::Right) {
        return None;
    }

    Some(Point::new(x, y))
}
