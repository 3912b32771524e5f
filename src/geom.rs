//! Geometric primitives
//!
//! Plain value types shared by the sweep and the query surface. Coordinates
//! use screen orientation in naming: `top` is the smaller y, `bottom` the
//! larger one. Winding is reported in the mathematical sense (positive signed
//! area is counter-clockwise).

use std::cmp::Ordering;

use glam::DVec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D point
pub type Point = DVec2;

/// Tolerance used by [`Rect::lies_on_boundary`], relative to the larger side
/// of the rectangle (and never below this value in absolute terms)
pub const BOUNDARY_TOLERANCE: f64 = 1e-9;

/// Which side of an edge a halfedge, site or vertex belongs to
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The opposite side
    #[inline]
    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Axis-aligned rectangle defined by its origin and size
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest rectangle containing every point (all zeros when empty)
    pub fn from_points(points: &[Point]) -> Self {
        if points.is_empty() {
            return Self::new(0.0, 0.0, 0.0, 0.0);
        }
        let mut min = Point::splat(f64::MAX);
        let mut max = Point::splat(f64::MIN);
        for p in points {
            min = min.min(*p);
            max = max.max(*p);
        }
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    #[inline]
    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }

    /// Inclusive containment test
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        !(p.x < self.left() || p.x > self.right() || p.y < self.top() || p.y > self.bottom())
    }

    /// True when `p` is on one of the four sides, within
    /// [`Rect::boundary_tolerance`]. Clipped edge ends and the corners of a
    /// region that are not diagram vertices all pass this test.
    pub fn lies_on_boundary(&self, p: Point) -> bool {
        let eps = self.boundary_tolerance();
        let inside = p.x >= self.left() - eps
            && p.x <= self.right() + eps
            && p.y >= self.top() - eps
            && p.y <= self.bottom() + eps;
        inside
            && (close_enough(p.x, self.left(), eps)
                || close_enough(p.y, self.top(), eps)
                || close_enough(p.x, self.right(), eps)
                || close_enough(p.y, self.bottom(), eps))
    }

    /// Absolute tolerance of [`Rect::lies_on_boundary`] for this rectangle
    #[inline]
    pub fn boundary_tolerance(&self) -> f64 {
        BOUNDARY_TOLERANCE * self.width.max(self.height).max(1.0)
    }

    /// Corners in counter-clockwise order, starting at `(left, top)`
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left(), self.bottom()),
        ]
    }

    #[inline]
    fn perimeter(&self) -> f64 {
        2.0 * (self.width + self.height)
    }

    /// Arc-length position of a boundary point, measured counter-clockwise
    /// from `(left, top)`. `None` when `p` is not on the boundary.
    pub(crate) fn perimeter_position(&self, p: Point) -> Option<f64> {
        if !self.lies_on_boundary(p) {
            return None;
        }
        let distances = [
            (p.y - self.top()).abs(),
            (p.x - self.right()).abs(),
            (p.y - self.bottom()).abs(),
            (p.x - self.left()).abs(),
        ];
        let (side, _) = distances
            .iter()
            .copied()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(&b.1))?;
        let (w, h) = (self.width, self.height);
        let t = match side {
            0 => (p.x - self.left()).clamp(0.0, w),
            1 => w + (p.y - self.top()).clamp(0.0, h),
            2 => w + h + (self.right() - p.x).clamp(0.0, w),
            _ => 2.0 * w + h + (self.bottom() - p.y).clamp(0.0, h),
        };
        Some(t)
    }

    /// Corners passed when walking the boundary counter-clockwise from `from`
    /// to `to`, in walking order. Empty when either point is off the boundary.
    pub(crate) fn corners_between(&self, from: Point, to: Point) -> Vec<Point> {
        let (Some(a), Some(b)) = (self.perimeter_position(from), self.perimeter_position(to))
        else {
            return Vec::new();
        };
        let perimeter = self.perimeter();
        if perimeter <= 0.0 {
            return Vec::new();
        }
        let eps = self.boundary_tolerance();
        let span = (b - a).rem_euclid(perimeter);
        let corner_positions = [
            0.0,
            self.width,
            self.width + self.height,
            2.0 * self.width + self.height,
        ];
        let mut passed: Vec<(f64, Point)> = corner_positions
            .iter()
            .zip(self.corners())
            .filter_map(|(&t, corner)| {
                let offset = (t - a).rem_euclid(perimeter);
                (offset > eps && offset < span - eps).then_some((offset, corner))
            })
            .collect();
        passed.sort_by(|x, y| x.0.total_cmp(&y.0));
        passed.into_iter().map(|(_, corner)| corner).collect()
    }
}

#[inline]
pub(crate) fn close_enough(a: f64, b: f64, diff: f64) -> bool {
    (a - b).abs() <= diff
}

/// Orders by y, then x
#[inline]
pub(crate) fn compare_y_then_x(a: Point, b: Point) -> Ordering {
    a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x))
}

/// A line segment between two points
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub p0: Point,
    pub p1: Point,
}

impl Segment {
    pub fn new(p0: Point, p1: Point) -> Self {
        Self { p0, p1 }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.p0.distance(self.p1)
    }

    /// Shorter segments first
    pub fn cmp_length(&self, other: &Segment) -> Ordering {
        self.length().total_cmp(&other.length())
    }

    /// Longer segments first
    pub fn cmp_length_max(&self, other: &Segment) -> Ordering {
        other.cmp_length(self)
    }
}

/// A circle, used for the largest inscribed circle of a site
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }
}

/// Orientation of an ordered point sequence
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
    /// Degenerate (collinear or fewer than three points)
    None,
}

/// An ordered, implicitly closed point sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Point> {
        self.vertices
    }

    /// Twice the signed area (shoelace formula)
    pub fn signed_double_area(&self) -> f64 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| {
                let p = self.vertices[i];
                let next = self.vertices[(i + 1) % n];
                p.x * next.y - next.x * p.y
            })
            .sum()
    }

    pub fn area(&self) -> f64 {
        (self.signed_double_area() * 0.5).abs()
    }

    pub fn winding(&self) -> Winding {
        let signed = self.signed_double_area();
        if signed < 0.0 {
            Winding::Clockwise
        } else if signed > 0.0 {
            Winding::CounterClockwise
        } else {
            Winding::None
        }
    }

    /// Area centroid, falling back to the vertex mean for degenerate polygons.
    /// `None` when there are no vertices.
    pub fn centroid(&self) -> Option<Point> {
        let n = self.vertices.len();
        if n == 0 {
            return None;
        }
        let double_area = self.signed_double_area();
        if double_area.abs() <= f64::EPSILON {
            let sum: Point = self.vertices.iter().copied().sum();
            return Some(sum / n as f64);
        }
        let mut acc = Point::ZERO;
        for i in 0..n {
            let p = self.vertices[i];
            let next = self.vertices[(i + 1) % n];
            let cross = p.x * next.y - next.x * p.y;
            acc += (p + next) * cross;
        }
        Some(acc / (3.0 * double_area))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges_and_containment() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
        assert!(rect.contains(Point::new(10.0, 20.0)));
        assert!(rect.contains(Point::new(110.0, 70.0)));
        assert!(!rect.contains(Point::new(110.1, 50.0)));
        assert!(!rect.contains(Point::new(50.0, 19.9)));
    }

    #[test]
    fn test_rect_from_points() {
        let rect = Rect::from_points(&[
            Point::new(3.0, 7.0),
            Point::new(-1.0, 2.0),
            Point::new(5.0, 4.0),
        ]);
        assert_eq!(rect, Rect::new(-1.0, 2.0, 6.0, 5.0));
        assert_eq!(Rect::from_points(&[]), Rect::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_lies_on_boundary_scales_with_the_rect() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(rect.lies_on_boundary(Point::new(0.0, 50.0)));
        assert!(rect.lies_on_boundary(Point::new(50.0, 100.0 - 1e-8)));
        assert!(!rect.lies_on_boundary(Point::new(0.5, 50.0)));
        assert!(!rect.lies_on_boundary(Point::new(50.0, 50.0)));
        // on the line of a side but past the corner
        assert!(!rect.lies_on_boundary(Point::new(0.0, 150.0)));

        let large = Rect::new(0.0, 0.0, 1e9, 1e9);
        assert!(large.lies_on_boundary(Point::new(0.5, 5e8)));
        assert!(!large.lies_on_boundary(Point::new(5.0, 5e8)));
    }

    #[test]
    fn test_corners_between_walks_counter_clockwise() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        // top side to right side passes (right, top)
        let corners = rect.corners_between(Point::new(5.0, 0.0), Point::new(10.0, 5.0));
        assert_eq!(corners, vec![Point::new(10.0, 0.0)]);

        // the long way round
        let corners = rect.corners_between(Point::new(10.0, 5.0), Point::new(5.0, 0.0));
        assert_eq!(
            corners,
            vec![
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
                Point::new(0.0, 0.0),
            ]
        );

        // same side, no corners
        assert!(rect
            .corners_between(Point::new(2.0, 0.0), Point::new(8.0, 0.0))
            .is_empty());

        // interior points are not walked
        assert!(rect
            .corners_between(Point::new(5.0, 5.0), Point::new(8.0, 0.0))
            .is_empty());
    }

    #[test]
    fn test_segment_length_ordering() {
        let short = Segment::new(Point::ZERO, Point::new(1.0, 0.0));
        let long = Segment::new(Point::ZERO, Point::new(3.0, 4.0));
        assert_eq!(long.length(), 5.0);
        assert_eq!(short.cmp_length(&long), Ordering::Less);
        assert_eq!(short.cmp_length_max(&long), Ordering::Greater);

        let mut segments = vec![long, short];
        segments.sort_by(Segment::cmp_length);
        assert_eq!(segments[0], short);
    }

    #[test]
    fn test_polygon_winding_and_area() {
        let ccw = Polygon::new(Rect::new(0.0, 0.0, 4.0, 3.0).corners().to_vec());
        assert_eq!(ccw.winding(), Winding::CounterClockwise);
        assert_eq!(ccw.area(), 12.0);

        let mut reversed = ccw.vertices().to_vec();
        reversed.reverse();
        let cw = Polygon::new(reversed);
        assert_eq!(cw.winding(), Winding::Clockwise);
        assert_eq!(cw.area(), 12.0);

        let line = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        ]);
        assert_eq!(line.winding(), Winding::None);
    }

    #[test]
    fn test_polygon_centroid() {
        let square = Polygon::new(Rect::new(2.0, 2.0, 4.0, 4.0).corners().to_vec());
        let c = square.centroid().unwrap();
        assert!((c.x - 4.0).abs() < 1e-12);
        assert!((c.y - 4.0).abs() < 1e-12);
        assert!(Polygon::new(vec![]).centroid().is_none());
    }

    #[test]
    fn test_side_other() {
        assert_eq!(Side::Left.other(), Side::Right);
        assert_eq!(Side::Right.other(), Side::Left);
    }
}
