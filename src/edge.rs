//! Bisecting edges
//!
//! An edge is the perpendicular bisector of two sites, stored as the line
//! `a*x + b*y = c`. Whichever of `a` or `b` is 1.0 names the dominant axis:
//! `a == 1.0` means the line is solved as `x = c - b*y`, otherwise as
//! `y = c - a*x`. The segment joining the two sites belongs to the Delaunay
//! triangulation; the segment joining the two vertices belongs to the
//! Voronoi diagram.

use crate::geom::{Point, Rect, Segment, Side};
use crate::vertex::{Vertex, VertexRef};

/// The bisector of two sites
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    a: f64,
    b: f64,
    c: f64,
    sites: [usize; 2],
    site_points: [Point; 2],
    // if one of these is None the edge extends to infinity
    vertices: [Option<Vertex>; 2],
    // set by `clip`, only when some part of the edge lies within the bounds
    clipped: Option<[Point; 2]>,
}

impl Edge {
    /// Bisector of `site0` (left) and `site1` (right)
    pub(crate) fn bisecting(site0: usize, p0: Point, site1: usize, p1: Point) -> Self {
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let mut c = p0.x * dx + p0.y * dy + (dx * dx + dy * dy) * 0.5;
        let (a, b);
        if dx.abs() > dy.abs() {
            a = 1.0;
            b = dy / dx;
            c /= dx;
        } else {
            b = 1.0;
            a = dx / dy;
            c /= dy;
        }

        Self {
            a,
            b,
            c,
            sites: [site0, site1],
            site_points: [p0, p1],
            vertices: [None, None],
            clipped: None,
        }
    }

    #[inline]
    pub fn a(&self) -> f64 {
        self.a
    }

    #[inline]
    pub fn b(&self) -> f64 {
        self.b
    }

    #[inline]
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Index of the site on the given side
    #[inline]
    pub fn site(&self, side: Side) -> usize {
        self.sites[side.index()]
    }

    #[inline]
    pub fn left_site(&self) -> usize {
        self.site(Side::Left)
    }

    #[inline]
    pub fn right_site(&self) -> usize {
        self.site(Side::Right)
    }

    #[inline]
    pub fn site_point(&self, side: Side) -> Point {
        self.site_points[side.index()]
    }

    /// The site across the edge from `site`, if `site` is one of its two sites
    pub fn other_site(&self, site: usize) -> Option<usize> {
        if self.left_site() == site {
            Some(self.right_site())
        } else if self.right_site() == site {
            Some(self.left_site())
        } else {
            None
        }
    }

    #[inline]
    pub fn vertex(&self, side: Side) -> Option<Vertex> {
        self.vertices[side.index()]
    }

    #[inline]
    pub fn left_vertex(&self) -> Option<Vertex> {
        self.vertex(Side::Left)
    }

    #[inline]
    pub fn right_vertex(&self) -> Option<Vertex> {
        self.vertex(Side::Right)
    }

    /// The end on `side`, with an unresolved end reported as the vertex at infinity
    #[inline]
    pub fn vertex_ref(&self, side: Side) -> VertexRef {
        self.vertex(side).into()
    }

    pub(crate) fn set_vertex(&mut self, side: Side, vertex: Vertex) {
        self.vertices[side.index()] = Some(vertex);
    }

    /// An edge with an end at infinity joins two consecutive hull sites
    #[inline]
    pub fn is_part_of_convex_hull(&self) -> bool {
        self.left_vertex().is_none() || self.right_vertex().is_none()
    }

    #[inline]
    pub fn sites_distance(&self) -> f64 {
        self.site_points[0].distance(self.site_points[1])
    }

    /// True once clipping has found some part of the edge inside the bounds
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.clipped.is_some()
    }

    #[inline]
    pub fn clipped_ends(&self) -> Option<[Point; 2]> {
        self.clipped
    }

    #[inline]
    pub fn clipped_end(&self, side: Side) -> Option<Point> {
        self.clipped.map(|ends| ends[side.index()])
    }

    /// Segment joining the two sites
    pub fn delaunay_line(&self) -> Segment {
        Segment::new(self.site_points[0], self.site_points[1])
    }

    /// Visible portion of the edge, if any
    pub fn voronoi_segment(&self) -> Option<Segment> {
        self.clipped.map(|[l, r]| Segment::new(l, r))
    }

    /// Record the two ends of the portion of the edge visible within `bounds`.
    /// Leaves the edge invisible when no part of it falls within the bounds.
    pub(crate) fn clip(&mut self, bounds: &Rect) {
        let xmin = bounds.left();
        let ymin = bounds.top();
        let xmax = bounds.right();
        let ymax = bounds.bottom();
        let (a, b, c) = (self.a, self.b, self.c);

        // walk from vertex0 towards vertex1 in increasing order of the free coordinate
        let vertex0_is_left = !(a == 1.0 && b >= 0.0);
        let (vertex0, vertex1) = if vertex0_is_left {
            (self.left_vertex(), self.right_vertex())
        } else {
            (self.right_vertex(), self.left_vertex())
        };

        let (mut x0, mut y0, mut x1, mut y1);
        if a == 1.0 {
            y0 = ymin;
            if let Some(v) = vertex0.filter(|v| v.y() > ymin) {
                y0 = v.y();
            }
            if y0 > ymax {
                return;
            }
            x0 = c - b * y0;

            y1 = ymax;
            if let Some(v) = vertex1.filter(|v| v.y() < ymax) {
                y1 = v.y();
            }
            if y1 < ymin {
                return;
            }
            x1 = c - b * y1;

            if (x0 > xmax && x1 > xmax) || (x0 < xmin && x1 < xmin) {
                return;
            }

            if x0 > xmax {
                x0 = xmax;
                y0 = (c - x0) / b;
            } else if x0 < xmin {
                x0 = xmin;
                y0 = (c - x0) / b;
            }

            if x1 > xmax {
                x1 = xmax;
                y1 = (c - x1) / b;
            } else if x1 < xmin {
                x1 = xmin;
                y1 = (c - x1) / b;
            }
        } else {
            x0 = xmin;
            if let Some(v) = vertex0.filter(|v| v.x() > xmin) {
                x0 = v.x();
            }
            if x0 > xmax {
                return;
            }
            y0 = c - a * x0;

            x1 = xmax;
            if let Some(v) = vertex1.filter(|v| v.x() < xmax) {
                x1 = v.x();
            }
            if x1 < xmin {
                return;
            }
            y1 = c - a * x1;

            if (y0 > ymax && y1 > ymax) || (y0 < ymin && y1 < ymin) {
                return;
            }

            if y0 > ymax {
                y0 = ymax;
                x0 = (c - y0) / a;
            } else if y0 < ymin {
                y0 = ymin;
                x0 = (c - y0) / a;
            }

            if y1 > ymax {
                y1 = ymax;
                x1 = (c - y1) / a;
            } else if y1 < ymin {
                y1 = ymin;
                x1 = (c - y1) / a;
            }
        }

        let p0 = Point::new(x0, y0);
        let p1 = Point::new(x1, y1);
        self.clipped = Some(if vertex0_is_left { [p0, p1] } else { [p1, p0] });
    }
}
