//! Region assembly
//!
//! Turns the edges around one site into a counter-clockwise polygon. The
//! clipped variant closes gaps by walking the bounding rectangle; the closed
//! variant only succeeds for regions bounded entirely by finite vertices.

use crate::edge::Edge;
use crate::geom::{Point, Polygon, Rect, Winding};
use crate::reorder::{Criterion, EdgeReorderer};

/// Points closer than this are treated as the same polygon corner
pub const REGION_EPSILON: f64 = 0.005;

#[inline]
fn same_point(a: Point, b: Point) -> bool {
    a.distance(b) <= REGION_EPSILON
}

/// The region of the site at `site`, clipped to `bounds`
///
/// A site none of whose edges reach into the bounds owns either the whole
/// rectangle (when it lies inside) or nothing. Bounds without area clip every
/// region to nothing.
pub(crate) fn clipped_region(site: Point, edge_ids: &[usize], edges: &[Edge], bounds: &Rect) -> Vec<Point> {
    if bounds.area() <= 0.0 {
        return Vec::new();
    }

    // every visible piece of the boundary, directed so the site is on its left
    let mut segments: Vec<(Point, Point)> = edge_ids
        .iter()
        .filter_map(|&e| edges[e].clipped_ends())
        .map(|[p, q]| {
            if (q - p).perp_dot(site - p) >= 0.0 {
                (p, q)
            } else {
                (q, p)
            }
        })
        .collect();

    if segments.is_empty() {
        return if bounds.contains(site) {
            bounds.corners().to_vec()
        } else {
            Vec::new()
        };
    }

    // a region is star-shaped around its site
    segments.sort_by(|a, b| {
        let angle = |(p, q): &(Point, Point)| {
            let mid = (*p + *q) * 0.5 - site;
            mid.y.atan2(mid.x)
        };
        angle(a).total_cmp(&angle(b))
    });

    let mut points: Vec<Point> = Vec::with_capacity(segments.len() * 2 + 4);
    for &(start, end) in &segments {
        if let Some(&last) = points.last() {
            if !same_point(last, start) {
                points.extend(bounds.corners_between(last, start));
            }
        }
        points.push(start);
        points.push(end);
    }
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        if !same_point(last, first) {
            points.extend(bounds.corners_between(last, first));
        }
    }

    let points = dedup_ring(points);
    counter_clockwise(points)
}

/// The region bounded by the finite vertices of `edge_ids`, or empty when
/// any of those edges reaches infinity
pub(crate) fn closed_region(edge_ids: &[usize], edges: &[Edge]) -> Vec<Point> {
    let reorderer = EdgeReorderer::new(edge_ids, edges, Criterion::Vertex);
    let points: Vec<Point> = reorderer
        .edges()
        .iter()
        .zip(reorderer.orientations())
        .filter_map(|(&e, &side)| edges[e].vertex(side).map(|v| v.point()))
        .collect();
    counter_clockwise(dedup_ring(points))
}

/// Drop consecutive duplicates, including between the last and first point
fn dedup_ring(mut points: Vec<Point>) -> Vec<Point> {
    points.dedup_by(|b, a| same_point(*a, *b));
    while points.len() > 1 {
        match (points.first(), points.last()) {
            (Some(&first), Some(&last)) if same_point(first, last) => {
                points.pop();
            }
            _ => break,
        }
    }
    points
}

/// Counter-clockwise copy of the ring; empty when the ring encloses no area
fn counter_clockwise(points: Vec<Point>) -> Vec<Point> {
    let polygon = Polygon::new(points);
    match polygon.winding() {
        Winding::None => Vec::new(),
        Winding::CounterClockwise => polygon.into_vertices(),
        Winding::Clockwise => {
            let mut points = polygon.into_vertices();
            points.reverse();
            points
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Side;
    use crate::vertex::Vertex;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    fn area(points: &[Point]) -> f64 {
        Polygon::new(points.to_vec()).area()
    }

    #[test]
    fn test_lone_site_owns_the_bounds() {
        let region = clipped_region(Point::new(10.0, 10.0), &[], &[], &bounds());
        assert_eq!(region, bounds().corners().to_vec());
        assert!(clipped_region(Point::new(-10.0, 10.0), &[], &[], &bounds()).is_empty());
    }

    #[test]
    fn test_two_sites_split_the_bounds() {
        let a = Point::new(25.0, 50.0);
        let b = Point::new(75.0, 50.0);
        let mut edge = Edge::bisecting(0, a, 1, b);
        edge.clip(&bounds());
        let edges = vec![edge];

        for site in [a, b] {
            let region = clipped_region(site, &[0], &edges, &bounds());
            assert_eq!(region.len(), 4);
            assert!((area(&region) - 5000.0).abs() < 1e-9);
            assert_eq!(
                Polygon::new(region.clone()).winding(),
                Winding::CounterClockwise
            );
            assert!(region.iter().all(|p| bounds().contains(*p)));
        }
    }

    #[test]
    fn test_flat_bounds_give_no_region() {
        let flat = Rect::new(0.0, 3.0, 40.0, 0.0);
        let a = Point::new(0.0, 3.0);
        let b = Point::new(10.0, 3.0);
        let mut edge = Edge::bisecting(0, a, 1, b);
        edge.clip(&flat);
        let edges = vec![edge];

        assert!(clipped_region(a, &[0], &edges, &flat).is_empty());
        assert!(clipped_region(b, &[0], &edges, &flat).is_empty());
        assert!(clipped_region(Point::new(1.0, 3.0), &[], &[], &flat).is_empty());
    }

    #[test]
    fn test_collinear_ring_is_dropped() {
        let ring = vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(10.0, 10.0)];
        assert!(counter_clockwise(ring).is_empty());
        assert!(counter_clockwise(vec![Point::new(1.0, 1.0)]).is_empty());
    }

    #[test]
    fn test_dedup_ring_drops_closing_duplicate() {
        let ring = dedup_ring(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 0.001),
            Point::new(1.0, 1.0),
            Point::new(0.0, 0.002),
        ]);
        assert_eq!(
            ring,
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)]
        );
    }

    #[test]
    fn test_closed_region_needs_finite_vertices() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let open = Edge::bisecting(0, a, 1, b);
        assert!(closed_region(&[0], &[open]).is_empty());

        let corners = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.0, 10.0)];
        let edges: Vec<Edge> = (0..3)
            .map(|i| {
                let mut e = Edge::bisecting(0, a, 1, b);
                let j = (i + 1) % 3;
                e.set_vertex(Side::Left, Vertex::tentative(corners[i]).resolve(i));
                e.set_vertex(Side::Right, Vertex::tentative(corners[j]).resolve(j));
                e
            })
            .collect();
        // listed out of order, and the ring comes back clockwise-corrected
        let region = closed_region(&[2, 0, 1], &edges);
        assert_eq!(region.len(), 3);
        assert_eq!(Polygon::new(region).winding(), Winding::CounterClockwise);
    }
}
