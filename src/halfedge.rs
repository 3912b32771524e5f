//! Halfedges: oriented occurrences of an edge on the beach line
//!
//! Halfedges live in a per-sweep arena and refer to each other by index.
//! The beach line links them left/right; the circle-event queue threads its
//! own singly linked bucket lists through `next_in_queue`.

use std::ops::{Index, IndexMut};

use crate::edge::Edge;
use crate::geom::{Point, Side};
use crate::vertex::Vertex;

/// Index into a [`HalfedgeArena`]
pub(crate) type HalfedgeIdx = usize;

#[derive(Debug, Clone)]
pub(crate) struct Halfedge {
    /// `None` for the two beach-line sentinels
    pub edge: Option<usize>,
    pub side: Side,
    /// Beach-line neighbours. The sentinels link to themselves at the open end.
    pub left: HalfedgeIdx,
    pub right: HalfedgeIdx,
    pub next_in_queue: Option<HalfedgeIdx>,
    /// Pending circle-event vertex
    pub vertex: Option<Vertex>,
    /// The vertex's y-coordinate in the transformed space: vertex.y plus its
    /// distance to the site, i.e. the sweep position of the circle event
    pub ystar: f64,
    /// Set once the halfedge has been taken off the beach line
    pub deleted: bool,
}

/// Arena owning every halfedge of one sweep
#[derive(Debug, Default)]
pub(crate) struct HalfedgeArena {
    items: Vec<Halfedge>,
}

impl HalfedgeArena {
    pub fn create(&mut self, edge: usize, side: Side) -> HalfedgeIdx {
        self.push(Some(edge), side)
    }

    pub fn create_sentinel(&mut self) -> HalfedgeIdx {
        self.push(None, Side::Left)
    }

    fn push(&mut self, edge: Option<usize>, side: Side) -> HalfedgeIdx {
        let idx = self.items.len();
        self.items.push(Halfedge {
            edge,
            side,
            left: idx,
            right: idx,
            next_in_queue: None,
            vertex: None,
            ystar: 0.0,
            deleted: false,
        });
        idx
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl Index<HalfedgeIdx> for HalfedgeArena {
    type Output = Halfedge;

    #[inline]
    fn index(&self, idx: HalfedgeIdx) -> &Halfedge {
        &self.items[idx]
    }
}

impl IndexMut<HalfedgeIdx> for HalfedgeArena {
    #[inline]
    fn index_mut(&mut self, idx: HalfedgeIdx) -> &mut Halfedge {
        &mut self.items[idx]
    }
}

/// Whether the arc boundary traced by `edge` (seen from `side`) lies to the
/// left of `p` at the sweep position `p.y`.
///
/// Decides by sign tests where possible and only falls back to comparing
/// squared distances, so no square roots are taken.
pub(crate) fn is_left_of(edge: &Edge, side: Side, p: Point) -> bool {
    let top_site = edge.site_point(Side::Right);
    let right_of_site = p.x > top_site.x;
    if right_of_site && side == Side::Left {
        return true;
    }
    if !right_of_site && side == Side::Right {
        return false;
    }

    let (a, b, c) = (edge.a(), edge.b(), edge.c());
    let above;
    if a == 1.0 {
        let dyp = p.y - top_site.y;
        let dxp = p.x - top_site.x;
        let mut fast = false;
        let mut is_above;
        if (!right_of_site && b < 0.0) || (right_of_site && b >= 0.0) {
            is_above = dyp >= b * dxp;
            fast = is_above;
        } else {
            is_above = p.x + p.y * b > c;
            if b < 0.0 {
                is_above = !is_above;
            }
            if !is_above {
                fast = true;
            }
        }
        if !fast {
            let dxs = top_site.x - edge.site_point(Side::Left).x;
            is_above = b * (dxp * dxp - dyp * dyp)
                < dxs * dyp * (1.0 + 2.0 * dxp / dxs + b * b);
            if b < 0.0 {
                is_above = !is_above;
            }
        }
        above = is_above;
    } else {
        // b == 1.0
        let yl = c - a * p.x;
        let t1 = p.y - yl;
        let t2 = p.x - top_site.x;
        let t3 = yl - top_site.y;
        above = t1 * t1 > t2 * t2 + t3 * t3;
    }

    if side == Side::Left {
        above
    } else {
        !above
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_links_new_halfedges_to_themselves() {
        let mut arena = HalfedgeArena::default();
        let s = arena.create_sentinel();
        let h = arena.create(4, Side::Right);
        assert_eq!(arena.len(), 2);
        assert!(arena[s].edge.is_none());
        assert_eq!(arena[h].edge, Some(4));
        assert_eq!(arena[h].left, h);
        assert_eq!(arena[h].right, h);
        assert!(!arena[h].deleted);
    }

    #[test]
    fn test_is_left_of_vertical_bisector() {
        // sites side by side at the same height: the breakpoint is the line x = 50
        let edge = Edge::bisecting(0, Point::new(40.0, 0.0), 1, Point::new(60.0, 0.0));
        let query_left = Point::new(45.0, 10.0);
        let query_right = Point::new(55.0, 10.0);

        assert!(is_left_of(&edge, Side::Left, query_right));
        assert!(!is_left_of(&edge, Side::Left, query_left));
        // right of the right site, a left halfedge is always to the left
        assert!(is_left_of(&edge, Side::Left, Point::new(70.0, 10.0)));
        // left of the right site, a right halfedge never is
        assert!(!is_left_of(&edge, Side::Right, query_right));
    }

    #[test]
    fn test_is_left_of_horizontal_bisector() {
        // stacked sites: the two breakpoints straddle the upper site
        let edge = Edge::bisecting(0, Point::new(50.0, 0.0), 1, Point::new(50.0, 20.0));
        // far to the right of the upper site, the right-hand breakpoint is to the left
        assert!(is_left_of(&edge, Side::Right, Point::new(200.0, 25.0)));
        // just right of the upper site, the right-hand breakpoint is still further right
        assert!(!is_left_of(&edge, Side::Right, Point::new(51.0, 25.0)));
        // left of the upper site the left-hand breakpoint can never be left of p
        assert!(!is_left_of(&edge, Side::Right, Point::new(49.0, 25.0)));
    }
}
