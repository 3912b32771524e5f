//! Edge reordering
//!
//! Stitches an unordered set of edges into one traversal path by matching
//! shared ends. Edges around one site share vertices; edges along the convex
//! hull share sites.

use std::collections::VecDeque;

use crate::edge::Edge;
use crate::geom::Side;

/// What two consecutive edges must have in common
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// Consecutive edges share a vertex (the boundary of one region)
    Vertex,
    /// Consecutive edges share a site (the convex hull)
    Site,
}

/// The identity of an edge end, as compared during stitching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    Site(usize),
    Vertex(usize),
    /// An unresolved end that may be joined to another unresolved end
    Open,
    /// An unresolved end that makes the whole reorder fail
    AtInfinity,
}

/// Edges of a path in traversal order, with the end each one is entered from
#[derive(Debug, Clone, Default)]
pub struct EdgeReorderer {
    edges: Vec<usize>,
    orientations: Vec<Side>,
}

impl EdgeReorderer {
    /// Order `edge_ids` by `criterion`. The result is empty if any edge has
    /// an end at infinity or the edges do not form a single path.
    pub fn new(edge_ids: &[usize], edges: &[Edge], criterion: Criterion) -> Self {
        Self::with_anchors(edge_ids, |e, side| anchor(&edges[e], side, criterion, Anchor::AtInfinity))
    }

    /// Like [`EdgeReorderer::new`], but unresolved ends are treated as one
    /// shared point instead of failing. Used to order the edges of regions
    /// that are only closed by the clipping rectangle.
    pub fn open_ended(edge_ids: &[usize], edges: &[Edge], criterion: Criterion) -> Self {
        Self::with_anchors(edge_ids, |e, side| anchor(&edges[e], side, criterion, Anchor::Open))
    }

    pub(crate) fn with_anchors<F>(edge_ids: &[usize], anchor_of: F) -> Self
    where
        F: Fn(usize, Side) -> Anchor,
    {
        let Some((&first_edge, rest)) = edge_ids.split_first() else {
            return Self::default();
        };

        let mut first = anchor_of(first_edge, Side::Left);
        let mut last = anchor_of(first_edge, Side::Right);
        if first == Anchor::AtInfinity || last == Anchor::AtInfinity {
            return Self::default();
        }

        let mut ordered = VecDeque::from([(first_edge, Side::Left)]);
        let mut pending: Vec<usize> = rest.to_vec();

        while !pending.is_empty() {
            let before = pending.len();
            let mut i = 0;
            while i < pending.len() {
                let e = pending[i];
                let left = anchor_of(e, Side::Left);
                let right = anchor_of(e, Side::Right);
                if left == Anchor::AtInfinity || right == Anchor::AtInfinity {
                    return Self::default();
                }

                if left == last {
                    last = right;
                    ordered.push_back((e, Side::Left));
                } else if right == first {
                    first = left;
                    ordered.push_front((e, Side::Left));
                } else if left == first {
                    first = right;
                    ordered.push_front((e, Side::Right));
                } else if right == last {
                    last = left;
                    ordered.push_back((e, Side::Right));
                } else {
                    i += 1;
                    continue;
                }
                pending.swap_remove(i);
            }

            if pending.len() == before {
                log::trace!("{} edges could not be joined to the path", pending.len());
                return Self::default();
            }
        }

        let (edges, orientations): (Vec<usize>, Vec<Side>) = ordered.into_iter().unzip();
        Self { edges, orientations }
    }

    #[inline]
    pub fn edges(&self) -> &[usize] {
        &self.edges
    }

    #[inline]
    pub fn orientations(&self) -> &[Side] {
        &self.orientations
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn into_parts(self) -> (Vec<usize>, Vec<Side>) {
        (self.edges, self.orientations)
    }
}

fn anchor(edge: &Edge, side: Side, criterion: Criterion, unresolved: Anchor) -> Anchor {
    match criterion {
        Criterion::Site => Anchor::Site(edge.site(side)),
        Criterion::Vertex => match edge.vertex(side).and_then(|v| v.index()) {
            Some(index) => Anchor::Vertex(index),
            None => unresolved,
        },
    }
}
