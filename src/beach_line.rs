//! The beach line: halfedges ordered left to right
//!
//! A doubly linked list between two permanent sentinels, plus a hash over
//! x-buckets that remembers a recently found halfedge per bucket so that
//! locating the arc above a new site starts close to the answer.

use crate::edge::Edge;
use crate::geom::Point;
use crate::halfedge::{is_left_of, HalfedgeArena, HalfedgeIdx};

pub(crate) struct BeachLine {
    xmin: f64,
    deltax: f64,
    hash: Vec<Option<HalfedgeIdx>>,
    left_end: HalfedgeIdx,
    right_end: HalfedgeIdx,
}

impl BeachLine {
    pub fn new(xmin: f64, deltax: f64, sqrt_nsites: usize, arena: &mut HalfedgeArena) -> Self {
        let hash_size = (2 * sqrt_nsites).max(2);

        let left_end = arena.create_sentinel();
        let right_end = arena.create_sentinel();
        arena[left_end].right = right_end;
        arena[right_end].left = left_end;

        let mut hash = vec![None; hash_size];
        hash[0] = Some(left_end);
        hash[hash_size - 1] = Some(right_end);

        Self {
            xmin,
            deltax,
            hash,
            left_end,
            right_end,
        }
    }

    #[cfg(test)]
    pub fn left_end(&self) -> HalfedgeIdx {
        self.left_end
    }

    #[cfg(test)]
    pub fn right_end(&self) -> HalfedgeIdx {
        self.right_end
    }

    /// Insert `new` immediately to the right of `lb`
    pub fn insert(&self, arena: &mut HalfedgeArena, lb: HalfedgeIdx, new: HalfedgeIdx) {
        let rb = arena[lb].right;
        arena[new].left = lb;
        arena[new].right = rb;
        arena[rb].left = new;
        arena[lb].right = new;
    }

    /// Unlink `he`. Hash entries still pointing at it are pruned lazily.
    pub fn remove(&self, arena: &mut HalfedgeArena, he: HalfedgeIdx) {
        let (l, r) = (arena[he].left, arena[he].right);
        arena[l].right = r;
        arena[r].left = l;
        arena[he].left = he;
        arena[he].right = he;
        arena[he].deleted = true;
    }

    /// The rightmost halfedge that is still left of `p`
    pub fn left_neighbor(&mut self, p: Point, arena: &HalfedgeArena, edges: &[Edge]) -> HalfedgeIdx {
        let size = self.hash.len() as isize;
        let bucket = bucket_index(p.x, self.xmin, self.deltax, size);

        let mut he = match self.get_hash(bucket, arena) {
            Some(he) => he,
            None => (1..size)
                .find_map(|i| {
                    self.get_hash(bucket - i, arena)
                        .or_else(|| self.get_hash(bucket + i, arena))
                })
                .unwrap_or(self.left_end),
        };

        let left_of = |he: HalfedgeIdx| match arena[he].edge {
            Some(e) => is_left_of(&edges[e], arena[he].side, p),
            None => false,
        };

        if he == self.left_end || (he != self.right_end && left_of(he)) {
            loop {
                he = arena[he].right;
                if he == self.right_end || !left_of(he) {
                    break;
                }
            }
            he = arena[he].left;
        } else {
            loop {
                he = arena[he].left;
                if he == self.left_end || left_of(he) {
                    break;
                }
            }
        }

        if bucket > 0 && bucket < size - 1 {
            self.hash[bucket as usize] = Some(he);
        }
        he
    }

    /// Hash entry for `bucket`, clearing it if it points at a removed halfedge
    fn get_hash(&mut self, bucket: isize, arena: &HalfedgeArena) -> Option<HalfedgeIdx> {
        if bucket < 0 || bucket >= self.hash.len() as isize {
            return None;
        }
        let slot = &mut self.hash[bucket as usize];
        match *slot {
            Some(he) if arena[he].deleted => {
                *slot = None;
                None
            }
            entry => entry,
        }
    }
}

/// Bucket of `value` when `[min, min + delta]` is split into `size` buckets,
/// clamped to the valid range. A zero-width range maps everything to bucket 0.
pub(crate) fn bucket_index(value: f64, min: f64, delta: f64, size: isize) -> isize {
    let raw = if delta > 0.0 {
        ((value - min) / delta * size as f64) as isize
    } else {
        0
    };
    raw.clamp(0, size - 1)
}
