//! Circle-event queue
//!
//! Pending halfedges are hashed into buckets over the y-range of the sites.
//! Each bucket is a singly linked list kept sorted by (ystar, vertex x), and
//! extraction always comes from the lowest non-empty bucket.

use crate::beach_line::bucket_index;
use crate::geom::Point;
use crate::halfedge::{HalfedgeArena, HalfedgeIdx};

pub(crate) struct EventQueue {
    buckets: Vec<Option<HalfedgeIdx>>,
    count: usize,
    min_bucket: usize,
    ymin: f64,
    deltay: f64,
}

impl EventQueue {
    pub fn new(ymin: f64, deltay: f64, sqrt_nsites: usize) -> Self {
        Self {
            buckets: vec![None; (4 * sqrt_nsites).max(1)],
            count: 0,
            min_bucket: 0,
            ymin,
            deltay,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.count
    }

    fn bucket(&self, ystar: f64) -> usize {
        bucket_index(ystar, self.ymin, self.deltay, self.buckets.len() as isize) as usize
    }

    /// Queue `he`, which must carry a pending vertex
    pub fn insert(&mut self, arena: &mut HalfedgeArena, he: HalfedgeIdx) {
        let ystar = arena[he].ystar;
        let x = arena[he].vertex.map_or(f64::NEG_INFINITY, |v| v.x());
        let bucket = self.bucket(ystar);
        if bucket < self.min_bucket {
            self.min_bucket = bucket;
        }

        let mut previous: Option<HalfedgeIdx> = None;
        let mut next = self.buckets[bucket];
        while let Some(n) = next {
            let n_ystar = arena[n].ystar;
            let n_x = arena[n].vertex.map_or(f64::NEG_INFINITY, |v| v.x());
            if ystar > n_ystar || (ystar == n_ystar && x > n_x) {
                previous = Some(n);
                next = arena[n].next_in_queue;
            } else {
                break;
            }
        }

        arena[he].next_in_queue = next;
        match previous {
            Some(p) => arena[p].next_in_queue = Some(he),
            None => self.buckets[bucket] = Some(he),
        }
        self.count += 1;
    }

    /// Drop `he` from the queue and clear its pending vertex.
    /// Halfedges without a pending vertex are not queued and are left alone.
    pub fn remove(&mut self, arena: &mut HalfedgeArena, he: HalfedgeIdx) {
        if arena[he].vertex.is_none() {
            return;
        }
        let bucket = self.bucket(arena[he].ystar);

        let mut previous: Option<HalfedgeIdx> = None;
        let mut current = self.buckets[bucket];
        while let Some(c) = current {
            if c == he {
                let after = arena[c].next_in_queue;
                match previous {
                    Some(p) => arena[p].next_in_queue = after,
                    None => self.buckets[bucket] = after,
                }
                self.count -= 1;
                break;
            }
            previous = Some(c);
            current = arena[c].next_in_queue;
        }

        arena[he].vertex = None;
        arena[he].next_in_queue = None;
    }

    /// Advance `min_bucket` to the first bucket holding an event
    fn adjust_min_bucket(&mut self) {
        while self.min_bucket < self.buckets.len() - 1 && self.buckets[self.min_bucket].is_none() {
            self.min_bucket += 1;
        }
    }

    /// Position of the next circle event: the pending vertex's x and its ystar
    pub fn min(&mut self, arena: &HalfedgeArena) -> Option<Point> {
        if self.is_empty() {
            return None;
        }
        self.adjust_min_bucket();
        let he = self.buckets[self.min_bucket]?;
        let x = arena[he].vertex.map_or(f64::NAN, |v| v.x());
        Some(Point::new(x, arena[he].ystar))
    }

    /// Remove and return the halfedge with the smallest event position.
    /// Its pending vertex is kept for the caller to resolve.
    pub fn extract_min(&mut self, arena: &mut HalfedgeArena) -> Option<HalfedgeIdx> {
        if self.is_empty() {
            return None;
        }
        self.adjust_min_bucket();
        let he = self.buckets[self.min_bucket]?;
        self.buckets[self.min_bucket] = arena[he].next_in_queue;
        arena[he].next_in_queue = None;
        self.count -= 1;
        Some(he)
    }
}
