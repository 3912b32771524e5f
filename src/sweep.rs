//! Fortune's sweep
//!
//! Consumes sites in (y, x) order and interleaves them with circle events
//! from the queue. Site events split the arc above the new site with a pair
//! of halfedges of one new bisector; circle events retire an arc, fix a
//! vertex and start the bisector of the arc's two neighbours. Every edge is
//! clipped to the bounds once the queue has drained.

use crate::beach_line::BeachLine;
use crate::edge::Edge;
use crate::error::Result;
use crate::event_queue::EventQueue;
use crate::geom::{compare_y_then_x, Point, Rect, Side};
use crate::halfedge::{HalfedgeArena, HalfedgeIdx};
use crate::site::SiteList;
use crate::vertex::{self, Vertex};

/// Everything a sweep produces besides the per-site edge lists
#[derive(Debug, Default)]
pub(crate) struct SweepOutput {
    pub edges: Vec<Edge>,
    /// Permanent vertices, indexed by creation order
    pub vertices: Vec<Point>,
    /// Delaunay triangles as site-index triples
    pub triangles: Vec<[usize; 3]>,
}

/// State shared by the event handlers of one sweep
struct Sweep {
    arena: HalfedgeArena,
    beach: BeachLine,
    queue: EventQueue,
    out: SweepOutput,
    bottom_most: usize,
}

impl Sweep {
    /// Site on the left of the arc boundary `he`; the lowest site for the left sentinel
    fn left_region(&self, he: HalfedgeIdx) -> usize {
        let h = &self.arena[he];
        match h.edge {
            Some(e) => self.out.edges[e].site(h.side),
            None => self.bottom_most,
        }
    }

    fn right_region(&self, he: HalfedgeIdx) -> usize {
        let h = &self.arena[he];
        match h.edge {
            Some(e) => self.out.edges[e].site(h.side.other()),
            None => self.bottom_most,
        }
    }

    fn intersect(&self, he0: HalfedgeIdx, he1: HalfedgeIdx) -> Option<Point> {
        let (h0, h1) = (&self.arena[he0], &self.arena[he1]);
        let (e0, e1) = (h0.edge?, h1.edge?);
        vertex::intersect(&self.out.edges[e0], h0.side, &self.out.edges[e1], h1.side)
    }

    /// Queue (or re-queue) the circle event of `he` at `v`
    fn schedule(&mut self, he: HalfedgeIdx, v: Point, site: Point) {
        self.queue.remove(&mut self.arena, he);
        let h = &mut self.arena[he];
        h.vertex = Some(Vertex::tentative(v));
        h.ystar = v.y + site.distance(v);
        self.queue.insert(&mut self.arena, he);
    }

    fn bisect<P>(&mut self, sites: &mut SiteList<P>, s0: usize, s1: usize) -> usize {
        let idx = self.out.edges.len();
        self.out
            .edges
            .push(Edge::bisecting(s0, sites.point(s0), s1, sites.point(s1)));
        for s in [s0, s1] {
            if let Some(site) = sites.get_mut(s) {
                site.add_edge(idx);
            }
        }
        idx
    }

    fn site_event<P>(&mut self, sites: &mut SiteList<P>, site: usize) {
        let p = sites.point(site);
        let lbnd = self.beach.left_neighbor(p, &self.arena, &self.out.edges);
        let rbnd = self.arena[lbnd].right;
        let bottom = self.right_region(lbnd);
        let edge = self.bisect(sites, bottom, site);

        let bisector = self.arena.create(edge, Side::Left);
        self.beach.insert(&mut self.arena, lbnd, bisector);
        if let Some(v) = self.intersect(lbnd, bisector) {
            self.schedule(lbnd, v, p);
        }

        let lbnd = bisector;
        let bisector = self.arena.create(edge, Side::Right);
        self.beach.insert(&mut self.arena, lbnd, bisector);
        if let Some(v) = self.intersect(bisector, rbnd) {
            self.schedule(bisector, v, p);
        }
    }

    fn circle_event<P>(&mut self, sites: &mut SiteList<P>, lbnd: HalfedgeIdx) {
        let Some(pending) = self.arena[lbnd].vertex else {
            return;
        };
        let llbnd = self.arena[lbnd].left;
        let rbnd = self.arena[lbnd].right;
        let rrbnd = self.arena[rbnd].right;
        let mut bottom = self.left_region(lbnd);
        let mut top = self.right_region(rbnd);
        let middle = self.right_region(lbnd);
        self.out.triangles.push([bottom, middle, top]);

        let v = pending.resolve(self.out.vertices.len());
        self.out.vertices.push(v.point());
        for he in [lbnd, rbnd] {
            let h = &self.arena[he];
            if let Some(e) = h.edge {
                self.out.edges[e].set_vertex(h.side, v);
            }
        }

        self.beach.remove(&mut self.arena, lbnd);
        self.queue.remove(&mut self.arena, rbnd);
        self.beach.remove(&mut self.arena, rbnd);

        let mut side = Side::Left;
        if sites.point(bottom).y > sites.point(top).y {
            std::mem::swap(&mut bottom, &mut top);
            side = Side::Right;
        }
        let edge = self.bisect(sites, bottom, top);
        let bisector = self.arena.create(edge, side);
        self.beach.insert(&mut self.arena, llbnd, bisector);
        self.out.edges[edge].set_vertex(side.other(), v);

        let bottom_point = sites.point(bottom);
        if let Some(p) = self.intersect(llbnd, bisector) {
            self.schedule(llbnd, p, bottom_point);
        }
        if let Some(p) = self.intersect(bisector, rrbnd) {
            self.schedule(bisector, p, bottom_point);
        }
    }
}

/// Build the diagram of `sites`, clipping every edge to `bounds`.
///
/// Sorts the list, renumbering sites to their sweep rank, and fills each
/// site's edge list in traversal order.
pub(crate) fn run<P>(sites: &mut SiteList<P>, bounds: &Rect) -> Result<SweepOutput> {
    sites.sort();
    let data_bounds = sites.sites_bounds();
    let sqrt_nsites = ((sites.len() + 4) as f64).sqrt() as usize;

    let Some(bottom_most) = sites.next()? else {
        return Ok(SweepOutput::default());
    };

    let mut arena = HalfedgeArena::default();
    let beach = BeachLine::new(data_bounds.x, data_bounds.width, sqrt_nsites, &mut arena);
    let mut sweep = Sweep {
        arena,
        beach,
        queue: EventQueue::new(data_bounds.y, data_bounds.height, sqrt_nsites),
        out: SweepOutput::default(),
        bottom_most,
    };

    let mut new_site = sites.next()?;
    loop {
        let next_circle = sweep.queue.min(&sweep.arena);
        match (new_site, next_circle) {
            (Some(site), circle)
                if circle.map_or(true, |c| compare_y_then_x(sites.point(site), c).is_lt()) =>
            {
                sweep.site_event(sites, site);
                new_site = sites.next()?;
            }
            (_, Some(_)) => {
                if let Some(lbnd) = sweep.queue.extract_min(&mut sweep.arena) {
                    sweep.circle_event(sites, lbnd);
                }
            }
            _ => break,
        }
    }

    let mut out = sweep.out;
    for edge in &mut out.edges {
        edge.clip(bounds);
    }
    for index in 0..sites.len() {
        if let Some(site) = sites.get_mut(index) {
            site.order_edges(&out.edges);
        }
    }

    log::debug!(
        "sweep finished: {} sites, {} edges, {} vertices",
        sites.len(),
        out.edges.len(),
        out.vertices.len()
    );
    Ok(out)
}
