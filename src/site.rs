//! Sites: the input points of the diagram
//!
//! Represents one input point with its region-defining edges, a scalar weight
//! and a caller-defined payload.

use crate::edge::Edge;
use crate::error::{Result, VoronoiError};
use crate::geom::{compare_y_then_x, Circle, Point, Rect, Side};
use crate::region;
use crate::reorder::{Criterion, EdgeReorderer};

/// A single input point of the diagram
///
/// # Type Parameters
///
/// * `P` - Payload carried opaquely through the construction. The geometry
///   never inspects or compares it.
///
/// # Indices
///
/// Once the diagram is built, `index` equals the site's rank in sweep order
/// (sorted by y, then x) and is the handle used by edges and triangles.
#[derive(Debug, Clone)]
pub struct Site<P> {
    coord: Point,
    index: usize,
    weight: f64,
    payload: P,
    /// Edges bounding this site's region, in traversal order once the sweep has finished
    edges: Vec<usize>,
    /// Which end of each edge in `edges` comes first in the traversal
    edge_orientations: Vec<Side>,
}

impl<P> Site<P> {
    pub fn new(coord: Point, index: usize, weight: f64, payload: P) -> Self {
        Self {
            coord,
            index,
            weight,
            payload,
            edges: Vec::new(),
            edge_orientations: Vec::new(),
        }
    }

    #[inline]
    pub fn coord(&self) -> Point {
        self.coord
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.coord.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.coord.y
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Scalar weight for downstream consumers; unused by the geometry
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    #[inline]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    #[inline]
    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    /// Indices of the edges bounding this site's region
    #[inline]
    pub fn edges(&self) -> &[usize] {
        &self.edges
    }

    #[inline]
    pub fn edge_orientations(&self) -> &[Side] {
        &self.edge_orientations
    }

    #[inline]
    pub fn distance(&self, p: Point) -> f64 {
        self.coord.distance(p)
    }

    pub(crate) fn add_edge(&mut self, edge: usize) {
        self.edges.push(edge);
        self.edge_orientations.clear();
    }

    /// Put the edges into traversal order around the site. If the edges
    /// cannot be stitched into one path they are left as they are.
    pub(crate) fn order_edges(&mut self, all_edges: &[Edge]) {
        if self.edges.is_empty() {
            return;
        }
        let reorderer = EdgeReorderer::open_ended(&self.edges, all_edges, Criterion::Vertex);
        if reorderer.is_empty() {
            log::trace!("site {}: edges could not be ordered", self.index);
            return;
        }
        let (edges, orientations) = reorderer.into_parts();
        self.edges = edges;
        self.edge_orientations = orientations;
    }

    /// Indices of the sites sharing an edge with this one, in traversal order
    pub fn neighbor_sites(&self, all_edges: &[Edge]) -> Vec<usize> {
        self.edges
            .iter()
            .filter_map(|&e| all_edges[e].other_site(self.index))
            .collect()
    }

    /// The edge whose sites are closest together
    pub fn nearest_edge(&self, all_edges: &[Edge]) -> Option<usize> {
        self.edges.iter().copied().min_by(|&a, &b| {
            all_edges[a]
                .sites_distance()
                .total_cmp(&all_edges[b].sites_distance())
        })
    }

    /// Largest circle centered on the site that fits in its region.
    /// Radius 0 when the region is unbounded.
    pub fn inscribed_circle(&self, all_edges: &[Edge]) -> Circle {
        if self.is_unbounded(all_edges) {
            return Circle::new(self.coord, 0.0);
        }
        let radius = self
            .nearest_edge(all_edges)
            .map_or(0.0, |e| all_edges[e].sites_distance() * 0.5);
        Circle::new(self.coord, radius)
    }

    /// True when one of the site's edges runs off to infinity, which makes
    /// the site a convex hull site with an unbounded region
    pub fn is_unbounded(&self, all_edges: &[Edge]) -> bool {
        self.edges
            .iter()
            .any(|&e| all_edges[e].is_part_of_convex_hull())
    }

    /// Region polygon clipped to `bounds`, counter-clockwise
    pub fn region(&self, all_edges: &[Edge], bounds: &Rect) -> Vec<Point> {
        region::clipped_region(self.coord, &self.edges, all_edges, bounds)
    }
}

/// The sweep's source of site events
///
/// Sites must be sorted (by y, then x) before they can be consumed in order.
#[derive(Debug, Clone)]
pub struct SiteList<P> {
    sites: Vec<Site<P>>,
    current: usize,
    sorted: bool,
}

impl<P> Default for SiteList<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> SiteList<P> {
    pub fn new() -> Self {
        Self {
            sites: Vec::new(),
            current: 0,
            sorted: false,
        }
    }

    /// Append a site, returning the new length
    pub fn push(&mut self, site: Site<P>) -> usize {
        self.sorted = false;
        self.sites.push(site);
        self.sites.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Sort by y, then x, and renumber every site to its new rank
    pub fn sort(&mut self) {
        self.sites.sort_by(|a, b| compare_y_then_x(a.coord, b.coord));
        for (rank, site) in self.sites.iter_mut().enumerate() {
            site.index = rank;
        }
        self.current = 0;
        self.sorted = true;
    }

    /// Index of the next site in sweep order, or `None` when exhausted
    ///
    /// # Errors
    ///
    /// Returns `SitesNotSorted` if the list has not been sorted
    pub fn next(&mut self) -> Result<Option<usize>> {
        if !self.sorted {
            return Err(VoronoiError::SitesNotSorted);
        }
        if self.current < self.sites.len() {
            self.current += 1;
            Ok(Some(self.current - 1))
        } else {
            Ok(None)
        }
    }

    /// Bounding box of the sites, sorting the list first if needed
    pub fn sites_bounds(&mut self) -> Rect {
        if !self.sorted {
            self.sort();
        }
        if self.sites.is_empty() {
            return Rect::new(0.0, 0.0, 0.0, 0.0);
        }
        let xmin = self.sites.iter().map(|s| s.x()).fold(f64::MAX, f64::min);
        let xmax = self.sites.iter().map(|s| s.x()).fold(f64::MIN, f64::max);
        // sorted on y
        let ymin = self.sites[0].y();
        let ymax = self.sites[self.sites.len() - 1].y();
        Rect::new(xmin, ymin, xmax - xmin, ymax - ymin)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Site<P>> {
        self.sites.get(index)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Site<P>> {
        self.sites.get_mut(index)
    }

    #[inline]
    pub(crate) fn point(&self, index: usize) -> Point {
        self.sites[index].coord
    }

    pub fn site_coordinates(&self) -> Vec<Point> {
        self.sites.iter().map(|s| s.coord).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Site<P>> {
        self.sites.iter()
    }

    pub fn into_sites(self) -> Vec<Site<P>> {
        self.sites
    }
}
