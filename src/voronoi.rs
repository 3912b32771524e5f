//! The finished diagram and its query surface

use std::collections::{HashMap, HashSet};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{validate_bounds, VoronoiConfig, VoronoiConfigBuilder};
use crate::edge::Edge;
use crate::error::{Result, VoronoiError};
use crate::generation;
use crate::geom::{Circle, Point, Rect, Segment};
use crate::region;
use crate::reorder::{Criterion, EdgeReorderer};
use crate::site::{Site, SiteList};
use crate::sweep;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// Exact-coordinate key; `-0.0` and `0.0` map to the same key
fn location_key(p: Point) -> (u64, u64) {
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

/// A Voronoi diagram and its dual Delaunay triangulation, clipped to a rectangle
///
/// Generic over a per-site payload `P` that the geometry carries along but
/// never inspects.
///
/// Sites are stored in sweep order (sorted by y, then x), and a site's
/// index is its position in that order. Edges, vertices and triangles refer
/// to sites by that index.
///
/// # Examples
///
/// ```
/// use fortune_voronoi::*;
///
/// let points = vec![
///     Point::new(20.0, 20.0),
///     Point::new(80.0, 30.0),
///     Point::new(40.0, 80.0),
/// ];
/// let voronoi = Voronoi::new(&points, Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
///
/// assert_eq!(voronoi.site_count(), 3);
/// assert_eq!(voronoi.vertices().len(), 1);
/// for p in voronoi.site_coordinates() {
///     assert!(voronoi.region(p).len() >= 3);
/// }
/// ```
#[derive(Clone)]
pub struct Voronoi<P = ()> {
    config: VoronoiConfig,
    bounds: Rect,
    sites: Vec<Site<P>>,
    edges: Vec<Edge>,
    vertices: Vec<Point>,
    triangles: Vec<[usize; 3]>,
    sites_by_location: HashMap<(u64, u64), usize>,
    #[cfg(feature = "spatial-index")]
    spatial_index: Option<SpatialIndex>,
}

impl Voronoi<()> {
    /// Build the diagram of `points` clipped to `bounds`
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for empty or non-finite bounds and
    /// `InvalidInput` for non-finite coordinates
    pub fn new(points: &[Point], bounds: Rect) -> Result<Self> {
        let config = VoronoiConfigBuilder::new().bounds(bounds)?.build()?;
        Self::with_config(points, config)
    }

    /// Build the diagram clipped to the bounding box of `points`
    pub fn from_points(points: &[Point]) -> Result<Self> {
        Self::with_config(points, VoronoiConfigBuilder::new().build()?)
    }

    /// Build the diagram using the bounds, seed and weight range of `config`
    pub fn with_config(points: &[Point], config: VoronoiConfig) -> Result<Self> {
        Self::build(points.iter().map(|&p| (p, ())), config)
    }

    /// Place `config.site_count` random sites in `config.bounds`, relax them
    /// `config.lloyd_iterations` times and build the diagram
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration has no bounds
    ///
    /// ```
    /// use fortune_voronoi::*;
    ///
    /// let config = VoronoiConfigBuilder::new()
    ///     .seed(1)
    ///     .bounds(Rect::new(0.0, 0.0, 100.0, 100.0))
    ///     .unwrap()
    ///     .site_count(50)
    ///     .lloyd_iterations(2)
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    /// let voronoi = Voronoi::generate(config).unwrap();
    /// assert_eq!(voronoi.site_count(), 50);
    /// ```
    pub fn generate(config: VoronoiConfig) -> Result<Self> {
        let points = generation::generate_sites(&config)?;
        Self::with_config(&points, config)
    }
}

impl<P> Voronoi<P> {
    /// Build the diagram with one payload per point
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `payloads` and `points` differ in length
    pub fn with_payloads(points: &[Point], payloads: Vec<P>, config: VoronoiConfig) -> Result<Self> {
        if payloads.len() != points.len() {
            return Err(VoronoiError::InvalidInput(format!(
                "{} payloads for {} points",
                payloads.len(),
                points.len()
            )));
        }
        Self::build(points.iter().copied().zip(payloads), config)
    }

    fn build<I>(input: I, config: VoronoiConfig) -> Result<Self>
    where
        I: IntoIterator<Item = (Point, P)>,
    {
        let input: Vec<(Point, P)> = input.into_iter().collect();
        if let Some((p, _)) = input.iter().find(|(p, _)| !p.is_finite()) {
            return Err(VoronoiError::InvalidInput(format!(
                "site coordinates must be finite (got {})",
                p
            )));
        }

        let bounds = match config.bounds {
            Some(bounds) => {
                validate_bounds(&bounds)?;
                bounds
            }
            None => {
                let points: Vec<Point> = input.iter().map(|(p, _)| *p).collect();
                Rect::from_points(&points)
            }
        };

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed as u64);
        let max_weight = config.max_weight.max(1);
        let mut seen = HashSet::with_capacity(input.len());
        let mut list = SiteList::new();
        for (i, (p, payload)) in input.into_iter().enumerate() {
            if !seen.insert(location_key(p)) {
                log::warn!("dropping duplicate site {} at {}", i, p);
                continue;
            }
            let weight = rng.gen_range(0..max_weight) as f64;
            list.push(Site::new(p, i, weight, payload));
        }

        let out = sweep::run(&mut list, &bounds)?;
        let sites = list.into_sites();
        let sites_by_location = sites
            .iter()
            .map(|s| (location_key(s.coord()), s.index()))
            .collect();

        #[cfg(feature = "spatial-index")]
        let spatial_index = (!sites.is_empty()).then(|| {
            let coords: Vec<Point> = sites.iter().map(|s| s.coord()).collect();
            SpatialIndex::new(&coords)
        });

        Ok(Self {
            config,
            bounds,
            sites,
            edges: out.edges,
            vertices: out.vertices,
            triangles: out.triangles,
            sites_by_location,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    #[inline]
    pub fn config(&self) -> &VoronoiConfig {
        &self.config
    }

    /// The clipping rectangle
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// All sites in sweep order
    #[inline]
    pub fn sites(&self) -> &[Site<P>] {
        &self.sites
    }

    #[inline]
    pub fn site(&self, index: usize) -> Option<&Site<P>> {
        self.sites.get(index)
    }

    /// The site at exactly `p`
    ///
    /// Matching is by exact floating-point equality. Pass back coordinates as
    /// returned by [`Voronoi::site_coordinates`].
    pub fn site_at(&self, p: Point) -> Option<&Site<P>> {
        self.site_index_at(p).and_then(|i| self.sites.get(i))
    }

    pub fn site_index_at(&self, p: Point) -> Option<usize> {
        self.sites_by_location.get(&location_key(p)).copied()
    }

    /// Site coordinates in sweep order
    pub fn site_coordinates(&self) -> Vec<Point> {
        self.sites.iter().map(|s| s.coord()).collect()
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Permanent vertices in creation order
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Delaunay triangles as triples of site indices
    #[inline]
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Region of the site at `p`, clipped to the bounds and counter-clockwise.
    /// Empty if no site is at `p`.
    pub fn region(&self, p: Point) -> Vec<Point> {
        self.site_at(p)
            .map(|s| s.region(&self.edges, &self.bounds))
            .unwrap_or_default()
    }

    /// Region of every site, in sweep order
    pub fn regions(&self) -> Vec<Vec<Point>> {
        self.sites
            .iter()
            .map(|s| s.region(&self.edges, &self.bounds))
            .collect()
    }

    /// The unclipped region of the site at `p` through its own vertices.
    /// Empty if the region is unbounded or no site is at `p`.
    pub fn closed_region(&self, p: Point) -> Vec<Point> {
        self.site_at(p)
            .map(|s| region::closed_region(s.edges(), &self.edges))
            .unwrap_or_default()
    }

    /// Coordinates of the sites whose regions border the site at `p`
    pub fn neighbor_sites_for_site(&self, p: Point) -> Vec<Point> {
        self.site_at(p)
            .map(|s| {
                s.neighbor_sites(&self.edges)
                    .into_iter()
                    .map(|n| self.sites[n].coord())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Largest inscribed circle of every site, in sweep order
    pub fn circles(&self) -> Vec<Circle> {
        self.sites
            .iter()
            .map(|s| s.inscribed_circle(&self.edges))
            .collect()
    }

    /// Visible edges of the site at `p`, clipped to the bounds
    pub fn voronoi_boundary_for_site(&self, p: Point) -> Vec<Segment> {
        self.site_at(p)
            .map(|s| {
                s.edges()
                    .iter()
                    .filter_map(|&e| self.edges[e].voronoi_segment())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every visible edge, clipped to the bounds
    pub fn voronoi_diagram(&self) -> Vec<Segment> {
        self.edges.iter().filter_map(Edge::voronoi_segment).collect()
    }

    /// Delaunay edges from the site at `p` to each of its neighbours
    pub fn delaunay_lines_for_site(&self, p: Point) -> Vec<Segment> {
        self.site_at(p)
            .map(|s| {
                s.edges()
                    .iter()
                    .map(|&e| self.edges[e].delaunay_line())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every Delaunay edge
    pub fn delaunay_lines(&self) -> Vec<Segment> {
        self.edges.iter().map(Edge::delaunay_line).collect()
    }

    fn hull_edges(&self) -> Vec<usize> {
        (0..self.edges.len())
            .filter(|&e| self.edges[e].is_part_of_convex_hull())
            .collect()
    }

    /// Delaunay edges along the convex hull, unordered
    pub fn hull(&self) -> Vec<Segment> {
        self.hull_edges()
            .into_iter()
            .map(|e| self.edges[e].delaunay_line())
            .collect()
    }

    /// Convex hull sites in traversal order
    pub fn hull_points_in_order(&self) -> Vec<Point> {
        let hull = self.hull_edges();
        if hull.is_empty() {
            return Vec::new();
        }
        let reorderer = EdgeReorderer::new(&hull, &self.edges, Criterion::Site);
        let (ordered, orientations) = reorderer.into_parts();

        let mut points: Vec<Point> = ordered
            .iter()
            .zip(&orientations)
            .map(|(&e, &side)| self.edges[e].site_point(side))
            .collect();

        // an open chain (collinear sites) also needs its far end
        if let (Some(&e), Some(&side)) = (ordered.last(), orientations.last()) {
            let end = self.edges[e].site_point(side.other());
            if points.first() != Some(&end) {
                points.push(end);
            }
        }
        points
    }

    /// Indices of the sites within `hops` region crossings of `center`,
    /// including `center` itself. Empty if `center` is out of range.
    pub fn sites_within_hops(&self, center: usize, hops: usize) -> Vec<usize> {
        if center >= self.sites.len() {
            return vec![];
        }

        let mut visited = HashSet::new();
        let mut current = vec![center];
        visited.insert(center);

        for _ in 0..hops {
            let mut next = Vec::new();
            for &site in &current {
                for neighbor in self.sites[site].neighbor_sites(&self.edges) {
                    if visited.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            current = next;
        }

        let mut result: Vec<usize> = visited.into_iter().collect();
        result.sort_unstable();
        result
    }

    /// Index of the site whose region contains `p`
    #[cfg(feature = "spatial-index")]
    pub fn nearest_site(&self, p: Point) -> Option<usize> {
        self.spatial_index.as_ref().map(|index| index.find_nearest(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{Polygon, Winding};

    fn square() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    fn sample() -> Voronoi {
        let points = vec![
            Point::new(10.0, 10.0),
            Point::new(60.0, 15.0),
            Point::new(30.0, 45.0),
            Point::new(85.0, 55.0),
            Point::new(15.0, 80.0),
            Point::new(55.0, 90.0),
        ];
        Voronoi::new(&points, square()).unwrap()
    }

    #[test]
    fn test_sites_are_in_sweep_order() {
        let voronoi = sample();
        let coords = voronoi.site_coordinates();
        for pair in coords.windows(2) {
            assert!(pair[0].y <= pair[1].y);
        }
        for (i, site) in voronoi.sites().iter().enumerate() {
            assert_eq!(site.index(), i);
            assert_eq!(voronoi.site_index_at(site.coord()), Some(i));
        }
    }

    #[test]
    fn test_regions_tile_the_bounds() {
        let voronoi = sample();
        let total: f64 = voronoi
            .regions()
            .into_iter()
            .map(|r| {
                let polygon = Polygon::new(r);
                assert_eq!(polygon.winding(), Winding::CounterClockwise);
                polygon.area()
            })
            .sum();
        assert!((total - square().area()).abs() < 1e-6);
    }

    #[test]
    fn test_region_contains_its_site() {
        let voronoi = sample();
        for p in voronoi.site_coordinates() {
            let region = voronoi.region(p);
            let n = region.len();
            assert!(n >= 3);
            for i in 0..n {
                let (a, b) = (region[i], region[(i + 1) % n]);
                assert!((b - a).perp_dot(p - a) >= -1e-9);
            }
        }
    }

    #[test]
    fn test_unknown_coordinate_yields_nothing() {
        let voronoi = sample();
        let nowhere = Point::new(1.5, 1.5);
        assert!(voronoi.site_at(nowhere).is_none());
        assert!(voronoi.region(nowhere).is_empty());
        assert!(voronoi.neighbor_sites_for_site(nowhere).is_empty());
        assert!(voronoi.voronoi_boundary_for_site(nowhere).is_empty());
    }

    #[test]
    fn test_neighbors_are_symmetric() {
        let voronoi = sample();
        for p in voronoi.site_coordinates() {
            for n in voronoi.neighbor_sites_for_site(p) {
                assert!(voronoi.neighbor_sites_for_site(n).contains(&p));
            }
        }
    }

    #[test]
    fn test_sites_within_hops() {
        let voronoi = sample();
        assert_eq!(voronoi.sites_within_hops(0, 0), vec![0]);
        let one_hop = voronoi.sites_within_hops(0, 1);
        assert_eq!(one_hop.len(), 1 + voronoi.sites()[0].edges().len());
        let all = voronoi.sites_within_hops(0, 10);
        assert_eq!(all, (0..voronoi.site_count()).collect::<Vec<_>>());
        assert!(voronoi.sites_within_hops(99, 1).is_empty());
    }

    #[test]
    fn test_negative_zero_matches_zero() {
        let voronoi = Voronoi::new(
            &[Point::new(0.0, 0.0), Point::new(50.0, 50.0)],
            square(),
        )
        .unwrap();
        assert!(voronoi.site_at(Point::new(-0.0, -0.0)).is_some());
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let voronoi = Voronoi::new(
            &[
                Point::new(10.0, 10.0),
                Point::new(90.0, 90.0),
                Point::new(10.0, 10.0),
            ],
            square(),
        )
        .unwrap();
        assert_eq!(voronoi.site_count(), 2);
        assert_eq!(voronoi.edges().len(), 1);
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let result = Voronoi::new(&[Point::new(f64::NAN, 1.0)], square());
        assert!(matches!(result, Err(VoronoiError::InvalidInput(_))));
    }

    #[test]
    fn test_payloads_follow_their_sites() {
        let points = vec![Point::new(70.0, 70.0), Point::new(20.0, 10.0)];
        let config = VoronoiConfigBuilder::new()
            .seed(5)
            .bounds(square())
            .unwrap()
            .build()
            .unwrap();
        let voronoi = Voronoi::with_payloads(&points, vec!["far", "near"], config).unwrap();
        assert_eq!(voronoi.site_at(points[0]).unwrap().payload(), &"far");
        assert_eq!(voronoi.site_at(points[1]).unwrap().payload(), &"near");
        // sorted: the lower site comes first
        assert_eq!(voronoi.site(0).unwrap().payload(), &"near");
    }

    #[test]
    fn test_weights_are_seeded_and_in_range() {
        let points: Vec<Point> = (0..20)
            .map(|i| Point::new((i * 7 % 19) as f64 * 5.0, i as f64 * 4.5))
            .collect();
        let config = VoronoiConfigBuilder::new()
            .seed(11)
            .max_weight(10)
            .unwrap()
            .build()
            .unwrap();
        let a = Voronoi::with_config(&points, config).unwrap();
        let b = Voronoi::with_config(&points, config).unwrap();
        for (sa, sb) in a.sites().iter().zip(b.sites()) {
            assert_eq!(sa.weight(), sb.weight());
            assert!((0.0..10.0).contains(&sa.weight()));
        }
    }

    #[test]
    fn test_bounds_default_to_points_extent() {
        let voronoi = Voronoi::from_points(&[
            Point::new(-5.0, 2.0),
            Point::new(5.0, 12.0),
            Point::new(0.0, 20.0),
        ])
        .unwrap();
        assert_eq!(voronoi.bounds(), Rect::new(-5.0, 2.0, 10.0, 18.0));
    }

    #[test]
    fn test_generate_requires_bounds() {
        let config = VoronoiConfigBuilder::new().seed(1).build().unwrap();
        assert!(matches!(
            Voronoi::generate(config),
            Err(VoronoiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_hull_sites_have_zero_radius_circles() {
        let voronoi = sample();
        let edges = voronoi.edges();
        for (site, circle) in voronoi.sites().iter().zip(voronoi.circles()) {
            if site.edges().iter().any(|&e| edges[e].is_part_of_convex_hull()) {
                assert!(site.is_unbounded(edges));
                assert_eq!(circle.radius, 0.0, "site {}", site.index());
            } else {
                assert!(circle.radius > 0.0, "site {}", site.index());
            }
        }
    }

    #[test]
    fn test_circles_fit_inside_regions() {
        let voronoi = sample();
        let circles = voronoi.circles();
        assert_eq!(circles.len(), voronoi.site_count());
        for (site, circle) in voronoi.sites().iter().zip(&circles) {
            assert_eq!(circle.center, site.coord());
            for n in voronoi.neighbor_sites_for_site(site.coord()) {
                assert!(circle.radius <= site.distance(n) * 0.5 + 1e-9);
            }
        }
    }

    #[test]
    fn test_hull_of_a_square_with_a_center() {
        let voronoi = Voronoi::new(
            &[
                Point::new(10.0, 10.0),
                Point::new(90.0, 10.0),
                Point::new(50.0, 45.0),
                Point::new(90.0, 90.0),
                Point::new(10.0, 90.0),
            ],
            square(),
        )
        .unwrap();
        let hull = voronoi.hull_points_in_order();
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Point::new(50.0, 45.0)));

        // only the center owns a bounded region
        for (site, circle) in voronoi.sites().iter().zip(voronoi.circles()) {
            if site.coord() == Point::new(50.0, 45.0) {
                assert_eq!(circle.radius, 2825f64.sqrt() * 0.5);
            } else {
                assert_eq!(circle.radius, 0.0);
            }
        }
        assert_eq!(voronoi.hull().len(), 4);
        // the center site's region is bounded by four finite vertices
        assert_eq!(voronoi.closed_region(Point::new(50.0, 45.0)).len(), 4);
        assert!(voronoi.closed_region(Point::new(10.0, 10.0)).is_empty());
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_nearest_site_owns_the_point() {
        let voronoi = sample();
        let query = Point::new(58.0, 20.0);
        let index = voronoi.nearest_site(query).unwrap();
        assert_eq!(voronoi.site(index).unwrap().coord(), Point::new(60.0, 15.0));
    }
}
