//! Planar Voronoi diagrams and Delaunay triangulations by Fortune's sweep
//!
//! Given a set of 2D sites and a bounding rectangle, builds the bisecting
//! edges, the diagram vertices and a clipped, counter-clockwise region
//! polygon for every site, in O(n log n) expected time.
//!
//! # Quick Start
//!
//! ```rust
//! use fortune_voronoi::*;
//!
//! let config = VoronoiConfigBuilder::new()
//!     .seed(42)
//!     .bounds(Rect::new(0.0, 0.0, 800.0, 600.0))
//!     .unwrap()
//!     .site_count(100)
//!     .lloyd_iterations(2)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let voronoi = Voronoi::generate(config).unwrap();
//!
//! for p in voronoi.site_coordinates() {
//!     let region = voronoi.region(p);
//!     assert!(region.len() >= 3);
//! }
//! println!("{} edges, {} vertices", voronoi.edges().len(), voronoi.vertices().len());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): nearest-site lookups through a KD-tree
//! - `serde`: serialization for the configuration and geometry types

// Modules
pub mod config;
pub mod edge;
pub mod error;
pub mod generation;
pub mod geom;
pub mod reorder;
pub mod site;
pub mod vertex;
pub mod voronoi;

mod beach_line;
mod event_queue;
mod halfedge;
mod region;
mod sweep;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use config::{VoronoiConfig, VoronoiConfigBuilder};
pub use edge::Edge;
pub use error::{Result, VoronoiError};
pub use generation::LloydOptions;
pub use geom::{Circle, Point, Polygon, Rect, Segment, Side, Winding};
pub use reorder::{Criterion, EdgeReorderer};
pub use site::{Site, SiteList};
pub use vertex::{Vertex, VertexRef};
pub use voronoi::Voronoi;

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;
