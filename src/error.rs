//! Error types for diagram construction and queries

use std::fmt;

/// Errors that can occur while configuring or building a diagram
///
/// Geometric degeneracies (parallel bisectors, empty regions, sites outside
/// the bounds) are not errors; they show up as absent results instead.
#[derive(Debug, Clone, PartialEq)]
pub enum VoronoiError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// Input points or payloads were rejected
    InvalidInput(String),
    /// Ordered site iteration was requested before the site list was sorted
    SitesNotSorted,
}

impl fmt::Display for VoronoiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoronoiError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            VoronoiError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            VoronoiError::SitesNotSorted => write!(f, "sites have not been sorted"),
        }
    }
}

impl std::error::Error for VoronoiError {}

/// Result type alias for diagram operations
pub type Result<T> = std::result::Result<T, VoronoiError>;
