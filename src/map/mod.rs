//! Playfield geometry: occupancy grid decoding, perimeter tracing, and
//! point-in-polygon containment.
//!
//! The boundary pipeline runs once per arena: an occupancy grid (decoded
//! offline from a bitmap) is traced into an ordered polygon, and that
//! polygon is the authoritative containment oracle for every movement
//! check afterwards.

pub mod artifact;
pub mod grid;
pub mod polygon;
pub mod trace;

pub use grid::OccupancyGrid;
pub use polygon::Polygon;
pub use trace::{extract, TraceResult};

/// Map processing errors
///
/// Nothing here is fatal: degenerate input yields an empty region and the
/// caller decides what to do with it.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// Grid is empty, ragged, or violates the tracing precondition
    #[error("degenerate map input: {0}")]
    DegenerateInput(&'static str),
    /// Persisted artifact could not be parsed
    #[error("artifact parse error: {0}")]
    Artifact(#[from] serde_json::Error),
    /// Persisted artifact could not be read or written
    #[error("artifact io error: {0}")]
    Io(#[from] std::io::Error),
}
