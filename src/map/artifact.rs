//! Persisted map artifacts.
//!
//! Two JSON documents are produced once (offline) and consumed at
//! session start: a 2D grid of 0/1 integers (`pixelMap.json`) and a flat
//! `[x1, y1, x2, y2, ...]` vertex array (`vertices.json`).

use std::fs;
use std::path::Path;

use crate::map::{MapError, OccupancyGrid, Polygon};

/// Load an occupancy grid artifact
pub fn load_grid(path: impl AsRef<Path>) -> Result<OccupancyGrid, MapError> {
    let bytes = fs::read(path)?;
    let rows: Vec<Vec<u8>> = serde_json::from_slice(&bytes)?;
    OccupancyGrid::from_rows(&rows)
}

/// Write an occupancy grid artifact
pub fn save_grid(path: impl AsRef<Path>, grid: &OccupancyGrid) -> Result<(), MapError> {
    let json = serde_json::to_vec(&grid.to_rows())?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a polygon artifact (flat vertex array)
pub fn load_polygon(path: impl AsRef<Path>) -> Result<Polygon, MapError> {
    let bytes = fs::read(path)?;
    let flat: Vec<f32> = serde_json::from_slice(&bytes)?;
    Ok(Polygon::from_flat(&flat))
}

/// Write a polygon artifact (flat vertex array)
pub fn save_polygon(path: impl AsRef<Path>, polygon: &Polygon) -> Result<(), MapError> {
    let json = serde_json::to_vec(&polygon.to_flat())?;
    fs::write(path, json)?;
    Ok(())
}
