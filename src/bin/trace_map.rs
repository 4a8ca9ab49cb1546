//! Offline map conversion: occupancy grid artifact to polygon artifact.
//!
//! Usage: trace-map [grid.json] [scale] [vertices.json]
//!
//! Reads a 2D grid of 0/1 integers, traces the playable region's
//! perimeter, and writes the flat vertex array consumed at session
//! start. Decoding a bitmap into the grid happens upstream.

use anyhow::Context;
use tracing::{info, warn};

use pixel_arena::game::constants::map as map_constants;
use pixel_arena::map::{artifact, extract};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let mut args = std::env::args().skip(1);
    let grid_path = args.next().unwrap_or_else(|| "assets/pixelMap.json".to_string());
    let scale: f32 = match args.next() {
        Some(raw) => raw.parse().context("scale must be a number")?,
        None => map_constants::DEFAULT_SCALE,
    };
    let out_path = args.next().unwrap_or_else(|| "assets/vertices.json".to_string());

    info!("Tracing {} at scale {}", grid_path, scale);

    let grid = artifact::load_grid(&grid_path)
        .with_context(|| format!("reading grid artifact {}", grid_path))?;
    info!("Grid dimensions: {}x{}", grid.width(), grid.height());

    let result = extract(&grid, scale)?;
    if result.truncated {
        warn!("trace hit the safety bound; writing partial perimeter");
    }

    artifact::save_polygon(&out_path, &result.polygon)
        .with_context(|| format!("writing polygon artifact {}", out_path))?;
    info!("Wrote {} vertices to {}", result.polygon.len(), out_path);

    Ok(())
}
