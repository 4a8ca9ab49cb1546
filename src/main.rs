use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use pixel_arena::config::SimConfig;
use pixel_arena::game::constants::map as map_constants;
use pixel_arena::map::{artifact, extract, Polygon};
use pixel_arena::room::{runner, ArenaRoom};
use pixel_arena::util::vec2::Vec2;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    info!("Pixel Arena server core v{}", env!("CARGO_PKG_VERSION"));

    let config = SimConfig::load_or_default();
    config.validate().map_err(anyhow::Error::msg)?;
    info!(
        "Configuration loaded: tick_rate={}, step_size={}, policy={:?}",
        config.tick_rate, config.step_size, config.out_of_bounds
    );

    let polygon = load_playfield(&config)?;
    info!("Playfield polygon: {} vertices", polygon.len());

    let tick_rate = config.tick_rate;
    let room = ArenaRoom::new(polygon, config);
    let (report_tx, mut report_rx) = mpsc::channel(64);
    let handle = runner::spawn(room, report_tx);

    // Stand-in for the replication layer: drain reports, log a heartbeat.
    let drain = tokio::spawn(async move {
        let heartbeat_ticks = u64::from(tick_rate) * 10;
        while let Some(report) = report_rx.recv().await {
            if report.tick % heartbeat_ticks == 0 {
                debug!(
                    tick = report.tick,
                    players = report.views.len(),
                    "simulation running"
                );
            }
        }
    });

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    handle.shutdown().await;
    drain.abort();
    info!("Server stopped");

    Ok(())
}

/// Build the playfield polygon from whichever map artifact is configured
///
/// `MAP_VERTICES_PATH` wins; otherwise `MAP_GRID_PATH` is traced at
/// `MAP_SCALE`; otherwise a square the size of the spawn area is used so
/// the core can run without assets.
fn load_playfield(config: &SimConfig) -> anyhow::Result<Polygon> {
    if let Ok(path) = std::env::var("MAP_VERTICES_PATH") {
        info!("Loading polygon artifact from {}", path);
        return Ok(artifact::load_polygon(&path)?);
    }

    if let Ok(path) = std::env::var("MAP_GRID_PATH") {
        let scale = std::env::var("MAP_SCALE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(map_constants::DEFAULT_SCALE);
        info!("Tracing grid artifact from {} at scale {}", path, scale);

        let grid = artifact::load_grid(&path)?;
        let result = extract(&grid, scale)?;
        if result.truncated {
            warn!("perimeter trace was truncated; playfield may be partial");
        }
        return Ok(result.polygon);
    }

    warn!(
        "No map artifact configured; using a {0}x{0} square playfield",
        config.spawn_extent
    );
    let extent = config.spawn_extent;
    Ok(Polygon::new(vec![
        Vec2::ZERO,
        Vec2::new(extent, 0.0),
        Vec2::new(extent, extent),
        Vec2::new(0.0, extent),
    ]))
}
