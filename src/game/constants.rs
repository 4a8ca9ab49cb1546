/// Simulation timing and movement constants
pub mod sim {
    /// Simulation tick rate in Hz
    pub const TICK_RATE: u32 = 30;
    /// Delta time per tick in seconds
    pub const DT: f32 = 1.0 / 30.0;
    /// Tick duration in milliseconds
    pub const TICK_DURATION_MS: u64 = 1000 / TICK_RATE as u64;
    /// World units moved per tick by a moving player
    pub const STEP_SIZE: f32 = 1.0;
}

/// Player-related constants
pub mod player {
    /// Maximum display name length in characters
    pub const NAME_MAX_CHARS: usize = 10;
    /// Maximum transient message length in characters
    pub const MESSAGE_MAX_CHARS: usize = 20;
    /// Seconds a transient message stays visible before expiring
    pub const MESSAGE_TTL_SECS: u64 = 5;
    /// Default visibility radius in world units
    pub const RENDER_DISTANCE: f32 = 500.0;
    /// Spawn coordinates are drawn uniformly from `0..SPAWN_EXTENT`
    pub const SPAWN_EXTENT: f32 = 1000.0;
    /// Maximum live players per arena
    pub const MAX_PER_ARENA: usize = 100;
}

/// Map processing constants
pub mod map {
    /// Default world units per grid cell when tracing a boundary
    pub const DEFAULT_SCALE: f32 = 5.0;
}
