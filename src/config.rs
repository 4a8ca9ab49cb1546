use std::time::Duration;

use crate::game::constants::{player, sim};

/// What happens when a move would leave the playable region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfBoundsPolicy {
    /// Stop the player in place
    #[default]
    Stop,
    /// Remove the player from the live set entirely
    Expel,
}

/// Simulation configuration for one arena instance
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Simulation tick rate in Hz
    pub tick_rate: u32,
    /// World units moved per tick by a moving player
    pub step_size: f32,
    /// Default visibility radius assigned to new players
    pub render_distance: f32,
    /// Players spawn with random coordinates in `0..spawn_extent`
    pub spawn_extent: f32,
    /// How long a transient chat message stays visible
    pub message_ttl: Duration,
    /// Policy applied when a move is rejected by the boundary
    pub out_of_bounds: OutOfBoundsPolicy,
    /// Maximum live players per arena
    pub max_players: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: sim::TICK_RATE,
            step_size: sim::STEP_SIZE,
            render_distance: player::RENDER_DISTANCE,
            spawn_extent: player::SPAWN_EXTENT,
            message_ttl: Duration::from_secs(player::MESSAGE_TTL_SECS),
            out_of_bounds: OutOfBoundsPolicy::Stop,
            max_players: player::MAX_PER_ARENA,
        }
    }
}

impl SimConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(rate) = std::env::var("TICK_RATE") {
            if let Ok(parsed) = rate.parse::<u32>() {
                if parsed > 0 && parsed <= 240 {
                    config.tick_rate = parsed;
                } else {
                    tracing::warn!("TICK_RATE must be 1-240, using default");
                }
            } else {
                tracing::warn!("Invalid TICK_RATE '{}', using default", rate);
            }
        }

        if let Ok(step) = std::env::var("STEP_SIZE") {
            if let Ok(parsed) = step.parse::<f32>() {
                if parsed > 0.0 {
                    config.step_size = parsed;
                } else {
                    tracing::warn!("STEP_SIZE must be > 0, using default");
                }
            } else {
                tracing::warn!("Invalid STEP_SIZE '{}', using default", step);
            }
        }

        if let Ok(distance) = std::env::var("RENDER_DISTANCE") {
            if let Ok(parsed) = distance.parse::<f32>() {
                if parsed > 0.0 {
                    config.render_distance = parsed;
                } else {
                    tracing::warn!("RENDER_DISTANCE must be > 0, using default");
                }
            } else {
                tracing::warn!("Invalid RENDER_DISTANCE '{}', using default", distance);
            }
        }

        if let Ok(policy) = std::env::var("OUT_OF_BOUNDS_POLICY") {
            match policy.as_str() {
                "stop" => config.out_of_bounds = OutOfBoundsPolicy::Stop,
                "expel" => config.out_of_bounds = OutOfBoundsPolicy::Expel,
                other => {
                    tracing::warn!("Unknown OUT_OF_BOUNDS_POLICY '{}', using default", other);
                }
            }
        }

        if let Ok(max) = std::env::var("MAX_PLAYERS") {
            if let Ok(parsed) = max.parse::<usize>() {
                if parsed > 0 {
                    config.max_players = parsed;
                } else {
                    tracing::warn!("MAX_PLAYERS must be > 0, using default");
                }
            } else {
                tracing::warn!("Invalid MAX_PLAYERS '{}', using default", max);
            }
        }

        config
    }

    /// Wall-clock duration of one tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.tick_rate))
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_rate == 0 {
            return Err("tick_rate cannot be 0".to_string());
        }
        if self.step_size <= 0.0 {
            return Err("step_size must be positive".to_string());
        }
        if self.render_distance <= 0.0 {
            return Err("render_distance must be positive".to_string());
        }
        if self.max_players == 0 {
            return Err("max_players must be at least 1".to_string());
        }
        Ok(())
    }
}
