//! Arena room: one simulation instance owning its playfield polygon and
//! player store.
//!
//! The room is the boundary the external session layer talks to: joins,
//! leaves, raw command tokens in; per-tick views out. Everything here is
//! synchronous single-writer state; [`runner`] serializes calls and tick
//! advancement onto one tokio task.

pub mod runner;

use rand::Rng;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::SimConfig;
use crate::game::command::Command;
use crate::game::constants::player as player_constants;
use crate::game::entity::{Player, PlayerId, ReconnectToken};
use crate::game::store::{PlayerStore, StoreError};
use crate::game::tick::{advance, TickEvent, PlayerView};
use crate::map::Polygon;
use crate::util::vec2::Vec2;

/// Options supplied by the session layer on join
#[derive(Debug, Clone, Default)]
pub struct JoinOptions {
    pub name: String,
    pub color: u32,
    /// Claim a dormant identity instead of spawning fresh
    pub reconnect_token: Option<ReconnectToken>,
}

/// Handle for a scheduled message expiry
///
/// Carries the generation observed when the message was set; an expiry
/// whose generation no longer matches has been superseded and must not
/// clear anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageExpiry {
    pub player_id: PlayerId,
    pub generation: u64,
}

/// Result of one simulation tick, consumed by the replication layer
#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick: u64,
    pub views: Vec<PlayerView>,
    pub events: Vec<TickEvent>,
}

/// Room errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum RoomError {
    #[error("room is full")]
    RoomFull,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One arena: fixed playfield geometry plus the live simulation state
pub struct ArenaRoom {
    id: Uuid,
    config: SimConfig,
    polygon: Polygon,
    store: PlayerStore,
    tick: u64,
}

impl ArenaRoom {
    pub fn new(polygon: Polygon, config: SimConfig) -> Self {
        let id = Uuid::new_v4();
        info!(room_id = %id, vertices = polygon.len(), "arena room created");
        Self {
            id,
            config,
            polygon,
            store: PlayerStore::new(),
            tick: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Playfield boundary, shared read-only with the replication layer
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Flat `[x1, y1, ...]` vertex array for client-side rendering
    pub fn flat_vertices(&self) -> Vec<f32> {
        self.polygon.to_flat()
    }

    pub fn player_count(&self) -> usize {
        self.store.live_count()
    }

    pub fn is_full(&self) -> bool {
        self.store.live_count() >= self.config.max_players
    }

    pub fn get_player(&self, player_id: PlayerId) -> Option<&Player> {
        self.store.get(player_id)
    }

    /// Add a player, either reviving a dormant identity via token or
    /// spawning fresh at a random offset
    pub fn on_join(&mut self, player_id: PlayerId, options: JoinOptions) -> Result<(), RoomError> {
        if self.is_full() {
            return Err(RoomError::RoomFull);
        }

        if let Some(token) = options.reconnect_token.as_ref() {
            if self.store.reconnect(token, player_id).is_some() {
                info!(%player_id, "player reconnected");
                return Ok(());
            }
            debug!(%player_id, "reconnect token not recognized, joining fresh");
        }

        let name: String = options
            .name
            .chars()
            .take(player_constants::NAME_MAX_CHARS)
            .collect();

        let mut player = Player::new(player_id, name, options.color, self.config.render_distance);
        let mut rng = rand::thread_rng();
        player.position = Vec2::new(
            rng.gen_range(0.0..self.config.spawn_extent),
            rng.gen_range(0.0..self.config.spawn_extent),
        );

        info!(%player_id, name = %player.name, "player joined");
        self.store.join(player)?;
        Ok(())
    }

    /// Remove a player permanently
    pub fn on_leave(&mut self, player_id: PlayerId) -> Option<Player> {
        let player = self.store.leave(player_id);
        if player.is_some() {
            info!(%player_id, "player left");
        }
        player
    }

    /// Park a player for later reconnection; the returned token claims
    /// the parked identity
    pub fn park(&mut self, player_id: PlayerId) -> Option<ReconnectToken> {
        let token = self.store.move_to_dormant(player_id);
        if token.is_some() {
            info!(%player_id, "player parked for reconnection");
        }
        token
    }

    /// Apply a raw command token from the session layer
    ///
    /// Lenient by design: unknown tokens and commands for unknown
    /// players are dropped. Returns an expiry handle when a message was
    /// set, so the caller can schedule its reset.
    pub fn apply_command(&mut self, player_id: PlayerId, raw: &str) -> Option<MessageExpiry> {
        let Some(command) = Command::parse(raw) else {
            debug!(%player_id, raw, "ignoring unknown command");
            return None;
        };
        let Some(player) = self.store.get_mut(player_id) else {
            debug!(%player_id, "ignoring command for unknown player");
            return None;
        };

        match command {
            Command::Move(direction) => player.start_moving(direction),
            Command::Stop => player.stop(),
            Command::Camo => player.invisible = true,
            Command::Clear => {
                player.invisible = false;
                player.clear_message();
            }
            Command::Print(text) => {
                let generation = player.set_message(&text);
                debug!(%player_id, message = %player.message, "message set");
                return Some(MessageExpiry {
                    player_id,
                    generation,
                });
            }
        }
        None
    }

    /// Clear a message if its expiry is still current
    ///
    /// A stale generation means the message was superseded or the player
    /// left and rejoined; either way the expiry is a no-op.
    pub fn expire_message(&mut self, expiry: MessageExpiry) {
        if let Some(player) = self.store.get_mut(expiry.player_id) {
            if player.message_generation == expiry.generation {
                player.clear_message();
            }
        }
    }

    /// Advance the simulation one step
    pub fn tick(&mut self) -> TickReport {
        self.tick += 1;
        let output = advance(&mut self.store, &self.polygon, &self.config);
        TickReport {
            tick: self.tick,
            views: output.views,
            events: output.events,
        }
    }
}
