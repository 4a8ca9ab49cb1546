use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::constants::player;
use crate::util::vec2::Vec2;

/// Unique player identifier (opaque session key)
pub type PlayerId = Uuid;

/// Axis-aligned movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Direction {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Unit step vector in screen coordinates (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::UP,
            Direction::Right => Vec2::RIGHT,
            Direction::Down => Vec2::DOWN,
            Direction::Left => Vec2::LEFT,
        }
    }
}

/// Token handed out when a player goes dormant, claimable on rejoin
///
/// CSPRNG-generated so a token cannot be guessed to hijack a parked
/// identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReconnectToken([u8; 32]);

impl ReconnectToken {
    /// Generate a new cryptographically secure token
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Try to create from a slice
    pub fn try_from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; 32] = slice.try_into().ok()?;
        Some(Self(bytes))
    }
}

/// A live actor in the arena
///
/// Mutated only by the simulation loop and by command application; both
/// run on the same execution context, so no interior locking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Position in world units (continuous, not grid-aligned)
    pub position: Vec2,
    /// Current movement heading; meaningful only while `is_moving`
    pub direction: Direction,
    /// Whether the player advances one step per tick
    pub is_moving: bool,
    /// Transient display message, empty when none is active
    pub message: String,
    /// Bumped every time the message changes; stale expiry notices
    /// carrying an older generation are ignored
    #[serde(skip)]
    pub message_generation: u64,
    /// Hidden from every other player's visible set
    pub invisible: bool,
    /// Visibility radius in world units
    pub render_distance: f32,
    pub id: PlayerId,
    pub name: String,
    pub color: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: String, color: u32, render_distance: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            direction: Direction::default(),
            is_moving: false,
            message: String::new(),
            message_generation: 0,
            invisible: false,
            render_distance,
            id,
            name,
            color,
        }
    }

    /// Set the transient message, truncated to the display cap
    ///
    /// Returns the new message generation so a deferred expiry can be
    /// scheduled against exactly this message.
    pub fn set_message(&mut self, text: &str) -> u64 {
        self.message = text.chars().take(player::MESSAGE_MAX_CHARS).collect();
        self.message_generation += 1;
        self.message_generation
    }

    /// Clear the transient message and invalidate any pending expiry
    pub fn clear_message(&mut self) {
        self.message.clear();
        self.message_generation += 1;
    }

    pub fn start_moving(&mut self, direction: Direction) {
        self.direction = direction;
        self.is_moving = true;
    }

    pub fn stop(&mut self) {
        self.is_moving = false;
    }
}
