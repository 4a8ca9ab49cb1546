//! The simulation step: movement validation and per-player views.

use serde::Serialize;
use tracing::debug;

use crate::config::{OutOfBoundsPolicy, SimConfig};
use crate::game::entity::{Direction, PlayerId};
use crate::game::store::PlayerStore;
use crate::game::visibility::{visible_set, VisibleSet};
use crate::map::Polygon;
use crate::util::vec2::Vec2;

/// Events produced by a single tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    /// Player was removed by the hard out-of-bounds policy
    Expelled { player_id: PlayerId },
}

/// One player's replicable state after a tick, plus what it can see
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub position: Vec2,
    pub direction: Direction,
    pub is_moving: bool,
    pub message: String,
    pub visible: VisibleSet,
}

/// Full tick result handed to the replication layer
#[derive(Debug, Clone, Default)]
pub struct TickOutput {
    pub views: Vec<PlayerView>,
    pub events: Vec<TickEvent>,
}

/// Advance every live player one step and rebuild visibility
///
/// The containment oracle is the only authority on movement: a candidate
/// position outside the polygon is never committed. What happens to the
/// rejected player depends on the configured out-of-bounds policy.
pub fn advance(store: &mut PlayerStore, polygon: &Polygon, config: &SimConfig) -> TickOutput {
    let mut events = Vec::new();
    let mut expelled: Vec<PlayerId> = Vec::new();

    for player in store.live_mut().values_mut() {
        if !player.is_moving {
            continue;
        }

        let candidate = player.position + player.direction.unit() * config.step_size;

        if polygon.contains(candidate) {
            player.position = candidate;
        } else {
            player.stop();
            if config.out_of_bounds == OutOfBoundsPolicy::Expel {
                expelled.push(player.id);
            }
        }
    }

    for player_id in expelled {
        store.leave(player_id);
        debug!(%player_id, "player expelled at boundary");
        events.push(TickEvent::Expelled { player_id });
    }

    let views = store
        .iter_live()
        .map(|(_, player)| PlayerView {
            id: player.id,
            position: player.position,
            direction: player.direction,
            is_moving: player.is_moving,
            message: player.message.clone(),
            visible: visible_set(player, store.live()),
        })
        .collect();

    TickOutput { views, events }
}
