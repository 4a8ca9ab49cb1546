use hashbrown::HashMap;

use crate::game::entity::{Player, PlayerId, ReconnectToken};

/// Live and dormant player sets for one arena instance
///
/// An identity exists in at most one of the two maps at a time. All
/// operations are synchronous and assume single-writer access from the
/// owning simulation context.
#[derive(Debug, Default)]
pub struct PlayerStore {
    live: HashMap<PlayerId, Player>,
    dormant: HashMap<ReconnectToken, Player>,
}

/// Store errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("player id already present")]
    DuplicateId,
}

impl PlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn dormant_count(&self) -> usize {
        self.dormant.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Add a player to the live set
    pub fn join(&mut self, player: Player) -> Result<(), StoreError> {
        if self.live.contains_key(&player.id) {
            return Err(StoreError::DuplicateId);
        }
        self.live.insert(player.id, player);
        Ok(())
    }

    /// Remove a player from the live set entirely
    pub fn leave(&mut self, id: PlayerId) -> Option<Player> {
        self.live.remove(&id)
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.live.get(&id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.live.get_mut(&id)
    }

    pub fn iter_live(&self) -> impl Iterator<Item = (&PlayerId, &Player)> {
        self.live.iter()
    }

    pub fn live(&self) -> &HashMap<PlayerId, Player> {
        &self.live
    }

    pub fn live_mut(&mut self) -> &mut HashMap<PlayerId, Player> {
        &mut self.live
    }

    /// Park a live player for later reconnection
    ///
    /// Returns the token that claims the parked identity, or `None` if
    /// the player is not live.
    pub fn move_to_dormant(&mut self, id: PlayerId) -> Option<ReconnectToken> {
        let player = self.live.remove(&id)?;
        let token = ReconnectToken::generate();
        self.dormant.insert(token.clone(), player);
        Some(token)
    }

    /// Revive a dormant player under a new identity
    ///
    /// Position, name, color, camo state, and render distance carry
    /// over; the transient message is reset. The player ends up live and
    /// never exists in both maps.
    pub fn reconnect(&mut self, token: &ReconnectToken, new_id: PlayerId) -> Option<&Player> {
        if self.live.contains_key(&new_id) {
            return None;
        }
        let mut player = self.dormant.remove(token)?;
        player.id = new_id;
        player.clear_message();
        player.stop();
        self.live.insert(new_id, player);
        self.live.get(&new_id)
    }
}
