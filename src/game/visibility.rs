//! Per-player visibility filtering.
//!
//! Recomputed from scratch every tick for every observer; incremental
//! diffing against the previous tick is the replication layer's concern.

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::game::entity::{Player, PlayerId};

/// Inline capacity for a visible-id list; arenas rarely have more than
/// this many mutually visible players
pub const VISIBLE_INLINE: usize = 16;

/// Identities the observer should currently see
pub type VisibleSet = SmallVec<[PlayerId; VISIBLE_INLINE]>;

/// Compute the set of players visible to `observer`
///
/// Excludes the observer itself; excludes anyone with camo active
/// regardless of distance; otherwise includes a candidate iff its
/// distance is strictly below the observer's render distance. Radii and
/// camo are per-player, so the relation is asymmetric.
pub fn visible_set(observer: &Player, players: &HashMap<PlayerId, Player>) -> VisibleSet {
    let radius_sq = observer.render_distance * observer.render_distance;

    players
        .iter()
        .filter(|(id, candidate)| {
            **id != observer.id
                && !candidate.invisible
                && candidate.position.distance_sq_to(observer.position) < radius_sq
        })
        .map(|(id, _)| *id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::vec2::Vec2;
    use uuid::Uuid;

    fn player_at(x: f32, y: f32, render_distance: f32) -> Player {
        let mut p = Player::new(Uuid::new_v4(), "P".to_string(), 0, render_distance);
        p.position = Vec2::new(x, y);
        p
    }

    fn into_map(players: Vec<Player>) -> HashMap<PlayerId, Player> {
        players.into_iter().map(|p| (p.id, p)).collect()
    }

    #[test]
    fn test_observer_excluded_from_own_set() {
        let observer = player_at(0.0, 0.0, 100.0);
        let players = into_map(vec![observer.clone()]);
        assert!(visible_set(&observer, &players).is_empty());
    }

    #[test]
    fn test_asymmetric_radii() {
        // Distance 100, short-sighted r1 = 50 < 100 < r2 = 200
        let near_sighted = player_at(0.0, 0.0, 50.0);
        let far_sighted = player_at(100.0, 0.0, 200.0);
        let players = into_map(vec![near_sighted.clone(), far_sighted.clone()]);

        let seen_by_far = visible_set(&far_sighted, &players);
        assert!(seen_by_far.contains(&near_sighted.id));

        let seen_by_near = visible_set(&near_sighted, &players);
        assert!(!seen_by_near.contains(&far_sighted.id));
    }

    #[test]
    fn test_radius_is_strict() {
        let observer = player_at(0.0, 0.0, 100.0);
        let on_edge = player_at(100.0, 0.0, 100.0);
        let players = into_map(vec![observer.clone(), on_edge.clone()]);

        assert!(!visible_set(&observer, &players).contains(&on_edge.id));
    }

    #[test]
    fn test_camo_overrides_distance() {
        let observer = player_at(0.0, 0.0, 100.0);
        let mut hidden = player_at(0.0, 0.0, 100.0); // distance 0
        hidden.invisible = true;
        let players = into_map(vec![observer.clone(), hidden.clone()]);

        assert!(!visible_set(&observer, &players).contains(&hidden.id));
    }

    #[test]
    fn test_multiple_candidates() {
        let observer = player_at(0.0, 0.0, 100.0);
        let near = player_at(10.0, 10.0, 100.0);
        let far = player_at(500.0, 500.0, 100.0);
        let players = into_map(vec![observer.clone(), near.clone(), far.clone()]);

        let seen = visible_set(&observer, &players);
        assert_eq!(seen.len(), 1);
        assert!(seen.contains(&near.id));
    }
}
