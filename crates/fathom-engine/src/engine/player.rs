use std::collections::BTreeSet;

use arrayvec::ArrayVec;

use crate::core::EntityId;

/// Drones controlled by each player.
pub const PLAYER_DRONE_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Side {
    #[display("my")]
    Me,
    #[display("foe")]
    Foe,
}

/// Score, delivered scans and drones of one player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerState {
    score: u32,
    delivered: BTreeSet<EntityId>,
    drones: ArrayVec<EntityId, PLAYER_DRONE_COUNT>,
}

impl PlayerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Creatures scanned and delivered by this player. Only ever grows.
    #[must_use]
    pub fn delivered(&self) -> &BTreeSet<EntityId> {
        &self.delivered
    }

    #[must_use]
    pub fn has_delivered(&self, creature_id: EntityId) -> bool {
        self.delivered.contains(&creature_id)
    }

    /// Drones owned this turn, in report order.
    #[must_use]
    pub fn drones(&self) -> &[EntityId] {
        &self.drones
    }

    #[must_use]
    pub fn owns(&self, drone_id: EntityId) -> bool {
        self.drones.contains(&drone_id)
    }

    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub(crate) fn record_delivered(&mut self, creature_id: EntityId) {
        self.delivered.insert(creature_id);
    }

    pub(crate) fn set_drones(&mut self, drones: ArrayVec<EntityId, PLAYER_DRONE_COUNT>) {
        self.drones = drones;
    }
}
