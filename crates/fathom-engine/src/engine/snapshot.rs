use serde::{Deserialize, Serialize};

use crate::core::{EntityId, Quadrant, Vec2};

/// One creature of the match roster, as announced before the first turn.
///
/// `color` and `fish_type` are the raw protocol values; monsters use
/// [`MONSTER_SENTINEL`](crate::core::MONSTER_SENTINEL) for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: EntityId,
    pub color: i32,
    pub fish_type: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroneReport {
    pub id: EntityId,
    pub position: Vec2,
    pub emergency: bool,
    pub battery: u32,
}

/// A creature scanned by a drone and still held by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub drone_id: EntityId,
    pub creature_id: EntityId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleCreature {
    pub id: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlipReport {
    pub drone_id: EntityId,
    pub creature_id: EntityId,
    pub quadrant: Quadrant,
}

/// Everything the referee reports at the start of a turn, already tokenized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub my_score: u32,
    pub foe_score: u32,
    /// Creatures delivered by me.
    pub my_scans: Vec<EntityId>,
    /// Creatures delivered by the opponent.
    pub foe_scans: Vec<EntityId>,
    pub my_drones: Vec<DroneReport>,
    pub foe_drones: Vec<DroneReport>,
    /// Undelivered scans of every drone, both players.
    pub drone_scans: Vec<ScanReport>,
    pub visible: Vec<VisibleCreature>,
    /// Radar detections of my drones.
    pub blips: Vec<BlipReport>,
}
