use arrayvec::ArrayVec;

use super::{
    creature::{CREATURE_COUNT_MAX, EntityId, FISH_COUNT},
    geometry::Vec2,
    radar::RadarBlip,
};

/// Full battery charge.
pub const DRONE_BATTERY_MAX: u32 = 30;

/// Phase of the route-following strategy.
///
/// New drones start in [`RouteState::Emergency`] so that their first evaluation computes a
/// staging point from wherever they spawned.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum RouteState {
    #[default]
    Emergency,
    StartingRoute,
    RoutingDown,
    RoutingUp,
    Surfacing,
}

/// Per-drone state carried across turns by the decision engine.
///
/// Ingestion never touches this; only strategies update it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DroneMemory {
    pub route_state: RouteState,
    pub route_step: usize,
    pub staging_point: Vec2,
    pub turns_since_light: u32,
}

/// A drone, owned by either player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drone {
    id: EntityId,
    position: Vec2,
    battery: u32,
    emergency: bool,
    held_scans: ArrayVec<EntityId, FISH_COUNT>,
    blips: ArrayVec<RadarBlip, CREATURE_COUNT_MAX>,
    memory: DroneMemory,
}

impl Drone {
    #[must_use]
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            position: Vec2::ZERO,
            battery: DRONE_BATTERY_MAX,
            emergency: false,
            held_scans: ArrayVec::new(),
            blips: ArrayVec::new(),
            memory: DroneMemory::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[must_use]
    pub fn battery(&self) -> u32 {
        self.battery
    }

    #[must_use]
    pub fn is_emergency(&self) -> bool {
        self.emergency
    }

    /// Creatures scanned by this drone and not yet delivered.
    #[must_use]
    pub fn held_scans(&self) -> &[EntityId] {
        &self.held_scans
    }

    #[must_use]
    pub fn holds(&self, creature_id: EntityId) -> bool {
        self.held_scans.contains(&creature_id)
    }

    /// Radar detections received this turn.
    #[must_use]
    pub fn blips(&self) -> &[RadarBlip] {
        &self.blips
    }

    #[must_use]
    pub fn blip_for(&self, creature_id: EntityId) -> Option<&RadarBlip> {
        self.blips.iter().find(|b| b.creature_id == creature_id)
    }

    #[must_use]
    pub fn memory(&self) -> &DroneMemory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut DroneMemory {
        &mut self.memory
    }

    pub(crate) fn begin_turn(&mut self, position: Vec2, emergency: bool, battery: u32) {
        self.position = position;
        self.emergency = emergency;
        self.battery = battery;
        self.held_scans.clear();
        self.blips.clear();
    }

    /// Returns `false` if the scan list is full.
    pub(crate) fn push_scan(&mut self, creature_id: EntityId) -> bool {
        self.held_scans.try_push(creature_id).is_ok()
    }

    /// Returns `false` if the blip list is full.
    pub(crate) fn push_blip(&mut self, blip: RadarBlip) -> bool {
        self.blips.try_push(blip).is_ok()
    }
}
