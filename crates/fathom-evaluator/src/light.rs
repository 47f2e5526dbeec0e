//! Light policy: when a drone switches its powerful light on.
//!
//! The light widens the scan radius at the cost of battery, so it is used only where fish
//! live (deeper than `min_depth`) and only when the battery is full or enough turns have
//! passed since the previous use.

use fathom_engine::{DRONE_BATTERY_MAX, Drone, DroneMemory};

use crate::config::LightConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightPolicy {
    config: LightConfig,
}

impl LightPolicy {
    #[must_use]
    pub fn new(config: LightConfig) -> Self {
        Self { config }
    }

    /// Whether `drone` should use its light this turn.
    #[must_use]
    pub fn decide(&self, drone: &Drone) -> bool {
        let LightConfig {
            min_depth,
            interval,
        } = self.config;
        drone.position().y > min_depth
            && (drone.battery() == DRONE_BATTERY_MAX
                || drone.memory().turns_since_light >= interval)
    }

    /// Updates the turns-since-light timer after a decision.
    pub fn record(memory: &mut DroneMemory, light: bool) {
        if light {
            memory.turns_since_light = 0;
        } else {
            memory.turns_since_light = memory.turns_since_light.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use fathom_engine::{DroneReport, EntityId, GameState, TurnSnapshot, Vec2};

    use super::*;

    fn drone(y: i32, battery: u32, turns_since_light: u32) -> Drone {
        let mut state = GameState::from_roster(&[]).unwrap();
        let report = |id| DroneReport {
            id: EntityId(id),
            position: Vec2::new(5_000, y),
            emergency: false,
            battery,
        };
        state
            .apply_snapshot(&TurnSnapshot {
                my_drones: vec![report(0)],
                foe_drones: vec![report(1)],
                ..TurnSnapshot::default()
            })
            .unwrap();
        let mut drone = state.registry().drone(EntityId(0)).unwrap().clone();
        drone.memory_mut().turns_since_light = turns_since_light;
        drone
    }

    fn policy() -> LightPolicy {
        LightPolicy::new(LightConfig::default())
    }

    #[test]
    fn test_full_battery_lights_when_deep() {
        assert!(policy().decide(&drone(2_001, 30, 0)));
        assert!(!policy().decide(&drone(2_000, 30, 10)));
    }

    #[test]
    fn test_interval_between_uses() {
        assert!(!policy().decide(&drone(6_000, 20, 3)));
        assert!(policy().decide(&drone(6_000, 20, 4)));
    }

    #[test]
    fn test_low_battery_still_lights_after_interval() {
        assert!(policy().decide(&drone(6_000, 4, 4)));
        assert!(policy().decide(&drone(6_000, 0, 10)));
        assert!(!policy().decide(&drone(6_000, 4, 3)));
    }

    #[test]
    fn test_record_resets_or_counts() {
        let mut memory = DroneMemory {
            turns_since_light: 2,
            ..DroneMemory::default()
        };
        LightPolicy::record(&mut memory, false);
        assert_eq!(memory.turns_since_light, 3);
        LightPolicy::record(&mut memory, true);
        assert_eq!(memory.turns_since_light, 0);
    }
}
