use arrayvec::ArrayVec;

use crate::{
    SnapshotError,
    core::{
        CREATURE_COUNT_MAX, Creature, CreatureKind, Drone, EntityId, FISH_COUNT,
        MONSTER_COUNT_MAX, RadarBlip,
    },
};

use super::{
    player::{PLAYER_DRONE_COUNT, PlayerState, Side},
    registry::{Entity, EntityKind, Registry},
    snapshot::{DroneReport, RosterEntry, TurnSnapshot},
};

/// The bot's view of the match: every entity, both players, and the turn counter.
///
/// Created once from the roster, then refreshed with [`GameState::apply_snapshot`] every turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    registry: Registry,
    me: PlayerState,
    foe: PlayerState,
    turn: u32,
}

impl GameState {
    /// Builds the registry from the match roster.
    pub fn from_roster(roster: &[RosterEntry]) -> Result<Self, SnapshotError> {
        if roster.len() > CREATURE_COUNT_MAX {
            return Err(SnapshotError::CreatureCount {
                count: roster.len(),
                max: CREATURE_COUNT_MAX,
            });
        }

        let mut registry = Registry::new();
        for entry in roster {
            let kind = CreatureKind::from_roster(entry.color, entry.fish_type).ok_or(
                SnapshotError::InvalidCreatureKind {
                    id: entry.id,
                    color: entry.color,
                    fish_type: entry.fish_type,
                },
            )?;
            registry.insert(Entity::from_creature(Creature::new(entry.id, kind)))?;
        }
        for (kind, count, max) in [
            (EntityKind::Fish, registry.fish().count(), FISH_COUNT),
            (EntityKind::Monster, registry.monsters().count(), MONSTER_COUNT_MAX),
        ] {
            if count > max {
                return Err(SnapshotError::KindCount { kind, count, max });
            }
        }

        tracing::debug!(
            fish = registry.fish().count(),
            monsters = registry.monsters().count(),
            "roster registered"
        );

        Ok(Self {
            registry,
            me: PlayerState::new(),
            foe: PlayerState::new(),
            turn: 0,
        })
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    #[must_use]
    pub fn me(&self) -> &PlayerState {
        &self.me
    }

    #[must_use]
    pub fn foe(&self) -> &PlayerState {
        &self.foe
    }

    /// Number of snapshots ingested so far.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Ids of the drones I own this turn, in report order.
    #[must_use]
    pub fn my_drone_ids(&self) -> ArrayVec<EntityId, PLAYER_DRONE_COUNT> {
        self.me.drones().iter().copied().collect()
    }

    pub fn my_drones(&self) -> impl Iterator<Item = &Drone> + '_ {
        self.me
            .drones()
            .iter()
            .filter_map(|&id| self.registry.drone(id))
    }

    /// The other drone I own, if any.
    #[must_use]
    pub fn sibling_of(&self, drone_id: EntityId) -> Option<&Drone> {
        self.my_drones().find(|d| d.id() != drone_id)
    }

    /// Replaces every per-turn field with the content of `snapshot`.
    ///
    /// Delivered-scan sets are merged, never shrunk. Drone memory is left untouched.
    pub fn apply_snapshot(&mut self, snapshot: &TurnSnapshot) -> Result<(), SnapshotError> {
        self.check_counts(snapshot)?;

        self.me.set_score(snapshot.my_score);
        self.foe.set_score(snapshot.foe_score);
        for &id in &snapshot.my_scans {
            self.expect_fish(id)?;
            self.me.record_delivered(id);
        }
        for &id in &snapshot.foe_scans {
            self.expect_fish(id)?;
            self.foe.record_delivered(id);
        }

        let my_drones = self.ingest_drones(&snapshot.my_drones)?;
        self.me.set_drones(my_drones);
        let foe_drones = self.ingest_drones(&snapshot.foe_drones)?;
        self.foe.set_drones(foe_drones);

        for creature in self.registry.creatures_mut() {
            creature.begin_turn();
        }

        for scan in &snapshot.drone_scans {
            self.expect_fish(scan.creature_id)?;
            let drone = self
                .registry
                .drone_mut(scan.drone_id)
                .ok_or(SnapshotError::NotADrone { id: scan.drone_id })?;
            if drone.holds(scan.creature_id) {
                return Err(SnapshotError::DuplicateScan {
                    drone_id: scan.drone_id,
                    creature_id: scan.creature_id,
                });
            }
            if !drone.push_scan(scan.creature_id) {
                return Err(SnapshotError::HeldScanOverflow {
                    drone_id: scan.drone_id,
                });
            }
        }

        for visible in &snapshot.visible {
            if !visible.position.is_on_map() {
                return Err(SnapshotError::OffMap {
                    id: visible.id,
                    position: visible.position,
                });
            }
            let creature = self
                .registry
                .creature_mut(visible.id)
                .ok_or(SnapshotError::NotACreature { id: visible.id })?;
            creature.observe(visible.position, visible.velocity);
        }

        for blip in &snapshot.blips {
            if self.registry.creature(blip.creature_id).is_none() {
                return Err(SnapshotError::NotACreature {
                    id: blip.creature_id,
                });
            }
            if !self.me.owns(blip.drone_id) {
                return Err(SnapshotError::ForeignBlip {
                    drone_id: blip.drone_id,
                });
            }
            let drone = self
                .registry
                .drone_mut(blip.drone_id)
                .ok_or(SnapshotError::NotADrone { id: blip.drone_id })?;
            if drone.blip_for(blip.creature_id).is_some() {
                return Err(SnapshotError::DuplicateBlip {
                    drone_id: blip.drone_id,
                    creature_id: blip.creature_id,
                });
            }
            let pushed = drone.push_blip(RadarBlip {
                creature_id: blip.creature_id,
                quadrant: blip.quadrant,
            });
            if !pushed {
                return Err(SnapshotError::BlipOverflow {
                    drone_id: blip.drone_id,
                });
            }
        }

        self.turn += 1;
        tracing::debug!(
            turn = self.turn,
            my_score = self.me.score(),
            foe_score = self.foe.score(),
            visible = snapshot.visible.len(),
            blips = snapshot.blips.len(),
            "snapshot ingested"
        );
        Ok(())
    }

    fn check_counts(&self, snapshot: &TurnSnapshot) -> Result<(), SnapshotError> {
        for (side, count) in [
            (Side::Me, snapshot.my_scans.len()),
            (Side::Foe, snapshot.foe_scans.len()),
        ] {
            if count > FISH_COUNT {
                return Err(SnapshotError::ScanCount {
                    side,
                    count,
                    max: FISH_COUNT,
                });
            }
        }
        for (side, count) in [
            (Side::Me, snapshot.my_drones.len()),
            (Side::Foe, snapshot.foe_drones.len()),
        ] {
            if !(1..=PLAYER_DRONE_COUNT).contains(&count) {
                return Err(SnapshotError::DroneCount {
                    side,
                    count,
                    max: PLAYER_DRONE_COUNT,
                });
            }
        }

        let creature_count = self.registry.creatures().count();
        if snapshot.visible.len() > creature_count {
            return Err(SnapshotError::VisibleCount {
                count: snapshot.visible.len(),
                max: creature_count,
            });
        }
        let max_blips = creature_count * snapshot.my_drones.len();
        if snapshot.blips.len() > max_blips {
            return Err(SnapshotError::BlipCount {
                count: snapshot.blips.len(),
                max: max_blips,
            });
        }
        let max_drone_scans =
            FISH_COUNT * (snapshot.my_drones.len() + snapshot.foe_drones.len());
        if snapshot.drone_scans.len() > max_drone_scans {
            return Err(SnapshotError::DroneScanCount {
                count: snapshot.drone_scans.len(),
                max: max_drone_scans,
            });
        }
        Ok(())
    }

    fn expect_fish(&self, id: EntityId) -> Result<(), SnapshotError> {
        match self.registry.get(id) {
            Some(Entity::Fish(_)) => Ok(()),
            Some(_) => Err(SnapshotError::NotAFish { id }),
            None => Err(SnapshotError::UnknownEntity { id }),
        }
    }

    fn ingest_drones(
        &mut self,
        reports: &[DroneReport],
    ) -> Result<ArrayVec<EntityId, PLAYER_DRONE_COUNT>, SnapshotError> {
        let mut ids = ArrayVec::new();
        for report in reports {
            if !report.position.is_on_map() {
                return Err(SnapshotError::OffMap {
                    id: report.id,
                    position: report.position,
                });
            }
            if self.registry.get(report.id).is_none() {
                self.registry.insert(Entity::Drone(Drone::new(report.id)))?;
            }
            let drone = self
                .registry
                .drone_mut(report.id)
                .ok_or(SnapshotError::NotADrone { id: report.id })?;
            drone.begin_turn(report.position, report.emergency, report.battery);
            // Counts were checked against the capacity already.
            ids.push(report.id);
        }
        Ok(ids)
    }
}
