//! Turn evaluation: choosing one action per drone for the current turn.
//!
//! This is the top level of the decision engine. Each turn runs the same pipeline:
//!
//! 1. **Estimate** - place hidden fish from radar blips ([`estimator`](crate::estimator))
//! 2. **Value** - price every fish once for the turn ([`value`](crate::value))
//! 3. **Filter** - per drone, drop candidates that meet a monster
//!    ([`collision`](crate::collision))
//! 4. **Score** - per drone, score every surviving candidate
//!    ([`candidate_evaluator`](crate::candidate_evaluator))
//! 5. **Select** - keep the best candidate, or wait if none survived
//!
//! # Turn Plan
//!
//! A [`TurnPlan`] holds the action of every owned drone, in the order the drones were
//! reported. Rendering each action gives the protocol line to emit.
//!
//! # Design: Greedy One-Ply Evaluation
//!
//! Only the immediate move is considered; there is no lookahead. Both drones are decided
//! against the same snapshot: the second drone never sees what the first one chose, which
//! keeps the result independent of evaluation order. Drone memory (the light timer) is
//! updated only once both decisions are made.
//!
//! # Special Cases
//!
//! - A drone in emergency cannot act and always waits with its light off.
//! - A drone whose every candidate was rejected waits in place (light still decided).
//! - An idle drone already at its staging point waits.
//! - Ties keep the first candidate in table order.

use arrayvec::ArrayVec;
use fathom_engine::{Drone, DroneAction, EntityId, GameState, PLAYER_DRONE_COUNT, Trajectory};

use crate::{
    candidate_evaluator::{
        CandidateEvaluator, CandidateScore, CompositeCandidateEvaluator, DroneContext, Target,
    },
    collision::{CollisionFilter, monster_trajectories},
    config::EvaluatorConfig,
    estimator::{self, EstimateError},
    light::LightPolicy,
    movement::{MovementCandidate, MovementTable},
    route::staging_point,
    strategy::Strategy,
    value::CreatureValuer,
};

/// The actions of all owned drones for one turn.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TurnPlan {
    actions: ArrayVec<(EntityId, DroneAction), PLAYER_DRONE_COUNT>,
}

impl TurnPlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the action of `drone_id`. Actions beyond the drone limit are dropped.
    pub fn push(&mut self, drone_id: EntityId, action: DroneAction) {
        if self.actions.try_push((drone_id, action)).is_err() {
            tracing::warn!(drone = %drone_id, "turn plan full, action dropped");
        }
    }

    #[must_use]
    pub fn actions(&self) -> &[(EntityId, DroneAction)] {
        &self.actions
    }

    #[must_use]
    pub fn action_for(&self, drone_id: EntityId) -> Option<DroneAction> {
        self.actions
            .iter()
            .find(|(id, _)| *id == drone_id)
            .map(|&(_, action)| action)
    }
}

/// Per-turn inputs shared by both drones.
struct TurnInputs<'a> {
    valuer: CreatureValuer<'a>,
    monsters: Vec<Trajectory>,
}

/// Greedy decision selector.
#[derive(Debug)]
pub struct TurnEvaluator<'a> {
    table: MovementTable,
    filter: CollisionFilter,
    light: LightPolicy,
    value_scale: u32,
    candidate_evaluator: Box<dyn CandidateEvaluator + 'a>,
}

impl<'a> TurnEvaluator<'a> {
    /// Creates a turn evaluator scoring candidates with `candidate_evaluator`.
    #[must_use]
    pub fn new(
        config: &EvaluatorConfig,
        candidate_evaluator: Box<dyn CandidateEvaluator + 'a>,
    ) -> Self {
        Self {
            table: MovementTable::new(&config.movement),
            filter: CollisionFilter::from_config(config),
            light: LightPolicy::new(config.light.clone()),
            value_scale: config.value_scale,
            candidate_evaluator,
        }
    }

    /// Creates a turn evaluator with the composite candidate score.
    #[must_use]
    pub fn from_config(config: &EvaluatorConfig) -> Self {
        Self::new(config, Box::new(CompositeCandidateEvaluator::new(config)))
    }

    #[must_use]
    pub fn table(&self) -> &MovementTable {
        &self.table
    }

    /// Decides the actions of all owned drones.
    ///
    /// Fills in estimated positions for hidden fish and updates each drone's light timer.
    pub fn play_turn(&self, state: &mut GameState) -> Result<TurnPlan, EstimateError> {
        estimator::estimate_hidden_positions(state)?;

        let mut plan = TurnPlan::new();
        {
            let inputs = TurnInputs {
                valuer: CreatureValuer::new(state, self.value_scale),
                monsters: monster_trajectories(state.registry()),
            };
            for drone in state.my_drones() {
                let action = self.select_action(state, drone, &inputs);
                plan.push(drone.id(), action);
            }
        }

        for &(id, action) in plan.actions() {
            if let Some(drone) = state.registry_mut().drone_mut(id) {
                LightPolicy::record(drone.memory_mut(), action.light());
            }
        }
        Ok(plan)
    }

    /// Decides the action of a single drone against the current state.
    ///
    /// Hidden fish must already have been estimated.
    #[must_use]
    pub fn decide(&self, state: &GameState, drone_id: EntityId) -> Option<DroneAction> {
        let drone = state.registry().drone(drone_id)?;
        let inputs = TurnInputs {
            valuer: CreatureValuer::new(state, self.value_scale),
            monsters: monster_trajectories(state.registry()),
        };
        Some(self.select_action(state, drone, &inputs))
    }

    fn select_action(
        &self,
        state: &GameState,
        drone: &Drone,
        inputs: &TurnInputs<'_>,
    ) -> DroneAction {
        if drone.is_emergency() {
            tracing::debug!(drone = %drone.id(), "emergency, waiting");
            return DroneAction::Wait { light: false };
        }

        let light = self.light.decide(drone);
        let position = drone.position();
        let sibling = state.sibling_of(drone.id());
        let targets = targets_for(state, drone, sibling, &inputs.valuer);
        let held_value: f64 = drone
            .held_scans()
            .iter()
            .filter(|&&id| !state.me().has_delivered(id))
            .filter_map(|&id| state.registry().creature(id))
            .map(|creature| f64::from(inputs.valuer.value_of(creature)))
            .sum();
        let context = DroneContext {
            position,
            sibling: sibling.map(Drone::position),
            targets: &targets,
            held_value,
            staging_point: staging_point(position),
            idle_value: f64::from(self.value_scale),
        };

        if context.is_idle() && position == context.staging_point {
            tracing::debug!(drone = %drone.id(), "idle at staging point, waiting");
            return DroneAction::Wait { light };
        }

        let survivors = self.filter.surviving(position, &self.table, &inputs.monsters);
        let Some((candidate, score)) = self.best_candidate(&context, &survivors) else {
            tracing::debug!(drone = %drone.id(), "no safe candidate, waiting");
            return DroneAction::Wait { light };
        };

        let action = DroneAction::move_to(position.offset_clamped(candidate.offset()), light);
        tracing::debug!(
            drone = %drone.id(),
            %candidate,
            score = score.total,
            fish = score.fish,
            delivery = score.delivery,
            separation = score.separation,
            survivors = survivors.len(),
            targets = targets.len(),
            %action,
            "drone decision"
        );
        action
    }

    /// Highest-scoring candidate; the earliest one wins ties.
    fn best_candidate(
        &self,
        context: &DroneContext<'_>,
        candidates: &[MovementCandidate],
    ) -> Option<(MovementCandidate, CandidateScore)> {
        let mut best: Option<(MovementCandidate, CandidateScore)> = None;
        for &candidate in candidates {
            let score = self.candidate_evaluator.evaluate_candidate(context, candidate);
            tracing::trace!(%candidate, score = score.total, "candidate scored");
            if best.is_none_or(|(_, best_score)| score.total > best_score.total) {
                best = Some((candidate, score));
            }
        }
        best
    }
}

impl Strategy for TurnEvaluator<'_> {
    fn play_turn(&self, state: &mut GameState) -> Result<TurnPlan, EstimateError> {
        TurnEvaluator::play_turn(self, state)
    }
}

/// Fish worth going after for `drone`: in play, not delivered by me, not held by this drone.
fn targets_for(
    state: &GameState,
    drone: &Drone,
    sibling: Option<&Drone>,
    valuer: &CreatureValuer<'_>,
) -> Vec<Target> {
    let position = drone.position();
    state
        .registry()
        .fish()
        .filter(|fish| fish.is_available())
        .filter(|fish| !state.me().has_delivered(fish.id()) && !drone.holds(fish.id()))
        .map(|fish| {
            let contested = sibling.is_some_and(|sibling| {
                sibling.holds(fish.id())
                    || sibling.position().distance(fish.position())
                        < position.distance(fish.position())
            });
            Target {
                id: fish.id(),
                trajectory: Trajectory::new(fish.position(), fish.velocity()),
                value: f64::from(valuer.value_of(fish)),
                contested,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use fathom_engine::{
        DroneReport, MAP_SIZE, RosterEntry, ScanReport, TurnSnapshot, Vec2, VisibleCreature,
    };
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::config::MovementTableKind;

    /// Fish 4 and 5, then monsters 16..=20.
    fn roster() -> Vec<RosterEntry> {
        let fish = [(4, 0, 0), (5, 1, 2)];
        let monsters = 16..=20;
        fish.into_iter()
            .map(|(id, color, fish_type)| RosterEntry {
                id: EntityId(id),
                color,
                fish_type,
            })
            .chain(monsters.map(|id| RosterEntry {
                id: EntityId(id),
                color: -1,
                fish_type: -1,
            }))
            .collect()
    }

    fn drone(id: u32, position: Vec2, battery: u32) -> DroneReport {
        DroneReport {
            id: EntityId(id),
            position,
            emergency: false,
            battery,
        }
    }

    fn still(id: u32, position: Vec2) -> VisibleCreature {
        VisibleCreature {
            id: EntityId(id),
            position,
            velocity: Vec2::ZERO,
        }
    }

    fn foe() -> Vec<DroneReport> {
        vec![drone(1, Vec2::new(9_000, 500), 30)]
    }

    fn play(snapshot: &TurnSnapshot) -> (GameState, TurnPlan) {
        let mut state = GameState::from_roster(&roster()).unwrap();
        state.apply_snapshot(snapshot).unwrap();
        let evaluator = TurnEvaluator::from_config(&EvaluatorConfig::default());
        let plan = evaluator.play_turn(&mut state).unwrap();
        (state, plan)
    }

    #[test]
    fn test_moves_toward_fish() {
        let snapshot = TurnSnapshot {
            my_drones: vec![drone(0, Vec2::new(5_000, 9_000), 30)],
            foe_drones: foe(),
            visible: vec![still(4, Vec2::new(5_000, 3_000))],
            ..TurnSnapshot::default()
        };
        let (state, plan) = play(&snapshot);
        assert_eq!(
            plan.action_for(EntityId(0)),
            Some(DroneAction::Move {
                target: Vec2::new(5_000, 8_400),
                light: true
            })
        );
        let drone = state.registry().drone(EntityId(0)).unwrap();
        assert_eq!(drone.memory().turns_since_light, 0);
    }

    #[test]
    fn test_sibling_does_not_change_choice() {
        let snapshot = TurnSnapshot {
            my_drones: vec![
                drone(0, Vec2::new(5_000, 9_000), 30),
                drone(2, Vec2::new(1_000, 9_000), 30),
            ],
            foe_drones: foe(),
            visible: vec![still(4, Vec2::new(5_000, 3_000))],
            ..TurnSnapshot::default()
        };
        let (_, plan) = play(&snapshot);
        assert_eq!(plan.actions().len(), 2);
        assert_eq!(plan.actions()[0].0, EntityId(0));
        assert_eq!(
            plan.action_for(EntityId(0)),
            Some(DroneAction::Move {
                target: Vec2::new(5_000, 8_400),
                light: true
            })
        );
    }

    #[test]
    fn test_compass_table_moves_diagonally() {
        let mut config = EvaluatorConfig::default();
        config.movement.table = MovementTableKind::Compass;
        let evaluator = TurnEvaluator::from_config(&config);
        assert_eq!(evaluator.table().len(), 8);

        let snapshot = TurnSnapshot {
            my_drones: vec![drone(0, Vec2::new(5_000, 9_000), 30)],
            foe_drones: foe(),
            visible: vec![still(4, Vec2::new(2_000, 6_000))],
            ..TurnSnapshot::default()
        };
        let mut state = GameState::from_roster(&roster()).unwrap();
        state.apply_snapshot(&snapshot).unwrap();
        let plan = evaluator.play_turn(&mut state).unwrap();
        assert_eq!(
            plan.action_for(EntityId(0)),
            Some(DroneAction::Move {
                target: Vec2::new(4_700, 8_700),
                light: true
            })
        );
    }

    #[test]
    fn test_drones_decide_independently() {
        let snapshot = TurnSnapshot {
            my_drones: vec![
                drone(0, Vec2::new(3_000, 6_000), 30),
                drone(2, Vec2::new(6_000, 6_500), 18),
            ],
            foe_drones: foe(),
            visible: vec![
                still(4, Vec2::new(4_000, 3_000)),
                still(5, Vec2::new(7_000, 9_000)),
                still(16, Vec2::new(4_500, 6_200)),
            ],
            ..TurnSnapshot::default()
        };
        let mut state = GameState::from_roster(&roster()).unwrap();
        state.apply_snapshot(&snapshot).unwrap();
        let evaluator = TurnEvaluator::from_config(&EvaluatorConfig::default());

        let first = evaluator.decide(&state, EntityId(0));
        let second = evaluator.decide(&state, EntityId(2));
        let plan = evaluator.play_turn(&mut state).unwrap();
        assert_eq!(plan.action_for(EntityId(0)), first);
        assert_eq!(plan.action_for(EntityId(2)), second);
    }

    #[test]
    fn test_trapped_drone_waits() {
        let position = Vec2::new(5_000, 5_000);
        let monsters = [(0, 0), (400, 0), (-400, 0), (0, 400), (0, -400)];
        let snapshot = TurnSnapshot {
            my_drones: vec![drone(0, position, 20)],
            foe_drones: foe(),
            visible: monsters
                .iter()
                .zip(16..)
                .map(|(&(dx, dy), id)| still(id, position + Vec2::new(dx, dy)))
                .chain([still(4, Vec2::new(5_000, 3_000))])
                .collect(),
            ..TurnSnapshot::default()
        };
        let (state, plan) = play(&snapshot);
        assert_eq!(
            plan.action_for(EntityId(0)),
            Some(DroneAction::Wait { light: false })
        );
        let drone = state.registry().drone(EntityId(0)).unwrap();
        assert_eq!(drone.memory().turns_since_light, 1);
    }

    #[test]
    fn test_emergency_drone_waits_dark() {
        let mut report = drone(0, Vec2::new(5_000, 9_000), 30);
        report.emergency = true;
        let snapshot = TurnSnapshot {
            my_drones: vec![report],
            foe_drones: foe(),
            visible: vec![still(4, Vec2::new(5_000, 3_000))],
            ..TurnSnapshot::default()
        };
        let (_, plan) = play(&snapshot);
        assert_eq!(
            plan.action_for(EntityId(0)),
            Some(DroneAction::Wait { light: false })
        );
    }

    #[test]
    fn test_full_drone_surfaces() {
        let snapshot = TurnSnapshot {
            my_drones: vec![drone(0, Vec2::new(5_000, 1_000), 30)],
            foe_drones: foe(),
            drone_scans: vec![ScanReport {
                drone_id: EntityId(0),
                creature_id: EntityId(5),
            }],
            ..TurnSnapshot::default()
        };
        let (_, plan) = play(&snapshot);
        // Three headings reach the delivery depth; the first one in table order wins.
        assert_eq!(
            plan.action_for(EntityId(0)),
            Some(DroneAction::Move {
                target: Vec2::new(4_770, 445),
                light: false
            })
        );
    }

    #[test]
    fn test_idle_drone_goes_to_staging() {
        let snapshot = TurnSnapshot {
            my_drones: vec![drone(0, Vec2::new(2_500, 5_500), 30)],
            foe_drones: foe(),
            ..TurnSnapshot::default()
        };
        let (_, plan) = play(&snapshot);
        assert_eq!(
            plan.action_for(EntityId(0)),
            Some(DroneAction::Move {
                target: Vec2::new(2_500, 4_900),
                light: true
            })
        );

        let at_staging = TurnSnapshot {
            my_drones: vec![drone(0, Vec2::new(2_500, 2_500), 30)],
            foe_drones: foe(),
            ..TurnSnapshot::default()
        };
        let (_, plan) = play(&at_staging);
        assert_eq!(
            plan.action_for(EntityId(0)),
            Some(DroneAction::Wait { light: true })
        );
    }

    #[test]
    fn test_moves_stay_on_map() {
        let mut rng = Pcg64Mcg::seed_from_u64(0x0f15);
        let evaluator = TurnEvaluator::from_config(&EvaluatorConfig::default());
        for _ in 0..200 {
            let mut random_point = || {
                Vec2::new(
                    rng.random_range(0..=MAP_SIZE),
                    rng.random_range(0..=MAP_SIZE),
                )
            };
            let snapshot = TurnSnapshot {
                my_drones: vec![drone(0, random_point(), 30), drone(2, random_point(), 12)],
                foe_drones: foe(),
                visible: vec![
                    still(4, random_point()),
                    still(5, random_point()),
                    still(16, random_point()),
                ],
                ..TurnSnapshot::default()
            };
            let mut state = GameState::from_roster(&roster()).unwrap();
            state.apply_snapshot(&snapshot).unwrap();
            let plan = evaluator.play_turn(&mut state).unwrap();
            for &(_, action) in plan.actions() {
                if let DroneAction::Move { target, .. } = action {
                    assert!((0..=MAP_SIZE).contains(&target.x), "{action}");
                    assert!((0..=MAP_SIZE).contains(&target.y), "{action}");
                }
            }
        }
    }
}
