//! Route strategy: a fixed zig-zag sweep of the ocean, driven by a per-drone state machine.
//!
//! This is the baseline the greedy evaluator replaced. It ignores fish values and monsters
//! and simply sweeps down and back up through every habitat, surfacing to deliver at the end
//! of each sweep. It stays available as a fallback (`--strategy route`).
//!
//! # States
//!
//! ```text
//!             emergency flag (from any state)
//!                     ↓
//!                 Emergency ──→ StartingRoute ──(at staging point)──→ RoutingDown
//!                                    ↑                                    │
//!                                    │                          (within 400 of the floor)
//!                                    │                                    ↓
//!                               Surfacing ←──(y < 2500)──────────── RoutingUp
//!                      (y ≤ 500) ───┘
//! ```
//!
//! Leaving `Emergency` or `Surfacing` picks a new staging point on the drone's side of the
//! map. The step counter resets on every transition and advances every turn; the routing
//! states index the cyclic offset tables with it.

use fathom_engine::{Drone, DroneAction, DroneMemory, GameState, MAP_SIZE, RouteState, Vec2};

use crate::{
    config::EvaluatorConfig, estimator::EstimateError, light::LightPolicy, strategy::Strategy,
    turn_evaluator::TurnPlan,
};

/// Horizontal offsets of a sweep: a full left-right oscillation.
pub const ROUTE_DX: [i32; 24] = [
    600, 500, 400, 300, 200, 100, 0, -100, -200, -300, -400, -500, //
    -600, -500, -400, -300, -200, -100, 0, 100, 200, 300, 400, 500,
];

/// Vertical offsets of a downward sweep; negated on the way up.
pub const ROUTE_DY: [i32; 12] = [0, 100, 200, 300, 400, 500, 600, 500, 400, 300, 200, 100];

/// The single offset used while surfacing.
pub const SURFACING_OFFSET: Vec2 = Vec2::new(0, -600);

/// Depth at which a new sweep starts.
pub const STAGING_DEPTH: i32 = 2_500;

/// Where a drone at `position` starts its next sweep: the middle of its half of the map.
#[must_use]
pub fn staging_point(position: Vec2) -> Vec2 {
    let x = if position.x < MAP_SIZE / 2 { 2_500 } else { 7_500 };
    Vec2::new(x, STAGING_DEPTH)
}

#[derive(Debug, Clone)]
pub struct RouteStrategy {
    light: LightPolicy,
    delivery_depth: i32,
    floor_margin: i32,
}

impl RouteStrategy {
    #[must_use]
    pub fn new(config: &EvaluatorConfig) -> Self {
        #[expect(clippy::cast_possible_truncation)]
        let floor_margin = (config.scan_radius / 2.0) as i32;
        Self {
            light: LightPolicy::new(config.light.clone()),
            delivery_depth: config.delivery_depth,
            floor_margin,
        }
    }

    /// Advances the state machine of `drone` and returns its action for this turn.
    pub fn step(&self, drone: &mut Drone) -> DroneAction {
        let position = drone.position();
        let light = self.light.decide(drone);
        let emergency = drone.is_emergency();
        let memory = drone.memory_mut();

        if emergency {
            transition(memory, RouteState::Emergency);
            LightPolicy::record(memory, light);
            return DroneAction::move_to(memory.staging_point, light);
        }

        match memory.route_state {
            RouteState::Emergency => {
                memory.staging_point = staging_point(position);
                transition(memory, RouteState::StartingRoute);
            }
            RouteState::StartingRoute if position == memory.staging_point => {
                transition(memory, RouteState::RoutingDown);
            }
            RouteState::RoutingDown if MAP_SIZE - position.y <= self.floor_margin => {
                transition(memory, RouteState::RoutingUp);
            }
            RouteState::RoutingUp if position.y < STAGING_DEPTH => {
                transition(memory, RouteState::Surfacing);
            }
            RouteState::Surfacing if position.y <= self.delivery_depth => {
                memory.staging_point = staging_point(position);
                transition(memory, RouteState::StartingRoute);
            }
            _ => {}
        }

        let step = memory.route_step;
        let target = match memory.route_state {
            RouteState::Emergency | RouteState::StartingRoute => memory.staging_point,
            RouteState::RoutingDown => position + sweep_offset(step, 1),
            RouteState::RoutingUp => position + sweep_offset(step, -1),
            RouteState::Surfacing => position + SURFACING_OFFSET,
        };
        memory.route_step += 1;
        LightPolicy::record(memory, light);
        DroneAction::move_to(target, light)
    }
}

fn sweep_offset(step: usize, direction: i32) -> Vec2 {
    Vec2::new(
        ROUTE_DX[step % ROUTE_DX.len()],
        ROUTE_DY[step % ROUTE_DY.len()] * direction,
    )
}

fn transition(memory: &mut DroneMemory, state: RouteState) {
    if memory.route_state != state {
        tracing::debug!(from = %memory.route_state, to = %state, "route transition");
        memory.route_state = state;
        memory.route_step = 0;
    }
}

impl Strategy for RouteStrategy {
    fn play_turn(&self, state: &mut GameState) -> Result<TurnPlan, EstimateError> {
        let mut plan = TurnPlan::new();
        for id in state.my_drone_ids() {
            let Some(drone) = state.registry_mut().drone_mut(id) else {
                continue;
            };
            let action = self.step(drone);
            tracing::debug!(
                drone = %id,
                state = %drone.memory().route_state,
                %action,
                "route decision"
            );
            plan.push(id, action);
        }
        Ok(plan)
    }
}
