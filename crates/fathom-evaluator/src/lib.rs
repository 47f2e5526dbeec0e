//! Decision engine for the drone scanning bot.
//!
//! Every turn, each owned drone picks one move from a fixed table of offsets. This crate
//! implements a layered evaluation architecture:
//!
//! 1. **Candidate Evaluation** ([`candidate_evaluator`]) - Scores one movement candidate for
//!    one drone from fish approach, scan delivery and separation from the sibling drone.
//!
//! 2. **Turn Evaluation** ([`turn_evaluator`]) - Estimates hidden fish, filters unsafe
//!    candidates and keeps the best-scoring one per drone.
//!
//! 3. **Strategy** ([`strategy`]) - Chooses between the greedy turn evaluator and the
//!    [`route`] baseline.
//!
//! # Architecture
//!
//! ```text
//! Strategy (greedy or route)
//!     ↓ greedy uses
//! Turn Evaluation (estimate, value, filter, select)
//!     ↓ uses
//! Candidate Evaluation (score a single offset)
//! ```
//!
//! # Supporting Modules
//!
//! - [`movement`] - The turn-invariant angle × speed table of movement candidates
//! - [`collision`] - Rejects candidates whose simulated path meets a monster
//! - [`estimator`] - Places fish known only from radar blips
//! - [`value`] - Prices fish from scan progress, denial and radar evidence
//! - [`light`] - Decides when a drone uses its light
//! - [`config`] - Every tuning constant, loadable from JSON
//!
//! # Design Principles
//!
//! ## Simulation over Geometry
//!
//! Collisions and scans are detected by sampling both trajectories at `K` equal sub-steps
//! rather than by solving for the closest approach. It is cheap, deterministic, and uses the
//! same code for drones, fish and monsters.
//!
//! ## One Snapshot per Turn
//!
//! Both drones are decided from the same ingested state. Nothing a drone decides is visible
//! to its sibling until the next turn.
//!
//! ## Linear Composite Score
//!
//! Candidate scores are weighted sums of independent terms. Weights default to 1.0 and live in
//! [`config::ComponentWeights`].
//!
//! # Example: Playing a Turn
//!
//! ```rust
//! use fathom_engine::{DroneReport, EntityId, GameState, RosterEntry, TurnSnapshot, Vec2};
//! use fathom_evaluator::{config::EvaluatorConfig, turn_evaluator::TurnEvaluator};
//!
//! let roster = [RosterEntry { id: EntityId(4), color: 0, fish_type: 0 }];
//! let mut state = GameState::from_roster(&roster)?;
//!
//! let drone = |id, x, y| DroneReport {
//!     id: EntityId(id),
//!     position: Vec2::new(x, y),
//!     emergency: false,
//!     battery: 30,
//! };
//! state.apply_snapshot(&TurnSnapshot {
//!     my_drones: vec![drone(0, 2_000, 500)],
//!     foe_drones: vec![drone(1, 8_000, 500)],
//!     ..TurnSnapshot::default()
//! })?;
//!
//! let evaluator = TurnEvaluator::from_config(&EvaluatorConfig::default());
//! let plan = evaluator.play_turn(&mut state)?;
//! for (_, action) in plan.actions() {
//!     println!("{action}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Current Limitations
//!
//! - **No lookahead**: a drone can walk into a position from which every move is unsafe.
//! - **Stationary estimates**: fish placed from radar are assumed not to move.
//! - **Monsters out of sight are ignored**: only monsters observed this turn are avoided.

pub mod candidate_evaluator;
pub mod collision;
pub mod config;
pub mod estimator;
pub mod light;
pub mod movement;
pub mod route;
pub mod strategy;
pub mod turn_evaluator;
pub mod value;
