//! Candidate evaluation: scoring one movement candidate for one drone.
//!
//! This is the innermost level of the decision engine. The turn evaluator collects what a
//! drone is after into a [`DroneContext`] (targets, held scans, sibling position) and asks a
//! [`CandidateEvaluator`] to score each surviving candidate. The highest score wins.
//!
//! # Composite Score
//!
//! [`CompositeCandidateEvaluator`] sums three independent terms, each multiplied by its
//! weight from [`ComponentWeights`]:
//!
//! ```text
//! score = w_fish·fish + w_delivery·delivery + w_separation·separation
//! ```
//!
//! - **Fish** - for every target: its full value if the simulated paths come within scan
//!   range, otherwise the value times the [closing factor](closing_factor). Halved when the
//!   sibling drone is closer to the target or already holds it.
//! - **Delivery** - full value of the held scans if the move reaches the delivery depth,
//!   otherwise their value times the closing factor toward that depth. Zero for a drone that
//!   holds nothing or already sits at the delivery depth.
//! - **Separation** - a fixed negative value times the closing factor toward the sibling, so
//!   moving away from it scores positively.
//!
//! # Closing Factor
//!
//! ```text
//! factor = clamp(1 − final / initial, −1, 1)      (0 when initial = 0)
//! ```
//!
//! A move that covers the whole distance scores 1, a move that does not change the distance
//! scores 0 and a receding move scores negatively, floored at −1. `initial` is the true
//! distance at the start of the turn, `final` the distance between both simulated end points.
//!
//! # Idle Drones
//!
//! A drone without any target and without anything to deliver would score every candidate
//! the same. It is sent toward its staging point instead, using the closing factor with
//! [`DroneContext::idle_value`].

use std::fmt;

use fathom_engine::{EntityId, Trajectory, Vec2};

use crate::{
    config::{ComponentWeights, EvaluatorConfig},
    movement::MovementCandidate,
};

/// A fish a drone may go after this turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub id: EntityId,
    pub trajectory: Trajectory,
    pub value: f64,
    /// The sibling drone is closer or already holds the scan.
    pub contested: bool,
}

/// Everything a candidate evaluator needs to know about the drone being moved.
#[derive(Debug, Clone, PartialEq)]
pub struct DroneContext<'a> {
    pub position: Vec2,
    pub sibling: Option<Vec2>,
    pub targets: &'a [Target],
    /// Total value of the scans the drone holds and has not delivered.
    pub held_value: f64,
    pub staging_point: Vec2,
    pub idle_value: f64,
}

impl DroneContext<'_> {
    /// Nothing to scan and nothing to deliver.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.targets.is_empty() && self.held_value <= 0.0
    }
}

/// Per-term breakdown of a candidate's score.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CandidateScore {
    pub fish: f64,
    pub delivery: f64,
    pub separation: f64,
    pub total: f64,
}

/// Scores a movement candidate for a drone (higher is better).
pub trait CandidateEvaluator: fmt::Debug + Send + Sync {
    fn evaluate_candidate(
        &self,
        context: &DroneContext<'_>,
        candidate: MovementCandidate,
    ) -> CandidateScore;
}

/// Fish + delivery + separation, each weighted.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeCandidateEvaluator {
    simulation_steps: u32,
    scan_radius: f64,
    delivery_depth: i32,
    separation_value: f64,
    weights: ComponentWeights,
}

impl CompositeCandidateEvaluator {
    #[must_use]
    pub fn new(config: &EvaluatorConfig) -> Self {
        Self {
            simulation_steps: config.simulation_steps,
            scan_radius: config.scan_radius,
            delivery_depth: config.delivery_depth,
            separation_value: config.separation_value,
            weights: config.weights.clone(),
        }
    }

    fn fish_score(&self, context: &DroneContext<'_>, path: &Trajectory) -> f64 {
        if context.is_idle() {
            return context.idle_value
                * closing_factor(
                    context.position.distance(context.staging_point),
                    path.end().distance(context.staging_point),
                );
        }

        context
            .targets
            .iter()
            .map(|target| {
                let credit = if path.comes_within(
                    &target.trajectory,
                    self.simulation_steps,
                    self.scan_radius,
                ) {
                    target.value
                } else {
                    target.value
                        * closing_factor(
                            context.position.distance(target.trajectory.start()),
                            path.end().distance(target.trajectory.end()),
                        )
                };
                if target.contested { credit / 2.0 } else { credit }
            })
            .sum()
    }

    fn delivery_score(&self, context: &DroneContext<'_>, path: &Trajectory) -> f64 {
        let depth = self.delivery_depth;
        if context.held_value <= 0.0 || context.position.y <= depth {
            return 0.0;
        }
        let end = path.end();
        if end.y <= depth {
            return context.held_value;
        }
        context.held_value
            * closing_factor(
                f64::from(context.position.y - depth),
                f64::from(end.y - depth),
            )
    }

    fn separation_score(&self, context: &DroneContext<'_>, path: &Trajectory) -> f64 {
        let Some(sibling) = context.sibling else {
            return 0.0;
        };
        -self.separation_value
            * closing_factor(context.position.distance(sibling), path.end().distance(sibling))
    }
}

impl CandidateEvaluator for CompositeCandidateEvaluator {
    fn evaluate_candidate(
        &self,
        context: &DroneContext<'_>,
        candidate: MovementCandidate,
    ) -> CandidateScore {
        let path = Trajectory::new(
            context.position,
            candidate.displacement_from(context.position),
        );
        let fish = self.fish_score(context, &path);
        let delivery = self.delivery_score(context, &path);
        let separation = self.separation_score(context, &path);
        CandidateScore {
            fish,
            delivery,
            separation,
            total: self.weights.fish * fish
                + self.weights.delivery * delivery
                + self.weights.separation * separation,
        }
    }
}

/// Share of `initial` closed when ending at `final_distance`, in `[-1, 1]`.
#[must_use]
pub fn closing_factor(initial: f64, final_distance: f64) -> f64 {
    if initial <= 0.0 {
        return 0.0;
    }
    (1.0 - final_distance / initial).clamp(-1.0, 1.0)
}
