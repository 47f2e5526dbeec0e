//! Strategy selection: the greedy evaluator or the route baseline behind one trait.

use std::fmt;

use fathom_engine::GameState;

use crate::{
    config::EvaluatorConfig,
    estimator::EstimateError,
    route::RouteStrategy,
    turn_evaluator::{TurnEvaluator, TurnPlan},
};

/// Decides the actions of all my drones for the current turn.
///
/// `state` must hold this turn's snapshot. Strategies may update drone memory and fill in
/// estimated creature positions.
pub trait Strategy: fmt::Debug {
    fn play_turn(&self, state: &mut GameState) -> Result<TurnPlan, EstimateError>;
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr, derive_more::Display)]
pub enum StrategyKind {
    /// Per-candidate scoring with collision avoidance.
    #[default]
    Greedy,
    /// Fixed zig-zag sweep.
    Route,
}

impl StrategyKind {
    #[must_use]
    pub fn build(self, config: &EvaluatorConfig) -> Box<dyn Strategy> {
        match self {
            Self::Greedy => Box::new(TurnEvaluator::from_config(config)),
            Self::Route => Box::new(RouteStrategy::new(config)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert!(matches!("greedy".parse::<StrategyKind>(), Ok(StrategyKind::Greedy)));
        assert!(matches!("Route".parse::<StrategyKind>(), Ok(StrategyKind::Route)));
        assert!("random".parse::<StrategyKind>().is_err());
    }
}
