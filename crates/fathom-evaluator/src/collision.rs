//! Collision filter: drops movement candidates that would bring a drone within reach of a
//! monster during the turn.
//!
//! Both the drone (along its candidate offset) and every monster (along its velocity) are
//! advanced in `K` equal sub-steps; a candidate is rejected if any sub-step puts the drone
//! within the lethal radius of any monster. Only monsters observed this turn take part: a
//! monster without a known position cannot be simulated.
//!
//! The filter never forces a move. If every candidate is rejected the surviving set is empty
//! and the decision selector waits instead.

use fathom_engine::{Registry, Trajectory, Vec2};

use crate::{
    config::EvaluatorConfig,
    movement::{MovementCandidate, MovementTable},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionFilter {
    steps: u32,
    radius: f64,
}

impl CollisionFilter {
    #[must_use]
    pub fn new(steps: u32, radius: f64) -> Self {
        Self { steps, radius }
    }

    #[must_use]
    pub fn from_config(config: &EvaluatorConfig) -> Self {
        Self::new(config.simulation_steps, config.monster_collision_radius)
    }

    /// Returns `true` if moving from `position` along `candidate` keeps clear of every monster.
    #[must_use]
    pub fn is_safe(
        &self,
        position: Vec2,
        candidate: MovementCandidate,
        monsters: &[Trajectory],
    ) -> bool {
        let path = Trajectory::new(position, candidate.displacement_from(position));
        !monsters
            .iter()
            .any(|monster| path.comes_within(monster, self.steps, self.radius))
    }

    /// Candidates of `table` that are safe from `position`, in table order.
    #[must_use]
    pub fn surviving(
        &self,
        position: Vec2,
        table: &MovementTable,
        monsters: &[Trajectory],
    ) -> Vec<MovementCandidate> {
        table
            .candidates()
            .iter()
            .copied()
            .filter(|&candidate| self.is_safe(position, candidate, monsters))
            .collect()
    }
}

/// Trajectories of the monsters observed this turn.
#[must_use]
pub fn monster_trajectories(registry: &Registry) -> Vec<Trajectory> {
    registry
        .monsters()
        .filter(|monster| monster.is_visible())
        .map(|monster| Trajectory::new(monster.position(), monster.velocity()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MovementConfig;

    fn table() -> MovementTable {
        MovementTable::new(&MovementConfig::default())
    }

    fn filter() -> CollisionFilter {
        CollisionFilter::from_config(&EvaluatorConfig::default())
    }

    #[test]
    fn test_no_monsters_keeps_everything() {
        let survivors = filter().surviving(Vec2::new(5_000, 5_000), &table(), &[]);
        assert_eq!(survivors.as_slice(), table().candidates());
    }

    #[test]
    fn test_rejects_moves_toward_monster() {
        // Monster 900 units to the right, standing still.
        let monster = Trajectory::stationary(Vec2::new(5_900, 5_000));
        let position = Vec2::new(5_000, 5_000);
        let f = filter();

        assert!(!f.is_safe(position, MovementCandidate::new(600, 0), &[monster]));
        assert!(f.is_safe(position, MovementCandidate::new(-600, 0), &[monster]));
        assert!(f.is_safe(position, MovementCandidate::new(300, 0), &[monster]));
    }

    #[test]
    fn test_rejects_crossing_paths() {
        // The monster sweeps across the drone's path mid-turn.
        let monster = Trajectory::new(Vec2::new(4_000, 4_700), Vec2::new(2_000, 0));
        let position = Vec2::new(5_000, 5_000);
        assert!(!filter().is_safe(position, MovementCandidate::new(0, -600), &[monster]));
        assert!(filter().is_safe(position, MovementCandidate::new(0, 600), &[monster]));
    }

    #[test]
    fn test_surrounded_drone_has_no_survivors() {
        let position = Vec2::new(5_000, 5_000);
        let monsters: Vec<Trajectory> = [(0, 0), (400, 0), (-400, 0), (0, 400), (0, -400)]
            .into_iter()
            .map(|(dx, dy)| Trajectory::stationary(position + Vec2::new(dx, dy)))
            .collect();
        assert!(filter().surviving(position, &table(), &monsters).is_empty());
    }

    #[test]
    fn test_filter_is_deterministic() {
        let position = Vec2::new(3_000, 7_000);
        let monsters = [
            Trajectory::new(Vec2::new(3_500, 7_400), Vec2::new(-270, 0)),
            Trajectory::new(Vec2::new(2_000, 6_500), Vec2::new(200, 200)),
        ];
        let first = filter().surviving(position, &table(), &monsters);
        let second = filter().surviving(position, &table(), &monsters);
        assert_eq!(first, second);
        assert!(!first.is_empty() && first.len() < table().len());
    }
}
