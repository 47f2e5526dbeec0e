use serde::{Deserialize, Serialize};

/// Width and height of the ocean. Coordinates are valid in `[0, MAP_SIZE]`.
pub const MAP_SIZE: i32 = 10_000;

/// An integer point or offset in map units.
///
/// `y` grows with depth: `y = 0` is the surface and `y = MAP_SIZE` is the sea floor,
/// so "bottom" and "deeper" both mean a larger `y`.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Add,
    derive_more::Sub,
    derive_more::Display,
)]
#[display("({x}, {y})")]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0, 0);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }

    /// Returns `true` if both components lie in `[0, MAP_SIZE]`.
    #[must_use]
    pub fn is_on_map(self) -> bool {
        (0..=MAP_SIZE).contains(&self.x) && (0..=MAP_SIZE).contains(&self.y)
    }

    /// Component-wise addition that stops at the `i32` bounds instead of overflowing.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self::new(self.x.saturating_add(other.x), self.y.saturating_add(other.y))
    }

    /// Clamps both components into `[0, MAP_SIZE]`.
    #[must_use]
    pub fn clamp_to_map(self) -> Self {
        Self {
            x: self.x.clamp(0, MAP_SIZE),
            y: self.y.clamp(0, MAP_SIZE),
        }
    }

    /// Adds `offset` and clamps the result into the map.
    #[must_use]
    pub fn offset_clamped(self, offset: Self) -> Self {
        self.saturating_add(offset).clamp_to_map()
    }
}

/// Straight-line motion over one turn: a start point plus the displacement covered by the end
/// of the turn.
///
/// Drones move along their candidate offset and creatures along their velocity, so both are
/// described the same way and can be sampled in lockstep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trajectory {
    start: Vec2,
    displacement: Vec2,
}

impl Trajectory {
    #[must_use]
    pub const fn new(start: Vec2, displacement: Vec2) -> Self {
        Self {
            start,
            displacement,
        }
    }

    /// A trajectory that does not move.
    #[must_use]
    pub const fn stationary(at: Vec2) -> Self {
        Self::new(at, Vec2::ZERO)
    }

    #[must_use]
    pub const fn start(&self) -> Vec2 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Vec2 {
        self.start.saturating_add(self.displacement)
    }

    /// Position after `step` of `steps` equal sub-steps.
    #[must_use]
    pub fn sample(&self, step: u32, steps: u32) -> (f64, f64) {
        let t = f64::from(step) / f64::from(steps);
        (
            f64::from(self.start.x) + f64::from(self.displacement.x) * t,
            f64::from(self.start.y) + f64::from(self.displacement.y) * t,
        )
    }

    /// Returns `true` if at any sub-step `1..=steps` the two trajectories are at most `radius`
    /// apart.
    ///
    /// The start positions (sub-step 0) are not tested: they describe the state the turn begins
    /// in, not a consequence of the move.
    #[must_use]
    pub fn comes_within(&self, other: &Self, steps: u32, radius: f64) -> bool {
        let radius_sq = radius * radius;
        (1..=steps).any(|step| {
            let (ax, ay) = self.sample(step, steps);
            let (bx, by) = other.sample(step, steps);
            let (dx, dy) = (ax - bx, ay - by);
            dx * dx + dy * dy <= radius_sq
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_euclidean() {
        assert!((Vec2::new(0, 0).distance(Vec2::new(3, 4)) - 5.0).abs() < f64::EPSILON);
        assert!(Vec2::new(7, 7).distance(Vec2::new(7, 7)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_to_map() {
        assert_eq!(Vec2::new(-5, 10_500).clamp_to_map(), Vec2::new(0, MAP_SIZE));
        assert_eq!(Vec2::new(123, 456).clamp_to_map(), Vec2::new(123, 456));
        assert_eq!(
            Vec2::new(9_800, 100).offset_clamped(Vec2::new(600, -300)),
            Vec2::new(MAP_SIZE, 0)
        );
    }

    #[test]
    fn test_extreme_offsets_saturate() {
        let far = Vec2::new(i32::MAX - 10, i32::MIN + 10);
        assert_eq!(
            Vec2::new(9_000, 100).offset_clamped(far),
            Vec2::new(MAP_SIZE, 0)
        );
        let trajectory = Trajectory::new(Vec2::new(100, 100), far);
        assert_eq!(trajectory.end(), Vec2::new(i32::MAX, i32::MIN + 110));
        assert!(!Vec2::new(MAP_SIZE + 1, 0).is_on_map());
        assert!(Vec2::new(MAP_SIZE, 0).is_on_map());
    }

    #[test]
    fn test_sample_reaches_end() {
        let trajectory = Trajectory::new(Vec2::new(100, 200), Vec2::new(600, -300));
        assert_eq!(trajectory.sample(0, 10), (100.0, 200.0));
        assert_eq!(trajectory.sample(5, 10), (400.0, 50.0));
        assert_eq!(trajectory.sample(10, 10), (700.0, -100.0));
        assert_eq!(trajectory.end(), Vec2::new(700, -100));
    }

    #[test]
    fn test_comes_within_checks_intermediate_samples() {
        // Head-on crossing: the endpoints are far apart but the paths meet halfway.
        let a = Trajectory::new(Vec2::new(0, 0), Vec2::new(2_000, 0));
        let b = Trajectory::new(Vec2::new(2_000, 0), Vec2::new(-2_000, 0));
        assert!(a.end().distance(b.end()) > 500.0);
        assert!(a.comes_within(&b, 10, 500.0));
    }

    #[test]
    fn test_comes_within_ignores_start() {
        let a = Trajectory::new(Vec2::new(0, 0), Vec2::new(0, 1_000));
        let b = Trajectory::stationary(Vec2::new(0, 0));
        assert!(!a.comes_within(&b, 10, 50.0));
        assert!(a.comes_within(&b, 10, 100.0));
    }

    #[test]
    fn test_comes_within_is_inclusive() {
        let a = Trajectory::stationary(Vec2::new(0, 0));
        let b = Trajectory::stationary(Vec2::new(500, 0));
        assert!(a.comes_within(&b, 10, 500.0));
        assert!(!a.comes_within(&b, 10, 499.0));
    }
}
