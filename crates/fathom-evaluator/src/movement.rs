//! Movement candidates: the fixed set of offsets a drone may try each turn.
//!
//! The table is built once per match from [`MovementConfig`]. By default it is an
//! angle × speed grid of 32 offsets: 16 headings at full speed (600) followed by the same 16
//! headings at half speed (300). The eight-heading compass is the alternative.
//!
//! # Construction
//!
//! Speed tier `s ∈ 0..M` has magnitude `ceil(max_speed × (M − s) / M)`. Heading `a ∈ 0..N`
//! points at angle `2π·a/N`, starting along `+x` and turning toward `+y` (deeper).
//! Components are rounded away from zero so that a drone never undershoots the offset it was
//! meant to cover. Values within `1e-6` of an integer snap to it first, so axis-aligned
//! headings produce exact zeros instead of ±1 from trigonometric noise.
//!
//! # Ordering
//!
//! Candidates are stored tier by tier, heading by heading. The decision selector keeps the
//! first candidate among equal scores, so this order is also the tie-break order.

use std::f64::consts::TAU;

use fathom_engine::Vec2;

use crate::config::{MovementConfig, MovementTableKind};

/// A fixed `(dx, dy)` offset from the movement table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{offset}")]
pub struct MovementCandidate {
    offset: Vec2,
}

impl MovementCandidate {
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self {
            offset: Vec2::new(dx, dy),
        }
    }

    #[must_use]
    pub const fn offset(self) -> Vec2 {
        self.offset
    }

    /// Displacement actually covered from `from`, once the destination is clamped into the map.
    #[must_use]
    pub fn displacement_from(self, from: Vec2) -> Vec2 {
        from.offset_clamped(self.offset) - from
    }
}

/// Turn-invariant list of movement candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementTable {
    candidates: Vec<MovementCandidate>,
}

impl MovementTable {
    /// Builds the table of the kind `config` selects.
    #[must_use]
    pub fn new(config: &MovementConfig) -> Self {
        match config.table {
            MovementTableKind::Grid => Self::grid(config),
            MovementTableKind::Compass => Self::compass(config.max_speed),
        }
    }

    /// Builds the angle × speed grid.
    #[must_use]
    pub fn grid(config: &MovementConfig) -> Self {
        let MovementConfig {
            table: _,
            angle_steps,
            speed_tiers,
            max_speed,
        } = *config;

        let candidates = (0..speed_tiers)
            .flat_map(|tier| {
                let magnitude = tier_magnitude(max_speed, tier, speed_tiers);
                (0..angle_steps).map(move |step| {
                    let angle = TAU * f64::from(step) / f64::from(angle_steps);
                    MovementCandidate::new(
                        round_away_from_zero(magnitude * angle.cos()),
                        round_away_from_zero(magnitude * angle.sin()),
                    )
                })
            })
            .collect();
        Self { candidates }
    }

    /// The eight-heading compass used by simpler bots: four axis moves and four diagonals.
    #[must_use]
    pub fn compass(speed: i32) -> Self {
        let half = speed / 2;
        let candidates = [
            (speed, 0),
            (half, half),
            (0, speed),
            (-half, half),
            (-speed, 0),
            (-half, -half),
            (0, -speed),
            (half, -half),
        ]
        .into_iter()
        .map(|(dx, dy)| MovementCandidate::new(dx, dy))
        .collect();
        Self { candidates }
    }

    #[must_use]
    pub fn candidates(&self) -> &[MovementCandidate] {
        &self.candidates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

fn tier_magnitude(max_speed: i32, tier: u32, tiers: u32) -> f64 {
    let numerator = i64::from(max_speed) * i64::from(tiers - tier);
    let denominator = i64::from(tiers);
    // ceil for positive operands
    #[expect(clippy::cast_precision_loss)]
    let magnitude = ((numerator + denominator - 1) / denominator) as f64;
    magnitude
}

#[expect(clippy::cast_possible_truncation)]
fn round_away_from_zero(value: f64) -> i32 {
    let nearest = value.round();
    if (value - nearest).abs() < 1e-6 {
        nearest as i32
    } else if value > 0.0 {
        value.ceil() as i32
    } else {
        value.floor() as i32
    }
}
