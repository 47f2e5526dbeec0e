//! Position estimator: places fish that are not visible this turn from their radar blips.
//!
//! A blip only says in which quadrant, relative to the reporting drone, a creature lies. Each
//! blip is a half-plane constraint on x and another on y; intersecting the constraints of all
//! owned drones with the fish type's habitat band gives a rectangle, and its center is used
//! as the estimate.
//!
//! # Rules
//!
//! - Every owned drone receives a blip for every creature still in play, so a fish is either
//!   reported by all owned drones or by none. Anything else means the snapshot is corrupt and
//!   is reported as [`EstimateError::BlipMismatch`].
//! - A fish reported by no drone has left the map (or was never there); it is marked
//!   unavailable and is not scored this turn.
//! - Bounds are only ever tightened. When two constraints cross (the rectangle is empty along
//!   an axis) the center of the crossed interval is still used, then clamped into the habitat
//!   band, so an estimate always lies inside the band.
//! - Estimated fish are treated as stationary.

use arrayvec::ArrayVec;
use fathom_engine::{EntityId, FishType, GameState, MAP_SIZE, PLAYER_DRONE_COUNT, Quadrant, Vec2};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EstimateError {
    #[display(
        "creature {creature_id} reported by drone {reporting} but not by drone {silent}"
    )]
    BlipMismatch {
        creature_id: EntityId,
        reporting: EntityId,
        silent: EntityId,
    },
}

/// Axis-aligned region a hidden creature is known to be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchArea {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl SearchArea {
    /// The habitat band of `fish_type`, across the whole map width.
    #[must_use]
    pub fn habitat(fish_type: FishType) -> Self {
        let (top, bottom) = fish_type.habitat();
        Self {
            x_min: 0,
            x_max: MAP_SIZE,
            y_min: top,
            y_max: bottom,
        }
    }

    /// Tightens the area with a blip seen by a drone at `drone`.
    #[must_use]
    pub fn narrowed(self, drone: Vec2, quadrant: Quadrant) -> Self {
        let mut area = self;
        if quadrant.is_left() {
            area.x_max = area.x_max.min(drone.x);
        } else {
            area.x_min = area.x_min.max(drone.x);
        }
        if quadrant.is_top() {
            area.y_max = area.y_max.min(drone.y);
        } else {
            area.y_min = area.y_min.max(drone.y);
        }
        area
    }

    /// Integer midpoint of both intervals.
    #[must_use]
    pub fn center(self) -> Vec2 {
        Vec2::new(
            self.x_min + (self.x_max - self.x_min) / 2,
            self.y_min + (self.y_max - self.y_min) / 2,
        )
    }
}

/// Estimates where a fish of `fish_type` is from the blips `(drone position, quadrant)`.
#[must_use]
pub fn estimate_position(fish_type: FishType, blips: &[(Vec2, Quadrant)]) -> Vec2 {
    let band = SearchArea::habitat(fish_type);
    let area = blips
        .iter()
        .fold(band, |area, &(drone, quadrant)| area.narrowed(drone, quadrant));
    let center = area.center();
    Vec2::new(
        center.x.clamp(band.x_min, band.x_max),
        center.y.clamp(band.y_min, band.y_max),
    )
}

/// Fills in the position of every fish not observed this turn, or marks it unavailable.
pub fn estimate_hidden_positions(state: &mut GameState) -> Result<(), EstimateError> {
    let drones: ArrayVec<_, PLAYER_DRONE_COUNT> = state
        .my_drones()
        .map(|d| (d.id(), d.position(), d.blips().to_vec()))
        .collect();

    let mut estimates = Vec::new();
    for fish in state.registry().fish().filter(|f| !f.is_visible()) {
        let Some(fish_type) = fish.kind().fish_type() else {
            continue;
        };

        let mut reporting = None;
        let mut silent = None;
        let mut blips = ArrayVec::<_, PLAYER_DRONE_COUNT>::new();
        for (drone_id, position, drone_blips) in &drones {
            match drone_blips.iter().find(|b| b.creature_id == fish.id()) {
                Some(blip) => {
                    reporting = Some(*drone_id);
                    blips.push((*position, blip.quadrant));
                }
                None => silent = Some(*drone_id),
            }
        }

        match (reporting, silent) {
            (Some(reporting), Some(silent)) => {
                return Err(EstimateError::BlipMismatch {
                    creature_id: fish.id(),
                    reporting,
                    silent,
                });
            }
            (Some(_), None) => {
                estimates.push((fish.id(), Some(estimate_position(fish_type, &blips))));
            }
            (None, _) => estimates.push((fish.id(), None)),
        }
    }

    for (id, estimate) in estimates {
        let Some(fish) = state.registry_mut().creature_mut(id) else {
            continue;
        };
        match estimate {
            Some(position) => {
                tracing::trace!(fish = %id, %position, "estimated from radar");
                fish.set_estimate(position);
            }
            None => fish.mark_unavailable(),
        }
    }
    Ok(())
}
