//! Creature valuation: how much scanning a given fish is worth to me right now.
//!
//! The value of a fish grows with how close a scan brings me to completing one of its
//! categories (all three fish of a color, or all four fish of a type), and with how much the
//! scan denies the opponent.
//!
//! # Formula
//!
//! ```text
//! value = (base + color_bonus + type_bonus) × scale
//! base  = type index + 1
//! ```
//!
//! | delivered of the category | color bonus | type bonus |
//! |---------------------------|-------------|------------|
//! | 0 or 1                    | 1           | 1          |
//! | 2                         | 3           | 2          |
//! | 3 or more                 | 3           | 4          |
//!
//! Each bonus is doubled when the opponent has not delivered this fish, and doubled again
//! when the opponent is still short of completing the category.
//!
//! # Radar gating
//!
//! A bonus is only paid out for a category I have evidence I can finish: it is forced to zero
//! while fewer than 3 fish of the color (4 of the type) show up on my drones' radar this turn.
//!
//! Only *delivered* scans count toward progress; scans held by a drone are not yet worth
//! anything to the score.

use std::collections::BTreeSet;

use fathom_engine::{
    Creature, EntityId, FISH_COLOR_COUNT, FISH_TYPE_COUNT, FishColor, FishType, GameState,
    PlayerState, Registry,
};

/// Fish sharing a color, one per type.
pub const COLOR_COMPLETION: u32 = 3;
/// Fish sharing a type, one per color.
pub const TYPE_COMPLETION: u32 = 4;

/// Delivered (or sighted) counts per category.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCounts {
    colors: [u32; FISH_COLOR_COUNT],
    types: [u32; FISH_TYPE_COUNT],
}

impl CategoryCounts {
    /// Counts the fish among `ids`; unknown ids and monsters are ignored.
    #[must_use]
    pub fn from_ids<'a>(registry: &Registry, ids: impl IntoIterator<Item = &'a EntityId>) -> Self {
        let mut counts = Self::default();
        for &id in ids {
            let Some(creature) = registry.creature(id) else {
                continue;
            };
            if let (Some(color), Some(fish_type)) =
                (creature.kind().fish_color(), creature.kind().fish_type())
            {
                counts.colors[color.index()] += 1;
                counts.types[fish_type.index()] += 1;
            }
        }
        counts
    }

    #[must_use]
    pub fn color(&self, color: FishColor) -> u32 {
        self.colors[color.index()]
    }

    #[must_use]
    pub fn fish_type(&self, fish_type: FishType) -> u32 {
        self.types[fish_type.index()]
    }
}

/// Per-turn valuation of fish, built once from the ingested state and shared by both drones.
#[derive(Debug, Clone)]
pub struct CreatureValuer<'a> {
    foe: &'a PlayerState,
    own: CategoryCounts,
    foe_counts: CategoryCounts,
    sighted: CategoryCounts,
    scale: u32,
}

impl<'a> CreatureValuer<'a> {
    #[must_use]
    pub fn new(state: &'a GameState, scale: u32) -> Self {
        let registry = state.registry();
        let sighted_ids: BTreeSet<EntityId> = state
            .my_drones()
            .flat_map(|drone| drone.blips().iter().map(|blip| blip.creature_id))
            .collect();
        Self {
            foe: state.foe(),
            own: CategoryCounts::from_ids(registry, state.me().delivered()),
            foe_counts: CategoryCounts::from_ids(registry, state.foe().delivered()),
            sighted: CategoryCounts::from_ids(registry, &sighted_ids),
            scale,
        }
    }

    /// Value of scanning `creature`. Monsters are worth nothing.
    #[must_use]
    pub fn value_of(&self, creature: &Creature) -> u32 {
        let kind = creature.kind();
        let (Some(color), Some(fish_type)) = (kind.fish_color(), kind.fish_type()) else {
            return 0;
        };

        let base = u32::try_from(fish_type.index()).unwrap_or(0) + 1;
        let denied = !self.foe.has_delivered(creature.id());

        let color_bonus = if self.sighted.color(color) < COLOR_COMPLETION {
            0
        } else {
            denial(
                color_bonus(self.own.color(color)),
                denied,
                self.foe_counts.color(color) < COLOR_COMPLETION,
            )
        };
        let type_bonus = if self.sighted.fish_type(fish_type) < TYPE_COMPLETION {
            0
        } else {
            denial(
                type_bonus(self.own.fish_type(fish_type)),
                denied,
                self.foe_counts.fish_type(fish_type) < TYPE_COMPLETION,
            )
        };

        (base + color_bonus + type_bonus) * self.scale
    }
}

#[must_use]
pub fn color_bonus(delivered: u32) -> u32 {
    if delivered >= 2 { 3 } else { 1 }
}

#[must_use]
pub fn type_bonus(delivered: u32) -> u32 {
    match delivered {
        0 | 1 => 1,
        2 => 2,
        _ => 4,
    }
}

fn denial(bonus: u32, foe_lacks_fish: bool, foe_lacks_category: bool) -> u32 {
    let mut bonus = bonus;
    if foe_lacks_fish {
        bonus *= 2;
    }
    if foe_lacks_category {
        bonus *= 2;
    }
    bonus
}
