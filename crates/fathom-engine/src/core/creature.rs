use serde::{Deserialize, Serialize};

use super::geometry::{MAP_SIZE, Vec2};

/// Number of distinct fish colors.
pub const FISH_COLOR_COUNT: usize = 4;
/// Number of distinct fish types.
pub const FISH_TYPE_COUNT: usize = 3;
/// Number of fish in a match: one per (color, type) pair.
pub const FISH_COUNT: usize = FISH_COLOR_COUNT * FISH_TYPE_COUNT;
/// Upper bound on monsters in a match.
pub const MONSTER_COUNT_MAX: usize = 8;
/// Upper bound on creatures (fish and monsters) in a match.
pub const CREATURE_COUNT_MAX: usize = FISH_COUNT + MONSTER_COUNT_MAX;

/// Identity shared by drones, fish and monsters.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[display("#{_0}")]
pub struct EntityId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("color{_0}")]
pub struct FishColor(u8);

impl FishColor {
    /// Builds a color from its protocol index, or `None` if out of range.
    #[must_use]
    pub fn from_index(index: i32) -> Option<Self> {
        u8::try_from(index)
            .ok()
            .filter(|&i| usize::from(i) < FISH_COLOR_COUNT)
            .map(Self)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Fish type. Each type lives in its own horizontal band of the ocean.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum FishType {
    Shallow,
    Middle,
    Deep,
}

impl FishType {
    pub const ALL: [Self; FISH_TYPE_COUNT] = [Self::Shallow, Self::Middle, Self::Deep];

    /// Builds a type from its protocol index, or `None` if out of range.
    #[must_use]
    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Inclusive depth range `(top, bottom)` this type never leaves.
    #[must_use]
    pub const fn habitat(self) -> (i32, i32) {
        match self {
            Self::Shallow => (2_500, 5_000),
            Self::Middle => (5_000, 7_500),
            Self::Deep => (7_500, MAP_SIZE),
        }
    }
}

/// Fish/monster discrimination. Authoritative for every creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant)]
pub enum CreatureKind {
    Fish { color: FishColor, fish_type: FishType },
    Monster,
}

/// Marker used by the roster for a monster's type (and color).
pub const MONSTER_SENTINEL: i32 = -1;

impl CreatureKind {
    /// Decodes the roster's `(color, type)` pair.
    ///
    /// A type of [`MONSTER_SENTINEL`] marks a monster; its color is ignored.
    #[must_use]
    pub fn from_roster(color: i32, fish_type: i32) -> Option<Self> {
        if fish_type == MONSTER_SENTINEL {
            return Some(Self::Monster);
        }
        Some(Self::Fish {
            color: FishColor::from_index(color)?,
            fish_type: FishType::from_index(fish_type)?,
        })
    }

    #[must_use]
    pub fn fish_color(self) -> Option<FishColor> {
        match self {
            Self::Fish { color, .. } => Some(color),
            Self::Monster => None,
        }
    }

    #[must_use]
    pub fn fish_type(self) -> Option<FishType> {
        match self {
            Self::Fish { fish_type, .. } => Some(fish_type),
            Self::Monster => None,
        }
    }
}

/// A fish or monster.
///
/// Identity and kind are fixed at match start. Position, velocity and the two flags are
/// per-turn: ingestion clears `visible` and restores `available`, the visible list refreshes
/// observed creatures, and the position estimator fills in the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creature {
    id: EntityId,
    kind: CreatureKind,
    position: Vec2,
    velocity: Vec2,
    visible: bool,
    available: bool,
}

impl Creature {
    #[must_use]
    pub fn new(id: EntityId, kind: CreatureKind) -> Self {
        Self {
            id,
            kind,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            visible: false,
            available: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> CreatureKind {
        self.kind
    }

    #[must_use]
    pub fn is_fish(&self) -> bool {
        self.kind.is_fish()
    }

    #[must_use]
    pub fn is_monster(&self) -> bool {
        self.kind.is_monster()
    }

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Directly observed this turn.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Has a known or estimated position this turn.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available
    }

    pub(crate) fn begin_turn(&mut self) {
        self.visible = false;
        self.available = false;
    }

    pub(crate) fn observe(&mut self, position: Vec2, velocity: Vec2) {
        self.position = position;
        self.velocity = velocity;
        self.visible = true;
        self.available = true;
    }

    /// Records an estimated position for a creature that was not observed this turn.
    pub fn set_estimate(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.available = true;
    }

    /// Excludes the creature from scoring for the rest of the turn.
    pub fn mark_unavailable(&mut self) {
        self.available = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_decoding() {
        assert_eq!(
            CreatureKind::from_roster(2, 1),
            Some(CreatureKind::Fish {
                color: FishColor(2),
                fish_type: FishType::Middle,
            })
        );
        assert_eq!(CreatureKind::from_roster(-1, -1), Some(CreatureKind::Monster));
        assert_eq!(CreatureKind::from_roster(4, 0), None);
        assert_eq!(CreatureKind::from_roster(0, 3), None);
        assert_eq!(CreatureKind::from_roster(0, -2), None);
    }

    #[test]
    fn test_habitats_tile_the_lower_ocean() {
        let bands = FishType::ALL.map(FishType::habitat);
        assert_eq!(bands[0], (2_500, 5_000));
        assert_eq!(bands[0].1, bands[1].0);
        assert_eq!(bands[1].1, bands[2].0);
        assert_eq!(bands[2].1, MAP_SIZE);
    }

    #[test]
    fn test_turn_flags() {
        let mut creature = Creature::new(EntityId(4), CreatureKind::Monster);
        creature.observe(Vec2::new(10, 20), Vec2::new(-3, 4));
        assert!(creature.is_visible() && creature.is_available());

        creature.begin_turn();
        assert!(!creature.is_visible() && !creature.is_available());
        assert_eq!(creature.position(), Vec2::new(10, 20));

        creature.set_estimate(Vec2::new(50, 60));
        assert!(!creature.is_visible() && creature.is_available());
        assert_eq!(creature.velocity(), Vec2::ZERO);
    }
}
