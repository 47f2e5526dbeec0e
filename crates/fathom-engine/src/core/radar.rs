use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::creature::EntityId;

/// Coarse direction of a creature relative to the drone that detected it.
///
/// "Top" is toward the surface (smaller `y`), "bottom" toward the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Quadrant {
    #[display("BL")]
    BottomLeft,
    #[display("TL")]
    TopLeft,
    #[display("BR")]
    BottomRight,
    #[display("TR")]
    TopRight,
}

impl Quadrant {
    pub const ALL: [Self; 4] = [
        Self::BottomLeft,
        Self::TopLeft,
        Self::BottomRight,
        Self::TopRight,
    ];

    /// Creature lies at or left of the drone.
    #[must_use]
    pub const fn is_left(self) -> bool {
        matches!(self, Self::BottomLeft | Self::TopLeft)
    }

    /// Creature lies at or above (shallower than) the drone.
    #[must_use]
    pub const fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown radar quadrant code: {code:?}")]
pub struct UnknownQuadrantError {
    #[error(not(source))]
    pub code: String,
}

impl FromStr for Quadrant {
    type Err = UnknownQuadrantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BL" => Ok(Self::BottomLeft),
            "TL" => Ok(Self::TopLeft),
            "BR" => Ok(Self::BottomRight),
            "TR" => Ok(Self::TopRight),
            _ => Err(UnknownQuadrantError { code: s.to_owned() }),
        }
    }
}

/// A radar detection: which creature, and roughly where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarBlip {
    pub creature_id: EntityId,
    pub quadrant: Quadrant,
}
