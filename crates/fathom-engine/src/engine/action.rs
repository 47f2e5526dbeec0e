use crate::core::Vec2;

/// The command issued for one drone this turn.
///
/// `Display` renders the protocol line: `MOVE x y light` or `WAIT light`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum DroneAction {
    #[display("MOVE {} {} {}", target.x, target.y, u8::from(*light))]
    Move { target: Vec2, light: bool },
    #[display("WAIT {}", u8::from(*light))]
    Wait { light: bool },
}

impl DroneAction {
    /// Moves toward `target`, clamped into the map.
    #[must_use]
    pub fn move_to(target: Vec2, light: bool) -> Self {
        Self::Move {
            target: target.clamp_to_map(),
            light,
        }
    }

    #[must_use]
    pub fn light(self) -> bool {
        match self {
            Self::Move { light, .. } | Self::Wait { light } => light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_rendering() {
        let action = DroneAction::move_to(Vec2::new(5_000, 8_400), true);
        assert_eq!(action.to_string(), "MOVE 5000 8400 1");
        assert_eq!(DroneAction::Wait { light: false }.to_string(), "WAIT 0");
    }

    #[test]
    fn test_move_to_clamps() {
        let action = DroneAction::move_to(Vec2::new(-20, 10_400), false);
        assert_eq!(
            action,
            DroneAction::Move {
                target: Vec2::new(0, 10_000),
                light: false
            }
        );
        assert!(!action.light());
    }
}
