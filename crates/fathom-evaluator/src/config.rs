//! Tuning constants of the decision engine.
//!
//! Every constant the evaluators use lives in [`EvaluatorConfig`], so a match can be played
//! with a different table size or scoring balance without recompiling. The defaults reproduce
//! the game rules (speeds, radii, depths) and the hand-tuned scoring balance.
//!
//! The configuration is plain serde data; missing fields fall back to their defaults, so a
//! JSON file only needs the values it changes:
//!
//! ```rust
//! use fathom_evaluator::config::EvaluatorConfig;
//!
//! let config: EvaluatorConfig =
//!     serde_json::from_str(r#"{ "movement": { "angle_steps": 8 } }"#).unwrap();
//! assert_eq!(config.movement.angle_steps, 8);
//! assert_eq!(config.movement.speed_tiers, 2);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub movement: MovementConfig,
    /// Sub-steps used when sampling a turn's motion.
    pub simulation_steps: u32,
    /// A drone this close to a monster at any sample is lost.
    pub monster_collision_radius: f64,
    /// A fish this close to a drone at any sample is scanned.
    pub scan_radius: f64,
    /// Drones at or above this depth deliver their scans.
    pub delivery_depth: i32,
    /// Multiplier turning small creature values into integer score units.
    pub value_scale: u32,
    /// Magnitude of the (negative) value assigned to the sibling drone.
    pub separation_value: f64,
    pub light: LightConfig,
    pub weights: ComponentWeights,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            movement: MovementConfig::default(),
            simulation_steps: 10,
            monster_collision_radius: 500.0,
            scan_radius: 800.0,
            delivery_depth: 500,
            value_scale: 100,
            separation_value: 10.0,
            light: LightConfig::default(),
            weights: ComponentWeights::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub table: MovementTableKind,
    /// Headings of the grid table. Ignored by the compass.
    pub angle_steps: u32,
    /// Speed tiers of the grid table. Ignored by the compass.
    pub speed_tiers: u32,
    pub max_speed: i32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            table: MovementTableKind::Grid,
            angle_steps: 16,
            speed_tiers: 2,
            max_speed: 600,
        }
    }
}

/// Shape of the movement candidate table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementTableKind {
    /// `angle_steps` headings at each of `speed_tiers` speeds.
    #[default]
    Grid,
    /// Four axis moves and four diagonals.
    Compass,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// The light is only worth using deeper than this.
    pub min_depth: i32,
    /// Turns to wait between two uses when the battery is not full.
    pub interval: u32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            min_depth: 2_000,
            interval: 4,
        }
    }
}

/// Weight of each term of the composite candidate score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentWeights {
    pub fish: f64,
    pub delivery: f64,
    pub separation: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            fish: 1.0,
            delivery: 1.0,
            separation: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("movement.angle_steps must be positive")]
    NoAngles,
    #[display("movement.speed_tiers must be positive")]
    NoSpeedTiers,
    #[display("movement.max_speed must be positive, got {_0}")]
    NonPositiveSpeed(#[error(not(source))] i32),
    #[display("simulation_steps must be positive")]
    NoSimulationSteps,
    #[display("{name} must be a finite non-negative number, got {value}")]
    InvalidRadius { name: &'static str, value: f64 },
}

impl EvaluatorConfig {
    /// Checks the values a table or simulation cannot be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.movement.angle_steps == 0 {
            return Err(ConfigError::NoAngles);
        }
        if self.movement.speed_tiers == 0 {
            return Err(ConfigError::NoSpeedTiers);
        }
        if self.movement.max_speed <= 0 {
            return Err(ConfigError::NonPositiveSpeed(self.movement.max_speed));
        }
        if self.simulation_steps == 0 {
            return Err(ConfigError::NoSimulationSteps);
        }
        for (name, value) in [
            ("monster_collision_radius", self.monster_collision_radius),
            ("scan_radius", self.scan_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidRadius { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(EvaluatorConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let mut config = EvaluatorConfig::default();
        config.weights.separation = 0.25;
        config.light.interval = 6;
        let json = serde_json::to_string(&config).unwrap();
        let parsed: EvaluatorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed: EvaluatorConfig =
            serde_json::from_str(r#"{ "scan_radius": 2000.0, "weights": { "fish": 2.0 } }"#)
                .unwrap();
        assert!((parsed.scan_radius - 2_000.0).abs() < f64::EPSILON);
        assert!((parsed.weights.fish - 2.0).abs() < f64::EPSILON);
        assert!((parsed.weights.delivery - 1.0).abs() < f64::EPSILON);
        assert_eq!(parsed.movement, MovementConfig::default());
    }

    #[test]
    fn test_table_kind_from_json() {
        let parsed: EvaluatorConfig =
            serde_json::from_str(r#"{ "movement": { "table": "compass" } }"#).unwrap();
        assert_eq!(parsed.movement.table, MovementTableKind::Compass);
        assert_eq!(parsed.movement.max_speed, 600);
        assert_eq!(MovementConfig::default().table, MovementTableKind::Grid);
    }

    #[test]
    fn test_validate_rejects_degenerate_values() {
        let mut config = EvaluatorConfig::default();
        config.movement.angle_steps = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoAngles));

        let mut config = EvaluatorConfig::default();
        config.simulation_steps = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoSimulationSteps));

        let mut config = EvaluatorConfig::default();
        config.scan_radius = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRadius { name: "scan_radius", .. })
        ));
    }
}
