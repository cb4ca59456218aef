//! Movement tuning.
//!
//! All parameters are grouped here for easy tuning. Defaults follow Unreal
//! character-movement units (centimetres, seconds) with quake-style
//! friction and acceleration values on top.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading or validating a [`MovementTuning`].
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("`{field}` must be finite")]
    NonFinite { field: &'static str },

    #[error("`slow_walk_multiplier` must be in (0, 1], got {0}")]
    SlowWalkMultiplier(f32),

    #[error("`walkable_floor_z` must be in [0, 1], got {0}")]
    WalkableFloorZ(f32),
}

/// Designer-facing movement configuration.
///
/// Loaded once per actor or profile and read-only during simulation.
/// Missing fields in a TOML profile fall back to [`MovementTuning::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    // ========================================================================
    // Friction
    // ========================================================================
    /// Ground friction coefficient.
    pub ground_friction: f32,

    /// Friction used while braking (no acceleration requested), when
    /// `use_separate_braking_friction` is set.
    pub braking_friction: f32,

    /// Use `braking_friction` instead of `ground_friction` while braking.
    pub use_separate_braking_friction: bool,

    /// Speed floor for the friction control speed (cm/s).
    pub stop_speed: f32,

    // ========================================================================
    // Acceleration
    // ========================================================================
    /// Maximum acceleration factor. Shared by ground, air and flying modes.
    pub max_acceleration: f32,

    /// Cap on the target speed used by air acceleration (cm/s).
    pub max_air_wish_speed: f32,

    // ========================================================================
    // Bunny-hopping
    // ========================================================================
    /// Time after the last airborne tick during which ground friction is
    /// suppressed (seconds).
    pub grace_period_seconds: f64,

    // ========================================================================
    // Speeds
    // ========================================================================
    /// Whether the slow-walk flag may be set at all.
    pub can_slow_walk: bool,

    /// Max-speed multiplier while slow-walking, in (0, 1].
    pub slow_walk_multiplier: f32,

    /// Walking/falling max speed (cm/s).
    pub max_walk_speed: f32,

    /// Walking/falling max speed while crouched (cm/s).
    pub max_walk_speed_crouched: f32,

    /// Flying max speed (cm/s).
    pub max_fly_speed: f32,

    // ========================================================================
    // Floor and jumping
    // ========================================================================
    /// Minimum floor normal Z for a surface to be walkable.
    /// 0.7 ≈ 45 degrees.
    pub walkable_floor_z: f32,

    /// Vertical jump velocity (cm/s).
    pub jump_z_velocity: f32,

    // ========================================================================
    // Capsule and ground queries
    // ========================================================================
    /// Standing capsule half-height (cm).
    pub standing_half_height: f32,

    /// Crouched capsule half-height (cm).
    pub crouched_half_height: f32,

    /// How far below the capsule the ground-info query reaches (cm).
    pub ground_trace_distance: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            // Friction
            ground_friction: 4.0,
            braking_friction: 4.0,
            use_separate_braking_friction: false,
            stop_speed: 150.0,

            // Acceleration
            max_acceleration: 10.0,
            max_air_wish_speed: 100.0,

            // Bunny-hopping
            grace_period_seconds: 0.2,

            // Speeds
            can_slow_walk: true,
            slow_walk_multiplier: 0.5,
            max_walk_speed: 700.0,
            max_walk_speed_crouched: 300.0,
            max_fly_speed: 600.0,

            // Floor and jumping
            walkable_floor_z: 0.7,
            jump_z_velocity: 400.0,

            // Capsule
            standing_half_height: 88.0,
            crouched_half_height: 52.0,
            ground_trace_distance: 100_000.0,
        }
    }
}

impl MovementTuning {
    /// Forgiving profile: long grace window and strong air control.
    pub fn bunnyhop() -> Self {
        Self {
            ground_friction: 6.0,
            max_acceleration: 12.0,
            max_air_wish_speed: 60.0,
            grace_period_seconds: 0.4,
            ..Default::default()
        }
    }

    /// Grounded profile: no grace window, heavy braking.
    pub fn tactical() -> Self {
        Self {
            ground_friction: 8.0,
            braking_friction: 10.0,
            use_separate_braking_friction: true,
            max_acceleration: 8.0,
            max_air_wish_speed: 30.0,
            grace_period_seconds: 0.0,
            max_walk_speed: 450.0,
            max_walk_speed_crouched: 200.0,
            jump_z_velocity: 320.0,
            ..Default::default()
        }
    }

    /// Parse and validate a TOML profile.
    pub fn from_toml_str(source: &str) -> Result<Self, TuningError> {
        let tuning: Self = toml::from_str(source)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a TOML profile from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), TuningError> {
        let non_negative = [
            ("ground_friction", self.ground_friction),
            ("braking_friction", self.braking_friction),
            ("stop_speed", self.stop_speed),
            ("max_acceleration", self.max_acceleration),
            ("max_air_wish_speed", self.max_air_wish_speed),
            ("max_walk_speed", self.max_walk_speed),
            ("max_walk_speed_crouched", self.max_walk_speed_crouched),
            ("max_fly_speed", self.max_fly_speed),
            ("jump_z_velocity", self.jump_z_velocity),
            ("standing_half_height", self.standing_half_height),
            ("crouched_half_height", self.crouched_half_height),
            ("ground_trace_distance", self.ground_trace_distance),
            ("slow_walk_multiplier", self.slow_walk_multiplier),
            ("walkable_floor_z", self.walkable_floor_z),
        ];

        let non_negative = non_negative
            .into_iter()
            .map(|(field, value)| (field, f64::from(value)))
            .chain([("grace_period_seconds", self.grace_period_seconds)]);

        for (field, value) in non_negative {
            if !value.is_finite() {
                return Err(TuningError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(TuningError::Negative { field, value });
            }
        }

        if self.slow_walk_multiplier <= 0.0 || self.slow_walk_multiplier > 1.0 {
            return Err(TuningError::SlowWalkMultiplier(self.slow_walk_multiplier));
        }
        if self.walkable_floor_z > 1.0 {
            return Err(TuningError::WalkableFloorZ(self.walkable_floor_z));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        let tuning = MovementTuning::default();
        assert!(tuning.validate().is_ok());
        assert!(tuning.max_walk_speed > tuning.max_walk_speed_crouched);
        assert!(tuning.crouched_half_height < tuning.standing_half_height);
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(MovementTuning::bunnyhop().validate().is_ok());
        assert!(MovementTuning::tactical().validate().is_ok());
        assert!(MovementTuning::bunnyhop().grace_period_seconds > MovementTuning::tactical().grace_period_seconds);
    }

    #[test]
    fn test_partial_toml_profile_uses_defaults() {
        let tuning = MovementTuning::from_toml_str(
            r#"
            max_walk_speed = 900.0
            grace_period_seconds = 0.35
            "#,
        )
        .unwrap();

        assert_eq!(tuning.max_walk_speed, 900.0);
        assert_eq!(tuning.grace_period_seconds, 0.35);
        assert_eq!(tuning.stop_speed, MovementTuning::default().stop_speed);
    }

    #[test]
    fn test_toml_round_trip_preserves_profile() {
        let tuning = MovementTuning::tactical();
        let text = toml::to_string(&tuning).unwrap();
        assert_eq!(MovementTuning::from_toml_str(&text).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_negative_friction() {
        let err = MovementTuning::from_toml_str("ground_friction = -1.0").unwrap_err();
        assert!(matches!(
            err,
            TuningError::Negative { field: "ground_friction", .. }
        ));
    }

    #[test]
    fn test_rejects_negative_grace_period() {
        let err = MovementTuning::from_toml_str("grace_period_seconds = -0.1").unwrap_err();
        assert!(matches!(
            err,
            TuningError::Negative { field: "grace_period_seconds", .. }
        ));
    }

    #[test]
    fn test_rejects_bad_slow_walk_multiplier() {
        let err = MovementTuning::from_toml_str("slow_walk_multiplier = 0.0").unwrap_err();
        assert!(matches!(err, TuningError::SlowWalkMultiplier(_)));

        let err = MovementTuning::from_toml_str("slow_walk_multiplier = 1.5").unwrap_err();
        assert!(matches!(err, TuningError::SlowWalkMultiplier(_)));
    }

    #[test]
    fn test_rejects_walkable_floor_above_one() {
        let err = MovementTuning::from_toml_str("walkable_floor_z = 1.2").unwrap_err();
        assert!(matches!(err, TuningError::WalkableFloorZ(_)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = MovementTuning::from_toml_str("max_walk_speed = \"fast\"").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_non_finite() {
        let tuning = MovementTuning {
            stop_speed: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonFinite { field: "stop_speed" })
        ));
    }
}
