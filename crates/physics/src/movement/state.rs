//! Movement state and per-tick input structures.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collision::GroundTrace;

use super::accelerate::AccelerationStage;
use super::ground::GroundInfoCache;
use super::vector::is_finite_vec;

/// Contact mode of the simulated character.
///
/// Classification is owned by the host's collision layer; the movement core
/// only reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementMode {
    /// Movement disabled.
    #[default]
    None,
    /// On a walkable floor.
    Walking,
    /// Walking on a navigation mesh; behaves as walking except for ground queries.
    NavWalking,
    /// Airborne.
    Falling,
    /// Flying (no gravity, no acceleration stage in this core).
    Flying,
}

impl MovementMode {
    /// Walking or nav-walking.
    #[inline]
    pub fn is_moving_on_ground(self) -> bool {
        matches!(self, Self::Walking | Self::NavWalking)
    }

    #[inline]
    pub fn is_falling(self) -> bool {
        self == Self::Falling
    }
}

/// Complete movement state for one character.
///
/// Owned exclusively by the simulated actor and mutated once per tick by
/// [`MovementIntegrator`](super::MovementIntegrator). The host writes
/// `position`, `mode` and `current_floor` from its collision step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementState {
    /// Actor location (capsule centre) in world space.
    pub position: Vec3,

    /// Velocity in world space (cm/s).
    pub velocity: Vec3,

    /// Requested acceleration after clamping, from the last tick.
    pub acceleration: Vec3,

    /// Current contact mode.
    pub mode: MovementMode,

    /// Character is crouched.
    pub crouched: bool,

    /// Character is slow-walking.
    pub slow_walking: bool,

    /// Simulation time of the last tick spent falling (seconds).
    /// Negative infinity until the character first leaves the ground.
    pub last_air_time: f64,

    /// Floor contact tracked by the host while walking.
    pub current_floor: GroundTrace,

    /// Per-frame ground query cache.
    pub ground_cache: GroundInfoCache,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            mode: MovementMode::default(),
            crouched: false,
            slow_walking: false,
            last_air_time: f64::NEG_INFINITY,
            current_floor: GroundTrace::default(),
            ground_cache: GroundInfoCache::default(),
        }
    }
}

impl MovementState {
    /// Create a new state at the given position.
    pub fn new(position: Vec3, mode: MovementMode) -> Self {
        Self {
            position,
            mode,
            ..Default::default()
        }
    }

    /// Get current horizontal speed.
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, self.velocity.y, 0.0).length()
    }
}

/// Rejected tick inputs.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PreconditionViolation {
    #[error("delta time must be positive and finite, got {0}")]
    DeltaTime(f32),

    #[error("requested acceleration is not finite: {0}")]
    Acceleration(Vec3),

    #[error("velocity is not finite: {0}")]
    Velocity(Vec3),
}

/// Externally supplied inputs for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Tick length (seconds, > 0).
    pub delta_time: f32,

    /// Current simulation time (seconds), monotonically increasing.
    pub sim_time: f64,

    /// World-space acceleration requested by the input/ability layer.
    pub requested_acceleration: Vec3,
}

impl TickInput {
    pub fn new(delta_time: f32, sim_time: f64, requested_acceleration: Vec3) -> Self {
        Self {
            delta_time,
            sim_time,
            requested_acceleration,
        }
    }

    /// Validate this input against the velocity it will be applied to.
    pub fn check(&self, velocity: Vec3) -> Result<(), PreconditionViolation> {
        if !(self.delta_time.is_finite() && self.delta_time > 0.0) {
            return Err(PreconditionViolation::DeltaTime(self.delta_time));
        }
        if !is_finite_vec(self.requested_acceleration) {
            return Err(PreconditionViolation::Acceleration(self.requested_acceleration));
        }
        if !is_finite_vec(velocity) {
            return Err(PreconditionViolation::Velocity(velocity));
        }
        Ok(())
    }

    /// Clamp malformed values so the tick can still make forward progress.
    ///
    /// Returns the sanitized input and velocity: bad `delta_time` becomes 0,
    /// non-finite vectors become zero.
    pub fn sanitized(&self, velocity: Vec3) -> (TickInput, Vec3) {
        let delta_time = if self.delta_time.is_finite() && self.delta_time > 0.0 {
            self.delta_time
        } else {
            0.0
        };
        let requested_acceleration = if is_finite_vec(self.requested_acceleration) {
            self.requested_acceleration
        } else {
            Vec3::ZERO
        };
        let velocity = if is_finite_vec(velocity) { velocity } else { Vec3::ZERO };

        (
            TickInput {
                delta_time,
                sim_time: self.sim_time,
                requested_acceleration,
            },
            velocity,
        )
    }
}

/// What a tick did, for hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Ground friction ran this tick.
    pub friction_applied: bool,

    /// Acceleration stage that ran.
    pub stage: AccelerationStage,

    /// Max speed used as the wish speed.
    pub max_speed: f32,

    /// Acceleration cap applied to the request.
    pub max_acceleration: f32,

    /// Precondition violation that was sanitized, if any.
    pub violation: Option<PreconditionViolation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_classification() {
        assert!(MovementMode::Walking.is_moving_on_ground());
        assert!(MovementMode::NavWalking.is_moving_on_ground());
        assert!(!MovementMode::Falling.is_moving_on_ground());
        assert!(MovementMode::Falling.is_falling());
        assert!(!MovementMode::Flying.is_falling());
    }

    #[test]
    fn test_check_accepts_well_formed_input() {
        let input = TickInput::new(1.0 / 60.0, 3.0, Vec3::X);
        assert_eq!(input.check(Vec3::new(10.0, 0.0, 0.0)), Ok(()));
    }

    #[test]
    fn test_check_rejects_bad_delta_time() {
        for dt in [0.0, -0.016, f32::NAN, f32::INFINITY] {
            let input = TickInput::new(dt, 0.0, Vec3::ZERO);
            assert!(matches!(
                input.check(Vec3::ZERO),
                Err(PreconditionViolation::DeltaTime(_))
            ));
        }
    }

    #[test]
    fn test_check_rejects_non_finite_vectors() {
        let input = TickInput::new(0.016, 0.0, Vec3::new(f32::NAN, 0.0, 0.0));
        assert!(matches!(
            input.check(Vec3::ZERO),
            Err(PreconditionViolation::Acceleration(_))
        ));

        let input = TickInput::new(0.016, 0.0, Vec3::ZERO);
        assert!(matches!(
            input.check(Vec3::new(0.0, f32::INFINITY, 0.0)),
            Err(PreconditionViolation::Velocity(_))
        ));
    }

    #[test]
    fn test_sanitized_clamps_to_safe_values() {
        let input = TickInput::new(-1.0, 5.0, Vec3::new(f32::NAN, 1.0, 0.0));
        let (clean, velocity) = input.sanitized(Vec3::new(f32::NEG_INFINITY, 0.0, 0.0));

        assert_eq!(clean.delta_time, 0.0);
        assert_eq!(clean.sim_time, 5.0);
        assert_eq!(clean.requested_acceleration, Vec3::ZERO);
        assert_eq!(velocity, Vec3::ZERO);
    }

    #[test]
    fn test_new_state_has_never_been_airborne() {
        let state = MovementState::new(Vec3::new(0.0, 0.0, 88.0), MovementMode::Walking);
        assert_eq!(state.last_air_time, f64::NEG_INFINITY);
        assert_eq!(state.mode, MovementMode::Walking);
        assert_eq!(state.ground_cache.cached().last_update_frame, None);
    }

    #[test]
    fn test_horizontal_speed_ignores_vertical() {
        let mut state = MovementState::new(Vec3::ZERO, MovementMode::Falling);
        state.velocity = Vec3::new(3.0, 4.0, -500.0);
        assert!((state.horizontal_speed() - 5.0).abs() < 1e-6);
    }
}
