//! Per-tick movement integrator.
//!
//! This is the main entry point for character movement. Each tick it takes
//! the requested acceleration and the host's contact classification and
//! updates the character's velocity.

use glam::Vec3;

use crate::collision::GroundSampler;

use super::accelerate::{apply_acceleration, apply_air_acceleration, AccelerationStage};
use super::config::{MovementTuning, TuningError};
use super::friction::apply_friction;
use super::ground::GroundInfo;
use super::jump::can_jump;
use super::state::{MovementMode, MovementState, PreconditionViolation, TickInput, TickReport};
use super::vector::{normalize_precise, UP};

/// Surface multiplier used for ordinary terrain.
const DEFAULT_SURFACE_FRICTION: f32 = 1.0;

/// Character movement integrator.
///
/// Handles the velocity update for one character per tick:
/// - Ground friction, suppressed for a grace window after landing
/// - Ground acceleration
/// - Air acceleration with a separate wish-speed cap
///
/// Stateless apart from its tuning, so one integrator can drive any number
/// of characters that share a profile.
///
/// # Example
///
/// ```ignore
/// let integrator = MovementIntegrator::new(MovementTuning::default())?;
/// let mut state = MovementState::new(spawn_position, MovementMode::Falling);
///
/// // Each tick, after the host has classified contact:
/// integrator.tick(&mut state, &TickInput::new(dt, sim_time, requested_accel));
/// ```
#[derive(Debug, Clone)]
pub struct MovementIntegrator {
    tuning: MovementTuning,
}

impl MovementIntegrator {
    /// Create an integrator, validating the tuning first.
    pub fn new(tuning: MovementTuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self { tuning })
    }

    /// Create an integrator with default tuning.
    pub fn with_default_tuning() -> Self {
        Self {
            tuning: MovementTuning::default(),
        }
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    /// Advance movement by one tick.
    ///
    /// Friction runs before acceleration, and the whole update is computed
    /// on a local copy that is committed to `state` at the end.
    ///
    /// Malformed input (non-positive `delta_time`, NaN/Inf vectors) panics in
    /// debug builds. Release builds clamp it (`delta_time` to 0, vectors to
    /// zero), log a warning and report the violation.
    pub fn tick(&self, state: &mut MovementState, input: &TickInput) -> TickReport {
        let (input, mut velocity, violation) =
            resolve_input(input, state.velocity, cfg!(debug_assertions));

        let mode = state.mode;
        let delta_time = input.delta_time;

        // Limits for the current mode
        let max_acceleration = self.tuning.max_acceleration(mode);
        let max_speed = self.tuning.max_speed(mode, state.crouched, state.slow_walking);

        let requested = input.requested_acceleration.clamp_length_max(max_acceleration);
        let accelerating = requested != Vec3::ZERO;

        // Friction
        let friction_applied = self.should_apply_ground_friction(state, input.sim_time);
        if friction_applied {
            let friction = self.tuning.friction_coefficient(accelerating).max(0.0);
            velocity = apply_friction(
                velocity,
                delta_time,
                friction,
                DEFAULT_SURFACE_FRICTION,
                self.tuning.stop_speed,
            );
        }

        // Acceleration
        let wish_direction = normalize_precise(requested);
        let acceleration = requested.length();

        let stage = match mode {
            MovementMode::Walking | MovementMode::NavWalking => {
                velocity = apply_acceleration(
                    velocity,
                    delta_time,
                    DEFAULT_SURFACE_FRICTION,
                    wish_direction,
                    max_speed,
                    acceleration,
                );
                AccelerationStage::Ground
            }
            MovementMode::Falling => {
                velocity = apply_air_acceleration(
                    velocity,
                    delta_time,
                    DEFAULT_SURFACE_FRICTION,
                    wish_direction,
                    max_speed,
                    self.tuning.max_air_wish_speed,
                    acceleration,
                );
                AccelerationStage::Air
            }
            MovementMode::Flying | MovementMode::None => AccelerationStage::None,
        };

        // Commit
        state.velocity = velocity;
        state.acceleration = requested;

        if mode.is_falling() {
            state.last_air_time = input.sim_time;
        }

        if !self.tuning.can_slow_walk && state.slow_walking {
            state.slow_walking = false;
        }

        log::trace!(
            "tick: mode={:?} t={} friction={} stage={:?} speed={}",
            mode,
            input.sim_time,
            friction_applied,
            stage,
            velocity.length()
        );

        TickReport {
            friction_applied,
            stage,
            max_speed,
            max_acceleration,
            violation,
        }
    }

    /// Ground friction runs only on the ground and outside the post-landing
    /// grace window.
    pub fn should_apply_ground_friction(&self, state: &MovementState, sim_time: f64) -> bool {
        state.mode.is_moving_on_ground()
            && sim_time >= state.last_air_time + self.tuning.grace_period_seconds
    }

    /// Try to start a jump.
    ///
    /// Checks the tracked floor against the walkable threshold and, when
    /// allowed, sets the vertical velocity to at least `jump_z_velocity` and
    /// switches to falling. Returns whether the jump happened.
    pub fn do_jump(&self, state: &mut MovementState, base_jump_allowed: bool) -> bool {
        let floor_normal = if state.current_floor.hit {
            state.current_floor.normal
        } else {
            UP
        };

        if !can_jump(
            state.mode,
            floor_normal,
            self.tuning.walkable_floor_z,
            base_jump_allowed,
        ) {
            return false;
        }

        state.velocity.z = state.velocity.z.max(self.tuning.jump_z_velocity);
        state.mode = MovementMode::Falling;

        log::debug!("jump: vz={} speed={}", state.velocity.z, state.horizontal_speed());
        true
    }

    /// Set the slow-walk flag, honouring `can_slow_walk`.
    pub fn set_slow_walking(&self, state: &mut MovementState, slow_walking: bool) {
        state.slow_walking = slow_walking && self.tuning.can_slow_walk;
    }

    /// Ground info for `frame`, using the character's current capsule.
    pub fn ground_info<S: GroundSampler>(
        &self,
        state: &mut MovementState,
        frame: u64,
        sampler: &S,
    ) -> GroundInfo {
        let half_height = self.tuning.capsule_half_height(state.crouched);
        *state.ground_cache.get(
            frame,
            state.mode,
            state.position,
            half_height,
            state.current_floor,
            self.tuning.ground_trace_distance,
            sampler,
        )
    }
}

/// Validate tick input. Violations panic when `strict`, otherwise the input
/// is sanitized and the violation returned alongside it.
fn resolve_input(
    input: &TickInput,
    velocity: Vec3,
    strict: bool,
) -> (TickInput, Vec3, Option<PreconditionViolation>) {
    match input.check(velocity) {
        Ok(()) => (*input, velocity, None),
        Err(violation) => {
            if strict {
                panic!("movement precondition violated: {violation}");
            }
            log::warn!("movement precondition violated, sanitizing input: {violation}");
            let (clean, velocity) = input.sanitized(velocity);
            (clean, velocity, Some(violation))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
