//! Mode-dependent speed and acceleration limits.

use super::config::MovementTuning;
use super::state::MovementMode;

impl MovementTuning {
    /// Get the max speed for the current movement mode.
    ///
    /// Slow-walking scales the result regardless of mode.
    pub fn max_speed(&self, mode: MovementMode, crouched: bool, slow_walking: bool) -> f32 {
        let speed = match mode {
            MovementMode::Walking | MovementMode::NavWalking | MovementMode::Falling => {
                if crouched {
                    self.max_walk_speed_crouched
                } else {
                    self.max_walk_speed
                }
            }
            MovementMode::Flying => self.max_fly_speed,
            MovementMode::None => 0.0,
        };

        if slow_walking {
            speed * self.slow_walk_multiplier
        } else {
            speed
        }
    }

    /// Get the acceleration cap for the current movement mode.
    ///
    /// A single tunable covers ground, air and flying.
    pub fn max_acceleration(&self, mode: MovementMode) -> f32 {
        match mode {
            MovementMode::Walking
            | MovementMode::NavWalking
            | MovementMode::Falling
            | MovementMode::Flying => self.max_acceleration,
            MovementMode::None => 0.0,
        }
    }

    /// Friction coefficient for this tick, before clamping.
    pub fn friction_coefficient(&self, accelerating: bool) -> f32 {
        if self.use_separate_braking_friction && !accelerating {
            self.braking_friction
        } else {
            self.ground_friction
        }
    }

    /// Capsule half-height for the current stance.
    pub fn capsule_half_height(&self, crouched: bool) -> f32 {
        if crouched {
            self.crouched_half_height
        } else {
            self.standing_half_height
        }
    }
}
