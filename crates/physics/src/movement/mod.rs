//! Character movement physics.
//!
//! This module implements quake-style velocity integration with:
//!
//! - Ground friction with a post-landing grace window (bunny-hopping)
//! - Additive ground acceleration toward a projected wish speed
//! - Air acceleration with an independent wish-speed cap (air strafing)
//! - Mode-dependent speed limits and slope-aware jump gating
//! - A per-frame ground information cache
//!
//! # Design
//!
//! Each stage is a pure function over vectors. The [`MovementIntegrator`]
//! composes them in a fixed order every tick and commits the result to the
//! character's [`MovementState`]. Collision and contact classification stay
//! with the host, which talks to this module through
//! [`GroundSampler`](crate::collision::GroundSampler) and
//! [`MovementTuning`].
//!
//! All movement is deterministic - the same inputs will always produce the
//! same outputs, making it suitable for networked prediction.

mod accelerate;
mod config;
mod friction;
mod ground;
mod integrator;
mod jump;
mod speed;
mod state;
mod vector;

pub use accelerate::{air_wish_speed, apply_acceleration, apply_air_acceleration, AccelerationStage};
pub use config::{MovementTuning, TuningError};
pub use friction::apply_friction;
pub use ground::{GroundInfo, GroundInfoCache};
pub use integrator::MovementIntegrator;
pub use jump::can_jump;
pub use state::{MovementMode, MovementState, PreconditionViolation, TickInput, TickReport};
pub use vector::{is_finite_vec, is_nearly_equal, normalize_precise, SMALL_NUMBER, UP};
