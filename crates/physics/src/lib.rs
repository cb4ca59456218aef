//! Strafe Physics
//!
//! A deterministic quake-style character velocity integrator with a
//! bunny-hop friction grace window, designed for networked games where every
//! client must reproduce the same movement from the same inputs.
//!
//! # Architecture
//!
//! The crate is split into two parts:
//!
//! - **Collision**: The narrow ground-query boundary the host implements,
//!   plus a parry3d box world for tests and tools
//! - **Movement**: Friction and acceleration stages composed by a per-tick
//!   integrator
//!
//! # Design Principles
//!
//! 1. **Determinism**: Same inputs always produce same outputs across platforms
//! 2. **Order**: Friction before acceleration, dot product before clamp
//! 3. **Isolation**: Per-character state is explicit and owned by the character
//! 4. **Narrow seams**: Collision, input and replication live with the host

pub mod collision;
pub mod movement;

// Re-export commonly used types
pub use collision::{CollisionWorld, GroundSampler, GroundTrace};
pub use movement::{
    AccelerationStage, GroundInfo, GroundInfoCache, MovementIntegrator, MovementMode,
    MovementState, MovementTuning, PreconditionViolation, TickInput, TickReport, TuningError,
};
