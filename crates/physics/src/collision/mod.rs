//! Ground query boundary.
//!
//! The movement core never resolves collisions itself. It consumes a
//! ground/air classification written by the host and, for the ground-info
//! cache, a single downward trace through a [`GroundSampler`].
//!
//! # Key Types
//!
//! - [`GroundSampler`]: Host-implemented downward trace
//! - [`GroundTrace`]: Output from a ground trace
//! - [`CollisionWorld`]: parry3d-backed box world implementing the sampler

mod trace;
mod world;

pub use trace::{GroundSampler, GroundTrace};
pub use world::{CollisionBrush, CollisionWorld};
