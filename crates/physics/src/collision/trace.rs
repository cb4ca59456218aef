//! Ground trace results and the sampler boundary.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Result of a downward ground trace.
///
/// A miss is a value too: `hit == false`, `distance` equal to the full
/// trace length and an up-facing normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundTrace {
    /// Whether the trace hit blocking geometry.
    pub hit: bool,

    /// Distance from the trace origin to the impact point.
    pub distance: f32,

    /// Surface normal at the impact point. Points away from the surface.
    pub normal: Vec3,

    /// Impact point, or the trace end on a miss.
    pub location: Vec3,
}

impl Default for GroundTrace {
    fn default() -> Self {
        Self::no_hit(Vec3::ZERO, 0.0)
    }
}

impl GroundTrace {
    /// Create a trace result indicating nothing was hit.
    pub fn no_hit(end_position: Vec3, distance: f32) -> Self {
        Self {
            hit: false,
            distance,
            normal: Vec3::Z,
            location: end_position,
        }
    }

    /// Create a trace result for a blocking hit.
    pub fn hit(distance: f32, normal: Vec3, location: Vec3) -> Self {
        Self {
            hit: true,
            distance,
            normal,
            location,
        }
    }
}

/// Source of downward ground traces.
///
/// Implemented by the host's collision layer. The movement core calls it at
/// most once per simulation frame per character.
pub trait GroundSampler {
    /// Trace straight down from `origin` for `max_distance +
    /// capsule_half_height` units and report the first blocking hit.
    fn trace(&self, origin: Vec3, max_distance: f32, capsule_half_height: f32) -> GroundTrace;
}

impl<T: GroundSampler + ?Sized> GroundSampler for &T {
    fn trace(&self, origin: Vec3, max_distance: f32, capsule_half_height: f32) -> GroundTrace {
        (**self).trace(origin, max_distance, capsule_half_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_hit() {
        let result = GroundTrace::no_hit(Vec3::new(0.0, 0.0, -100.0), 100.0);
        assert!(!result.hit);
        assert_eq!(result.distance, 100.0);
        assert_eq!(result.normal, Vec3::Z);
    }

    #[test]
    fn test_hit() {
        let result = GroundTrace::hit(42.0, Vec3::Z, Vec3::new(1.0, 2.0, 0.0));
        assert!(result.hit);
        assert_eq!(result.distance, 42.0);
        assert_eq!(result.location, Vec3::new(1.0, 2.0, 0.0));
    }
}
