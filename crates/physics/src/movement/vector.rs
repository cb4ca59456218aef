//! Small vector helpers shared by the movement stages.
//!
//! Everything here is written for bit-for-bit reproducibility: no fast
//! reciprocal square root, no platform-specific intrinsics.

use glam::Vec3;

/// Threshold below which a squared length is treated as zero.
pub const SMALL_NUMBER: f32 = 1.0e-8;

/// World up axis.
pub const UP: Vec3 = Vec3::Z;

/// Normalize `v`, returning the zero vector when it is too short.
///
/// Uses an exact `1 / sqrt` rather than `glam`'s `normalize_or_zero`, which
/// may be lowered to an approximate reciprocal on some targets.
#[inline]
pub fn normalize_precise(v: Vec3) -> Vec3 {
    let length_squared = v.length_squared();
    if length_squared < SMALL_NUMBER {
        Vec3::ZERO
    } else {
        v * (1.0 / length_squared.sqrt())
    }
}

#[inline]
pub fn is_nearly_equal(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}

/// True when every component is finite (no NaN, no infinity).
#[inline]
pub fn is_finite_vec(v: Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_precise_unit_length() {
        let dir = normalize_precise(Vec3::new(3.0, 4.0, 0.0));
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!((dir.x - 0.6).abs() < 1e-6);
        assert!((dir.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_precise_degenerate_is_zero() {
        assert_eq!(normalize_precise(Vec3::ZERO), Vec3::ZERO);
        assert_eq!(normalize_precise(Vec3::new(1e-5, 0.0, 0.0)), Vec3::ZERO);
    }

    #[test]
    fn test_finite_check() {
        assert!(is_finite_vec(Vec3::ONE));
        assert!(!is_finite_vec(Vec3::new(f32::NAN, 0.0, 0.0)));
        assert!(!is_finite_vec(Vec3::new(0.0, f32::INFINITY, 0.0)));
    }
}
