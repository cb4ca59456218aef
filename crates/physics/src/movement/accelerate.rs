//! Quake-style acceleration toward a wish velocity.
//!
//! Acceleration is additive toward a target *projected* speed: only the
//! component of velocity along the wish direction is compared against the
//! wish speed. When the wish direction is not colinear with velocity the
//! projected speed stays low and every tick keeps adding speed, which is
//! what makes strafing (and air strafing) gain speed.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which acceleration stage ran during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccelerationStage {
    /// Ground acceleration (walking).
    Ground,
    /// Air acceleration with the air wish-speed cap (falling).
    Air,
    /// No acceleration stage for this mode (flying, none).
    None,
}

/// Accelerate along `wish_direction` toward `wish_speed`.
///
/// # Arguments
///
/// * `velocity` - Current velocity
/// * `delta_time` - Tick length in seconds
/// * `surface_friction` - Terrain multiplier, `1.0` for ordinary ground
/// * `wish_direction` - Unit wish direction, or zero for no input
/// * `wish_speed` - Target speed along the wish direction
/// * `acceleration` - Acceleration factor (applied as `accel * wish_speed`)
pub fn apply_acceleration(
    velocity: Vec3,
    delta_time: f32,
    surface_friction: f32,
    wish_direction: Vec3,
    wish_speed: f32,
    acceleration: f32,
) -> Vec3 {
    accelerate_toward(
        velocity,
        delta_time,
        surface_friction,
        wish_direction,
        wish_speed,
        wish_speed,
        acceleration,
    )
}

/// Air variant of [`apply_acceleration`].
///
/// The speed the projection is compared against is capped at
/// `max_air_wish_speed`, independent of the ground cap. The per-tick
/// acceleration amount still scales with the uncapped `wish_speed`, so a
/// low air cap limits how far a single direction can be pushed while
/// leaving turn-in responsiveness intact.
pub fn apply_air_acceleration(
    velocity: Vec3,
    delta_time: f32,
    surface_friction: f32,
    wish_direction: Vec3,
    wish_speed: f32,
    max_air_wish_speed: f32,
    acceleration: f32,
) -> Vec3 {
    accelerate_toward(
        velocity,
        delta_time,
        surface_friction,
        wish_direction,
        air_wish_speed(wish_speed, max_air_wish_speed),
        wish_speed,
        acceleration,
    )
}

/// Target speed used by the air stage.
#[inline]
pub fn air_wish_speed(wish_speed: f32, max_air_wish_speed: f32) -> f32 {
    wish_speed.min(max_air_wish_speed)
}

fn accelerate_toward(
    velocity: Vec3,
    delta_time: f32,
    surface_friction: f32,
    wish_direction: Vec3,
    target_speed: f32,
    wish_speed: f32,
    acceleration: f32,
) -> Vec3 {
    // Dot product first, clamp second. Reordering changes strafe gain.
    let current_speed = velocity.dot(wish_direction);

    let add_speed = target_speed - current_speed;
    if add_speed <= 0.0 {
        return velocity;
    }

    let accel_speed = (acceleration * wish_speed * surface_friction * delta_time).min(add_speed);

    velocity + accel_speed * wish_direction
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_accelerates_from_rest() {
        let velocity = apply_acceleration(Vec3::ZERO, DT, 1.0, Vec3::X, 600.0, 6.0);
        // 6 * 600 / 60 = 60
        assert!((velocity.x - 60.0).abs() < 1e-3);
        assert_eq!(velocity.y, 0.0);
    }

    #[test]
    fn test_clamped_to_remaining_speed() {
        let velocity = apply_acceleration(Vec3::new(590.0, 0.0, 0.0), DT, 1.0, Vec3::X, 600.0, 6.0);
        assert!((velocity.x - 600.0).abs() < 1e-3);
    }

    #[test]
    fn test_no_acceleration_beyond_wish_speed() {
        let fast = Vec3::new(900.0, 0.0, 0.0);
        assert_eq!(apply_acceleration(fast, DT, 1.0, Vec3::X, 600.0, 6.0), fast);
    }

    #[test]
    fn test_zero_wish_direction_is_noop() {
        let velocity = Vec3::new(100.0, 50.0, 0.0);
        assert_eq!(
            apply_acceleration(velocity, DT, 1.0, Vec3::ZERO, 600.0, 6.0),
            velocity
        );
    }

    #[test]
    fn test_repeated_acceleration_converges_without_overshoot() {
        let mut velocity = Vec3::ZERO;
        let mut previous = 0.0;
        for _ in 0..600 {
            velocity = apply_acceleration(velocity, DT, 1.0, Vec3::Y, 450.0, 4.0);
            let projected = velocity.dot(Vec3::Y);
            assert!(projected >= previous);
            assert!(projected <= 450.0 + 1e-3);
            previous = projected;
        }
        assert!((previous - 450.0).abs() < 1e-3);
    }

    #[test]
    fn test_perpendicular_wish_adds_speed() {
        // Moving at the wish speed already, but sideways: the projection is
        // zero so acceleration still adds energy.
        let velocity = Vec3::new(600.0, 0.0, 0.0);
        let strafed = apply_acceleration(velocity, DT, 1.0, Vec3::Y, 600.0, 6.0);
        assert!(strafed.length() > velocity.length());
    }

    #[test]
    fn test_air_target_is_capped() {
        assert_eq!(air_wish_speed(700.0, 100.0), 100.0);
        assert_eq!(air_wish_speed(50.0, 100.0), 50.0);

        // Projected speed 100 already meets the air cap: no change even
        // though the nominal wish speed is 700.
        let velocity = Vec3::new(100.0, 0.0, 0.0);
        let result = apply_air_acceleration(velocity, DT, 1.0, Vec3::X, 700.0, 100.0, 10.0);
        assert_eq!(result, velocity);
    }

    #[test]
    fn test_air_acceleration_clamps_to_air_cap() {
        let result = apply_air_acceleration(Vec3::ZERO, DT, 1.0, Vec3::X, 700.0, 100.0, 10.0);
        // 10 * 700 / 60 ≈ 116.7 exceeds the 100 cap
        assert!((result.x - 100.0).abs() < 1e-3, "got {}", result.x);
    }

    #[test]
    fn test_air_strafe_gains_speed_past_cap() {
        let mut velocity = Vec3::new(800.0, 0.0, 0.0);
        let start = velocity.length();
        for _ in 0..30 {
            // Keep the wish direction perpendicular to the current velocity.
            let wish = Vec3::new(-velocity.y, velocity.x, 0.0).normalize();
            velocity = apply_air_acceleration(velocity, DT, 1.0, wish, 700.0, 100.0, 10.0);
        }
        assert!(velocity.length() > start);
    }
}
