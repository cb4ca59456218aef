//! Ground friction.

use glam::Vec3;

use super::vector::SMALL_NUMBER;

/// Slow `velocity` down by quake-style ground friction.
///
/// The speed drop is proportional to `max(stop_speed, speed)`, so slow
/// characters still come to a halt in finite time. The result is always a
/// non-negative multiple of `velocity`: direction is preserved exactly and
/// over-braking clamps to a full stop instead of reversing.
///
/// # Arguments
///
/// * `velocity` - Current velocity
/// * `delta_time` - Tick length in seconds
/// * `friction` - Friction coefficient (already clamped to `>= 0` by the caller)
/// * `surface_friction` - Terrain multiplier, `1.0` for ordinary ground
/// * `stop_speed` - Speed floor used as the friction control speed
pub fn apply_friction(
    velocity: Vec3,
    delta_time: f32,
    friction: f32,
    surface_friction: f32,
    stop_speed: f32,
) -> Vec3 {
    let speed = velocity.length();
    if speed < SMALL_NUMBER {
        return velocity;
    }

    let control = stop_speed.max(speed);
    let drop = control * friction * surface_friction * delta_time;

    let factor = (speed - drop).max(0.0) / speed;
    velocity * factor
}
