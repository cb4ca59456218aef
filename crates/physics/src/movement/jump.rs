//! Jump gating.
//!
//! Decides whether a jump impulse may be applied. Steep floors forbid
//! jumping even when every other precondition holds, so characters cannot
//! climb unwalkable slopes by hopping.

use glam::Vec3;

use super::state::MovementMode;
use super::vector::{is_nearly_equal, SMALL_NUMBER, UP};

/// Check whether a jump may start this tick.
///
/// # Arguments
///
/// * `mode` - Current movement mode
/// * `floor_normal` - Normal of the tracked floor contact
/// * `walkable_floor_z` - Minimum floor normal Z considered walkable
/// * `base_jump_allowed` - Host-side jump predicate (abilities, cooldowns, ...)
pub fn can_jump(
    mode: MovementMode,
    floor_normal: Vec3,
    walkable_floor_z: f32,
    base_jump_allowed: bool,
) -> bool {
    if !mode.is_moving_on_ground() {
        return base_jump_allowed;
    }

    let floor_z = UP.dot(floor_normal);
    let walkable = floor_z >= walkable_floor_z || is_nearly_equal(floor_z, walkable_floor_z, SMALL_NUMBER);
    base_jump_allowed && walkable
}
