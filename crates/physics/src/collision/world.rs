//! Static collision world used as a ground sampler.
//!
//! Holds box brushes and answers ray queries through parry3d. This is the
//! minimal host-side geometry needed to drive the movement core in tests
//! and the demo; real games plug in their own [`GroundSampler`].

use glam::Vec3;
use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::query::Ray;
use parry3d::shape::SharedShape;

use super::trace::{GroundSampler, GroundTrace};

/// A piece of collision geometry in the world.
#[derive(Clone)]
pub struct CollisionBrush {
    /// Unique identifier for this brush.
    pub id: u32,
    /// The collision shape.
    pub shape: SharedShape,
    /// Position and orientation in world space.
    pub transform: Isometry<Real>,
}

impl std::fmt::Debug for CollisionBrush {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollisionBrush")
            .field("id", &self.id)
            .field("transform", &self.transform)
            .finish_non_exhaustive()
    }
}

/// The collision world containing all geometry.
///
/// Immutable during simulation, so it can be shared across threads that
/// simulate different characters.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    brushes: Vec<CollisionBrush>,
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an axis-aligned box to the world.
    ///
    /// # Arguments
    ///
    /// * `center` - Center position of the box in world space
    /// * `half_extents` - Half-size in each axis (x, y, z)
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3) -> u32 {
        let transform = Isometry::translation(center.x, center.y, center.z);
        self.push_box(half_extents, transform)
    }

    /// Add a box rotated about the X axis, e.g. a ramp.
    ///
    /// `pitch` is in radians; the top face normal becomes
    /// `(0, -sin(pitch), cos(pitch))`.
    pub fn add_ramp(&mut self, center: Vec3, half_extents: Vec3, pitch: f32) -> u32 {
        let transform = Isometry::new(
            Vector::new(center.x, center.y, center.z),
            Vector::new(pitch, 0.0, 0.0),
        );
        self.push_box(half_extents, transform)
    }

    fn push_box(&mut self, half_extents: Vec3, transform: Isometry<Real>) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        self.brushes.push(CollisionBrush {
            id,
            shape: SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z),
            transform,
        });

        id
    }

    /// Get the number of collision brushes.
    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    /// Perform a raycast through the world.
    ///
    /// # Arguments
    ///
    /// * `origin` - Ray starting position
    /// * `direction` - Ray direction (will be normalized)
    /// * `max_distance` - Maximum trace distance
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> GroundTrace {
        let dir = direction.normalize_or_zero();
        if dir.length_squared() < 0.5 {
            return GroundTrace::no_hit(origin, 0.0);
        }

        let ray = Ray::new(
            Point::new(origin.x, origin.y, origin.z),
            Vector::new(dir.x, dir.y, dir.z),
        );

        let mut closest: Option<(f32, Vec3)> = None;

        for brush in &self.brushes {
            let Some(intersection) =
                brush
                    .shape
                    .cast_ray_and_get_normal(&brush.transform, &ray, max_distance, true)
            else {
                continue;
            };
            let toi = intersection.time_of_impact;

            if closest.map_or(true, |(best, _)| toi < best) {
                let n = intersection.normal;
                closest = Some((toi, Vec3::new(n.x, n.y, n.z)));
            }
        }

        match closest {
            Some((distance, normal)) => {
                GroundTrace::hit(distance, normal, origin + dir * distance)
            }
            None => GroundTrace::no_hit(origin + dir * max_distance, max_distance),
        }
    }
}

impl GroundSampler for CollisionWorld {
    fn trace(&self, origin: Vec3, max_distance: f32, capsule_half_height: f32) -> GroundTrace {
        self.raycast(origin, -Vec3::Z, max_distance + capsule_half_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        // Floor top surface at z = 0
        world.add_box(Vec3::new(0.0, 0.0, -50.0), Vec3::new(5000.0, 5000.0, 50.0));
        world
    }

    #[test]
    fn test_empty_world_no_hit() {
        let world = CollisionWorld::new();
        let result = world.trace(Vec3::new(0.0, 0.0, 100.0), 1000.0, 88.0);
        assert!(!result.hit);
        assert_eq!(result.distance, 1088.0);
    }

    #[test]
    fn test_downward_trace_hits_floor() {
        let world = floor_world();
        let result = world.trace(Vec3::new(0.0, 0.0, 200.0), 1000.0, 88.0);

        assert!(result.hit);
        assert!((result.distance - 200.0).abs() < 0.01, "distance={}", result.distance);
        assert!((result.normal.z - 1.0).abs() < 0.01);
        assert!(result.location.z.abs() < 0.01);
    }

    #[test]
    fn test_trace_out_of_range() {
        let world = floor_world();
        let result = world.trace(Vec3::new(0.0, 0.0, 500.0), 100.0, 88.0);
        assert!(!result.hit);
    }

    #[test]
    fn test_closest_brush_wins() {
        let mut world = floor_world();
        // Platform top at z = 100
        world.add_box(Vec3::new(0.0, 0.0, 90.0), Vec3::new(100.0, 100.0, 10.0));
        assert_eq!(world.brush_count(), 2);

        let result = world.trace(Vec3::new(0.0, 0.0, 300.0), 1000.0, 88.0);
        assert!((result.distance - 200.0).abs() < 0.01, "distance={}", result.distance);
    }

    #[test]
    fn test_ramp_normal_is_tilted() {
        let mut world = CollisionWorld::new();
        let pitch = 60.0_f32.to_radians();
        world.add_ramp(Vec3::ZERO, Vec3::new(500.0, 500.0, 10.0), pitch);

        let result = world.trace(Vec3::new(0.0, 0.0, 200.0), 1000.0, 88.0);
        assert!(result.hit);
        assert!((result.normal.z - pitch.cos()).abs() < 0.01, "normal={:?}", result.normal);
    }
}
