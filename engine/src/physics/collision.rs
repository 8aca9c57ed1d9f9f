//! Collision Detection
//!
//! Ray/AABB intersection via the slab method, plus [`AabbWorld`]: a simple
//! box-soup world that implements [`CollisionQuery`]. The application is
//! expected to bridge its real physics engine to the query trait; the AABB
//! world exists so the controller can be exercised end-to-end in tests and
//! headless tools without one.
//!
//! # Slab Method
//!
//! Intersection times are computed against each axis-aligned plane pair;
//! the ray hits the box iff the latest entry precedes the earliest exit.

use glam::Vec3;

use super::query::{CollisionQuery, Contact, LayerMask};

/// Ray/AABB intersection using the slab method.
///
/// # Arguments
///
/// * `ray_origin` - starting point of the ray
/// * `ray_dir` - direction of the ray (must be normalized)
/// * `aabb_min` / `aabb_max` - corners of the box
///
/// # Returns
///
/// * `Some(t)` - distance along the ray to the intersection (t >= 0).
///   When the ray starts inside the box, the exit distance is returned.
/// * `None` - no intersection ahead of the origin.
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Near-zero direction components fall back to huge inverse values so the
    // slab degenerates to an inside/outside test on that axis.
    let inv = |d: f32| {
        if d.abs() > 1e-10 {
            1.0 / d
        } else {
            f32::MAX * d.signum()
        }
    };
    let inv_dir = Vec3::new(inv(ray_dir.x), inv(ray_dir.y), inv(ray_dir.z));

    let t1 = (aabb_min.x - ray_origin.x) * inv_dir.x;
    let t2 = (aabb_max.x - ray_origin.x) * inv_dir.x;
    let mut t_min = t1.min(t2);
    let mut t_max = t1.max(t2);

    let t3 = (aabb_min.y - ray_origin.y) * inv_dir.y;
    let t4 = (aabb_max.y - ray_origin.y) * inv_dir.y;
    t_min = t_min.max(t3.min(t4));
    t_max = t_max.min(t3.max(t4));

    let t5 = (aabb_min.z - ray_origin.z) * inv_dir.z;
    let t6 = (aabb_max.z - ray_origin.z) * inv_dir.z;
    t_min = t_min.max(t5.min(t6));
    t_max = t_max.min(t5.max(t6));

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 { Some(t_min) } else { Some(t_max) }
    } else {
        None
    }
}

/// Outward normal of the AABB face nearest to `point`.
pub fn aabb_surface_normal(point: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Vec3 {
    let center = (aabb_min + aabb_max) * 0.5;
    let half = ((aabb_max - aabb_min) * 0.5).max(Vec3::splat(1e-6));
    let local = (point - center) / half;

    let ax = local.x.abs();
    let ay = local.y.abs();
    let az = local.z.abs();

    if ax >= ay && ax >= az {
        Vec3::new(local.x.signum(), 0.0, 0.0)
    } else if ay >= ax && ay >= az {
        Vec3::new(0.0, local.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, local.z.signum())
    }
}

/// One box collider in an [`AabbWorld`].
#[derive(Debug, Clone, Copy)]
struct BoxCollider {
    min: Vec3,
    max: Vec3,
    layer: LayerMask,
    kinematic: bool,
}

/// Axis-aligned box world implementing [`CollisionQuery`].
///
/// Sphere sweeps are evaluated as raycasts against Minkowski-inflated
/// boxes, which is exact for face hits and conservative at edges — plenty
/// for grounding probes and camera occlusion.
#[derive(Debug, Clone, Default)]
pub struct AabbWorld {
    boxes: Vec<BoxCollider>,
}

impl AabbWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a static box collider on the given layer.
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3, layer: LayerMask) {
        self.add_box_with_body(center, half_extents, layer, true);
    }

    /// Add a box collider with an explicit kinematic/dynamic body flag.
    pub fn add_box_with_body(
        &mut self,
        center: Vec3,
        half_extents: Vec3,
        layer: LayerMask,
        kinematic: bool,
    ) {
        self.boxes.push(BoxCollider {
            min: center - half_extents,
            max: center + half_extents,
            layer,
            kinematic,
        });
    }

    /// Convenience: a large floor slab whose top surface sits at `top_y`.
    pub fn add_floor(&mut self, top_y: f32, layer: LayerMask) {
        self.add_box(
            Vec3::new(0.0, top_y - 50.0, 0.0),
            Vec3::new(500.0, 50.0, 500.0),
            layer,
        );
    }

    fn cast_inflated(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
        inflate: f32,
    ) -> Option<Contact> {
        let mut nearest: Option<Contact> = None;

        for b in &self.boxes {
            if !b.layer.intersects(layers) {
                continue;
            }
            let min = b.min - Vec3::splat(inflate);
            let max = b.max + Vec3::splat(inflate);
            if let Some(t) = ray_aabb_intersect(origin, direction, min, max) {
                if t <= max_distance && nearest.map_or(true, |n| t < n.distance) {
                    let point = origin + direction * t;
                    nearest = Some(Contact {
                        point,
                        normal: aabb_surface_normal(point, min, max),
                        distance: t,
                        kinematic: b.kinematic,
                    });
                }
            }
        }

        nearest
    }
}

impl CollisionQuery for AabbWorld {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<Contact> {
        self.cast_inflated(origin, direction, max_distance, layers, 0.0)
    }

    fn sphere_sweep(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<Contact> {
        self.cast_inflated(origin, direction, max_distance, layers, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hits_box_head_on() {
        let t = ray_aabb_intersect(
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert!((t.unwrap() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_box() {
        let t = ray_aabb_intersect(
            Vec3::new(0.0, 5.0, -5.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_ray_behind_origin_misses() {
        let t = ray_aabb_intersect(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_ray_starting_inside_returns_exit() {
        let t = ray_aabb_intersect(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert!((t.unwrap() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_surface_normal_picks_dominant_face() {
        let min = Vec3::splat(-1.0);
        let max = Vec3::splat(1.0);
        assert_eq!(
            aabb_surface_normal(Vec3::new(0.0, 1.0, 0.2), min, max),
            Vec3::Y
        );
        assert_eq!(
            aabb_surface_normal(Vec3::new(-1.0, 0.3, 0.0), min, max),
            -Vec3::X
        );
    }

    #[test]
    fn test_world_raycast_nearest_wins() {
        let mut world = AabbWorld::new();
        world.add_box(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE, LayerMask::ALL);
        world.add_box(Vec3::new(0.0, 0.0, 10.0), Vec3::ONE, LayerMask::ALL);

        let hit = world
            .raycast(Vec3::ZERO, Vec3::Z, 100.0, LayerMask::ALL)
            .unwrap();
        assert!((hit.distance - 4.0).abs() < 1e-5);
        assert_eq!(hit.normal, -Vec3::Z);
    }

    #[test]
    fn test_world_layer_filtering() {
        let mut world = AabbWorld::new();
        world.add_box(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE, LayerMask::layer(3));

        assert!(
            world
                .raycast(Vec3::ZERO, Vec3::Z, 100.0, LayerMask::layer(1))
                .is_none()
        );
        assert!(
            world
                .raycast(Vec3::ZERO, Vec3::Z, 100.0, LayerMask::layer(3))
                .is_some()
        );
    }

    #[test]
    fn test_sphere_sweep_hits_earlier_than_ray() {
        let mut world = AabbWorld::new();
        world.add_box(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE, LayerMask::ALL);

        let ray = world
            .raycast(Vec3::ZERO, Vec3::Z, 100.0, LayerMask::ALL)
            .unwrap();
        let sweep = world
            .sphere_sweep(Vec3::ZERO, 0.5, Vec3::Z, 100.0, LayerMask::ALL)
            .unwrap();
        assert!(sweep.distance < ray.distance);
        assert!((ray.distance - sweep.distance - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_floor_probe() {
        let mut world = AabbWorld::new();
        world.add_floor(0.0, LayerMask::ALL);

        let hit = world
            .raycast(Vec3::new(0.0, 2.0, 0.0), -Vec3::Y, 10.0, LayerMask::ALL)
            .unwrap();
        assert!((hit.distance - 2.0).abs() < 1e-4);
        assert_eq!(hit.normal, Vec3::Y);
        assert!(hit.kinematic);
    }

    #[test]
    fn test_dynamic_body_flag_round_trip() {
        let mut world = AabbWorld::new();
        world.add_box_with_body(Vec3::new(0.0, 0.0, 3.0), Vec3::ONE, LayerMask::ALL, false);

        let hit = world
            .raycast(Vec3::ZERO, Vec3::Z, 10.0, LayerMask::ALL)
            .unwrap();
        assert!(!hit.kinematic);
    }
}
