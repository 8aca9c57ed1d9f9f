//! Third-Person Camera Behavior
//!
//! Orbit placement with occlusion avoidance. The camera sits a fixed
//! distance behind the character along the view direction; a sphere sweep
//! from the head toward the ideal position pulls it in front of the first
//! blocking obstruction. Orientation always looks back at the head, so
//! there is no independent roll.
//!
//! The character body turns toward its motion direction at a rate scaled
//! by current speed, which is what makes the character "lead" the camera
//! when strafing in third person.

use glam::{Quat, Vec3};

use crate::physics::CollisionQuery;

use super::config::{
    BODY_TURN_RATE, CameraConfig, OCCLUSION_RADIUS, OCCLUSION_SKIN,
};
use super::rig::{CameraRig, look_rotation, view_direction};

impl CameraRig {
    /// Fixed-tick third-person work: body turn plus orbit placement.
    pub fn fixed_tick_third_person(
        &mut self,
        position: Vec3,
        player_height: f32,
        velocity: Vec3,
        move_speed: f32,
        world: &impl CollisionQuery,
        config: &CameraConfig,
    ) {
        self.turn_body_toward_motion(velocity, move_speed);
        self.resolve_orbit(position, player_height, world, config);
    }

    fn turn_body_toward_motion(&mut self, velocity: Vec3, move_speed: f32) {
        let horizontal = Vec3::new(velocity.x, 0.0, velocity.z);
        let speed = horizontal.length();
        if speed < 1e-4 {
            return;
        }

        let target_yaw = (-horizontal.x).atan2(-horizontal.z);
        let target = Quat::from_rotation_y(target_yaw);
        let t = (BODY_TURN_RATE * (speed / move_speed)).min(1.0);
        self.body_rotation = self.body_rotation.slerp(target, t);
    }

    /// Place the orbit camera for the character at `position`, sweeping for
    /// obstructions between head and ideal camera position. Also used by
    /// teleport to recompute placement outside the normal tick.
    pub fn resolve_orbit(
        &mut self,
        position: Vec3,
        player_height: f32,
        world: &impl CollisionQuery,
        config: &CameraConfig,
    ) {
        let head = position + Vec3::Y * player_height * 0.5;
        let view_dir = view_direction(self.yaw_radians(), self.pitch_radians());
        let to_camera = -view_dir;

        let mut camera_pos = head + to_camera * config.orbit_distance;

        if let Some(hit) = world.sphere_sweep(
            head,
            OCCLUSION_RADIUS,
            to_camera,
            config.orbit_distance,
            config.occlusion_layers,
        ) {
            // Dynamic props only occlude when configured to; immovable
            // geometry always does.
            if config.rigidbody_occlusion || hit.kinematic {
                camera_pos = hit.point + hit.normal * OCCLUSION_SKIN;
            }
        }

        self.resolved_world_position = camera_pos;
        self.orbit_rotation = look_rotation((head - camera_pos).normalize_or_zero());
    }
}
