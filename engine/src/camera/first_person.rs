//! First-Person Camera Behavior
//!
//! The first-person pipeline: pitch on the camera, yaw on the body,
//! optional motion/mouse tilt, sinusoidal view-bob and the landing dip.
//! All of it funnels into `pos_tracer`, which the rendered local position
//! chases once per fixed tick so the view stays liquid at any frame rate.
//!
//! The bob/landing block also runs in third person: the walk phase feeds
//! footstep cadence regardless of which pipeline renders.

use glam::{EulerRot, Quat, Vec2, Vec3};

use crate::math::approach;

use super::config::{
    BOB_BASE_RATE, BOB_MOTION_THRESHOLD, BOB_SPRINT_AMPLITUDE, BOB_SPRINT_RATE_BONUS,
    BOB_WALK_AMPLITUDE, CAMERA_CHASE_FACTOR, CameraConfig, CameraMode, LANDING_DIP_CLAMP,
    LANDING_DIP_SCALE, TRACER_APPROACH_RATE,
};
use super::rig::{CameraFrame, CameraRig};

impl CameraRig {
    /// First-person variable-tick work: tilt plus bob/landing.
    pub(super) fn first_person_frame(
        &mut self,
        frame: &CameraFrame,
        config: &CameraConfig,
        dt: f32,
    ) {
        self.update_tilt(frame, config, dt);
        self.bob_and_landing(frame, config, dt);
    }

    fn update_tilt(&mut self, frame: &CameraFrame, config: &CameraConfig, dt: f32) {
        let goal = if config.camera_tilting || config.mouse_tilting {
            let mut roll = 0.0;
            let mut pitch = 0.0;
            if config.camera_tilting {
                roll += frame.motion.x * config.tilt_roll_power;
                pitch += frame.motion.z * config.tilt_pitch_power;
            }
            if config.mouse_tilting {
                roll += frame.look.x * config.mouse_tilt_roll_power;
            }
            Vec2::new(roll, pitch)
        } else {
            // Tilt decays home when the feature is switched off mid-lean.
            Vec2::ZERO
        };

        self.tilt = approach(self.tilt, goal, config.tilt_speed, dt);
    }

    /// Landing dip and view-bob, shared by both pipelines.
    pub(super) fn bob_and_landing(&mut self, frame: &CameraFrame, config: &CameraConfig, dt: f32) {
        if frame.camera_locked {
            return;
        }

        if let Some(fall_speed) = frame.hard_landing {
            if config.landing_effects {
                self.pos_tracer.y -= fall_speed * LANDING_DIP_SCALE;
                self.pos_tracer.y = self.pos_tracer.y.clamp(-LANDING_DIP_CLAMP, LANDING_DIP_CLAMP);
            }
        }

        if frame.movement_locked {
            return;
        }

        let moving = Vec2::new(frame.motion.x, frame.motion.z).length() > BOB_MOTION_THRESHOLD;

        if frame.grounded && moving {
            // Cadence scales with speed: sprinting steps faster in
            // proportion to the sprint/walk ratio.
            let rate = if frame.sprinting {
                BOB_BASE_RATE + frame.sprint_ratio * BOB_SPRINT_RATE_BONUS
            } else {
                BOB_BASE_RATE
            };
            self.walk_time += config.view_bob_rate * dt * rate;

            let goal = if config.enable_viewbob {
                let amplitude = if frame.sprinting {
                    BOB_SPRINT_AMPLITUDE
                } else {
                    BOB_WALK_AMPLITUDE
                };
                self.origin
                    + Vec3::Y * config.view_bob_power * self.walk_time.sin() * amplitude
            } else {
                self.origin
            };
            self.pos_tracer = approach(self.pos_tracer, goal, TRACER_APPROACH_RATE, dt);
        } else {
            // Stationary or airborne: settle back onto the eye line.
            self.pos_tracer = approach(self.pos_tracer, self.origin, TRACER_APPROACH_RATE, dt);
        }
    }

    /// Fixed-tick chase of the rendered local position toward the tracer.
    pub fn fixed_blend(&mut self) {
        self.local_position += (self.pos_tracer - self.local_position) * CAMERA_CHASE_FACTOR;
    }

    /// Camera rotation for the active pipeline.
    ///
    /// First person composes yaw, clamped pitch and the tilt offsets; third
    /// person returns the occlusion-resolved orbit rotation.
    pub fn rotation(&self) -> Quat {
        match self.mode {
            CameraMode::FirstPerson => {
                let base =
                    Quat::from_euler(EulerRot::YXZ, self.yaw_radians(), self.pitch_radians(), 0.0);
                let tilt = Quat::from_euler(
                    EulerRot::YXZ,
                    0.0,
                    self.tilt.y.to_radians(),
                    -self.tilt.x.to_radians(),
                );
                base * tilt
            }
            CameraMode::ThirdPerson => self.orbit_rotation,
        }
    }

    /// Body orientation: yaw only in first person, motion-turned in third.
    pub fn body_orientation(&self) -> Quat {
        match self.mode {
            CameraMode::FirstPerson => Quat::from_rotation_y(self.yaw_radians()),
            CameraMode::ThirdPerson => self.body_rotation,
        }
    }
}
