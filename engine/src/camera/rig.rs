//! Camera Rig State
//!
//! [`CameraRig`] owns everything the camera needs across both pipelines:
//! euler angles, tilt, the smoothed local-position tracer, view-bob phase,
//! zoom state and the third-person orbit results. The first- and
//! third-person behavior lives in their own modules as further `impl`
//! blocks on this type; exactly one pipeline runs per [`CameraMode`].
//!
//! Angles are stored in degrees (see the configuration notes); conversion
//! to radians happens only where trigonometry is applied.

use glam::{Quat, Vec2, Vec3};

use crate::math::approach;

use super::config::{
    CameraConfig, CameraMode, FOV_APPROACH_RATE, ORBIT_PITCH_MAX_DEG, ORBIT_PITCH_MIN_DEG,
    SPRINT_ZOOM_SPEED_THRESHOLD, ZOOM_APPROACH_RATE,
};

/// Everything the camera reads from the rest of the controller for one
/// variable tick.
#[derive(Debug, Clone, Copy)]
pub struct CameraFrame {
    /// Raw look delta for the tick.
    pub look: Vec2,
    /// Motion intent axes (x strafe, z walk).
    pub motion: Vec3,
    /// Zoom button held this tick.
    pub zoom_held: bool,
    pub camera_locked: bool,
    pub movement_locked: bool,
    pub grounded: bool,
    pub sprinting: bool,
    pub crouching: bool,
    /// Sprint speed over walk speed; scales the bob cadence.
    pub sprint_ratio: f32,
    /// Current collider height over standing height; scales the eye line.
    pub collider_ratio: f32,
    /// Horizontal speed in m/s.
    pub horizontal_speed: f32,
    /// Fall speed (m/s, positive) when this tick is a hard landing that
    /// should dip the camera and play the landing sound. Already filtered
    /// for slide suppression by the controller.
    pub hard_landing: Option<f32>,
}

/// Camera state shared by both pipelines.
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub mode: CameraMode,

    /// Euler angles in degrees: x pitch (up positive), y yaw, z unused.
    pub angles: Vec3,
    /// Tilt offsets in degrees: x roll source, y pitch offset.
    pub tilt: Vec2,

    /// Local camera offset goal (eye line plus bob and landing dip).
    pub pos_tracer: Vec3,
    /// Rendered local camera offset; chases the tracer each fixed tick.
    pub local_position: Vec3,
    /// Eye-line origin the tracer orbits around.
    pub origin: Vec3,
    origin_base_height: f32,

    /// View-bob phase in radians; also drives footstep cadence.
    pub walk_time: f32,

    /// Additive FOV offset currently applied.
    pub zoom_additive: f32,
    /// Additive FOV offset being approached.
    pub zoom_goal: f32,
    /// Applied field of view in degrees.
    pub fov: f32,

    /// Third person: camera look rotation after occlusion resolve.
    pub orbit_rotation: Quat,
    /// Third person: world camera position after occlusion resolve.
    pub resolved_world_position: Vec3,
    /// Third person: character facing, turned toward motion.
    pub body_rotation: Quat,
}

impl CameraRig {
    pub fn new(config: &CameraConfig) -> Self {
        let origin = Vec3::new(0.0, config.eye_height, 0.0);
        Self {
            mode: config.mode,
            angles: Vec3::ZERO,
            tilt: Vec2::ZERO,
            pos_tracer: origin,
            local_position: origin,
            origin,
            origin_base_height: config.eye_height,
            walk_time: 0.0,
            zoom_additive: 0.0,
            zoom_goal: 0.0,
            fov: config.base_fov,
            orbit_rotation: Quat::IDENTITY,
            resolved_world_position: Vec3::ZERO,
            body_rotation: Quat::IDENTITY,
        }
    }

    /// Yaw in radians; the movement basis is derived from this in both
    /// modes, so "forward" is always camera-forward.
    pub fn yaw_radians(&self) -> f32 {
        self.angles.y.to_radians()
    }

    /// Pitch in radians, up positive.
    pub fn pitch_radians(&self) -> f32 {
        self.angles.x.to_radians()
    }

    /// Shared per-frame camera work: eye-line scaling, look accumulation,
    /// pipeline effects and zoom. Call once per variable tick.
    pub fn frame_tick(&mut self, frame: &CameraFrame, config: &CameraConfig, dt: f32) {
        // The eye line follows the crouch collider, optionally dropping
        // further for a heavier crouch feel.
        self.origin.y = self.origin_base_height
            * frame.collider_ratio
            * if frame.crouching {
                config.camera_crouch_drop
            } else {
                1.0
            };

        self.apply_look(frame, config);

        match self.mode {
            CameraMode::FirstPerson => self.first_person_frame(frame, config, dt),
            CameraMode::ThirdPerson => self.bob_and_landing(frame, config, dt),
        }

        self.update_zoom(frame, config, dt);
    }

    fn apply_look(&mut self, frame: &CameraFrame, config: &CameraConfig) {
        if !frame.camera_locked {
            self.angles.y -= frame.look.x * config.mouse_sensitivity;
            self.angles.x -= frame.look.y * config.mouse_sensitivity;
        }

        let (min, max) = match self.mode {
            CameraMode::FirstPerson => (config.vertical_restraint.x, config.vertical_restraint.y),
            CameraMode::ThirdPerson => (ORBIT_PITCH_MIN_DEG, ORBIT_PITCH_MAX_DEG),
        };
        self.angles.x = self.angles.x.clamp(min, max);
    }

    fn update_zoom(&mut self, frame: &CameraFrame, config: &CameraConfig, dt: f32) {
        // Rebuilt from scratch every frame; holding states keep it alive.
        self.zoom_goal = 0.0;

        if !frame.camera_locked && frame.zoom_held && config.zoom_intensity != 0.0 {
            self.zoom_goal -= config.zoom_intensity;
        }

        if frame.sprinting && frame.horizontal_speed > SPRINT_ZOOM_SPEED_THRESHOLD {
            self.zoom_goal += config.sprint_intensity;
        }

        self.zoom_additive = approach(self.zoom_additive, self.zoom_goal, ZOOM_APPROACH_RATE, dt);
        self.fov = approach(
            self.fov,
            config.base_fov + self.zoom_additive,
            FOV_APPROACH_RATE,
            dt,
        );
    }

    /// Shift the camera by a step-up lift so the view glides instead of
    /// popping; the tracer then settles back organically.
    pub fn compensate_step(&mut self, lift: f32) {
        self.pos_tracer.y -= lift;
        self.local_position.y -= lift;
    }
}

/// Rotation that looks along `direction` with no roll.
pub(super) fn look_rotation(direction: Vec3) -> Quat {
    let pitch = direction.y.clamp(-1.0, 1.0).asin();
    let yaw = (-direction.x).atan2(-direction.z);
    Quat::from_euler(glam::EulerRot::YXZ, yaw, pitch, 0.0)
}

/// View direction for yaw/pitch in radians. Yaw 0, pitch 0 faces -Z.
pub(super) fn view_direction(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(
        -yaw.sin() * pitch.cos(),
        pitch.sin(),
        -yaw.cos() * pitch.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> CameraFrame {
        CameraFrame {
            look: Vec2::ZERO,
            motion: Vec3::ZERO,
            zoom_held: false,
            camera_locked: false,
            movement_locked: false,
            grounded: true,
            sprinting: false,
            crouching: false,
            sprint_ratio: 1.6,
            collider_ratio: 1.0,
            horizontal_speed: 0.0,
            hard_landing: None,
        }
    }

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_look_rotation_identity() {
        let q = look_rotation(Vec3::new(0.0, 0.0, -1.0));
        let fwd = q * Vec3::new(0.0, 0.0, -1.0);
        assert!(fwd.distance(Vec3::new(0.0, 0.0, -1.0)) < 1e-5);
    }

    #[test]
    fn test_look_rotation_arbitrary_direction() {
        let dir = Vec3::new(0.3, -0.5, 0.6).normalize();
        let q = look_rotation(dir);
        assert!((q * Vec3::new(0.0, 0.0, -1.0)).distance(dir) < 1e-5);
    }

    #[test]
    fn test_view_direction_matches_look_rotation() {
        let yaw = 1.1_f32;
        let pitch = -0.4_f32;
        let dir = view_direction(yaw, pitch);
        let q = look_rotation(dir);
        assert!((q * Vec3::new(0.0, 0.0, -1.0)).distance(dir) < 1e-5);
    }

    #[test]
    fn test_pitch_clamps_to_restraint() {
        let config = CameraConfig::default();
        let mut rig = CameraRig::new(&config);
        let mut f = frame();
        f.look = Vec2::new(0.0, -10_000.0);
        rig.frame_tick(&f, &config, DT);
        assert_eq!(rig.angles.x, 90.0);

        f.look = Vec2::new(0.0, 10_000.0);
        rig.frame_tick(&f, &config, DT);
        assert_eq!(rig.angles.x, -90.0);
    }

    #[test]
    fn test_camera_lock_freezes_angles() {
        let config = CameraConfig::default();
        let mut rig = CameraRig::new(&config);
        let mut f = frame();
        f.look = Vec2::new(50.0, 20.0);
        f.camera_locked = true;
        rig.frame_tick(&f, &config, DT);
        assert_eq!(rig.angles, Vec3::ZERO);
    }

    #[test]
    fn test_zoom_goal_combines_additively() {
        let config = CameraConfig::default();
        let mut rig = CameraRig::new(&config);
        let mut f = frame();
        f.zoom_held = true;
        f.sprinting = true;
        f.horizontal_speed = 6.0;
        rig.frame_tick(&f, &config, DT);
        // -30 zoom + 15 sprint = -15 combined goal.
        assert_eq!(rig.zoom_goal, -15.0);
    }

    #[test]
    fn test_zoom_ignored_while_camera_locked() {
        let config = CameraConfig::default();
        let mut rig = CameraRig::new(&config);
        let mut f = frame();
        f.zoom_held = true;
        f.camera_locked = true;
        rig.frame_tick(&f, &config, DT);
        assert_eq!(rig.zoom_goal, 0.0);
    }

    #[test]
    fn test_fov_approaches_base_plus_additive() {
        let config = CameraConfig::default();
        let mut rig = CameraRig::new(&config);
        let mut f = frame();
        f.zoom_held = true;
        for _ in 0..2000 {
            rig.frame_tick(&f, &config, DT);
        }
        assert_eq!(rig.fov, 30.0);

        f.zoom_held = false;
        for _ in 0..2000 {
            rig.frame_tick(&f, &config, DT);
        }
        assert_eq!(rig.fov, 60.0);
    }

    #[test]
    fn test_crouch_drops_eye_line() {
        let config = CameraConfig {
            camera_crouch_drop: 0.5,
            ..CameraConfig::default()
        };
        let mut rig = CameraRig::new(&config);
        let mut f = frame();
        f.crouching = true;
        f.collider_ratio = 0.4;
        rig.frame_tick(&f, &config, DT);
        // 1.5 * 0.4 * 0.5
        assert!((rig.origin.y - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_step_compensation_shifts_tracer_and_render_position() {
        let config = CameraConfig::default();
        let mut rig = CameraRig::new(&config);
        let before_tracer = rig.pos_tracer.y;
        let before_local = rig.local_position.y;
        rig.compensate_step(0.4);
        assert!((before_tracer - rig.pos_tracer.y - 0.4).abs() < 1e-6);
        assert!((before_local - rig.local_position.y - 0.4).abs() < 1e-6);
    }
}
