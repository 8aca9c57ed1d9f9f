//! Camera Configuration
//!
//! Tunables for both camera pipelines. Angle-valued settings are in
//! degrees — the restraints and tilt powers are feel contracts expressed
//! in degrees, and converting them at the edge keeps the numbers literal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::physics::LayerMask;

/// Which camera pipeline is active. Exactly one runs per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    #[default]
    FirstPerson,
    ThirdPerson,
}

/// Tunables for the camera rig.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub mode: CameraMode,

    /// Degrees of rotation per mouse count.
    pub mouse_sensitivity: f32,
    /// First-person pitch limits in degrees (down, up).
    pub vertical_restraint: Vec2,

    /// First-person camera height above the character origin, in meters.
    pub eye_height: f32,
    /// Extra camera drop while crouched: 1.0 follows the collider ratio,
    /// lower values sink the view further toward the ground.
    pub camera_crouch_drop: f32,

    /// Whether the camera bobs while walking.
    pub enable_viewbob: bool,
    /// Rate multiplier for the bob cycle.
    pub view_bob_rate: f32,
    /// Amplitude multiplier for the bob offset.
    pub view_bob_power: f32,

    /// Whether hard landings dip the camera.
    pub landing_effects: bool,

    /// Roll/pitch the camera with strafe motion.
    pub camera_tilting: bool,
    /// Degrees of roll per unit of strafe input.
    pub tilt_roll_power: f32,
    /// Degrees of pitch per unit of walk input.
    pub tilt_pitch_power: f32,
    /// Additionally roll with mouse yaw rate.
    pub mouse_tilting: bool,
    /// Degrees of roll per mouse count of yaw motion.
    pub mouse_tilt_roll_power: f32,
    /// Per-frame approach rate for tilt changes.
    pub tilt_speed: f32,

    /// Field of view with no zoom applied, in degrees.
    pub base_fov: f32,
    /// Degrees of FOV removed while the zoom button is held.
    pub zoom_intensity: f32,
    /// Degrees of FOV added while sprinting.
    pub sprint_intensity: f32,

    /// Orbit distance behind the character in third person, in meters.
    pub orbit_distance: f32,
    /// When true, any obstruction pulls the third-person camera in. When
    /// false, only kinematic bodies and static geometry do; dynamic props
    /// are allowed to clip.
    pub rigidbody_occlusion: bool,
    /// Layers the occlusion sweep may hit.
    pub occlusion_layers: LayerMask,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mode: CameraMode::default(),
            mouse_sensitivity: 1.5,
            vertical_restraint: Vec2::new(-90.0, 90.0),
            eye_height: 1.5,
            camera_crouch_drop: 1.0,
            enable_viewbob: false,
            view_bob_rate: 1.0,
            view_bob_power: 1.0,
            landing_effects: false,
            camera_tilting: false,
            tilt_roll_power: 10.0,
            tilt_pitch_power: 10.0,
            mouse_tilting: false,
            mouse_tilt_roll_power: 10.0,
            tilt_speed: 0.1,
            base_fov: 60.0,
            zoom_intensity: 30.0,
            sprint_intensity: 15.0,
            orbit_distance: 5.0,
            rigidbody_occlusion: true,
            occlusion_layers: LayerMask::ALL,
        }
    }
}

/// Third-person pitch limits in degrees: deep look-down, shallow look-up.
pub const ORBIT_PITCH_MIN_DEG: f32 = -85.0;
pub const ORBIT_PITCH_MAX_DEG: f32 = 50.0;

/// View-bob phase advance per second while walking, before speed scaling.
pub const BOB_BASE_RATE: f32 = 10.0;
/// Extra phase rate per unit of sprint/walk speed ratio while sprinting.
pub const BOB_SPRINT_RATE_BONUS: f32 = 2.0;
/// Bob amplitude in meters while walking / sprinting.
pub const BOB_WALK_AMPLITUDE: f32 = 0.1;
pub const BOB_SPRINT_AMPLITUDE: f32 = 0.15;
/// Motion-axis magnitude below which the character counts as standing
/// still for bob and footstep purposes.
pub const BOB_MOTION_THRESHOLD: f32 = 0.3;

/// Per-frame rate the camera position tracer chases its goal at.
pub const TRACER_APPROACH_RATE: f32 = 0.4;
/// Fraction of the tracer gap the rendered camera closes per fixed tick.
pub const CAMERA_CHASE_FACTOR: f32 = 0.1;

/// Meters of camera dip per m/s of landing fall speed.
pub const LANDING_DIP_SCALE: f32 = 0.3;
/// Hard bound on the landing dip offset, meters.
pub const LANDING_DIP_CLAMP: f32 = 4.0;

/// Per-frame approach rates for zoom goal and applied FOV.
pub const ZOOM_APPROACH_RATE: f32 = 0.2;
pub const FOV_APPROACH_RATE: f32 = 0.2;
/// Horizontal speed above which sprinting widens the FOV.
pub const SPRINT_ZOOM_SPEED_THRESHOLD: f32 = 0.05;

/// Radius of the occlusion sweep between character and camera.
pub const OCCLUSION_RADIUS: f32 = 0.1;
/// Offset off the obstruction surface after an occlusion pull-in.
pub const OCCLUSION_SKIN: f32 = 0.1;

/// Third-person body turn rate toward the motion direction, scaled by the
/// current speed over walk speed.
pub const BODY_TURN_RATE: f32 = 0.2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_first_person() {
        let config = CameraConfig::default();
        assert_eq!(config.mode, CameraMode::FirstPerson);
        assert_eq!(config.base_fov, 60.0);
        assert_eq!(config.vertical_restraint, Vec2::new(-90.0, 90.0));
    }

    #[test]
    fn test_partial_json_round_trip() {
        let config: CameraConfig =
            serde_json::from_str(r#"{ "mode": "third_person", "orbit_distance": 8.0 }"#).unwrap();
        assert_eq!(config.mode, CameraMode::ThirdPerson);
        assert_eq!(config.orbit_distance, 8.0);
        assert_eq!(config.mouse_sensitivity, 1.5);
    }
}
