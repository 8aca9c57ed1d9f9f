//! Movement Configuration
//!
//! The flat tunable surface of the movement engine. No file format is owned
//! here; the application deserializes whatever it likes into
//! [`MovementConfig`] (every field has a default, so partial configs work).
//!
//! The standalone constants at the bottom are gameplay-feel contracts
//! carried over from extensive play tuning. They are named rather than
//! inlined so nobody "fixes" one in passing.

use serde::{Deserialize, Serialize};

use crate::physics::LayerMask;

/// How jumping behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpMode {
    /// Jumping disabled entirely.
    None,
    /// Fixed jump power, unaffected by anything else.
    Normal,
    /// Jump power scaled to 115% while sprinting.
    #[default]
    Enhanced,
    /// Normal vertical jump; while sprinting, adds a horizontal leap of
    /// twice the sprint speed along the motion direction plus half the
    /// jump power vertically. A mobility feel, not just a power scalar.
    Leaping,
}

/// How sprinting behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SprintMode {
    /// Sprinting disabled entirely.
    None,
    /// Sprint while the key is held.
    #[default]
    Normal,
    /// Sprint while held AND actually moving; auto-cancels when the mean
    /// motion-axis magnitude falls below [`CLASSIC_SPRINT_THRESHOLD`].
    Classic,
}

/// How crouching behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrouchMode {
    /// Crouching disabled entirely.
    None,
    /// Crouching does not affect sprinting.
    #[default]
    Normal,
    /// Sprinting is forced off while crouched.
    NoSprint,
}

/// Tunables for the movement and grounding engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Capsule radius in meters.
    pub player_radius: f32,
    /// Standing capsule height in meters.
    pub player_height: f32,

    /// Walking speed in m/s.
    pub move_speed: f32,
    /// Crouch-walking speed in m/s.
    pub crouch_speed: f32,
    /// Sprinting speed in m/s.
    pub sprint_speed: f32,

    /// Upward velocity applied on jump, in m/s.
    pub jump_power: f32,
    /// Downward acceleration in m/s².
    pub gravity: f32,
    /// Terminal fall velocity in m/s (negative).
    pub gravity_cap: f32,

    /// Per-frame rate at which velocity chases its target. 0.01 feels like
    /// ice; 1.0 is near-instant direction changes.
    pub movement_shift_rate: f32,
    /// Fraction of ground control available while airborne (0 = none).
    pub air_control: f32,

    /// Tallest ledge the step-up correction will climb, in meters.
    pub step_height: f32,
    /// Compensate the camera when stepping so stairs don't jitter the view.
    pub smooth_stepping: bool,

    /// Whether steep surfaces shunt the player downhill.
    pub sliding_on_slopes: bool,
    /// Up-component of a surface normal above which the surface counts as
    /// walkable ground. Higher = steeper surfaces become slides.
    pub slope_bias: f32,

    /// Fraction of standing height the collider shrinks to when crouched.
    pub crouch_percent: f32,
    /// Seconds for a full crouch/stand transition.
    pub crouch_rate: f32,

    pub jump_mode: JumpMode,
    pub sprint_mode: SprintMode,
    pub crouch_mode: CrouchMode,

    /// Layers the grounding, stepping and ceiling probes may hit.
    pub grounding_layers: LayerMask,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            player_radius: 0.3,
            player_height: 1.64,
            move_speed: 5.0,
            crouch_speed: 3.0,
            sprint_speed: 8.0,
            jump_power: 4.0,
            gravity: 30.0,
            gravity_cap: -100.0,
            movement_shift_rate: 0.2,
            air_control: 1.0,
            step_height: 0.5,
            smooth_stepping: true,
            sliding_on_slopes: true,
            slope_bias: 0.85,
            crouch_percent: 0.4,
            crouch_rate: 0.2,
            jump_mode: JumpMode::default(),
            sprint_mode: SprintMode::default(),
            crouch_mode: CrouchMode::default(),
            grounding_layers: LayerMask::ALL,
        }
    }
}

impl MovementConfig {
    /// Collider height for a given crouch blend, easing with
    /// [`crate::math::smooth_up`].
    pub fn collider_height(&self, crouch_blend: f32) -> f32 {
        let crouched = self.player_height * self.crouch_percent;
        self.player_height + (crouched - self.player_height) * crate::math::smooth_up(crouch_blend)
    }

    /// Top speed for the given crouch/sprint state. Crouch-sprinting keeps
    /// the crouch/walk speed ratio applied to the sprint multiplier.
    pub fn top_speed(&self, crouching: bool, sprinting: bool) -> f32 {
        if crouching {
            if sprinting {
                self.crouch_speed * (self.sprint_speed / self.move_speed)
            } else {
                self.crouch_speed
            }
        } else if sprinting {
            self.sprint_speed
        } else {
            self.move_speed
        }
    }
}

/// Snap distance for velocity shaping. Coarser than the math-layer epsilon:
/// velocity settling within 2 cm/s of its target reads as "arrived" and a
/// finer tail is imperceptible.
pub const VELOCITY_SNAP: f32 = 0.02;

/// Seconds between accepted jumps. Debounces hardware key bounce; without
/// it, the frames before grounding clears could chain several jumps.
pub const JUMP_DEBOUNCE: f32 = 0.05;

/// Seconds sliding persists after the slope contact is lost. Prevents
/// slide-state flicker when leaving a slope into empty air.
pub const SLIDE_HOLD_TIME: f32 = 0.1;

/// Seconds after a slide during which landing effects are suppressed, so
/// sliding down a wall doesn't spam landing feedback.
pub const SLIDE_EFFECT_SUPPRESS: f32 = 1.0;

/// Tick-to-tick vertical velocity delta that counts as a hard landing.
/// Deliberately a delta, not an impact speed; see the landing notes in
/// DESIGN.md before touching this.
pub const LANDING_DELTA_THRESHOLD: f32 = 5.0;

/// A contact only participates in slope decisions when its normal's
/// up-component exceeds this; anything flatter is a wall, not ground.
pub const CONTACT_BENEATH_DOT: f32 = 0.1;

/// Minimum normal up-component for a step-up ledge. Steps are climbed only
/// onto near-flat surfaces.
pub const STEP_SURFACE_FLATNESS: f32 = 0.98;

/// Downward velocity held while grounded and moving, keeping contact on
/// downslopes without letting gravity stack up.
pub const GROUNDED_SINK_SPEED: f32 = -0.5;

/// Mean motion-axis magnitude below which Classic sprint auto-cancels.
pub const CLASSIC_SPRINT_THRESHOLD: f32 = 0.5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_speed_selection() {
        let config = MovementConfig::default();
        assert_eq!(config.top_speed(false, false), 5.0);
        assert_eq!(config.top_speed(false, true), 8.0);
        assert_eq!(config.top_speed(true, false), 3.0);
        // Crouch-sprint keeps the sprint ratio: 3 * (8/5).
        assert!((config.top_speed(true, true) - 4.8).abs() < 1e-5);
    }

    #[test]
    fn test_collider_height_range() {
        let config = MovementConfig::default();
        assert_eq!(config.collider_height(0.0), config.player_height);
        let crouched = config.collider_height(1.0);
        assert!((crouched - config.player_height * config.crouch_percent).abs() < 1e-5);
        // Mid-blend sits strictly between.
        let mid = config.collider_height(0.5);
        assert!(mid < config.player_height && mid > crouched);
    }

    #[test]
    fn test_partial_json_config_fills_defaults() {
        // The configuration surface is an externally supplied struct; a
        // partial document must deserialize with defaults for the rest.
        let config: MovementConfig =
            serde_json::from_str(r#"{ "sprint_speed": 12.0, "jump_mode": "leaping" }"#).unwrap();
        assert_eq!(config.sprint_speed, 12.0);
        assert_eq!(config.jump_mode, JumpMode::Leaping);
        assert_eq!(config.move_speed, 5.0);
        assert_eq!(config.grounding_layers, LayerMask::ALL);
    }
}
