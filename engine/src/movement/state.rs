//! Movement State
//!
//! The single mutable record of the grounding state machine. Owned
//! exclusively by [`crate::movement::MovementEngine`]; everything else
//! reads it through the engine. Consolidating the per-frame flags here
//! keeps the state machine inspectable and testable away from rendering.

use glam::Vec3;

/// Grounding classification for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroundKind {
    /// No walkable contact below.
    #[default]
    Airborne,
    /// Standing on a walkable surface.
    Grounded,
    /// In contact with a surface steeper than the slope bias.
    Sliding,
}

/// Mutable state of the movement engine, updated once per tick.
#[derive(Debug, Clone)]
pub struct MovementState {
    /// World-space velocity in m/s.
    pub velocity: Vec3,
    /// Walkable ground contact this tick.
    pub is_grounded: bool,
    /// Crouch intent after ceiling arbitration.
    pub is_crouching: bool,
    /// Sprint state after mode arbitration.
    pub is_sprinting: bool,
    /// Whether jump arbitration may fire. Forced false while sliding.
    pub can_jump: bool,
    /// Contact with a too-steep surface while falling.
    pub is_sliding: bool,
    /// Normal of the slope currently slid on; zero when not sliding.
    pub slide_normal: Vec3,
    /// Seconds of slide state remaining after slope contact is lost.
    pub slide_hold_timer: f32,
    /// Seconds remaining of landing-effect suppression after a slide.
    pub slide_duration_timer: f32,
    /// Seconds until another jump is accepted.
    pub jump_cooldown: f32,
    /// Crouch transition, 0 = standing, 1 = fully crouched.
    pub crouch_blend: f32,
    /// Current maximum horizontal speed in m/s.
    pub top_speed: f32,
    /// Capsule height for the current crouch blend.
    pub collider_height: f32,

    /// Jump press edge latched by the variable tick, consumed by the next
    /// fixed tick.
    pub(crate) jump_queued: bool,
    /// Jump release edge latched for the mid-air jump cut.
    pub(crate) jump_cut_queued: bool,
}

impl MovementState {
    pub fn new(standing_height: f32, move_speed: f32) -> Self {
        Self {
            velocity: Vec3::ZERO,
            is_grounded: false,
            is_crouching: false,
            is_sprinting: false,
            can_jump: false,
            is_sliding: false,
            slide_normal: Vec3::ZERO,
            slide_hold_timer: 0.0,
            slide_duration_timer: 0.0,
            jump_cooldown: 0.0,
            crouch_blend: 0.0,
            top_speed: move_speed,
            collider_height: standing_height,
            jump_queued: false,
            jump_cut_queued: false,
        }
    }

    /// Current grounding classification.
    pub fn ground_kind(&self) -> GroundKind {
        if self.is_sliding {
            GroundKind::Sliding
        } else if self.is_grounded {
            GroundKind::Grounded
        } else {
            GroundKind::Airborne
        }
    }

    /// Speed over the ground plane, ignoring vertical velocity.
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = MovementState::new(1.64, 5.0);
        assert_eq!(state.ground_kind(), GroundKind::Airborne);
        assert_eq!(state.velocity, Vec3::ZERO);
        assert_eq!(state.collider_height, 1.64);
        assert_eq!(state.top_speed, 5.0);
        assert_eq!(state.crouch_blend, 0.0);
    }

    #[test]
    fn test_ground_kind_priority() {
        let mut state = MovementState::new(1.64, 5.0);
        state.is_grounded = true;
        assert_eq!(state.ground_kind(), GroundKind::Grounded);
        // Sliding wins over grounded.
        state.is_sliding = true;
        assert_eq!(state.ground_kind(), GroundKind::Sliding);
    }

    #[test]
    fn test_horizontal_speed_ignores_fall() {
        let mut state = MovementState::new(1.64, 5.0);
        state.velocity = Vec3::new(3.0, -20.0, 4.0);
        assert!((state.horizontal_speed() - 5.0).abs() < 1e-6);
    }
}
