//! Movement Module
//!
//! The movement and grounding engine plus its configuration and state
//! records.
//!
//! # Components
//!
//! - [`MovementEngine`] - the airborne/grounded/sliding state machine,
//!   driven once per fixed tick with per-frame arbitration on the side
//! - [`MovementConfig`] - flat tunable surface with [`JumpMode`],
//!   [`SprintMode`] and [`CrouchMode`] behavior switches
//! - [`MovementState`] - the inspectable per-tick state record
//! - [`MoveBasis`] - camera-relative frame input is projected through

pub mod config;
pub mod engine;
pub mod state;

pub use config::{
    CLASSIC_SPRINT_THRESHOLD, CONTACT_BENEATH_DOT, CrouchMode, GROUNDED_SINK_SPEED, JUMP_DEBOUNCE,
    JumpMode, LANDING_DELTA_THRESHOLD, MovementConfig, SLIDE_EFFECT_SUPPRESS, SLIDE_HOLD_TIME,
    STEP_SURFACE_FLATNESS, SprintMode, VELOCITY_SNAP,
};
pub use engine::{MoveBasis, MovementEngine, MovementEvents};
pub use state::{GroundKind, MovementState};
