//! Stride Engine Library
//!
//! A first/third-person character movement controller: per-frame
//! translation of player intent (movement axes, mouse look, jump, crouch,
//! sprint, zoom) into physical motion, camera placement and feedback side
//! effects. The surrounding application supplies the capabilities — input
//! device, collision queries, audio playback, animation parameters — and
//! drives the controller on its render and physics clocks.
//!
//! # Modules
//!
//! - [`math`] - easing curves, frame-rate-independent approach, springs,
//!   bezier evaluation
//! - [`input`] - input snapshot record and pluggable input-source strategies
//! - [`physics`] - collision query capability and a reference AABB world
//! - [`movement`] - the grounding/sliding/jumping state machine
//! - [`camera`] - first-person rig and third-person orbit with occlusion
//! - [`feedback`] - footstep/landing audio cadence and animation mirroring
//! - [`controller`] - the per-character aggregate and player registry
//!
//! # Example
//!
//! ```ignore
//! use stride_engine::controller::{CharacterController, ControllerConfig, FrameTiming};
//! use stride_engine::input::BindingsInput;
//! use stride_engine::physics::AabbWorld;
//!
//! let mut world = AabbWorld::new();
//! // ... add level geometry ...
//!
//! let mut player = CharacterController::with_input(
//!     ControllerConfig::default(),
//!     Box::new(BindingsInput::new()),
//! );
//!
//! // Each rendered frame:
//! player.update(FrameTiming::new(frame_dt), &world, Some(&mut audio), Some(&mut animator));
//!
//! // Each physics step:
//! player.fixed_update(1.0 / 60.0, &world);
//! ```

pub mod camera;
pub mod controller;
pub mod feedback;
pub mod input;
pub mod math;
pub mod movement;
pub mod physics;

// Re-export the types most applications touch.
pub use camera::{CameraConfig, CameraMode, CameraRig};
pub use controller::{
    CharacterController, ControllerConfig, FrameTiming, PlayerId, PlayerRegistry,
};
pub use feedback::{AnimationSink, AudioSink, FeedbackConfig};
pub use input::{BindingsInput, InputSnapshot, InputSource, KeyCode, LockState, ScriptedInput};
pub use movement::{JumpMode, MovementConfig, MovementState, SprintMode};
pub use physics::{AabbWorld, CollisionQuery, Contact, LayerMask};
