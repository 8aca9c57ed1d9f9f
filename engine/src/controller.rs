//! Character Controller
//!
//! [`CharacterController`] owns one character's movement engine, camera rig
//! and feedback dispatch, and drives them on two independent clocks:
//!
//! - [`CharacterController::update`] once per rendered frame — input
//!   sampling, state-machine transitions, camera blending, feedback.
//! - [`CharacterController::fixed_update`] once per physics step —
//!   velocity application, ground contact resolution, third-person camera
//!   placement.
//!
//! The two must not be merged: probes and integration need the fixed
//! step's deterministic delta, while camera smoothing wants the variable
//! step's visual cadence.
//!
//! The controller consumes capabilities only (input source, collision
//! query, audio and animation sinks); it owns no platform resources. The
//! one hard precondition is an attached input source — without one the
//! controller logs a single setup error and the character stays
//! motionless.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{CameraConfig, CameraFrame, CameraMode, CameraRig};
use crate::feedback::{AnimationSink, AudioSink, FeedbackConfig, FeedbackDispatch, FeedbackFrame};
use crate::input::{InputSnapshot, InputSource, LockState};
use crate::math::APPROACH_EPSILON;
use crate::movement::{
    LANDING_DELTA_THRESHOLD, MoveBasis, MovementConfig, MovementEngine, MovementState,
};
use crate::physics::CollisionQuery;

/// Per-frame clock sample for the variable tick.
///
/// `delta` is the scaled game-time delta; `unscaled_delta` keeps running
/// through pauses and slow-motion and drives presentation smoothing that
/// should not freeze with gameplay.
#[derive(Debug, Clone, Copy)]
pub struct FrameTiming {
    pub delta: f32,
    pub unscaled_delta: f32,
}

impl FrameTiming {
    /// Timing with no time scaling in effect.
    pub fn new(delta: f32) -> Self {
        Self {
            delta,
            unscaled_delta: delta,
        }
    }
}

/// Full configuration surface of a character controller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub movement: MovementConfig,
    pub camera: CameraConfig,
    pub feedback: FeedbackConfig,
}

/// One character's movement, camera and feedback state.
pub struct CharacterController {
    pub config: ControllerConfig,
    input: Option<Box<dyn InputSource>>,
    input_fault_logged: bool,
    snapshot: InputSnapshot,
    movement: MovementEngine,
    camera: CameraRig,
    feedback: FeedbackDispatch,
    position: Vec3,
    /// Freezes walking, sprinting, crouching and jumping.
    pub movement_locked: bool,
    /// Freezes look and zoom.
    pub camera_locked: bool,
    last_vertical: f32,
    pending_jump: bool,
}

impl CharacterController {
    /// Create a controller with no input source attached yet.
    pub fn new(config: ControllerConfig) -> Self {
        let movement = MovementEngine::new(config.movement.clone());
        let camera = CameraRig::new(&config.camera);
        Self {
            config,
            input: None,
            input_fault_logged: false,
            snapshot: InputSnapshot::neutral(),
            movement,
            camera,
            feedback: FeedbackDispatch::new(),
            position: Vec3::ZERO,
            movement_locked: false,
            camera_locked: false,
            last_vertical: 0.0,
            pending_jump: false,
        }
    }

    /// Create a controller with an input source already attached.
    pub fn with_input(config: ControllerConfig, input: Box<dyn InputSource>) -> Self {
        let mut controller = Self::new(config);
        controller.attach_input(input);
        controller
    }

    /// Attach (or replace) the input source and initialize it.
    pub fn attach_input(&mut self, mut input: Box<dyn InputSource>) {
        input.initialize();
        self.input = Some(input);
        self.input_fault_logged = false;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Movement state for this tick (velocity, grounding, crouch, ...).
    pub fn movement_state(&self) -> &MovementState {
        self.movement.state()
    }

    /// Camera rig state (angles, local offset, FOV, orbit results).
    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    /// The snapshot consumed on the most recent variable tick.
    pub fn last_snapshot(&self) -> &InputSnapshot {
        &self.snapshot
    }

    fn locks(&self) -> LockState {
        LockState {
            movement: self.movement_locked,
            camera: self.camera_locked,
        }
    }

    /// Variable-rate tick: sample input, run state transitions, blend the
    /// camera, dispatch feedback. Call once per rendered frame.
    pub fn update(
        &mut self,
        timing: FrameTiming,
        world: &impl CollisionQuery,
        audio: Option<&mut dyn AudioSink>,
        animation: Option<&mut dyn AnimationSink>,
    ) {
        let locks = self.locks();
        self.snapshot = match self.input.as_mut() {
            Some(source) => source.produce(locks),
            None => {
                if !self.input_fault_logged {
                    log::error!(
                        "no input source attached to CharacterController; \
                         the character will not move"
                    );
                    self.input_fault_logged = true;
                }
                InputSnapshot::neutral()
            }
        };

        let dt = timing.delta;

        self.movement
            .frame_tick(&self.snapshot, self.movement_locked, self.position, world, dt);

        let state = self.movement.state();
        let vertical = state.velocity.y;

        // Hard landing compares the change in vertical velocity between
        // consecutive frames against the threshold. Deliberately a delta,
        // not an impact speed; see DESIGN.md before "fixing" this.
        let hard_landing = (vertical - self.last_vertical > LANDING_DELTA_THRESHOLD
            && self.last_vertical < -LANDING_DELTA_THRESHOLD
            && state.is_grounded
            && state.slide_duration_timer <= 0.0)
            .then_some(-self.last_vertical);

        let sprint_ratio = self.config.movement.sprint_speed
            / self.config.movement.move_speed.max(APPROACH_EPSILON);
        let collider_ratio = state.collider_height / self.config.movement.player_height;

        let camera_frame = CameraFrame {
            look: self.snapshot.look,
            motion: self.snapshot.motion,
            zoom_held: self.snapshot.zoom.held,
            camera_locked: self.camera_locked,
            movement_locked: self.movement_locked,
            grounded: state.is_grounded,
            sprinting: state.is_sprinting,
            crouching: state.is_crouching,
            sprint_ratio,
            collider_ratio,
            horizontal_speed: state.horizontal_speed(),
            hard_landing,
        };
        self.camera.frame_tick(&camera_frame, &self.config.camera, dt);

        let state = self.movement.state();
        let walking = !self.camera_locked
            && !self.movement_locked
            && state.is_grounded
            && self.snapshot.motion_magnitude() > crate::camera::config::BOB_MOTION_THRESHOLD;

        let feedback_frame = FeedbackFrame {
            grounded: state.is_grounded,
            walking,
            sprinting: state.is_sprinting,
            crouching: state.is_crouching,
            crouch_blend: state.crouch_blend,
            motion_magnitude: self.snapshot.motion_magnitude(),
            relative_speed: state.top_speed
                / self.config.movement.move_speed.max(APPROACH_EPSILON),
            walk_phase: self.camera.walk_time,
            jumped: std::mem::take(&mut self.pending_jump),
            hard_landing: hard_landing.is_some(),
        };
        self.feedback
            .tick(&feedback_frame, &self.config.feedback, dt, audio, animation);

        self.last_vertical = self.movement.state().velocity.y;
    }

    /// Fixed-rate tick: velocity application, contact resolution and
    /// third-person camera placement. Call once per physics step.
    pub fn fixed_update(&mut self, dt: f32, world: &impl CollisionQuery) {
        let basis = MoveBasis::from_yaw(self.camera.yaw_radians());

        let events = self.movement.fixed_tick(
            &self.snapshot,
            basis,
            self.movement_locked,
            &mut self.position,
            world,
            dt,
        );

        if let Some(lift) = events.step_lift {
            self.camera.compensate_step(lift);
        }
        if events.jumped {
            self.pending_jump = true;
        }

        match self.camera.mode {
            CameraMode::FirstPerson => self.camera.fixed_blend(),
            CameraMode::ThirdPerson => {
                let velocity = self.movement.state().velocity;
                self.camera.fixed_tick_third_person(
                    self.position,
                    self.config.movement.player_height,
                    velocity,
                    self.config.movement.move_speed,
                    world,
                    &self.config.camera,
                );
            }
        }
    }

    /// Relocate the character and recompute third-person camera placement
    /// (occlusion included) in the same call, bypassing per-tick blending.
    pub fn teleport(&mut self, position: Vec3, world: &impl CollisionQuery) {
        self.position = position;

        if self.camera.mode == CameraMode::ThirdPerson {
            self.camera.resolve_orbit(
                position,
                self.config.movement.player_height,
                world,
                &self.config.camera,
            );
        }
    }
}

/// Identity of a spawned character, assigned by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

/// Tracks which character is locally controlled.
///
/// An explicit-lifecycle replacement for a process-wide "current player"
/// static: register exactly once at spawn, unregister at despawn. Code
/// that needs the active character receives this registry (or the handle
/// itself) by reference.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    current: Option<PlayerId>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the locally-controlled character. Replacing a live
    /// registration is tolerated but logged: it usually means a despawn
    /// was missed.
    pub fn register(&mut self, id: PlayerId) {
        if let Some(existing) = self.current {
            if existing != id {
                log::warn!("replacing registered player {existing:?} with {id:?}");
            }
        }
        self.current = Some(id);
    }

    /// Unregister at despawn. A stale id (already replaced) is a no-op.
    pub fn unregister(&mut self, id: PlayerId) {
        if self.current == Some(id) {
            self.current = None;
        }
    }

    /// The currently registered character, if any.
    pub fn current(&self) -> Option<PlayerId> {
        self.current
    }
}
