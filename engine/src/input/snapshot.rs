//! Input Snapshot
//!
//! The immutable per-tick record the controller consumes. An
//! [`InputSnapshot`] is produced fresh every variable tick by whatever
//! [`crate::input::InputSource`] strategy is attached; the controller never
//! mutates one in place.
//!
//! [`ButtonTracker`] turns raw "is the key down right now" polls into
//! press/held/release edges, and owns the locking contract: when a lock
//! engages while a button is held, the tracker emits exactly one release
//! edge and then reports fully false until the lock lifts. Downstream code
//! therefore never sees a button stuck in the held state.

use glam::{Vec2, Vec3};

/// Edge-complete state of one button for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Went down this tick.
    pub pressed: bool,
    /// Is down this tick.
    pub held: bool,
    /// Went up this tick.
    pub released: bool,
}

impl ButtonState {
    /// A button that is fully idle.
    pub const IDLE: ButtonState = ButtonState {
        pressed: false,
        held: false,
        released: false,
    };
}

/// Immutable per-tick input record.
///
/// `motion.x` is strafe (+right), `motion.z` is walk (+forward); `motion.y`
/// is unused by the controller and carried only so sources can round-trip
/// full axis data. `look` is the raw mouse delta for the tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    pub motion: Vec3,
    pub look: Vec2,
    pub jump: ButtonState,
    pub sprint: ButtonState,
    pub crouch: ButtonState,
    pub zoom: ButtonState,
}

impl InputSnapshot {
    /// A snapshot with zero axes and all buttons idle.
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Magnitude of the horizontal motion intent (strafe/walk plane).
    pub fn motion_magnitude(&self) -> f32 {
        Vec2::new(self.motion.x, self.motion.z).length()
    }
}

/// External lock flags handed to the input source every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockState {
    /// Movement axes and jump/sprint/crouch are neutralized.
    pub movement: bool,
    /// Look axes and zoom are neutralized.
    pub camera: bool,
}

/// Derives press/held/release edges from per-tick held polls.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonTracker {
    held: bool,
}

impl ButtonTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample the tracker with the current raw held state.
    pub fn sample(&mut self, held_now: bool) -> ButtonState {
        let state = ButtonState {
            pressed: held_now && !self.held,
            held: held_now,
            released: !held_now && self.held,
        };
        self.held = held_now;
        state
    }

    /// Sample under a lock: neutral output, but a held button emits one
    /// release edge before going quiet.
    pub fn sample_locked(&mut self) -> ButtonState {
        let state = ButtonState {
            pressed: false,
            held: false,
            released: self.held,
        };
        self.held = false;
        state
    }
}
