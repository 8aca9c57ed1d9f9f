//! Keyboard State
//!
//! Generic key codes and movement-key tracking, decoupled from any
//! windowing system. The application translates its platform key events
//! into [`KeyCode`] values and forwards press/release pairs; the controller
//! side never touches platform input directly.

/// Generic key codes for the bindings this controller understands.
///
/// These map to standard keyboard keys but are not tied to any windowing
/// crate's key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    Space,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,

    // Common rebind targets
    C,
    F,
    Q,
    E,
    Tab,
    AltLeft,

    // Mouse buttons routed through the same binding table
    MouseLeft,
    MouseRight,
    MouseMiddle,

    /// Catch-all for unhandled keys.
    Unknown,
}

/// Tracks which movement keys are currently pressed.
///
/// Held keys produce smooth continuous axes; opposing keys cancel.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementKeys {
    /// W - walk forward
    pub forward: bool,
    /// S - walk backward
    pub backward: bool,
    /// A - strafe left
    pub left: bool,
    /// D - strafe right
    pub right: bool,
}

impl MovementKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from a key press/release. Returns `true` if the key was a
    /// movement key and was handled.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        match key {
            KeyCode::W => {
                self.forward = pressed;
                true
            }
            KeyCode::S => {
                self.backward = pressed;
                true
            }
            KeyCode::A => {
                self.left = pressed;
                true
            }
            KeyCode::D => {
                self.right = pressed;
                true
            }
            _ => false,
        }
    }

    /// Forward/backward axis (-1, 0, or 1).
    pub fn walk_axis(&self) -> f32 {
        (self.forward as i32 - self.backward as i32) as f32
    }

    /// Left/right strafe axis (-1, 0, or 1).
    pub fn strafe_axis(&self) -> f32 {
        (self.right as i32 - self.left as i32) as f32
    }

    /// Whether any movement key is currently down.
    pub fn any_pressed(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    /// Release every key.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
