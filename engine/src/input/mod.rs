//! Input Module
//!
//! Platform-agnostic input for the character controller. The application
//! layer translates raw device events into [`KeyCode`] values (or scripted
//! frames) and an [`InputSource`] strategy turns them into one immutable
//! [`InputSnapshot`] per variable tick.
//!
//! # Example
//!
//! ```rust,ignore
//! use stride_engine::input::{BindingsInput, InputSource, KeyCode, LockState};
//!
//! let mut source = BindingsInput::new();
//! source.handle_key(KeyCode::W, true);
//! source.accumulate_mouse(4.0, -1.0);
//!
//! let snapshot = source.produce(LockState::default());
//! assert!(snapshot.motion.z > 0.0);
//! ```

pub mod keyboard;
pub mod snapshot;
pub mod source;

pub use keyboard::{KeyCode, MovementKeys};
pub use snapshot::{ButtonState, ButtonTracker, InputSnapshot, LockState};
pub use source::{Bindings, BindingsInput, InputSource, ScriptFrame, ScriptedInput};
