//! Feedback Module
//!
//! Side-effect dispatch driven by movement state: footstep and landing
//! audio cadence, and animation-parameter mirroring. Both outputs are
//! capabilities the application implements; absent sinks and empty
//! clip/parameter names are no-ops, never faults.

pub mod dispatch;

pub use dispatch::{FeedbackConfig, FeedbackDispatch, FeedbackFrame};

/// Fire-and-forget audio playback. No return channel.
pub trait AudioSink {
    /// Play `clip` once at `volume` (0..1).
    fn play(&mut self, clip: &str, volume: f32);
}

/// Named animation parameter slots on an external animator.
pub trait AnimationSink {
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_float(&mut self, name: &str, value: f32);
    fn set_layer_weight(&mut self, layer: &str, weight: f32);
}
