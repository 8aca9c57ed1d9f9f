//! Feedback Dispatch
//!
//! Turns per-tick movement state into audio and animation side effects.
//!
//! Footsteps key off the view-bob phase: one step per cycle trough, at the
//! moment the camera is lowest. Landing sounds share the hard-landing
//! detection with the camera dip and are debounced so irregular ground
//! contact cannot retrigger them. Animation parameters mirror every tick;
//! an empty parameter name disables that slot.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{AnimationSink, AudioSink};

/// Phase threshold for a footstep: the trough of the bob sine.
pub const FOOTSTEP_TROUGH: f32 = -0.8;

/// Motion-axis magnitude above which the walking animation flag is set.
pub const ANIMATION_WALKING_THRESHOLD: f32 = 0.2;

/// Tunables and slot names for feedback dispatch.
///
/// Empty clip or parameter names disable the corresponding effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Master switch for all controller-driven sounds.
    pub enable_sounds: bool,
    /// Volume for every controller sound (0..1).
    pub sound_volume: f32,
    /// Seconds airborne required before the landing sound may replay.
    pub landing_sound_cooldown: f32,
    /// When the animator drives step sounds via animation events instead.
    pub override_footsteps: bool,

    /// Footstep clips; one is chosen at random per step.
    pub walk_clips: Vec<String>,
    pub jump_clip: String,
    pub landing_clip: String,

    /// Animator parameter slots (bool unless noted).
    pub walking_parameter: String,
    pub sprinting_parameter: String,
    pub crouching_parameter: String,
    pub grounded_parameter: String,
    /// Float slot: current top speed over walk speed.
    pub relative_speed_parameter: String,
    /// Layer-weight slot fed the crouch blend.
    pub crouching_weight_layer: String,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            enable_sounds: true,
            sound_volume: 1.0,
            landing_sound_cooldown: 1.0,
            override_footsteps: false,
            walk_clips: Vec::new(),
            jump_clip: String::new(),
            landing_clip: String::new(),
            walking_parameter: String::new(),
            sprinting_parameter: String::new(),
            crouching_parameter: String::new(),
            grounded_parameter: String::new(),
            relative_speed_parameter: String::new(),
            crouching_weight_layer: String::new(),
        }
    }
}

/// Everything dispatch reads from the controller for one variable tick.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackFrame {
    pub grounded: bool,
    /// Grounded, unlocked and moving past the bob threshold: the same
    /// condition that advances the bob phase.
    pub walking: bool,
    pub sprinting: bool,
    pub crouching: bool,
    /// Crouch transition in [0, 1].
    pub crouch_blend: f32,
    /// Motion intent magnitude, for the walking animation flag.
    pub motion_magnitude: f32,
    /// Current top speed over walk speed.
    pub relative_speed: f32,
    /// View-bob phase in radians.
    pub walk_phase: f32,
    /// A jump impulse fired since the last dispatch.
    pub jumped: bool,
    /// Hard landing this tick (already slide-suppressed), fall speed m/s.
    pub hard_landing: bool,
}

/// Stateful audio/animation dispatcher.
#[derive(Debug, Clone, Default)]
pub struct FeedbackDispatch {
    /// Footstep latch: one step per trough crossing.
    stepped: bool,
    /// Landing debounce; counts down only while airborne.
    landing_timer: f32,
}

impl FeedbackDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one variable tick of feedback.
    pub fn tick(
        &mut self,
        frame: &FeedbackFrame,
        config: &FeedbackConfig,
        dt: f32,
        audio: Option<&mut dyn AudioSink>,
        animation: Option<&mut dyn AnimationSink>,
    ) {
        // Landing debounce: pinned while grounded, drains while airborne,
        // so only a real fall re-arms the landing sound.
        if self.landing_timer > 0.0 {
            if !frame.grounded {
                self.landing_timer -= dt;
            } else {
                self.landing_timer = config.landing_sound_cooldown;
            }
        }

        if let Some(audio) = audio {
            self.play_sounds(frame, config, audio);
        }

        if let Some(animation) = animation {
            Self::mirror_animation(frame, config, animation);
        }
    }

    fn play_sounds(
        &mut self,
        frame: &FeedbackFrame,
        config: &FeedbackConfig,
        audio: &mut dyn AudioSink,
    ) {
        if !config.enable_sounds {
            return;
        }

        if frame.jumped && !config.jump_clip.is_empty() {
            audio.play(&config.jump_clip, config.sound_volume);
        }

        if frame.hard_landing && self.landing_timer <= 0.0 && !config.landing_clip.is_empty() {
            audio.play(&config.landing_clip, config.sound_volume);
            self.landing_timer = config.landing_sound_cooldown;
        }

        // Footsteps on the trough of the bob cycle, one per crossing.
        if !config.override_footsteps && frame.walking {
            if frame.walk_phase.sin() < FOOTSTEP_TROUGH {
                if !self.stepped && !config.walk_clips.is_empty() {
                    let index = rand::thread_rng().gen_range(0..config.walk_clips.len());
                    audio.play(&config.walk_clips[index], config.sound_volume);
                    self.stepped = true;
                }
            } else {
                self.stepped = false;
            }
        }
    }

    fn mirror_animation(
        frame: &FeedbackFrame,
        config: &FeedbackConfig,
        animation: &mut dyn AnimationSink,
    ) {
        if !config.crouching_weight_layer.is_empty() {
            animation.set_layer_weight(&config.crouching_weight_layer, frame.crouch_blend);
        }
        if !config.walking_parameter.is_empty() {
            animation.set_bool(
                &config.walking_parameter,
                frame.motion_magnitude > ANIMATION_WALKING_THRESHOLD,
            );
        }
        if !config.sprinting_parameter.is_empty() {
            animation.set_bool(&config.sprinting_parameter, frame.sprinting);
        }
        if !config.crouching_parameter.is_empty() {
            animation.set_bool(&config.crouching_parameter, frame.crouching);
        }
        if !config.grounded_parameter.is_empty() {
            animation.set_bool(&config.grounded_parameter, frame.grounded);
        }
        if !config.relative_speed_parameter.is_empty() {
            animation.set_float(&config.relative_speed_parameter, frame.relative_speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingAudio {
        played: Vec<(String, f32)>,
    }

    impl AudioSink for RecordingAudio {
        fn play(&mut self, clip: &str, volume: f32) {
            self.played.push((clip.to_string(), volume));
        }
    }

    #[derive(Default)]
    struct RecordingAnimator {
        bools: Vec<(String, bool)>,
        floats: Vec<(String, f32)>,
        weights: Vec<(String, f32)>,
    }

    impl AnimationSink for RecordingAnimator {
        fn set_bool(&mut self, name: &str, value: bool) {
            self.bools.push((name.to_string(), value));
        }
        fn set_float(&mut self, name: &str, value: f32) {
            self.floats.push((name.to_string(), value));
        }
        fn set_layer_weight(&mut self, layer: &str, weight: f32) {
            self.weights.push((layer.to_string(), weight));
        }
    }

    const DT: f32 = 1.0 / 60.0;

    fn walking_frame(phase: f32) -> FeedbackFrame {
        FeedbackFrame {
            grounded: true,
            walking: true,
            sprinting: false,
            crouching: false,
            crouch_blend: 0.0,
            motion_magnitude: 1.0,
            relative_speed: 1.0,
            walk_phase: phase,
            jumped: false,
            hard_landing: false,
        }
    }

    fn step_config() -> FeedbackConfig {
        FeedbackConfig {
            walk_clips: vec!["step_a".into(), "step_b".into()],
            jump_clip: "jump".into(),
            landing_clip: "land".into(),
            ..FeedbackConfig::default()
        }
    }

    #[test]
    fn test_footstep_fires_once_per_trough() {
        let config = step_config();
        let mut dispatch = FeedbackDispatch::new();
        let mut audio = RecordingAudio::default();

        // Sweep one full bob cycle; exactly one step at the trough.
        let steps = 200;
        for i in 0..steps {
            let phase = i as f32 / steps as f32 * std::f32::consts::TAU;
            dispatch.tick(&walking_frame(phase), &config, DT, Some(&mut audio), None);
        }
        assert_eq!(audio.played.len(), 1, "played {:?}", audio.played);
        assert!(audio.played[0].0.starts_with("step_"));
    }

    #[test]
    fn test_footstep_retriggers_next_cycle() {
        let config = step_config();
        let mut dispatch = FeedbackDispatch::new();
        let mut audio = RecordingAudio::default();

        for cycle in 0..3 {
            for i in 0..100 {
                let phase =
                    (cycle * 100 + i) as f32 / 100.0 * std::f32::consts::TAU;
                dispatch.tick(&walking_frame(phase), &config, DT, Some(&mut audio), None);
            }
        }
        assert_eq!(audio.played.len(), 3);
    }

    #[test]
    fn test_no_footsteps_when_overridden_or_not_walking() {
        let mut config = step_config();
        config.override_footsteps = true;
        let mut dispatch = FeedbackDispatch::new();
        let mut audio = RecordingAudio::default();

        let trough = -std::f32::consts::FRAC_PI_2;
        dispatch.tick(&walking_frame(trough), &config, DT, Some(&mut audio), None);
        assert!(audio.played.is_empty());

        let config = step_config();
        let mut frame = walking_frame(trough);
        frame.walking = false;
        dispatch.tick(&frame, &config, DT, Some(&mut audio), None);
        assert!(audio.played.is_empty());
    }

    #[test]
    fn test_landing_sound_debounced() {
        let config = step_config();
        let mut dispatch = FeedbackDispatch::new();
        let mut audio = RecordingAudio::default();

        let mut frame = walking_frame(0.0);
        frame.walking = false;
        frame.hard_landing = true;
        dispatch.tick(&frame, &config, DT, Some(&mut audio), None);
        assert_eq!(audio.played.len(), 1);

        // A second landing immediately after is inside the cooldown.
        dispatch.tick(&frame, &config, DT, Some(&mut audio), None);
        assert_eq!(audio.played.len(), 1);

        // Staying grounded keeps the debounce pinned forever.
        frame.hard_landing = false;
        for _ in 0..200 {
            dispatch.tick(&frame, &config, DT, Some(&mut audio), None);
        }
        frame.hard_landing = true;
        dispatch.tick(&frame, &config, DT, Some(&mut audio), None);
        assert_eq!(audio.played.len(), 1);

        // A real fall (airborne past the cooldown) re-arms it.
        frame.hard_landing = false;
        frame.grounded = false;
        for _ in 0..70 {
            dispatch.tick(&frame, &config, DT, Some(&mut audio), None);
        }
        frame.grounded = true;
        frame.hard_landing = true;
        dispatch.tick(&frame, &config, DT, Some(&mut audio), None);
        assert_eq!(audio.played.len(), 2);
    }

    #[test]
    fn test_jump_sound_plays() {
        let config = step_config();
        let mut dispatch = FeedbackDispatch::new();
        let mut audio = RecordingAudio::default();

        let mut frame = walking_frame(0.0);
        frame.jumped = true;
        dispatch.tick(&frame, &config, DT, Some(&mut audio), None);
        assert_eq!(audio.played, vec![("jump".to_string(), 1.0)]);
    }

    #[test]
    fn test_sounds_disabled_globally() {
        let mut config = step_config();
        config.enable_sounds = false;
        let mut dispatch = FeedbackDispatch::new();
        let mut audio = RecordingAudio::default();

        let mut frame = walking_frame(-std::f32::consts::FRAC_PI_2);
        frame.jumped = true;
        frame.hard_landing = true;
        dispatch.tick(&frame, &config, DT, Some(&mut audio), None);
        assert!(audio.played.is_empty());
    }

    #[test]
    fn test_animation_mirroring_respects_empty_names() {
        let config = FeedbackConfig {
            walking_parameter: "Walking".into(),
            relative_speed_parameter: "RelativeSpeed".into(),
            crouching_weight_layer: "CrouchLayer".into(),
            // sprinting/crouching/grounded slots left empty: no calls.
            ..FeedbackConfig::default()
        };
        let mut dispatch = FeedbackDispatch::new();
        let mut animator = RecordingAnimator::default();

        let mut frame = walking_frame(0.0);
        frame.relative_speed = 1.6;
        frame.crouch_blend = 0.5;
        dispatch.tick(&frame, &config, DT, None, Some(&mut animator));

        assert_eq!(animator.bools, vec![("Walking".to_string(), true)]);
        assert_eq!(animator.floats, vec![("RelativeSpeed".to_string(), 1.6)]);
        assert_eq!(animator.weights, vec![("CrouchLayer".to_string(), 0.5)]);
    }

    #[test]
    fn test_walking_flag_threshold() {
        let config = FeedbackConfig {
            walking_parameter: "Walking".into(),
            ..FeedbackConfig::default()
        };
        let mut dispatch = FeedbackDispatch::new();
        let mut animator = RecordingAnimator::default();

        let mut frame = walking_frame(0.0);
        frame.motion_magnitude = 0.1;
        dispatch.tick(&frame, &config, DT, None, Some(&mut animator));
        assert_eq!(animator.bools, vec![("Walking".to_string(), false)]);
    }
}
