//! Camera Module
//!
//! The coupled camera rig: first-person pitch/yaw with tilt, view-bob and
//! landing dip, third-person orbit with occlusion avoidance, and the
//! additive zoom/FOV pipeline shared by both. Window-system agnostic —
//! the rig only manages camera state and transforms.

pub mod config;
pub mod first_person;
pub mod rig;
pub mod third_person;

pub use config::{CameraConfig, CameraMode};
pub use rig::{CameraFrame, CameraRig};
