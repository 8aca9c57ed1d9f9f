//! Math Utilities
//!
//! Numeric primitives shared by the movement engine, camera rig and
//! feedback systems: closed-form easing curves, the frame-rate-independent
//! exponential approach, a two-stage spring, bezier evaluation and noise
//! remapping helpers.
//!
//! The one function to know is [`approach`]: almost every smoothed quantity
//! in the crate is driven by it.

pub mod approach;
pub mod bezier;
pub mod curves;
pub mod noise;
pub mod spring;

pub use approach::{APPROACH_EPSILON, Approach, approach, approach_eps, effective_rate};
pub use bezier::{CurvePoint, compute_bezier};
pub use curves::{
    SPRING_EXP, curve_down, curve_up, sigmoid_down, sigmoid_up, smooth_down, smooth_up,
    spring_down, spring_up,
};
pub use noise::{centered, centered2, centered3, random_vec2, random_vec3};
pub use spring::{DEFAULT_TENSOR_A, DEFAULT_TENSOR_B, Spring, Spring1D, Spring2D, Spring3D};
