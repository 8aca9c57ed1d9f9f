//! Easing Curves
//!
//! Cheap closed-form easing functions used for one-shot feedback animation
//! (crouch height blending, UI-style settles). All functions are total:
//! inputs outside `[0, 1]` clamp to the boundary value, so callers can feed
//! raw timers without pre-clamping.
//!
//! The `up`/`down` pairs are exact complements: `smooth_up(t) +
//! smooth_down(t) == 1` and `curve_up(t) + curve_down(t) == 1` for every
//! `t`. Code that cross-fades two quantities relies on this.

/// Quadratic ease-in from 0 to 1. Starts slow, ends fast.
pub fn smooth_up(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        t * t
    }
}

/// Complement of [`smooth_up`]: eases from 1 down to 0, fast at the end.
pub fn smooth_down(t: f32) -> f32 {
    1.0 - smooth_up(t)
}

/// Quadratic ease-out from 0 to 1. Starts fast, ends slow.
pub fn curve_up(t: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        1.0 - (1.0 - t) * (1.0 - t)
    }
}

/// Complement of [`curve_up`]: eases from 1 down to 0, slow at the end.
pub fn curve_down(t: f32) -> f32 {
    1.0 - curve_up(t)
}

/// Oscillating settle toward 1: `1 - cos(20t) * (1-t)^exp`.
///
/// Emulates a spring hit without integrating a mass-spring-damper. The
/// higher `exp`, the faster the oscillation dies out. This is a one-shot
/// easing curve; the stateful equivalent is [`crate::math::Spring`].
pub fn spring_up(t: f32, exp: f32) -> f32 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        1.0 - (t * 20.0).cos() * (1.0 - t).powf(exp)
    }
}

/// Mirror of [`spring_up`]: oscillating settle from 1 toward 0.
pub fn spring_down(t: f32, exp: f32) -> f32 {
    1.0 - spring_up(t, exp)
}

/// Default approach exponent for the spring curves.
pub const SPRING_EXP: f32 = 3.0;

/// Logistic S-curve from ~0 at `t = 0` to ~1 at `t = 1`, clamped outside.
pub fn sigmoid_up(t: f32) -> f32 {
    use std::f32::consts::{E, PI};
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        1.0 / (1.0 + E.powf(1.35 * (-4.0 * PI * t + PI * 2.0)))
    }
}

/// Logistic S-curve from ~1 at `t = 0` to ~0 at `t = 1`, clamped outside.
pub fn sigmoid_down(t: f32) -> f32 {
    if t <= 0.0 { 1.0 } else { 1.0 - sigmoid_up(t) }
}
