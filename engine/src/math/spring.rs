//! Two-Stage Spring
//!
//! A critically-damped-feeling spring built from two chained exponential
//! approaches instead of integrating a real mass-spring-damper ODE. A hidden
//! `tracer` chases the goal at `tensor_a`, and the visible `current` chases
//! the tracer at `tensor_b`. The indirection produces the characteristic
//! overshoot-and-settle of a spring while staying unconditionally stable at
//! any timestep.
//!
//! Both tensors are per-frame rates tuned at 60 Hz and are converted with
//! the same formula as [`crate::math::approach`]. When the tracer has
//! collapsed onto both the goal and the current value, `current` snaps to
//! the goal exactly and the spring is at rest: calling `update` on a spring
//! at rest returns the goal unchanged forever.

use std::ops::{Add, Mul, Sub};

use glam::{Vec2, Vec3};

use super::approach::{APPROACH_EPSILON, Approach, effective_rate};

/// Default rate at which the hidden tracer chases the goal.
pub const DEFAULT_TENSOR_A: f32 = 0.4;

/// Default rate at which the current value chases the tracer.
pub const DEFAULT_TENSOR_B: f32 = 0.2;

/// Spring over any approachable vector-like value.
///
/// Use the [`Spring1D`], [`Spring2D`] and [`Spring3D`] aliases in practice.
#[derive(Debug, Clone, Copy)]
pub struct Spring<T> {
    /// Position the spring is pulling toward.
    pub goal: T,
    /// Current spring position; read this after [`Spring::update`].
    pub current: T,
    /// Chase rate of the hidden tracer toward the goal.
    pub tensor_a: f32,
    /// Chase rate of the current value toward the tracer.
    pub tensor_b: f32,
    tracer: T,
}

pub type Spring1D = Spring<f32>;
pub type Spring2D = Spring<Vec2>;
pub type Spring3D = Spring<Vec3>;

impl<T> Spring<T>
where
    T: Approach + Add<T, Output = T> + Sub<T, Output = T> + Mul<f32, Output = T>,
{
    /// Create a spring at `current`, pulling toward `goal`, with default tensors.
    pub fn new(goal: T, current: T) -> Self {
        Self::with_tensors(goal, current, DEFAULT_TENSOR_A, DEFAULT_TENSOR_B)
    }

    /// Create a spring with explicit tensor rates.
    pub fn with_tensors(goal: T, current: T, tensor_a: f32, tensor_b: f32) -> Self {
        Self {
            goal,
            current,
            tracer: current,
            tensor_a,
            tensor_b,
        }
    }

    /// Advance the spring by `dt` seconds and return the new position.
    ///
    /// Pass the unscaled delta when the spring drives presentation (camera,
    /// UI) that should keep settling through pauses and slow-motion.
    pub fn update(&mut self, dt: f32) -> T {
        let rate_a = effective_rate(self.tensor_a, dt);
        let rate_b = effective_rate(self.tensor_b, dt);

        let settled = self.tracer.distance_to(self.goal) + self.tracer.distance_to(self.current)
            < APPROACH_EPSILON;

        if settled {
            self.current = self.goal;
        } else {
            self.tracer = self.tracer + (self.goal - self.current) * rate_a;
            self.current = self.current + (self.tracer - self.current) * rate_b;
        }

        self.current
    }

    /// Re-seat the spring at `value` with no stored momentum.
    pub fn reset(&mut self, value: T) {
        self.goal = value;
        self.current = value;
        self.tracer = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_at_rest_returns_goal_unchanged() {
        let mut spring = Spring1D::new(2.0, 2.0);
        for _ in 0..100 {
            assert_eq!(spring.update(DT), 2.0, "spring drifted at rest");
        }
    }

    #[test]
    fn test_converges_to_goal() {
        let mut spring = Spring1D::new(1.0, 0.0);
        let mut last = 0.0;
        for _ in 0..2000 {
            last = spring.update(DT);
        }
        // Settles within the snap neighborhood of the goal.
        assert!(
            (last - 1.0).abs() < 2e-3,
            "spring failed to settle, ended at {last}"
        );
    }

    #[test]
    fn test_overshoots_before_settling() {
        let mut spring = Spring1D::new(1.0, 0.0);
        let mut max = 0.0_f32;
        for _ in 0..2000 {
            max = max.max(spring.update(DT));
        }
        assert!(max > 1.0, "two-stage chase never overshot (max {max})");
    }

    #[test]
    fn test_vector_spring_settles() {
        let goal = Vec3::new(1.0, -2.0, 0.5);
        let mut spring = Spring3D::new(goal, Vec3::ZERO);
        for _ in 0..3000 {
            spring.update(DT);
        }
        assert!(spring.current.distance(goal) < 2e-3);
    }

    #[test]
    fn test_retarget_mid_flight() {
        let mut spring = Spring1D::new(1.0, 0.0);
        for _ in 0..10 {
            spring.update(DT);
        }
        spring.goal = -1.0;
        for _ in 0..3000 {
            spring.update(DT);
        }
        assert!((spring.current + 1.0).abs() < 2e-3);
    }

    #[test]
    fn test_reset_clears_momentum() {
        let mut spring = Spring2D::new(Vec2::new(5.0, 5.0), Vec2::ZERO);
        for _ in 0..20 {
            spring.update(DT);
        }
        spring.reset(Vec2::ONE);
        assert_eq!(spring.update(DT), Vec2::ONE);
    }
}
