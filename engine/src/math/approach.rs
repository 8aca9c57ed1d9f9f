//! Frame-Rate-Independent Exponential Approach
//!
//! The workhorse smoothing primitive of the crate: nearly every blended
//! quantity (velocity shaping, camera tilt, zoom, view-bob settling) runs
//! through [`approach`].
//!
//! A per-frame rate `r` tuned at 60 Hz is converted into a rate valid for an
//! arbitrary timestep with `1 - (1 - r)^(dt * 60)`, then the value steps
//! linearly toward its goal by that fraction. Once the remaining distance
//! drops to [`APPROACH_EPSILON`] the value snaps exactly onto the goal and
//! stays there, so chained smoothing never leaves sub-visible residue.
//!
//! Whether the step uses scaled or unscaled time is the caller's choice:
//! pass whichever delta you want. Camera smoothing typically runs on the
//! unscaled clock so pauses and slow-motion do not freeze the view;
//! gameplay smoothing runs on the scaled clock.

use glam::{Vec2, Vec3, Vec4};

/// Distance below which an approached value snaps exactly onto its goal.
pub const APPROACH_EPSILON: f32 = 1e-3;

/// Types that can be stepped toward a goal by the approach formula.
///
/// `distance_to` supplies the metric used for the snap check: absolute
/// difference for scalars, Euclidean distance for vectors, and mean summed
/// channel distance for color-like `Vec4` values.
pub trait Approach: Copy {
    fn distance_to(self, other: Self) -> f32;
    fn step_toward(self, goal: Self, fraction: f32) -> Self;
}

impl Approach for f32 {
    fn distance_to(self, other: Self) -> f32 {
        (self - other).abs()
    }

    fn step_toward(self, goal: Self, fraction: f32) -> Self {
        self + (goal - self) * fraction
    }
}

impl Approach for Vec2 {
    fn distance_to(self, other: Self) -> f32 {
        self.distance(other)
    }

    fn step_toward(self, goal: Self, fraction: f32) -> Self {
        self + (goal - self) * fraction
    }
}

impl Approach for Vec3 {
    fn distance_to(self, other: Self) -> f32 {
        self.distance(other)
    }

    fn step_toward(self, goal: Self, fraction: f32) -> Self {
        self + (goal - self) * fraction
    }
}

impl Approach for Vec4 {
    // Channel-summed metric: treats the vector as an RGBA color.
    fn distance_to(self, other: Self) -> f32 {
        let d = (other - self).abs();
        (d.x + d.y + d.z + d.w) * 0.25
    }

    fn step_toward(self, goal: Self, fraction: f32) -> Self {
        self + (goal - self) * fraction
    }
}

/// Convert a per-frame rate tuned at 60 Hz into one valid for `dt` seconds.
#[inline]
pub fn effective_rate(rate: f32, dt: f32) -> f32 {
    1.0 - (1.0 - rate).powf(dt * 60.0)
}

/// Step `current` toward `goal`, snapping within [`APPROACH_EPSILON`].
///
/// With `current == goal` this returns `goal` exactly, and keeps returning
/// it on every subsequent call (idempotent once snapped). For `0 < rate < 1`
/// the remaining distance strictly decreases each call until the snap.
pub fn approach<T: Approach>(current: T, goal: T, rate: f32, dt: f32) -> T {
    approach_eps(current, goal, rate, dt, APPROACH_EPSILON)
}

/// [`approach`] with an explicit snap distance.
///
/// The movement engine uses a coarser snap than the default so velocity
/// settles to its target without a long sub-perceptible tail.
pub fn approach_eps<T: Approach>(current: T, goal: T, rate: f32, dt: f32, epsilon: f32) -> T {
    if current.distance_to(goal) > epsilon {
        current.step_toward(goal, effective_rate(rate, dt))
    } else {
        goal
    }
}
