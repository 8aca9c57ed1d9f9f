//! Noise Remapping and Random Vectors
//!
//! Small helpers for turning `[0, 1]` noise samples into centered `[-1, 1]`
//! offsets (camera shake, procedural sway) and for generating random
//! vectors. The noise source itself is supplied by the caller as a sampler
//! closure; this crate does not own a noise implementation.

use glam::{Vec2, Vec3};
use rand::Rng;

/// Remap a `[0, 1]` noise sample to `[-1, 1]`.
#[inline]
pub fn centered(sample: f32) -> f32 {
    (sample - 0.5) * 2.0
}

/// Build a centered 2D offset from a sampler, decorrelating the axes by
/// shifting the second sample by `offset`.
pub fn centered2<F: Fn(f32, f32) -> f32>(sampler: F, x: f32, y: f32, offset: f32) -> Vec2 {
    Vec2::new(
        centered(sampler(x, y)),
        centered(sampler(x + offset, y + offset)),
    )
}

/// Build a centered 3D offset from a sampler with per-axis decorrelation.
pub fn centered3<F: Fn(f32, f32) -> f32>(sampler: F, x: f32, y: f32, offset: f32) -> Vec3 {
    Vec3::new(
        centered(sampler(x, y)),
        centered(sampler(x + offset, y + offset)),
        centered(sampler(x + offset * 2.0, y + offset * 2.0)),
    )
}

/// Random vector with each component uniform in `[minimum, maximum)`.
pub fn random_vec2(minimum: f32, maximum: f32) -> Vec2 {
    let mut rng = rand::thread_rng();
    Vec2::new(
        rng.gen_range(minimum..maximum),
        rng.gen_range(minimum..maximum),
    )
}

/// Random vector with each component uniform in `[minimum, maximum)`.
pub fn random_vec3(minimum: f32, maximum: f32) -> Vec3 {
    let mut rng = rand::thread_rng();
    Vec3::new(
        rng.gen_range(minimum..maximum),
        rng.gen_range(minimum..maximum),
        rng.gen_range(minimum..maximum),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_range() {
        assert_eq!(centered(0.0), -1.0);
        assert_eq!(centered(0.5), 0.0);
        assert_eq!(centered(1.0), 1.0);
    }

    #[test]
    fn test_centered2_uses_offset_for_second_axis() {
        // Sampler that returns x directly: axes must differ by the offset.
        let v = centered2(|x, _| x, 0.25, 0.0, 0.25);
        assert!((v.x - centered(0.25)).abs() < 1e-6);
        assert!((v.y - centered(0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_random_vectors_stay_in_range() {
        for _ in 0..50 {
            let v2 = random_vec2(-3.0, 3.0);
            assert!(v2.x >= -3.0 && v2.x < 3.0);
            assert!(v2.y >= -3.0 && v2.y < 3.0);

            let v3 = random_vec3(0.0, 1.0);
            assert!(v3.min_element() >= 0.0);
            assert!(v3.max_element() < 1.0);
        }
    }
}
