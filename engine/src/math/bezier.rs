//! Bezier Evaluation
//!
//! De Casteljau evaluation over an arbitrary number of control points.
//! Degenerates gracefully: two points reduce to plain linear interpolation,
//! fewer than two yield the zero value.

use glam::{Vec2, Vec3};

/// Values that can be linearly interpolated for curve evaluation.
pub trait CurvePoint: Copy + Default {
    fn lerp_to(self, other: Self, t: f32) -> Self;
}

impl CurvePoint for f32 {
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl CurvePoint for Vec2 {
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }
}

impl CurvePoint for Vec3 {
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }
}

/// Sample a bezier curve defined by `points` at parameter `t`.
///
/// Repeatedly lerps adjacent control-point pairs until two remain, then
/// lerps those. `t` is not clamped; values outside `[0, 1]` extrapolate,
/// matching plain lerp behavior for the two-point case.
pub fn compute_bezier<T: CurvePoint>(t: f32, points: &[T]) -> T {
    match points.len() {
        0 | 1 => T::default(),
        2 => points[0].lerp_to(points[1], t),
        _ => {
            let mut coords: Vec<T> = points.to_vec();
            while coords.len() > 2 {
                for i in 0..coords.len() - 1 {
                    coords[i] = coords[i].lerp_to(coords[i + 1], t);
                }
                coords.pop();
            }
            coords[0].lerp_to(coords[1], t)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-5
    }

    #[test]
    fn test_two_points_is_lerp() {
        let p0 = Vec3::new(1.0, 0.0, 0.0);
        let p1 = Vec3::new(3.0, 4.0, -2.0);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            let expected = p0 + (p1 - p0) * t;
            assert!(approx_eq(compute_bezier(t, &[p0, p1]), expected));
        }
    }

    #[test]
    fn test_degenerate_inputs_yield_zero() {
        assert_eq!(compute_bezier::<Vec3>(0.5, &[]), Vec3::ZERO);
        assert_eq!(compute_bezier(0.5, &[Vec3::new(9.0, 9.0, 9.0)]), Vec3::ZERO);
    }

    #[test]
    fn test_quadratic_endpoints_and_midpoint() {
        let pts = [
            Vec3::ZERO,
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ];
        assert!(approx_eq(compute_bezier(0.0, &pts), pts[0]));
        assert!(approx_eq(compute_bezier(1.0, &pts), pts[2]));
        // Quadratic midpoint: 0.25*P0 + 0.5*P1 + 0.25*P2.
        let mid = pts[0] * 0.25 + pts[1] * 0.5 + pts[2] * 0.25;
        assert!(approx_eq(compute_bezier(0.5, &pts), mid));
    }

    #[test]
    fn test_cubic_stays_in_convex_hull() {
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
        ];
        for i in 0..=20 {
            let p = compute_bezier(i as f32 / 20.0, &pts);
            assert!((0.0..=1.0).contains(&p.x));
            assert!((0.0..=1.0).contains(&p.y));
        }
    }

    #[test]
    fn test_scalar_curve() {
        let v = compute_bezier(0.5, &[0.0_f32, 10.0]);
        assert!((v - 5.0).abs() < 1e-6);
    }
}
