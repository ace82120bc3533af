//! 2D vector operations
//!
//! `glam::Vec2` is the value type. Operators cover add/subtract/scale; this
//! trait adds the remaining named operations. Every method is pure and
//! returns a new value.

use glam::Vec2;

/// World-space vector
pub type Vector = Vec2;

/// Named vector operations used throughout the simulation
pub trait VectorExt: Sized {
    /// Divide by a scalar. Division by zero logs and returns `self` unchanged.
    fn safe_div(self, scalar: f32) -> Self;
    /// Unit vector in the same direction, or zero for a zero-length vector
    fn normalized(self) -> Self;
    /// Rotate counter-clockwise by `angle` radians
    fn rotated(self, angle: f32) -> Self;
    /// Angle from the +x axis, in radians
    fn heading(self) -> f32;
    fn distance_to(self, other: Self) -> f32;
    fn distance_squared_to(self, other: Self) -> f32;
}

impl VectorExt for Vec2 {
    #[inline]
    fn safe_div(self, scalar: f32) -> Self {
        if scalar == 0.0 {
            log::error!("cannot divide vector {self} by zero");
            return self;
        }
        self / scalar
    }

    #[inline]
    fn normalized(self) -> Self {
        self.normalize_or_zero()
    }

    #[inline]
    fn rotated(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    #[inline]
    fn heading(self) -> f32 {
        self.y.atan2(self.x)
    }

    #[inline]
    fn distance_to(self, other: Self) -> f32 {
        self.distance(other)
    }

    #[inline]
    fn distance_squared_to(self, other: Self) -> f32 {
        self.distance_squared(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn zero_vector_normalizes_to_zero() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
    }

    #[test]
    fn divide_by_zero_returns_unchanged() {
        let v = Vec2::new(3.0, -4.0);
        assert_eq!(v.safe_div(0.0), v);
        assert_eq!(v.safe_div(2.0), Vec2::new(1.5, -2.0));
    }

    #[test]
    fn rotate_quarter_turn() {
        let v = Vec2::new(1.0, 0.0).rotated(FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn heading_and_distance() {
        assert!((Vec2::new(0.0, 2.0).heading() - FRAC_PI_2).abs() < 1e-6);
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-6);
        assert!((a.distance_squared_to(b) - 25.0).abs() < 1e-6);
    }

    #[test]
    fn lerp_midpoint() {
        let m = Vec2::new(0.0, 0.0).lerp(Vec2::new(10.0, -10.0), 0.5);
        assert_eq!(m, Vec2::new(5.0, -5.0));
    }
}
