//! Vector math for the ground plane
//!
//! Everything lives in normalized texture space: (0, 0) is the top-left
//! texel, (1, 1) the bottom-right corner of the map.

use std::ops::{Add, Div, Mul, Sub};

/// 2D point / vector in normalized texture space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians, measured from +X toward +Y)
    pub fn from_angle(angle: f32) -> Self {
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }

    pub fn scale(self, s: f32) -> Vec2 {
        Vec2 {
            x: self.x * s,
            y: self.y * s,
        }
    }

    /// Linear interpolation: `a + (b - a) * t`
    pub fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
        (b - a) * t + a
    }
}

// Measurements used by the geometry checks in tests
#[cfg(test)]
impl Vec2 {
    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product (signed parallelogram area)
    pub fn cross(self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).len()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        self.scale(s)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;
    fn div(self, s: f32) -> Vec2 {
        Vec2 {
            x: self.x / s,
            y: self.y / s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_from_angle() {
        let v = Vec2::from_angle(std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 0.0001);
        assert!((v.y - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_vec2_cross_sign() {
        let a = Vec2::new(1.0, 0.0);
        let b = Vec2::new(0.0, 1.0);
        assert!(a.cross(b) > 0.0);
        assert!(b.cross(a) < 0.0);
    }

    #[test]
    fn test_vec2_lerp() {
        let a = Vec2::new(0.0, 2.0);
        let b = Vec2::new(4.0, 6.0);
        let m = Vec2::lerp(a, b, 0.25);
        assert!((m.x - 1.0).abs() < 0.0001);
        assert!((m.y - 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_vec2_div_by_zero_is_not_finite() {
        let v = Vec2::new(1.0, 0.0) / 0.0;
        assert!(!v.is_finite());
    }
}
