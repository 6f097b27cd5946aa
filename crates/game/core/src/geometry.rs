//! Planar geometry helpers in world units.

use core::f32::consts::{PI, TAU};

/// Position in world units.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point reached by travelling `distance` along `angle`.
    pub fn offset(self, angle: f32, distance: f32) -> Self {
        Self {
            x: self.x + angle.cos() * distance,
            y: self.y + angle.sin() * distance,
        }
    }

    pub fn distance(self, other: Self) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle of the vector going from `self` to `other`.
    pub fn angle_to(self, other: Self) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Linear interpolation, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Elliptical containment test centred on `self`.
    ///
    /// Degenerate radii (zero or negative) contain nothing.
    pub fn is_within_radii(self, other: Self, radius_x: f32, radius_y: f32) -> bool {
        if radius_x <= 0.0 || radius_y <= 0.0 {
            return false;
        }
        let dx = (other.x - self.x) / radius_x;
        let dy = (other.y - self.y) / radius_y;
        dx * dx + dy * dy <= 1.0
    }
}

/// Wraps an angle into `(-PI, PI]`.
pub fn normalize_angle(angle: f32) -> f32 {
    let mut wrapped = angle % TAU;
    if wrapped > PI {
        wrapped -= TAU;
    } else if wrapped <= -PI {
        wrapped += TAU;
    }
    wrapped
}

/// `1.0` or `-1.0`, with zero mapped to `1.0`.
pub fn facing_sign(value: f32) -> f32 {
    if value < 0.0 { -1.0 } else { 1.0 }
}
