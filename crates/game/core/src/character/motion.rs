//! Positional interpolation owned by a character (dashes, lunges, knockbacks).

use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
pub enum MotionKind {
    Dash,
    Knockback,
}

/// Linear move from `from` to `to` over `duration`.
///
/// While a motion is active it owns the character's position; controls do not
/// move the character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub kind: MotionKind,
    pub from: Point,
    pub to: Point,
    pub duration: f32,
    elapsed: f32,
}

impl Motion {
    pub fn new(kind: MotionKind, from: Point, to: Point, duration: f32) -> Self {
        Self {
            kind,
            from,
            to,
            duration,
            elapsed: 0.0,
        }
    }

    /// Normalized progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advances the interpolation and returns the new position.
    pub fn advance(&mut self, elapsed: f32) -> Point {
        self.elapsed += elapsed.max(0.0);
        self.from.lerp(self.to, self.progress())
    }
}
