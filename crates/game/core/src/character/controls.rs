//! The intent vector a controller writes and the simulation reads.

use crate::geometry::Point;

/// A character's current intents.
///
/// Exactly one driver (human input or the AI scheduler) writes these per
/// character; the state machine and strike resolution only read them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Controls {
    /// Movement force in `[0, 1]`.
    pub force: f32,
    /// Movement direction in radians.
    pub angle: f32,
    /// World point the character aims at (drives facing and strike direction).
    pub aim: Point,
    /// Held while charging a strike; the strike fires on release.
    pub attack: bool,
    /// Held while blocking.
    pub shield: bool,
    /// Pressed to dash; must be released before the next dash.
    pub dash: bool,
}

impl Controls {
    /// Standing still, aiming at `aim`.
    pub fn idle(aim: Point) -> Self {
        Self {
            aim,
            ..Self::default()
        }
    }

    /// Returns a copy with force clamped to `[0, 1]`, a non-finite angle
    /// zeroed and a non-finite aim replaced by `fallback_aim`.
    pub fn sanitized(self, fallback_aim: Point) -> Self {
        let force = if self.force.is_nan() { 0.0 } else { self.force.clamp(0.0, 1.0) };
        let angle = if self.angle.is_finite() { self.angle } else { 0.0 };
        let aim = if self.aim.is_finite() { self.aim } else { fallback_aim };
        Self {
            force,
            angle,
            aim,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_clamps_force_and_angle() {
        let controls = Controls {
            force: 3.0,
            angle: f32::NAN,
            ..Controls::default()
        }
        .sanitized(Point::ORIGIN);
        assert_eq!(controls.force, 1.0);
        assert_eq!(controls.angle, 0.0);

        let controls = Controls {
            force: f32::NAN,
            ..Controls::default()
        }
        .sanitized(Point::ORIGIN);
        assert_eq!(controls.force, 0.0);
    }

    #[test]
    fn non_finite_aim_falls_back() {
        let previous = Point::new(10.0, -4.0);
        let controls = Controls::idle(Point::new(f32::NAN, 3.0)).sanitized(previous);
        assert_eq!(controls.aim, previous);

        let controls = Controls::idle(Point::new(1.0, f32::INFINITY)).sanitized(previous);
        assert_eq!(controls.aim, previous);

        let aim = Point::new(1.0, 2.0);
        assert_eq!(Controls::idle(aim).sanitized(previous).aim, aim);
    }
}
