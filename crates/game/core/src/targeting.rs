//! Strikability scoring and victim selection.
//!
//! A candidate's score combines how well it lines up with the attacker's aim
//! and how deep it sits inside an elliptical reach. Scores live in `[0, 1]`;
//! zero means "not a valid target".
//!
//! # Formula
//!
//! ```text
//! angular  = 1 - |normalize(aim_angle - candidate_angle)| / (fov / 2)
//! scaled   = hypot(dx, dy * radius_x / radius_y)
//! distance = 1 - scaled / radius_x
//! score    = (angular + distance) / 2   if both components >= 0
//!          = 0                          otherwise
//! ```

use crate::character::EntityId;
use crate::geometry::{Point, normalize_angle};

/// Elliptical reach with a field of view, e.g. a melee strike or a lunge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrikeZone {
    pub radius_x: f32,
    pub radius_y: f32,
    pub fov: f32,
}

impl StrikeZone {
    pub const fn new(radius_x: f32, radius_y: f32, fov: f32) -> Self {
        Self {
            radius_x,
            radius_y,
            fov,
        }
    }

    /// A zone with no reach (e.g. a character without a lunge).
    pub fn is_empty(&self) -> bool {
        self.radius_x <= 0.0 || self.radius_y <= 0.0 || self.fov <= 0.0
    }
}

/// Scores how good a strike target `candidate` is for an attacker standing at
/// `origin` and aiming at `aim`.
pub fn strikability(origin: Point, aim: Point, candidate: Point, zone: StrikeZone) -> f32 {
    if zone.is_empty() {
        return 0.0;
    }

    let angle = origin.angle_to(candidate);
    let aim_angle = origin.angle_to(aim);
    let angular = 1.0 - normalize_angle(aim_angle - angle).abs() / (zone.fov / 2.0);

    // Stretch the vertical axis so the ellipse becomes a circle of radius_x
    let dx = candidate.x - origin.x;
    let dy = (candidate.y - origin.y) * (zone.radius_x / zone.radius_y);
    let proximity = 1.0 - dx.hypot(dy) / zone.radius_x;

    if angular < 0.0 || proximity < 0.0 {
        return 0.0;
    }
    (angular + proximity) / 2.0
}

/// Picks the best-scoring candidate with a strictly positive score.
///
/// Ties resolve to the candidate yielded first, so a fixed iteration order
/// gives a reproducible choice.
pub fn select_target<I>(origin: Point, aim: Point, candidates: I, zone: StrikeZone) -> Option<(EntityId, f32)>
where
    I: IntoIterator<Item = (EntityId, Point)>,
{
    candidates
        .into_iter()
        .map(|(id, position)| (id, strikability(origin, aim, position, zone)))
        .filter(|(_, score)| *score > 0.0)
        .fold(None, |best, (id, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((id, score)),
        })
}

#[cfg(test)]
mod tests {
    use core::f32::consts::PI;

    use super::*;

    const MELEE: StrikeZone = StrikeZone::new(80.0, 40.0, PI);

    #[test]
    fn target_behind_aim_scores_zero() {
        let origin = Point::ORIGIN;
        let aim = Point::new(100.0, 0.0);
        // Exactly behind: angular difference PI > fov / 2
        assert_eq!(strikability(origin, aim, Point::new(-10.0, 0.0), MELEE), 0.0);
        // Slightly past the cone edge
        let outside = Point::ORIGIN.offset(PI / 2.0 + 0.05, 10.0);
        assert_eq!(strikability(origin, aim, outside, MELEE), 0.0);
    }

    #[test]
    fn score_strictly_decreases_with_distance_inside_cone() {
        let origin = Point::ORIGIN;
        let aim = Point::new(100.0, 0.0);
        let mut previous = f32::INFINITY;
        for step in 1..8 {
            let score = strikability(origin, aim, Point::new(step as f32 * 10.0, 0.0), MELEE);
            assert!(score > 0.0);
            assert!(score < previous);
            previous = score;
        }
        assert_eq!(strikability(origin, aim, Point::new(81.0, 0.0), MELEE), 0.0);
    }

    #[test]
    fn vertical_reach_is_scaled_by_ellipse() {
        let origin = Point::ORIGIN;
        let aim = Point::new(0.0, 100.0);
        // 30 units down is 60 scaled units: inside
        assert!(strikability(origin, aim, Point::new(0.0, 30.0), MELEE) > 0.0);
        // 45 units down is 90 scaled units: outside
        assert_eq!(strikability(origin, aim, Point::new(0.0, 45.0), MELEE), 0.0);
    }

    #[test]
    fn empty_zone_never_targets() {
        let zone = StrikeZone::new(0.0, 0.0, PI);
        assert_eq!(strikability(Point::ORIGIN, Point::new(1.0, 0.0), Point::new(1.0, 0.0), zone), 0.0);
    }

    #[test]
    fn selection_prefers_best_score_and_first_on_ties() {
        let origin = Point::ORIGIN;
        let aim = Point::new(100.0, 0.0);
        let candidates = vec![
            (EntityId(1), Point::new(60.0, 0.0)),
            (EntityId(2), Point::new(20.0, 0.0)),
            (EntityId(3), Point::new(20.0, 0.0)),
            (EntityId(4), Point::new(-20.0, 0.0)),
        ];
        let (id, score) = select_target(origin, aim, candidates, MELEE).unwrap();
        assert_eq!(id, EntityId(2));
        assert!(score > 0.0);
    }

    #[test]
    fn selection_without_valid_candidates_is_none() {
        let origin = Point::ORIGIN;
        let aim = Point::new(100.0, 0.0);
        let candidates = vec![(EntityId(1), Point::new(-30.0, 0.0))];
        assert_eq!(select_target(origin, aim, candidates, MELEE), None);
    }
}
