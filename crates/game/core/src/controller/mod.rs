//! Drivers of a character's controls.
//!
//! Exactly one [`Controller`] drives a character at a time. The world hands
//! it a [`ControlContext`] snapshot each tick; the controller rewrites the
//! `controls` field and the world copies it back. Swapping controllers at
//! runtime replaces the owned box, cancelling the previous driver first.

mod input;

pub use input::{InputController, InputHandle};

use crate::character::{Character, Controls, EntityId};
use crate::geometry::Point;
use crate::state_machine::StateFlags;

/// What a controller may observe about its character, plus the one field it
/// may write.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlContext {
    pub me: EntityId,
    pub position: Point,
    /// Position of the nearest living opponent, if any.
    pub target: Option<Point>,
    pub flags: StateFlags,
    /// Speed multiplier of the current state.
    pub speed_ratio: f32,
    pub strike_radius_x: f32,
    pub strike_radius_y: f32,
    pub controls: Controls,
}

impl ControlContext {
    pub(crate) fn observe(character: &Character, target: Option<Point>) -> Self {
        let stats = character.stats();
        Self {
            me: character.id(),
            position: character.position(),
            target,
            flags: character.flags(),
            speed_ratio: character.state_machine().speed_ratio(),
            strike_radius_x: stats.strike_radius_x,
            strike_radius_y: stats.strike_radius_y,
            controls: *character.controls(),
        }
    }

    pub fn is_shielded(&self) -> bool {
        self.flags.contains(StateFlags::SHIELDED)
    }

    pub fn is_perfect_parry(&self) -> bool {
        self.flags.contains(StateFlags::PERFECT_PARRY)
    }

    pub fn is_exhausted(&self) -> bool {
        self.flags.contains(StateFlags::EXHAUSTED)
    }
}

/// Something that writes a character's controls once per tick.
pub trait Controller {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn cycle(&mut self, ctx: &mut ControlContext, elapsed: f32);

    /// Tears down anything the controller holds. Must be idempotent.
    fn cancel(&mut self, _ctx: &mut ControlContext) {}
}
