use crate::aggression::TrackerHandle;
use crate::character::{Controls, EntityId};
use crate::controller::ControlContext;
use crate::geometry::Point;

/// Everything an AI task can see and touch during one tick.
///
/// The context is rebuilt by the controller before every tick, so tasks must
/// keep their own progress in their own fields.
#[derive(Debug)]
pub struct AiContext {
    pub view: ControlContext,
    pub tracker: TrackerHandle,
}

impl AiContext {
    pub fn new(view: ControlContext, tracker: TrackerHandle) -> Self {
        Self { view, tracker }
    }

    pub fn me(&self) -> EntityId {
        self.view.me
    }

    pub fn position(&self) -> Point {
        self.view.position
    }

    pub fn target(&self) -> Option<Point> {
        self.view.target
    }

    pub fn controls(&mut self) -> &mut Controls {
        &mut self.view.controls
    }
}
