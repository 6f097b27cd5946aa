use super::{AiContext, Task};
use crate::aggression::TrackerHandle;
use crate::controller::{ControlContext, Controller};

/// Runs a task tree once per tick and aims at the nearest opponent.
pub struct AiController {
    root: Task,
    tracker: TrackerHandle,
    started: bool,
}

impl AiController {
    pub fn new(root: Task, tracker: TrackerHandle) -> Self {
        Self {
            root,
            tracker,
            started: false,
        }
    }
}

impl Controller for AiController {
    fn name(&self) -> &'static str {
        "ai"
    }

    fn cycle(&mut self, ctx: &mut ControlContext, elapsed: f32) {
        if let Some(target) = ctx.target {
            ctx.controls.aim = target;
        }

        let mut ai = AiContext::new(*ctx, self.tracker.clone());
        if !self.started {
            self.root.start(&mut ai);
            self.started = true;
        }
        let status = self.root.tick(&mut ai, elapsed);
        if status.is_done() {
            tracing::debug!(entity = %ctx.me, ?status, "task tree finished");
        }
        ctx.controls = ai.view.controls;
    }

    fn cancel(&mut self, ctx: &mut ControlContext) {
        let mut ai = AiContext::new(*ctx, self.tracker.clone());
        self.root.cancel(&mut ai);
        self.started = false;
        ctx.controls = ai.view.controls;
    }
}
