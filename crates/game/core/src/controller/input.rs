use std::cell::Cell;
use std::rc::Rc;

use super::{ControlContext, Controller};
use crate::character::Controls;

/// Write side of a human-input controller.
///
/// The input layer keeps a clone and overwrites the controls whenever the
/// device state changes; the controller copies them in on every tick.
#[derive(Clone, Debug, Default)]
pub struct InputHandle(Rc<Cell<Controls>>);

impl InputHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, controls: Controls) {
        self.0.set(controls);
    }

    pub fn update(&self, f: impl FnOnce(&mut Controls)) {
        let mut controls = self.0.get();
        f(&mut controls);
        self.0.set(controls);
    }

    pub fn get(&self) -> Controls {
        self.0.get()
    }
}

#[derive(Debug)]
pub struct InputController {
    input: InputHandle,
}

impl InputController {
    pub fn new(input: InputHandle) -> Self {
        Self { input }
    }

    pub fn handle(&self) -> &InputHandle {
        &self.input
    }
}

impl Controller for InputController {
    fn name(&self) -> &'static str {
        "input"
    }

    fn cycle(&mut self, ctx: &mut ControlContext, _elapsed: f32) {
        let previous = ctx.controls.aim;
        ctx.controls = self.input.get().sanitized(previous);
    }

    fn cancel(&mut self, ctx: &mut ControlContext) {
        ctx.controls = Controls::idle(ctx.controls.aim);
    }
}
