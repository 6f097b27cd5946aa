//! Built-in AI tasks.
//!
//! Every task writes only the controls it is responsible for and undoes them
//! in `cancel`, so any task can lose a race without leaving the character
//! holding a button.

use behavior_tree::{Behavior, Status};

use super::AiContext;

/// Moves toward the nearest opponent until it is inside an ellipse.
///
/// Stays running while there is no opponent to chase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReachPlayer {
    /// `None` uses the character's own strike radii.
    radii: Option<(f32, f32)>,
}

impl ReachPlayer {
    pub fn new(radius_x: f32, radius_y: f32) -> Self {
        Self {
            radii: Some((radius_x, radius_y)),
        }
    }

    /// Close enough to strike.
    pub fn strike_range() -> Self {
        Self { radii: None }
    }

    fn radii(&self, ctx: &AiContext) -> (f32, f32) {
        self.radii
            .unwrap_or((ctx.view.strike_radius_x, ctx.view.strike_radius_y))
    }
}

impl Behavior<AiContext> for ReachPlayer {
    fn tick(&mut self, ctx: &mut AiContext, _elapsed: f32) -> Status {
        let Some(target) = ctx.target() else {
            ctx.controls().force = 0.0;
            return Status::Running;
        };

        let (radius_x, radius_y) = self.radii(ctx);
        let position = ctx.position();
        if position.is_within_radii(target, radius_x, radius_y) {
            ctx.controls().force = 0.0;
            return Status::Success;
        }

        let controls = ctx.controls();
        controls.force = 1.0;
        controls.angle = position.angle_to(target);
        Status::Running
    }

    fn cancel(&mut self, ctx: &mut AiContext) {
        ctx.controls().force = 0.0;
    }
}

/// Moves away from the nearest opponent until outside an ellipse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RetreatAi {
    radius_x: f32,
    radius_y: f32,
}

impl RetreatAi {
    pub fn new(radius_x: f32, radius_y: f32) -> Self {
        Self { radius_x, radius_y }
    }
}

impl Behavior<AiContext> for RetreatAi {
    fn tick(&mut self, ctx: &mut AiContext, _elapsed: f32) -> Status {
        let position = ctx.position();
        let Some(target) = ctx
            .target()
            .filter(|target| position.is_within_radii(*target, self.radius_x, self.radius_y))
        else {
            ctx.controls().force = 0.0;
            return Status::Success;
        };

        let controls = ctx.controls();
        controls.force = 1.0;
        controls.angle = target.angle_to(position);
        Status::Running
    }

    fn cancel(&mut self, ctx: &mut AiContext) {
        ctx.controls().force = 0.0;
    }
}

/// Waits for the shared aggression grant.
///
/// Never fails on its own: a request that cannot be served stays queued and
/// the task keeps running. Cancelling it before the grant arrives withdraws
/// the queued request. The grant is taken in the same call that ends the
/// task with `Success`, so a cancelled task never holds one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BecomeAggressive {
    granted: bool,
}

impl BecomeAggressive {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Behavior<AiContext> for BecomeAggressive {
    fn start(&mut self, _ctx: &mut AiContext) {
        self.granted = false;
    }

    fn tick(&mut self, ctx: &mut AiContext, _elapsed: f32) -> Status {
        if !self.granted {
            self.granted = ctx.tracker.request(ctx.me());
        }
        if self.granted {
            tracing::debug!(entity = %ctx.me(), "became aggressive");
            Status::Success
        } else {
            Status::Running
        }
    }

    fn cancel(&mut self, ctx: &mut AiContext) {
        if !self.granted {
            ctx.tracker.cancel_request(ctx.me());
        }
    }
}

/// Gives the aggression grant back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BecomePassive;

impl Behavior<AiContext> for BecomePassive {
    fn tick(&mut self, ctx: &mut AiContext, _elapsed: f32) -> Status {
        ctx.tracker.release(ctx.me());
        Status::Success
    }
}

/// Stands still, charges for `charge_duration`, then releases the strike.
///
/// The charge clock starts on the tick after the press, when the state
/// machine has entered its charging state. The release is held for one extra
/// tick so the state machine observes the button going up before a following
/// attack presses it again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attack {
    charge_duration: f32,
    age: f32,
    holding: bool,
    released: bool,
}

impl Attack {
    pub fn new(charge_duration: f32) -> Self {
        Self {
            charge_duration,
            age: 0.0,
            holding: false,
            released: false,
        }
    }
}

impl Behavior<AiContext> for Attack {
    fn start(&mut self, _ctx: &mut AiContext) {
        self.age = 0.0;
        self.holding = false;
        self.released = false;
    }

    fn tick(&mut self, ctx: &mut AiContext, elapsed: f32) -> Status {
        if self.released {
            return Status::Success;
        }

        if self.holding {
            self.age += elapsed;
        }
        let controls = ctx.controls();
        controls.force = 0.0;
        if self.holding && self.age >= self.charge_duration {
            controls.attack = false;
            self.holding = false;
            self.released = true;
        } else {
            controls.attack = true;
            self.holding = true;
        }
        Status::Running
    }

    fn cancel(&mut self, ctx: &mut AiContext) {
        if self.holding {
            ctx.controls().attack = false;
            self.holding = false;
        }
    }
}

/// Keeps the shield raised until cancelled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoldShield {
    raised: bool,
}

impl HoldShield {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Behavior<AiContext> for HoldShield {
    fn tick(&mut self, ctx: &mut AiContext, _elapsed: f32) -> Status {
        ctx.controls().shield = true;
        self.raised = true;
        Status::Running
    }

    fn cancel(&mut self, ctx: &mut AiContext) {
        if self.raised {
            ctx.controls().shield = false;
            self.raised = false;
        }
    }
}
