//! Decorator behavior nodes.
//!
//! Decorators wrap a single child behavior and modify its result or execution.
//! This module provides [`Inverter`] (NOT logic), [`AlwaysSucceed`] (failure
//! suppression) and [`Repeat`] (endless loops).

use crate::{Behavior, Status};

/// Inverts the terminal result of its child behavior.
///
/// # Semantics
///
/// - If the child returns `Success`, the inverter returns `Failure`
/// - If the child returns `Failure`, the inverter returns `Success`
/// - `Running` passes through unchanged
pub struct Inverter<C> {
    child: Box<dyn Behavior<C>>,
}

impl<C> Inverter<C> {
    /// Creates a new inverter that wraps the given child behavior.
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for Inverter<C> {
    fn start(&mut self, ctx: &mut C) {
        self.child.start(ctx);
    }

    fn tick(&mut self, ctx: &mut C, elapsed: f32) -> Status {
        self.child.tick(ctx, elapsed).invert()
    }

    fn cancel(&mut self, ctx: &mut C) {
        self.child.cancel(ctx);
    }
}

/// Reports `Success` once its child finished, whatever the child's result.
///
/// # Semantics
///
/// - While the child is `Running`, returns `Running`
/// - If the child returns `Success`, returns `Success`
/// - If the child returns `Failure`, **still returns `Success`**
///
/// This is the "try / catch and carry on" of task scripts: a step that may be
/// interrupted (e.g. by a timeout race) without aborting the enclosing
/// [`Sequence`](crate::Sequence).
pub struct AlwaysSucceed<C> {
    child: Box<dyn Behavior<C>>,
}

impl<C> AlwaysSucceed<C> {
    /// Creates a new always-succeed wrapper around the given child behavior.
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for AlwaysSucceed<C> {
    fn start(&mut self, ctx: &mut C) {
        self.child.start(ctx);
    }

    fn tick(&mut self, ctx: &mut C, elapsed: f32) -> Status {
        match self.child.tick(ctx, elapsed) {
            Status::Running => Status::Running,
            Status::Success | Status::Failure => Status::Success,
        }
    }

    fn cancel(&mut self, ctx: &mut C) {
        self.child.cancel(ctx);
    }
}

/// Restarts its child every time it finishes. Never completes on its own.
///
/// The restarted child is not ticked again in the frame its previous run
/// ended, so a child that finishes instantly still costs one tick per run.
pub struct Repeat<C> {
    child: Box<dyn Behavior<C>>,
}

impl<C> Repeat<C> {
    /// Creates a new endless loop around the given child behavior.
    pub fn new(child: Box<dyn Behavior<C>>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for Repeat<C> {
    fn start(&mut self, ctx: &mut C) {
        self.child.start(ctx);
    }

    fn tick(&mut self, ctx: &mut C, elapsed: f32) -> Status {
        if self.child.tick(ctx, elapsed).is_done() {
            self.child.start(ctx);
        }
        Status::Running
    }

    fn cancel(&mut self, ctx: &mut C) {
        self.child.cancel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sequence, Timeout, Wait};

    struct TestContext {
        value: i32,
    }

    struct Increment;
    impl Behavior<TestContext> for Increment {
        fn tick(&mut self, ctx: &mut TestContext, _elapsed: f32) -> Status {
            ctx.value += 1;
            Status::Success
        }
    }

    struct FailAndIncrement;
    impl Behavior<TestContext> for FailAndIncrement {
        fn tick(&mut self, ctx: &mut TestContext, _elapsed: f32) -> Status {
            ctx.value += 1;
            Status::Failure
        }
    }

    #[test]
    fn inverter_inverts_terminal_status() {
        let mut inverter = Inverter::<TestContext>::new(Box::new(Increment));

        let mut ctx = TestContext { value: 0 };
        assert_eq!(inverter.tick(&mut ctx, 0.1), Status::Failure);

        let mut inverter = Inverter::<TestContext>::new(Box::new(Wait::new(1.0)));
        inverter.start(&mut ctx);
        assert_eq!(inverter.tick(&mut ctx, 0.5), Status::Running);
        assert_eq!(inverter.tick(&mut ctx, 0.5), Status::Failure);
    }

    #[test]
    fn always_succeed_on_failure() {
        let mut always = AlwaysSucceed::<TestContext>::new(Box::new(FailAndIncrement));

        let mut ctx = TestContext { value: 0 };
        assert_eq!(always.tick(&mut ctx, 0.1), Status::Success);
        assert_eq!(ctx.value, 1); // Child still executed
    }

    #[test]
    fn always_succeed_keeps_sequence_going_after_timeout() {
        let mut seq = Sequence::<TestContext>::new(vec![
            Box::new(AlwaysSucceed::new(Box::new(Timeout::new(0.2)))),
            Box::new(Increment),
        ]);

        let mut ctx = TestContext { value: 0 };
        seq.start(&mut ctx);
        assert_eq!(seq.tick(&mut ctx, 0.1), Status::Running);
        assert_eq!(seq.tick(&mut ctx, 0.1), Status::Success);
        assert_eq!(ctx.value, 1);
    }

    #[test]
    fn repeat_restarts_child_once_per_tick() {
        let mut looped = Repeat::<TestContext>::new(Box::new(Increment));

        let mut ctx = TestContext { value: 0 };
        looped.start(&mut ctx);
        for _ in 0..5 {
            assert_eq!(looped.tick(&mut ctx, 0.1), Status::Running);
        }
        assert_eq!(ctx.value, 5);
    }
}
