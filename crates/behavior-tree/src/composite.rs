//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! This module provides the two building blocks that real-time AI scripts are
//! made of: [`Sequence`] ("run A, then run B") and [`Race`] ("run all, the
//! first to finish wins").

use crate::{Behavior, Status};

/// Runs child behaviors one after another.
///
/// # Semantics
///
/// A `Sequence` runs its children from left to right, one at a time:
/// - While the current child is `Running`, the sequence is `Running`
/// - If a child returns `Failure`, the sequence **stops immediately** and returns `Failure`
/// - If a child returns `Success`, the next child is started and ticked in the
///   same frame with zero elapsed time
/// - If all children return `Success`, the sequence returns `Success`
///
/// A failure is never swallowed; wrap the child in
/// [`AlwaysSucceed`](crate::AlwaysSucceed) to make a step optional.
pub struct Sequence<C> {
    children: Vec<Box<dyn Behavior<C>>>,
    current: Option<usize>,
    finished: Option<Status>,
}

impl<C> Sequence<C> {
    /// Creates a new sequence with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A sequence with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self {
            children,
            current: None,
            finished: None,
        }
    }

    /// Index of the child currently running, if any.
    pub fn current(&self) -> Option<usize> {
        self.current
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn start(&mut self, ctx: &mut C) {
        self.finished = None;
        self.current = Some(0);
        self.children[0].start(ctx);
    }

    fn tick(&mut self, ctx: &mut C, elapsed: f32) -> Status {
        if let Some(status) = self.finished {
            return status;
        }
        if self.current.is_none() {
            self.start(ctx);
        }

        let mut elapsed = elapsed;
        while let Some(index) = self.current {
            match self.children[index].tick(ctx, elapsed) {
                Status::Running => return Status::Running,
                Status::Failure => {
                    // Short-circuit
                    self.current = None;
                    self.finished = Some(Status::Failure);
                    return Status::Failure;
                }
                Status::Success if index + 1 < self.children.len() => {
                    self.current = Some(index + 1);
                    self.children[index + 1].start(ctx);
                    // Time already spent belongs to the finished child
                    elapsed = 0.0;
                }
                Status::Success => {
                    self.current = None;
                }
            }
        }

        self.finished = Some(Status::Success);
        Status::Success
    }

    fn cancel(&mut self, ctx: &mut C) {
        if let Some(index) = self.current.take() {
            self.children[index].cancel(ctx);
        }
    }
}

/// Runs child behaviors concurrently until one of them finishes.
///
/// # Semantics
///
/// All children are started together and ticked in declaration order:
/// - The first child to return `Success` **or** `Failure` wins
/// - Every other child is cancelled in the same tick, before the race returns
/// - The race resolves with the winner's status
///
/// Ties are broken by declaration order: children after the winner are not
/// ticked in the frame the race resolves.
///
/// This is the cancellation primitive of the crate: "try X, but give up after
/// N seconds" is a race between X and a [`Timeout`](crate::Timeout).
pub struct Race<C> {
    children: Vec<Box<dyn Behavior<C>>>,
    active: bool,
    finished: Option<Status>,
}

impl<C> Race<C> {
    /// Creates a new race between the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(!children.is_empty(), "Race must have at least one child");
        Self {
            children,
            active: false,
            finished: None,
        }
    }

    fn cancel_all_except(&mut self, ctx: &mut C, winner: usize) {
        for (index, child) in self.children.iter_mut().enumerate() {
            if index != winner {
                child.cancel(ctx);
            }
        }
    }
}

impl<C> Behavior<C> for Race<C> {
    fn start(&mut self, ctx: &mut C) {
        self.finished = None;
        self.active = true;
        for child in &mut self.children {
            child.start(ctx);
        }
    }

    fn tick(&mut self, ctx: &mut C, elapsed: f32) -> Status {
        if let Some(status) = self.finished {
            return status;
        }
        if !self.active {
            self.start(ctx);
        }

        for index in 0..self.children.len() {
            let status = self.children[index].tick(ctx, elapsed);
            if status.is_done() {
                self.cancel_all_except(ctx, index);
                self.active = false;
                self.finished = Some(status);
                return status;
            }
        }

        Status::Running
    }

    fn cancel(&mut self, ctx: &mut C) {
        if self.active {
            self.active = false;
            for child in &mut self.children {
                child.cancel(ctx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Timeout, Wait};

    #[derive(Default)]
    struct TestContext {
        value: i32,
        cancelled: Vec<&'static str>,
    }

    /// Increments the context after a number of ticks.
    struct IncrementAfter {
        ticks: u32,
        seen: u32,
    }

    impl IncrementAfter {
        fn new(ticks: u32) -> Self {
            Self { ticks, seen: 0 }
        }
    }

    impl Behavior<TestContext> for IncrementAfter {
        fn start(&mut self, _ctx: &mut TestContext) {
            self.seen = 0;
        }

        fn tick(&mut self, ctx: &mut TestContext, _elapsed: f32) -> Status {
            self.seen += 1;
            if self.seen >= self.ticks {
                ctx.value += 1;
                Status::Success
            } else {
                Status::Running
            }
        }
    }

    struct FailAlways;
    impl Behavior<TestContext> for FailAlways {
        fn tick(&mut self, _ctx: &mut TestContext, _elapsed: f32) -> Status {
            Status::Failure
        }
    }

    /// Never finishes; records its cancellation.
    struct Tracked(&'static str);
    impl Behavior<TestContext> for Tracked {
        fn tick(&mut self, _ctx: &mut TestContext, _elapsed: f32) -> Status {
            Status::Running
        }

        fn cancel(&mut self, ctx: &mut TestContext) {
            ctx.cancelled.push(self.0);
        }
    }

    #[test]
    fn sequence_chains_instant_children_in_one_tick() {
        let mut seq = Sequence::<TestContext>::new(vec![
            Box::new(IncrementAfter::new(1)),
            Box::new(IncrementAfter::new(1)),
        ]);

        let mut ctx = TestContext::default();
        seq.start(&mut ctx);
        assert_eq!(seq.tick(&mut ctx, 0.1), Status::Success);
        assert_eq!(ctx.value, 2);
    }

    #[test]
    fn sequence_waits_for_running_child() {
        let mut seq = Sequence::<TestContext>::new(vec![
            Box::new(IncrementAfter::new(3)),
            Box::new(IncrementAfter::new(1)),
        ]);

        let mut ctx = TestContext::default();
        seq.start(&mut ctx);
        assert_eq!(seq.tick(&mut ctx, 0.1), Status::Running);
        assert_eq!(seq.tick(&mut ctx, 0.1), Status::Running);
        assert_eq!(seq.current(), Some(0));
        assert_eq!(seq.tick(&mut ctx, 0.1), Status::Success);
        assert_eq!(ctx.value, 2);
    }

    #[test]
    fn sequence_propagates_failure() {
        let mut seq = Sequence::<TestContext>::new(vec![
            Box::new(IncrementAfter::new(1)),
            Box::new(FailAlways),
            Box::new(IncrementAfter::new(1)), // Should not execute
        ]);

        let mut ctx = TestContext::default();
        seq.start(&mut ctx);
        assert_eq!(seq.tick(&mut ctx, 0.1), Status::Failure);
        assert_eq!(ctx.value, 1);
        // Terminal status is sticky until restarted
        assert_eq!(seq.tick(&mut ctx, 0.1), Status::Failure);
        assert_eq!(ctx.value, 1);
    }

    #[test]
    fn race_first_finisher_wins_and_cancels_siblings() {
        let mut race = Race::<TestContext>::new(vec![
            Box::new(Tracked("a")),
            Box::new(IncrementAfter::new(2)),
            Box::new(Tracked("b")),
        ]);

        let mut ctx = TestContext::default();
        race.start(&mut ctx);
        assert_eq!(race.tick(&mut ctx, 0.1), Status::Running);
        assert!(ctx.cancelled.is_empty());
        assert_eq!(race.tick(&mut ctx, 0.1), Status::Success);
        assert_eq!(ctx.value, 1);
        assert_eq!(ctx.cancelled, vec!["a", "b"]);
    }

    #[test]
    fn race_resolves_with_failure_of_winner() {
        let mut race = Race::<TestContext>::new(vec![
            Box::new(Timeout::new(1.0)),
            Box::new(Tracked("slow")),
        ]);

        let mut ctx = TestContext::default();
        race.start(&mut ctx);
        assert_eq!(race.tick(&mut ctx, 0.5), Status::Running);
        assert_eq!(race.tick(&mut ctx, 0.5), Status::Failure);
        assert_eq!(ctx.cancelled, vec!["slow"]);
    }

    #[test]
    fn race_tie_goes_to_first_declared_child() {
        let mut race = Race::<TestContext>::new(vec![
            Box::new(Wait::new(1.0)),
            Box::new(Timeout::new(1.0)),
        ]);

        let mut ctx = TestContext::default();
        race.start(&mut ctx);
        assert_eq!(race.tick(&mut ctx, 1.0), Status::Success);
    }

    #[test]
    fn cancelling_twice_has_no_further_effect() {
        let mut race = Race::<TestContext>::new(vec![Box::new(Tracked("only"))]);

        let mut ctx = TestContext::default();
        race.start(&mut ctx);
        race.cancel(&mut ctx);
        race.cancel(&mut ctx);
        assert_eq!(ctx.cancelled, vec!["only"]);

        let mut seq = Sequence::<TestContext>::new(vec![Box::new(Tracked("step"))]);
        seq.start(&mut ctx);
        seq.cancel(&mut ctx);
        seq.cancel(&mut ctx);
        assert_eq!(ctx.cancelled, vec!["only", "step"]);
    }

    #[test]
    fn cancelling_finished_race_is_noop() {
        let mut race = Race::<TestContext>::new(vec![
            Box::new(IncrementAfter::new(1)),
            Box::new(Tracked("loser")),
        ]);

        let mut ctx = TestContext::default();
        race.start(&mut ctx);
        assert_eq!(race.tick(&mut ctx, 0.1), Status::Success);
        race.cancel(&mut ctx);
        assert_eq!(ctx.cancelled, vec!["loser"]);
    }
}
