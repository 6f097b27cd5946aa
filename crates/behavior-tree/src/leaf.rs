//! Leaf behavior nodes that only depend on time.

use crate::{Behavior, Status};

/// Succeeds once `duration` time units have elapsed since it was started.
#[derive(Debug, Clone)]
pub struct Wait {
    duration: f32,
    age: f32,
}

impl Wait {
    pub fn new(duration: f32) -> Self {
        Self { duration, age: 0.0 }
    }

    /// Time accumulated since the last start.
    pub fn age(&self) -> f32 {
        self.age
    }
}

impl<C> Behavior<C> for Wait {
    fn start(&mut self, _ctx: &mut C) {
        self.age = 0.0;
    }

    fn tick(&mut self, _ctx: &mut C, elapsed: f32) -> Status {
        self.age += elapsed;
        if self.age >= self.duration {
            Status::Success
        } else {
            Status::Running
        }
    }
}

/// Fails once `duration` time units have elapsed since it was started.
///
/// Same shape as [`Wait`], but meant to be raced against another task: when
/// the timeout wins, the race resolves with `Failure`.
#[derive(Debug, Clone)]
pub struct Timeout {
    inner: Wait,
}

impl Timeout {
    pub fn new(duration: f32) -> Self {
        Self {
            inner: Wait::new(duration),
        }
    }
}

impl<C> Behavior<C> for Timeout {
    fn start(&mut self, ctx: &mut C) {
        Behavior::<C>::start(&mut self.inner, ctx);
    }

    fn tick(&mut self, ctx: &mut C, elapsed: f32) -> Status {
        match Behavior::<C>::tick(&mut self.inner, ctx, elapsed) {
            Status::Running => Status::Running,
            _ => Status::Failure,
        }
    }
}

/// Runs until cancelled. Useful as a neutral race partner.
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl<C> Behavior<C> for Idle {
    fn tick(&mut self, _ctx: &mut C, _elapsed: f32) -> Status {
        Status::Running
    }
}
