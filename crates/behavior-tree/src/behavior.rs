//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for all task tree nodes. The trait is generic over a context
//! type `C`, allowing nodes to read the owner's view of the world and write
//! its intents.

use crate::Status;

/// A cancellable unit of scheduled work.
///
/// # Lifecycle
///
/// 1. [`start`](Behavior::start) is called once before the first tick. It may
///    be called again after the node finished to run it from scratch.
/// 2. [`tick`](Behavior::tick) is called at most once per simulated frame until
///    it returns a terminal status.
/// 3. [`cancel`](Behavior::cancel) tears the node down immediately. It must be
///    idempotent: cancelling a finished or already cancelled node has no
///    observable effect.
pub trait Behavior<C>: Send {
    /// Prepares the node for a fresh run.
    fn start(&mut self, _ctx: &mut C) {}

    /// Advances this node by `elapsed` time units.
    ///
    /// # Returns
    ///
    /// - `Status::Running` if the node needs more ticks
    /// - `Status::Success` / `Status::Failure` once it has finished
    fn tick(&mut self, ctx: &mut C, elapsed: f32) -> Status;

    /// Stops the node and rolls back anything it holds.
    fn cancel(&mut self, _ctx: &mut C) {}
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior<C>>` to also implement `Behavior<C>`,
/// enabling dynamic dispatch and heterogeneous collections of nodes.
impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn start(&mut self, ctx: &mut C) {
        (**self).start(ctx)
    }

    #[inline]
    fn tick(&mut self, ctx: &mut C, elapsed: f32) -> Status {
        (**self).tick(ctx, elapsed)
    }

    #[inline]
    fn cancel(&mut self, ctx: &mut C) {
        (**self).cancel(ctx)
    }
}
