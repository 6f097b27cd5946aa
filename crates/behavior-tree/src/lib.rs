//! Lightweight tick-driven task tree for real-time game AI.
//!
//! Tasks are advanced cooperatively: the owner calls [`Behavior::tick`] once
//! per simulated frame with the elapsed time, and a task that has not finished
//! yet simply reports [`Status::Running`]. There is no blocking and no
//! language-level suspension; "await" style sequencing is built entirely from
//! the combinators in this crate.
//!
//! - **Deterministic**: children are always advanced in declaration order
//! - **Synchronous cancellation**: losing branches are torn down in the same tick
//! - **Zero dependencies**: Pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes (`start` / `tick` / `cancel`)
//! - [`Status`]: Running, Success or Failure
//! - Composite nodes: [`Sequence`], [`Race`]
//! - Decorator nodes: [`Repeat`], [`Inverter`], [`AlwaysSucceed`]
//! - Leaf nodes: [`Wait`], [`Timeout`], [`Idle`]

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod decorator;
pub mod leaf;
pub mod status;

// Re-export core types for ergonomic API
pub use behavior::Behavior;
pub use composite::{Race, Sequence};
pub use decorator::{AlwaysSucceed, Inverter, Repeat};
pub use leaf::{Idle, Timeout, Wait};
pub use status::Status;
