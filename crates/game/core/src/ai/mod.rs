//! Enemy AI built on the `behavior-tree` scheduler.
//!
//! Domain tasks ([`tasks`]) drive a character's controls through an
//! [`AiContext`]; [`routine`] composes them into the stock enemy loop; and
//! [`AiController`] plugs a task tree into the world's controller slot.

mod context;
mod controller;
pub mod routine;
pub mod tasks;

pub use context::AiContext;
pub use controller::AiController;
pub use routine::{duelist_routine, enemy_routine};
pub use tasks::{Attack, BecomeAggressive, BecomePassive, HoldShield, ReachPlayer, RetreatAi};

/// Boxed task tree over the AI context.
pub type Task = Box<dyn behavior_tree::Behavior<AiContext>>;
