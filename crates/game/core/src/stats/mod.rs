//! Per-character resource bookkeeping.
//!
//! Resources are the only numbers combat is allowed to mutate directly. Every
//! mutation goes through a clamping method so the invariants below hold after
//! any amount of damage or stamina loss:
//!
//! - `0 <= health <= max_health`
//! - `0 <= stamina <= 1`
//! - `combo >= 0`

pub mod resources;

pub use resources::{Combo, Health, Stamina};
