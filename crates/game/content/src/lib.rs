//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for the data files that tune an encounter:
//! - Combat tunables (data-driven via TOML)
//! - Enemy rosters: named loadouts (data-driven via RON)
//!
//! All loaders use game-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, RosterLoader};
