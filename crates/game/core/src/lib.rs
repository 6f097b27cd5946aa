//! Real-time melee combat simulation.
//!
//! `game-core` decides, every simulated tick, what each character is doing,
//! whether a strike lands, who may act aggressively, and how health, stamina
//! and combo evolve. All mutation flows through [`World::tick`] (and the
//! explicit [`World::strike`] / [`World::kill`] entry points); rendering and
//! audio are reached only through the [`Presentation`] trait.
//!
//! Dependency order, leaves first:
//!
//! ```text
//! geometry / targeting -> stats -> state_machine -> ai -> aggression -> combat -> world
//! ```
pub mod aggression;
pub mod ai;
pub mod character;
pub mod combat;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod presentation;
pub mod state_machine;
pub mod stats;
pub mod targeting;
pub mod world;

pub use aggression::{AggressivityTracker, TrackerHandle};
pub use ai::{
    AiContext, AiController, Attack, BecomeAggressive, BecomePassive, HoldShield, ReachPlayer, RetreatAi, Task,
    duelist_routine, enemy_routine,
};
pub use character::{
    Character, CharacterKind, CharacterPreset, CombatStats, Controls, EntityId, Gib, Gibs, Label, Loadout, Motion,
    MotionKind, PresetError, Team,
};
pub use combat::StrikeOutcome;
pub use config::{CombatConfig, ConfigError};
pub use controller::{ControlContext, Controller, InputController, InputHandle};
pub use error::{ErrorSeverity, GameError};
pub use geometry::{Point, facing_sign, normalize_angle};
pub use presentation::{NullPresentation, Presentation, PresentationEvent, RecordingPresentation, Sound};
pub use state_machine::{CharacterState, MachineAction, MachineTiming, StateFlags, StateMachine};
pub use stats::{Combo, Health, Stamina};
pub use targeting::{StrikeZone, select_target, strikability};
pub use world::{Roster, TickReport, WaterZone, World, WorldError};
