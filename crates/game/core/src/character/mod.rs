//! Combat-capable entities.
//!
//! A [`Character`] bundles its resource meters, its state machine, the
//! intents written by its controller, and the stat block it was spawned
//! with. Every character is owned by the [`World`](crate::World); other
//! characters only affect it through strike resolution.

pub mod controls;
pub mod motion;
pub mod preset;

use core::fmt;

pub use controls::Controls;
pub use motion::{Motion, MotionKind};
pub use preset::{CharacterPreset, Gib, Gibs, Loadout, PresetError};

use crate::config::CombatConfig;
use crate::controller::Controller;
use crate::geometry::Point;
use crate::state_machine::{MachineTiming, StateFlags, StateMachine};
use crate::stats::{Combo, Health, Stamina};
use crate::targeting::StrikeZone;

/// Unique identifier for any character tracked by the world.
///
/// Identifiers are handed out in spawn order and never reused, which gives
/// every per-tick iteration a deterministic order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side a character fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterKind {
    Player,
    Enemy,
}

impl CharacterKind {
    pub const fn team(self) -> Team {
        match self {
            Self::Player => Team::Player,
            Self::Enemy => Team::Enemy,
        }
    }
}

/// The single floating label a character owns (damage number, "Parry", ...).
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub shown_at: f32,
}

/// Static combat stats copied from the spawn preset.
#[derive(Clone, Debug, PartialEq)]
pub struct CombatStats {
    pub strength: f32,
    pub base_speed: f32,
    pub strike_radius_x: f32,
    pub strike_radius_y: f32,
    pub magnet_radius_x: f32,
    pub magnet_radius_y: f32,
    pub collision_radius: f32,
    pub protection: f32,
    pub aggression: u32,
}

pub struct Character {
    id: EntityId,
    kind: CharacterKind,
    team: Team,
    target_team: Team,
    pub(crate) position: Point,
    pub(crate) facing: f32,
    pub(crate) health: Health,
    pub(crate) stamina: Stamina,
    pub(crate) combo: Combo,
    stats: CombatStats,
    loadout: Loadout,
    gibs: Gibs,
    pub(crate) controls: Controls,
    pub(crate) machine: StateMachine,
    pub(crate) motion: Option<Motion>,
    pub(crate) controller: Option<Box<dyn Controller>>,
    pub(crate) age: f32,
    pub(crate) last_label: Option<Label>,
    pub(crate) alive: bool,
    /// Whether the world's slow-motion ratio scales this character's time.
    pub affected_by_speed_ratio: bool,
}

impl Character {
    pub(crate) fn new(id: EntityId, preset: &CharacterPreset, position: Point, config: &CombatConfig) -> Self {
        let team = preset.kind.team();
        Self {
            id,
            kind: preset.kind,
            team,
            target_team: team.opponent(),
            position,
            facing: 1.0,
            health: Health::new(preset.max_health),
            stamina: Stamina::full(),
            combo: Combo::default(),
            stats: CombatStats {
                strength: preset.strength,
                base_speed: preset.base_speed,
                strike_radius_x: preset.strike_radius_x,
                strike_radius_y: preset.strike_radius_y,
                magnet_radius_x: preset.magnet_radius_x,
                magnet_radius_y: preset.magnet_radius_y,
                collision_radius: preset.collision_radius,
                protection: preset.protection,
                aggression: preset.aggression,
            },
            loadout: preset.loadout,
            gibs: preset.gibs.clone(),
            controls: Controls::idle(position),
            machine: StateMachine::new(MachineTiming::new(preset, config)),
            motion: None,
            controller: None,
            age: 0.0,
            last_label: None,
            alive: true,
            affected_by_speed_ratio: true,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> CharacterKind {
        self.kind
    }

    pub fn team(&self) -> Team {
        self.team
    }

    /// Team this character may strike.
    pub fn target_team(&self) -> Team {
        self.target_team
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// `1.0` when facing right, `-1.0` when facing left.
    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn stamina(&self) -> &Stamina {
        &self.stamina
    }

    pub fn combo(&self) -> &Combo {
        &self.combo
    }

    pub fn stats(&self) -> &CombatStats {
        &self.stats
    }

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    pub fn gibs(&self) -> &Gibs {
        &self.gibs
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn state_machine(&self) -> &StateMachine {
        &self.machine
    }

    pub fn flags(&self) -> StateFlags {
        self.machine.flags()
    }

    pub fn motion(&self) -> Option<&Motion> {
        self.motion.as_ref()
    }

    /// Name of the controller currently driving this character.
    pub fn controller_name(&self) -> Option<&'static str> {
        self.controller.as_ref().map(|controller| controller.name())
    }

    /// Simulation time this character has lived through.
    pub fn age(&self) -> f32 {
        self.age
    }

    pub fn last_label(&self) -> Option<&Label> {
        self.last_label.as_ref()
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// True for a short while after taking damage (hit flash).
    pub fn recently_damaged(&self, config: &CombatConfig) -> bool {
        self.health
            .last_damage()
            .is_some_and(|at| self.age - at < config.damage_flash)
    }

    pub fn strike_zone(&self, fov: f32) -> StrikeZone {
        StrikeZone::new(self.stats.strike_radius_x, self.stats.strike_radius_y, fov)
    }

    pub fn magnet_zone(&self, fov: f32) -> StrikeZone {
        StrikeZone::new(self.stats.magnet_radius_x, self.stats.magnet_radius_y, fov)
    }

    /// Whether `point` lies inside this character's strike ellipse.
    pub fn reaches(&self, point: Point) -> bool {
        self.position
            .is_within_radii(point, self.stats.strike_radius_x, self.stats.strike_radius_y)
    }

    /// Replaces the owned label and returns it.
    pub(crate) fn show_label(&mut self, text: impl Into<String>) -> &Label {
        self.last_label.insert(Label {
            text: text.into(),
            shown_at: self.age,
        })
    }

    pub(crate) fn lose_stamina(&mut self, amount: f32) {
        self.stamina.lose(amount, self.age);
    }

    pub(crate) fn update_combo(&mut self, delta: i64, reason: &str) {
        self.combo.update(delta, reason, self.age);
    }
}

impl fmt::Debug for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Character")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("position", &self.position)
            .field("health", &self.health.current())
            .field("stamina", &self.stamina.current())
            .field("combo", &self.combo.value())
            .field("state", &self.machine.state())
            .field("alive", &self.alive)
            .field("controller", &self.controller_name())
            .finish()
    }
}
