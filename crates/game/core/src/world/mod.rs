//! The simulation world.
//!
//! [`World`] owns every character, the encounter's aggression tracker and
//! the presentation collaborator, and advances them in fixed phases:
//!
//! 1. controllers write controls (time scaled by the slow-motion ratio)
//! 2. state machines pick a state and may start a dash or release a strike
//! 3. motions and movement, facing, collision push-out, water drain
//! 4. stamina regeneration and combo decay
//! 5. strikes released this tick, in id order
//! 6. characters killed this tick are removed
//!
//! Nothing inside [`World::tick`] fails. Errors only come from spawning and
//! controller management.

mod roster;

pub use roster::Roster;

use crate::aggression::TrackerHandle;
use crate::ai::{AiController, Task, enemy_routine};
use crate::character::{Character, CharacterKind, CharacterPreset, EntityId, Loadout, Motion, MotionKind, PresetError, Team};
use crate::combat::{StrikeOutcome, resolve_strike};
use crate::config::{CombatConfig, ConfigError};
use crate::controller::{ControlContext, Controller};
use crate::error::{ErrorSeverity, GameError};
use crate::geometry::{Point, facing_sign};
use crate::presentation::{NullPresentation, Presentation, PresentationEvent, Sound};
use crate::state_machine::MachineAction;

/// Axis-aligned patch of water that drains stamina.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaterZone {
    pub min: Point,
    pub max: Point,
}

impl WaterZone {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, point: Point) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum WorldError {
    #[error("no character with id {0}")]
    UnknownEntity(EntityId),

    #[error("character {0} is dead")]
    Dead(EntityId),

    #[error("invalid preset: {0}")]
    InvalidPreset(#[from] PresetError),

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl GameError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownEntity(_) | Self::Dead(_) => ErrorSeverity::Recoverable,
            Self::InvalidPreset(_) | Self::InvalidConfig(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEntity(_) => "WORLD_UNKNOWN_ENTITY",
            Self::Dead(_) => "WORLD_DEAD_ENTITY",
            Self::InvalidPreset(err) => err.error_code(),
            Self::InvalidConfig(err) => err.error_code(),
        }
    }
}

/// What happened during one [`World::tick`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub strikes: Vec<(EntityId, StrikeOutcome)>,
    /// Characters removed at the end of the tick.
    pub deaths: Vec<EntityId>,
}

pub struct World<P: Presentation = NullPresentation> {
    roster: Roster,
    config: CombatConfig,
    tracker: TrackerHandle,
    presentation: P,
    water: Vec<WaterZone>,
    speed_ratio: f32,
    next_id: u32,
    ticks: u64,
}

impl World<NullPresentation> {
    pub fn with_defaults() -> Self {
        Self::assemble(CombatConfig::default(), NullPresentation)
    }
}

impl<P: Presentation> World<P> {
    pub fn new(config: CombatConfig, presentation: P) -> Result<Self, WorldError> {
        config.validate()?;
        Ok(Self::assemble(config, presentation))
    }

    fn assemble(config: CombatConfig, presentation: P) -> Self {
        Self {
            roster: Roster::new(),
            tracker: TrackerHandle::new(config.aggression_cap),
            config,
            presentation,
            water: Vec::new(),
            speed_ratio: 1.0,
            next_id: 0,
            ticks: 0,
        }
    }

    // ========================================================================
    // Spawning and controllers
    // ========================================================================

    pub fn spawn(
        &mut self,
        preset: &CharacterPreset,
        position: Point,
        controller: Option<Box<dyn Controller>>,
    ) -> Result<EntityId, WorldError> {
        preset.validate()?;

        let id = EntityId(self.next_id);
        self.next_id += 1;

        let mut character = Character::new(id, preset, position, &self.config);
        character.controller = controller;
        tracing::info!(
            entity = %id,
            kind = %preset.kind,
            health = preset.max_health,
            controller = character.controller_name().unwrap_or("none"),
            "spawned"
        );
        self.roster.push(character);
        Ok(id)
    }

    /// Spawns an enemy running the stock enemy routine.
    pub fn spawn_enemy(&mut self, loadout: &Loadout, position: Point) -> Result<EntityId, WorldError> {
        let controller = self.ai_controller(enemy_routine(loadout));
        self.spawn(&CharacterPreset::enemy(loadout), position, Some(controller))
    }

    /// Wraps a task tree in a controller bound to this world's tracker.
    pub fn ai_controller(&self, root: Task) -> Box<dyn Controller> {
        Box::new(AiController::new(root, self.tracker.clone()))
    }

    /// Replaces the controller of `id`, cancelling the previous one.
    ///
    /// Any aggression grant held under the old controller is released.
    pub fn set_controller(&mut self, id: EntityId, controller: Box<dyn Controller>) -> Result<(), WorldError> {
        let character = self.roster.get_mut(id).ok_or(WorldError::UnknownEntity(id))?;
        if !character.is_alive() {
            return Err(WorldError::Dead(id));
        }

        let previous = Self::cancel_controller(character);
        self.tracker.release(id);
        tracing::info!(
            entity = %id,
            from = previous.unwrap_or("none"),
            to = controller.name(),
            "controller swapped"
        );
        character.controller = Some(controller);
        Ok(())
    }

    fn cancel_controller(character: &mut Character) -> Option<&'static str> {
        let mut controller = character.controller.take()?;
        let mut ctx = ControlContext::observe(character, None);
        controller.cancel(&mut ctx);
        character.controls = ctx.controls;
        Some(controller.name())
    }

    pub fn set_affected_by_speed_ratio(&mut self, id: EntityId, affected: bool) -> Result<(), WorldError> {
        let character = self.roster.get_mut(id).ok_or(WorldError::UnknownEntity(id))?;
        character.affected_by_speed_ratio = affected;
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn character(&self, id: EntityId) -> Option<&Character> {
        self.roster.get(id)
    }

    /// Every character still in the world, in id order. Characters killed
    /// during the current tick stay listed until it ends.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.roster.iter()
    }

    /// Living members of `team`.
    pub fn team(&self, team: Team) -> impl Iterator<Item = &Character> {
        self.roster.team(team)
    }

    pub fn player(&self) -> Option<&Character> {
        self.roster
            .living()
            .find(|character| character.kind() == CharacterKind::Player)
    }

    pub fn tracker(&self) -> &TrackerHandle {
        &self.tracker
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    pub fn speed_ratio(&self) -> f32 {
        self.speed_ratio
    }

    /// Sets the slow-motion ratio; `1.0` is real time.
    ///
    /// Negative or non-finite ratios are rejected and the current one kept.
    pub fn set_speed_ratio(&mut self, ratio: f32) {
        if !(ratio.is_finite() && ratio >= 0.0) {
            tracing::warn!(ratio, current = self.speed_ratio, "invalid speed ratio ignored");
            return;
        }
        self.speed_ratio = ratio;
    }

    pub fn add_water(&mut self, zone: WaterZone) {
        self.water.push(zone);
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // ========================================================================
    // Combat
    // ========================================================================

    /// Resolves a strike by `attacker` right now, outside the tick order.
    pub fn strike(&mut self, attacker: EntityId, relative_strength: f32) -> StrikeOutcome {
        let mut outcome = resolve_strike(
            &mut self.roster,
            &self.config,
            &mut self.presentation,
            attacker,
            relative_strength,
        );
        if let StrikeOutcome::Hit { victim, killed, .. } = &mut outcome {
            if *killed {
                *killed = self.kill(*victim);
            }
        }
        outcome
    }

    /// Runs the death sequence for `id`.
    ///
    /// Returns `false` if the character is unknown or already dead; the
    /// sequence never runs twice. The character stays in the roster, inert,
    /// until the end of the current tick.
    pub fn kill(&mut self, id: EntityId) -> bool {
        let Some(character) = self.roster.get_mut(id) else {
            return false;
        };
        if !character.alive {
            return false;
        }
        character.alive = false;

        Self::cancel_controller(character);
        self.tracker.release(id);

        let at = character.position;
        self.presentation.request(PresentationEvent::Death {
            entity: id,
            at,
            gibs: character.gibs().clone(),
        });
        self.presentation.request(PresentationEvent::Sound {
            sound: Sound::Death,
            at,
        });
        tracing::info!(entity = %id, kind = %character.kind(), "character died");
        true
    }

    // ========================================================================
    // Tick
    // ========================================================================

    pub fn tick(&mut self, elapsed: f32) -> TickReport {
        let elapsed = if elapsed >= 0.0 {
            elapsed
        } else {
            tracing::warn!(elapsed, "invalid elapsed time, skipping");
            0.0
        };

        let mut released = Vec::new();
        for index in 0..self.roster.len() {
            if !self.roster.at(index).is_alive() {
                continue;
            }
            let elapsed = self.character_elapsed(index, elapsed);
            self.drive(index, elapsed);
            if let Some(relative_strength) = self.advance_machine(index, elapsed) {
                released.push((self.roster.at(index).id(), relative_strength));
            }
            self.move_character(index, elapsed);
            self.recover(index, elapsed);
        }

        let mut report = TickReport::default();
        for (attacker, relative_strength) in released {
            let outcome = self.strike(attacker, relative_strength);
            report.strikes.push((attacker, outcome));
        }

        report.deaths = self.roster.reap();
        self.ticks += 1;
        tracing::trace!(tick = self.ticks, alive = self.roster.len(), "tick complete");
        report
    }

    fn character_elapsed(&self, index: usize, elapsed: f32) -> f32 {
        if self.roster.at(index).affected_by_speed_ratio {
            elapsed * self.speed_ratio
        } else {
            elapsed
        }
    }

    fn drive(&mut self, index: usize, elapsed: f32) {
        let character = self.roster.at(index);
        let target = self
            .roster
            .nearest(character.position(), character.target_team())
            .map(Character::position);
        let mut ctx = ControlContext::observe(character, target);

        let character = self.roster.at_mut(index);
        character.age += elapsed;
        if let Some(controller) = character.controller.as_mut() {
            controller.cycle(&mut ctx, elapsed);
            character.controls = ctx.controls.sanitized(character.controls.aim);
        }
    }

    /// Runs the state machine and starts a dash if it asked for one.
    /// Returns the strength of a strike released this tick.
    fn advance_machine(&mut self, index: usize, elapsed: f32) -> Option<f32> {
        let character = self.roster.at_mut(index);
        let action = character
            .machine
            .cycle(&character.controls, character.stamina.current(), elapsed);

        // A forced state cuts a dash short
        if !character.machine.is_dashing() && character.motion.is_some_and(|motion| motion.kind == MotionKind::Dash) {
            character.motion = None;
        }

        match action? {
            MachineAction::Dash { angle } => {
                let from = character.position;
                let to = from.offset(angle, self.config.dash_distance);
                character.motion = Some(Motion::new(MotionKind::Dash, from, to, self.config.dash_duration));
                character.lose_stamina(self.config.dash_stamina);
                tracing::debug!(entity = %character.id(), angle, "dash");
                self.presentation.request(PresentationEvent::Dash {
                    entity: character.id(),
                    angle,
                });
                self.presentation.request(PresentationEvent::Sound {
                    sound: Sound::Dash,
                    at: from,
                });
                None
            }
            MachineAction::Strike { relative_strength } => Some(relative_strength),
        }
    }

    fn move_character(&mut self, index: usize, elapsed: f32) {
        let (id, position, radius) = {
            let character = self.roster.at_mut(index);
            if let Some(mut motion) = character.motion {
                character.position = motion.advance(elapsed);
                character.motion = (!motion.is_finished()).then_some(motion);
            } else {
                let controls = character.controls;
                let distance =
                    controls.force * character.machine.speed_ratio() * character.stats().base_speed * elapsed;
                if distance > 0.0 {
                    character.position = character.position.offset(controls.angle, distance);
                }
            }

            let dx = character.controls.aim.x - character.position.x;
            if dx != 0.0 {
                character.facing = facing_sign(dx);
            }
            (character.id(), character.position, character.stats().collision_radius)
        };

        let mut position = position;
        for other in self.roster.living() {
            if other.id() == id {
                continue;
            }
            let distance = other.position().distance(position);
            if distance < radius {
                let angle = if distance > 0.0 {
                    other.position().angle_to(position)
                } else {
                    0.0
                };
                position = other.position().offset(angle, radius);
            }
        }

        let in_water = elapsed > 0.0 && self.water.iter().any(|zone| zone.contains(position));
        let character = self.roster.at_mut(index);
        character.position = position;
        if in_water {
            character.lose_stamina(self.config.water_drain * elapsed);
        }
    }

    fn recover(&mut self, index: usize, elapsed: f32) {
        let config = &self.config;
        let character = self.roster.at_mut(index);

        let rested = character.age - character.stamina.last_loss() > config.stamina_regen_cooldown;
        if character.machine.is_exhausted() || rested {
            character.stamina.regenerate(config.stamina_regen_rate * elapsed);
        }
        if character.combo.decay(character.age, config.combo_window) {
            tracing::trace!(entity = %character.id(), "combo expired");
        }
    }
}

impl Default for World<NullPresentation> {
    fn default() -> Self {
        Self::with_defaults()
    }
}
