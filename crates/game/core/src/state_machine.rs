//! Per-character state machine.
//!
//! Converts continuous inputs (controls, elapsed time, stamina) into one
//! discrete [`CharacterState`] that gates movement speed and action
//! availability. Transitions are evaluated once per tick in a fixed priority
//! order:
//!
//! ```text
//! Staggered > Exhausted > Dashing > Shielding > Charging > Idle
//! ```
//!
//! Exits are time- or resource-gated: a dash runs for its full duration no
//! matter what the controls say, a stagger cannot be re-entered while active,
//! and exhaustion lasts until stamina climbs back above a floor. Only the
//! forced states (stagger, exhaustion) may cut a dash short.
//!
//! Exhaustion is latched separately from the visible state: a stagger taken
//! while exhausted shows as [`CharacterState::Staggered`], and the machine
//! drops back into [`CharacterState::Exhausted`] once it wears off unless
//! stamina has reached the recovery floor in the meantime.

use bitflags::bitflags;

use crate::character::{CharacterPreset, Controls};
use crate::config::CombatConfig;

/// Discrete state of a character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::Display)]
pub enum CharacterState {
    /// Free to move and act.
    #[default]
    Idle,
    /// Attack control held; the strike fires on release.
    Charging,
    /// Committed to a dash interpolation.
    Dashing,
    /// Shield raised.
    Shielding,
    /// Reeling from a hit.
    Staggered,
    /// Out of stamina, recovering.
    Exhausted,
}

bitflags! {
    /// Read-only flags exposed to controllers and combat resolution.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct StateFlags: u8 {
        const SHIELDED      = 1 << 0;
        const PERFECT_PARRY = 1 << 1;
        const EXHAUSTED     = 1 << 2;
        const STAGGERED     = 1 << 3;
        const DASHING       = 1 << 4;
        const CHARGING      = 1 << 5;
    }
}

/// Something the world has to carry out on behalf of the state machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MachineAction {
    /// A dash just started along `angle`.
    Dash { angle: f32 },
    /// A charged strike was released.
    Strike { relative_strength: f32 },
}

/// Durations and thresholds the machine needs, fixed at spawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MachineTiming {
    pub stagger_duration: f32,
    pub charge_duration: f32,
    pub dash_duration: f32,
    pub perfect_parry_window: f32,
    pub exhaustion_recovery: f32,
    pub min_strike_ratio: f32,
}

impl MachineTiming {
    pub fn new(preset: &CharacterPreset, config: &CombatConfig) -> Self {
        Self {
            stagger_duration: preset.stagger_duration,
            charge_duration: preset.charge_duration,
            dash_duration: config.dash_duration,
            perfect_parry_window: config.perfect_parry_window,
            exhaustion_recovery: config.exhaustion_recovery,
            min_strike_ratio: config.min_strike_ratio,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StateMachine {
    state: CharacterState,
    /// Time spent in the current state.
    age: f32,
    dash_armed: bool,
    dash_angle: f32,
    /// Set at zero stamina, cleared at the recovery floor.
    exhausted: bool,
    timing: MachineTiming,
}

impl StateMachine {
    pub fn new(timing: MachineTiming) -> Self {
        Self {
            state: CharacterState::Idle,
            age: 0.0,
            dash_armed: true,
            dash_angle: 0.0,
            exhausted: false,
            timing,
        }
    }

    pub fn state(&self) -> CharacterState {
        self.state
    }

    /// Time spent in the current state.
    pub fn age(&self) -> f32 {
        self.age
    }

    pub fn timing(&self) -> &MachineTiming {
        &self.timing
    }

    fn enter(&mut self, state: CharacterState) {
        if self.state != state {
            tracing::trace!(from = %self.state, to = %state, "state transition");
        }
        self.state = state;
        self.age = 0.0;
    }

    /// Advances timers and picks this tick's state.
    pub fn cycle(&mut self, controls: &Controls, stamina: f32, elapsed: f32) -> Option<MachineAction> {
        self.age += elapsed.max(0.0);
        if !controls.dash {
            self.dash_armed = true;
        }

        if stamina <= 0.0 {
            self.exhausted = true;
        } else if self.exhausted && stamina >= self.timing.exhaustion_recovery {
            self.exhausted = false;
        }

        // Forced states first
        if self.state == CharacterState::Staggered {
            if self.age < self.timing.stagger_duration {
                return None;
            }
            self.enter(CharacterState::Idle);
        }

        if self.exhausted {
            if self.state != CharacterState::Exhausted {
                self.enter(CharacterState::Exhausted);
            }
            return None;
        }
        if self.state == CharacterState::Exhausted {
            self.enter(CharacterState::Idle);
        }

        if self.state == CharacterState::Dashing {
            if self.age < self.timing.dash_duration {
                return None;
            }
            self.enter(CharacterState::Idle);
        }

        if controls.dash && self.dash_armed {
            self.dash_armed = false;
            self.dash_angle = controls.angle;
            self.enter(CharacterState::Dashing);
            return Some(MachineAction::Dash {
                angle: controls.angle,
            });
        }

        if controls.shield {
            if self.state != CharacterState::Shielding {
                self.enter(CharacterState::Shielding);
            }
            return None;
        }

        if controls.attack {
            if self.state != CharacterState::Charging {
                self.enter(CharacterState::Charging);
            }
            return None;
        }

        if self.state == CharacterState::Charging {
            let relative_strength = self.charge_ratio();
            self.enter(CharacterState::Idle);
            return Some(MachineAction::Strike { relative_strength });
        }

        if self.state != CharacterState::Idle {
            self.enter(CharacterState::Idle);
        }
        None
    }

    /// Forces the stagger state after an unblocked hit.
    ///
    /// Returns `false` if the character is already staggered.
    pub fn stagger(&mut self) -> bool {
        if self.state == CharacterState::Staggered {
            return false;
        }
        self.enter(CharacterState::Staggered);
        true
    }

    /// Relative strength a strike released now would carry.
    pub fn charge_ratio(&self) -> f32 {
        if self.state != CharacterState::Charging {
            return 0.0;
        }
        (self.age / self.timing.charge_duration).clamp(self.timing.min_strike_ratio, 1.0)
    }

    /// Multiplier applied to the character's base speed.
    pub fn speed_ratio(&self) -> f32 {
        match self.state {
            CharacterState::Idle => 1.0,
            CharacterState::Charging | CharacterState::Shielding | CharacterState::Exhausted => 0.5,
            // Position is owned by the dash interpolation
            CharacterState::Dashing => 0.0,
            CharacterState::Staggered => 0.0,
        }
    }

    pub fn flags(&self) -> StateFlags {
        let mut flags = StateFlags::empty();
        match self.state {
            CharacterState::Shielding => {
                flags |= StateFlags::SHIELDED;
                if self.age < self.timing.perfect_parry_window {
                    flags |= StateFlags::PERFECT_PARRY;
                }
            }
            CharacterState::Exhausted => flags |= StateFlags::EXHAUSTED,
            CharacterState::Staggered => flags |= StateFlags::STAGGERED,
            CharacterState::Dashing => flags |= StateFlags::DASHING,
            CharacterState::Charging => flags |= StateFlags::CHARGING,
            CharacterState::Idle => {}
        }
        if self.exhausted {
            flags |= StateFlags::EXHAUSTED;
        }
        flags
    }

    pub fn is_shielded(&self) -> bool {
        self.flags().contains(StateFlags::SHIELDED)
    }

    pub fn is_perfect_parry(&self) -> bool {
        self.flags().contains(StateFlags::PERFECT_PARRY)
    }

    /// Whether the character is out of stamina and has not yet recovered,
    /// including while a stagger hides the exhausted state.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn is_dashing(&self) -> bool {
        self.state == CharacterState::Dashing
    }

    /// Angle of the dash in flight, if any.
    pub fn dash_angle(&self) -> Option<f32> {
        self.is_dashing().then_some(self.dash_angle)
    }

    /// Normalized dash progress `age / duration`, if dashing.
    pub fn dash_progress(&self) -> Option<f32> {
        self.is_dashing()
            .then(|| (self.age / self.timing.dash_duration).min(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> StateMachine {
        StateMachine::new(MachineTiming {
            stagger_duration: 0.3,
            charge_duration: 0.5,
            dash_duration: 0.2,
            perfect_parry_window: 0.15,
            exhaustion_recovery: 0.5,
            min_strike_ratio: 0.3,
        })
    }

    fn holding(f: impl FnOnce(&mut Controls)) -> Controls {
        let mut controls = Controls::default();
        f(&mut controls);
        controls
    }

    #[test]
    fn shield_exposes_perfect_parry_window_then_plain_block() {
        let mut sm = machine();
        let shield = holding(|c| c.shield = true);

        assert_eq!(sm.cycle(&shield, 1.0, 0.0), None);
        assert!(sm.is_shielded());
        assert!(sm.is_perfect_parry());

        sm.cycle(&shield, 1.0, 0.1);
        assert!(sm.is_perfect_parry());

        sm.cycle(&shield, 1.0, 0.1);
        assert!(sm.is_shielded());
        assert!(!sm.is_perfect_parry());
        assert_eq!(sm.speed_ratio(), 0.5);

        sm.cycle(&Controls::default(), 1.0, 0.1);
        assert_eq!(sm.state(), CharacterState::Idle);
        assert!(!sm.is_shielded());
    }

    #[test]
    fn dash_runs_full_duration_and_needs_release() {
        let mut sm = machine();
        let dash = holding(|c| {
            c.dash = true;
            c.angle = 1.0;
        });

        assert_eq!(sm.cycle(&dash, 1.0, 0.0), Some(MachineAction::Dash { angle: 1.0 }));
        assert_eq!(sm.dash_angle(), Some(1.0));

        // Controls cannot cancel the dash
        let dash_and_shield = holding(|c| {
            c.dash = true;
            c.shield = true;
        });
        assert_eq!(sm.cycle(&dash_and_shield, 1.0, 0.1), None);
        assert!(sm.is_dashing());
        assert!((sm.dash_progress().unwrap() - 0.5).abs() < 1e-6);

        // Still held: no second dash once the first one ends
        assert_eq!(sm.cycle(&dash, 1.0, 0.15), None);
        assert_eq!(sm.state(), CharacterState::Idle);

        sm.cycle(&Controls::default(), 1.0, 0.1);
        assert!(matches!(sm.cycle(&dash, 1.0, 0.1), Some(MachineAction::Dash { .. })));
    }

    #[test]
    fn strike_fires_on_release_with_charge_ratio() {
        let mut sm = machine();
        let attack = holding(|c| c.attack = true);

        sm.cycle(&attack, 1.0, 0.0);
        assert_eq!(sm.state(), CharacterState::Charging);
        sm.cycle(&attack, 1.0, 0.25);
        assert!((sm.charge_ratio() - 0.5).abs() < 1e-6);

        match sm.cycle(&Controls::default(), 1.0, 0.0) {
            Some(MachineAction::Strike { relative_strength }) => {
                assert!((relative_strength - 0.5).abs() < 1e-6)
            }
            other => panic!("expected strike, got {other:?}"),
        }
        assert_eq!(sm.state(), CharacterState::Idle);
    }

    #[test]
    fn quick_tap_strikes_with_minimum_ratio_and_full_charge_caps() {
        let mut sm = machine();
        let attack = holding(|c| c.attack = true);

        sm.cycle(&attack, 1.0, 0.0);
        assert_eq!(
            sm.cycle(&Controls::default(), 1.0, 0.01),
            Some(MachineAction::Strike { relative_strength: 0.3 })
        );

        sm.cycle(&attack, 1.0, 0.0);
        sm.cycle(&attack, 1.0, 2.0);
        assert_eq!(
            sm.cycle(&Controls::default(), 1.0, 0.0),
            Some(MachineAction::Strike { relative_strength: 1.0 })
        );
    }

    #[test]
    fn stagger_is_forced_and_not_reentrant() {
        let mut sm = machine();
        let dash = holding(|c| c.dash = true);
        sm.cycle(&dash, 1.0, 0.0);

        assert!(sm.stagger());
        assert!(!sm.stagger());
        assert!(!sm.is_dashing());
        assert_eq!(sm.speed_ratio(), 0.0);

        let attack = holding(|c| c.attack = true);
        sm.cycle(&attack, 1.0, 0.2);
        assert_eq!(sm.state(), CharacterState::Staggered);
        sm.cycle(&attack, 1.0, 0.2);
        assert_eq!(sm.state(), CharacterState::Charging);
    }

    #[test]
    fn exhaustion_blocks_actions_until_recovery_floor() {
        let mut sm = machine();
        let dash = holding(|c| c.dash = true);

        assert_eq!(sm.cycle(&dash, 0.0, 0.1), None);
        assert!(sm.is_exhausted());
        assert!(sm.flags().contains(StateFlags::EXHAUSTED));

        assert_eq!(sm.cycle(&dash, 0.4, 0.1), None);
        assert!(sm.is_exhausted());

        sm.cycle(&Controls::default(), 0.6, 0.1);
        assert_eq!(sm.state(), CharacterState::Idle);
    }

    #[test]
    fn stagger_taken_while_exhausted_returns_to_exhaustion() {
        let mut sm = machine();
        sm.cycle(&Controls::default(), 0.0, 0.1);
        sm.cycle(&Controls::default(), 0.3, 0.1);
        assert!(sm.is_exhausted());

        assert!(sm.stagger());
        assert_eq!(sm.state(), CharacterState::Staggered);
        assert!(sm.is_exhausted());
        assert!(sm.flags().contains(StateFlags::EXHAUSTED | StateFlags::STAGGERED));

        // Stagger wears off below the recovery floor
        let dash = holding(|c| c.dash = true);
        assert_eq!(sm.cycle(&dash, 0.35, 0.4), None);
        assert_eq!(sm.state(), CharacterState::Exhausted);

        sm.cycle(&Controls::default(), 0.5, 0.1);
        assert_eq!(sm.state(), CharacterState::Idle);
        assert!(!sm.is_exhausted());
    }

    #[test]
    fn shield_beats_charge() {
        let mut sm = machine();
        let both = holding(|c| {
            c.attack = true;
            c.shield = true;
        });
        sm.cycle(&both, 1.0, 0.0);
        assert_eq!(sm.state(), CharacterState::Shielding);
    }
}
