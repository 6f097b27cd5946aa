//! Combat tunables shared by every component of the simulation.

use core::f32::consts::{FRAC_PI_2, PI};

use crate::error::{ErrorSeverity, GameError};

/// Combat configuration constants and tunable parameters.
///
/// Every time value is expressed in simulation time units (seconds at a
/// speed ratio of 1), every distance in world units, and every stamina value
/// as a fraction of the full bar.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Stamina recovered per time unit once regeneration kicks in.
    pub stamina_regen_rate: f32,
    /// Delay after the last stamina loss before regeneration starts.
    pub stamina_regen_cooldown: f32,
    /// Stamina needed to leave the exhausted state.
    pub exhaustion_recovery: f32,
    /// Combo resets to zero after this long without a change.
    pub combo_window: f32,

    pub dash_distance: f32,
    pub dash_duration: f32,
    pub dash_stamina: f32,

    /// Step taken toward the aim point when a strike is released.
    pub strike_step: f32,
    pub strike_stamina: f32,
    /// Floor for the relative strength of a barely charged strike.
    pub min_strike_ratio: f32,
    pub strike_fov: f32,
    pub lunge_fov: f32,

    /// Window after raising the shield during which a block becomes a riposte.
    pub perfect_parry_window: f32,
    /// Stamina lost by a regular blocker, multiplied by the incoming relative strength.
    pub parry_stamina: f32,
    pub parry_knockback: f32,
    pub riposte_knockback: f32,
    pub riposte_duration: f32,
    pub riposte_stamina: f32,

    /// Knockback distance per point of damage taken.
    pub knockback_per_damage: f32,
    pub max_knockback: f32,
    /// Fraction of the stamina bar lost when taking damage worth `max_health`.
    pub damage_stamina_ratio: f32,
    /// How long a damaged character keeps flashing.
    pub damage_flash: f32,

    /// Stamina drained per time unit while standing in water.
    pub water_drain: f32,

    /// Maximum number of concurrent aggression grants.
    pub aggression_cap: usize,
}

impl CombatConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STAMINA_REGEN_RATE: f32 = 0.3;
    pub const DEFAULT_STAMINA_REGEN_COOLDOWN: f32 = 2.0;
    pub const DEFAULT_EXHAUSTION_RECOVERY: f32 = 0.5;
    pub const DEFAULT_COMBO_WINDOW: f32 = 5.0;
    pub const DEFAULT_DASH_DISTANCE: f32 = 150.0;
    pub const DEFAULT_DASH_DURATION: f32 = 0.2;
    pub const DEFAULT_DASH_STAMINA: f32 = 0.2;
    pub const DEFAULT_STRIKE_STEP: f32 = 5.0;
    pub const DEFAULT_STRIKE_STAMINA: f32 = 0.1;
    pub const DEFAULT_MIN_STRIKE_RATIO: f32 = 0.3;
    pub const DEFAULT_PERFECT_PARRY_WINDOW: f32 = 0.15;
    pub const DEFAULT_PARRY_STAMINA: f32 = 0.3;
    pub const DEFAULT_PARRY_KNOCKBACK: f32 = 20.0;
    pub const DEFAULT_RIPOSTE_KNOCKBACK: f32 = 100.0;
    pub const DEFAULT_RIPOSTE_DURATION: f32 = 0.2;
    pub const DEFAULT_RIPOSTE_STAMINA: f32 = 1.0;
    pub const DEFAULT_KNOCKBACK_PER_DAMAGE: f32 = 1.5;
    pub const DEFAULT_MAX_KNOCKBACK: f32 = 80.0;
    pub const DEFAULT_DAMAGE_STAMINA_RATIO: f32 = 0.3;
    pub const DEFAULT_DAMAGE_FLASH: f32 = 0.1;
    pub const DEFAULT_WATER_DRAIN: f32 = 0.2;
    pub const DEFAULT_AGGRESSION_CAP: usize = 1;

    pub fn new() -> Self {
        Self {
            stamina_regen_rate: Self::DEFAULT_STAMINA_REGEN_RATE,
            stamina_regen_cooldown: Self::DEFAULT_STAMINA_REGEN_COOLDOWN,
            exhaustion_recovery: Self::DEFAULT_EXHAUSTION_RECOVERY,
            combo_window: Self::DEFAULT_COMBO_WINDOW,
            dash_distance: Self::DEFAULT_DASH_DISTANCE,
            dash_duration: Self::DEFAULT_DASH_DURATION,
            dash_stamina: Self::DEFAULT_DASH_STAMINA,
            strike_step: Self::DEFAULT_STRIKE_STEP,
            strike_stamina: Self::DEFAULT_STRIKE_STAMINA,
            min_strike_ratio: Self::DEFAULT_MIN_STRIKE_RATIO,
            strike_fov: PI,
            lunge_fov: FRAC_PI_2,
            perfect_parry_window: Self::DEFAULT_PERFECT_PARRY_WINDOW,
            parry_stamina: Self::DEFAULT_PARRY_STAMINA,
            parry_knockback: Self::DEFAULT_PARRY_KNOCKBACK,
            riposte_knockback: Self::DEFAULT_RIPOSTE_KNOCKBACK,
            riposte_duration: Self::DEFAULT_RIPOSTE_DURATION,
            riposte_stamina: Self::DEFAULT_RIPOSTE_STAMINA,
            knockback_per_damage: Self::DEFAULT_KNOCKBACK_PER_DAMAGE,
            max_knockback: Self::DEFAULT_MAX_KNOCKBACK,
            damage_stamina_ratio: Self::DEFAULT_DAMAGE_STAMINA_RATIO,
            damage_flash: Self::DEFAULT_DAMAGE_FLASH,
            water_drain: Self::DEFAULT_WATER_DRAIN,
            aggression_cap: Self::DEFAULT_AGGRESSION_CAP,
        }
    }

    pub fn with_aggression_cap(mut self, aggression_cap: usize) -> Self {
        self.aggression_cap = aggression_cap;
        self
    }

    /// Checks that every tunable is usable by the simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("dash_duration", self.dash_duration),
            ("riposte_duration", self.riposte_duration),
            ("strike_fov", self.strike_fov),
            ("lunge_fov", self.lunge_fov),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("stamina_regen_rate", self.stamina_regen_rate),
            ("stamina_regen_cooldown", self.stamina_regen_cooldown),
            ("combo_window", self.combo_window),
            ("dash_distance", self.dash_distance),
            ("dash_stamina", self.dash_stamina),
            ("strike_step", self.strike_step),
            ("strike_stamina", self.strike_stamina),
            ("perfect_parry_window", self.perfect_parry_window),
            ("parry_stamina", self.parry_stamina),
            ("parry_knockback", self.parry_knockback),
            ("riposte_knockback", self.riposte_knockback),
            ("riposte_stamina", self.riposte_stamina),
            ("knockback_per_damage", self.knockback_per_damage),
            ("max_knockback", self.max_knockback),
            ("damage_stamina_ratio", self.damage_stamina_ratio),
            ("damage_flash", self.damage_flash),
            ("water_drain", self.water_drain),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }

        let ratios = [
            ("exhaustion_recovery", self.exhaustion_recovery),
            ("min_strike_ratio", self.min_strike_ratio),
        ];
        for (field, value) in ratios {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::OutOfUnitRange { field, value });
            }
        }

        if self.aggression_cap == 0 {
            return Err(ConfigError::ZeroAggressionCap);
        }

        Ok(())
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Error raised when a [`CombatConfig`] contains unusable values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("`{field}` must lie in (0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },

    #[error("aggression cap must allow at least one aggressor")]
    ZeroAggressionCap,
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotPositive { .. } => "CONFIG_NOT_POSITIVE",
            Self::Negative { .. } => "CONFIG_NEGATIVE",
            Self::OutOfUnitRange { .. } => "CONFIG_OUT_OF_UNIT_RANGE",
            Self::ZeroAggressionCap => "CONFIG_ZERO_AGGRESSION_CAP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(CombatConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_cap_and_bad_ratios() {
        let config = CombatConfig::default().with_aggression_cap(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroAggressionCap));

        let config = CombatConfig {
            min_strike_ratio: 1.5,
            ..CombatConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfUnitRange {
                field: "min_strike_ratio",
                ..
            })
        ));

        let config = CombatConfig {
            dash_duration: f32::NAN,
            ..CombatConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { .. })
        ));
    }
}
