//! Stat presets consumed by the spawner.
//!
//! Enemy variety comes from tagged [`Loadout`]s rather than per-type code: a
//! loadout lists the weapon and armor pieces an enemy carries, and
//! [`CharacterPreset::enemy`] derives every stat from those tags.

use arrayvec::ArrayVec;

use super::CharacterKind;
use crate::error::{ErrorSeverity, GameError};

/// Cosmetic pieces scattered by the presentation layer when a character dies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gib {
    Stick,
    Sword,
    Shield,
    Axe,
}

pub const MAX_GIBS: usize = 4;

pub type Gibs = ArrayVec<Gib, MAX_GIBS>;

/// Equipment tags of an enemy type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Loadout {
    pub stick: bool,
    pub sword: bool,
    pub axe: bool,
    pub shield: bool,
    pub armor: bool,
    pub super_armor: bool,
    /// Strikes chained during one aggressive phase.
    pub attack_count: u32,
}

impl Loadout {
    const NONE: Self = Self {
        stick: false,
        sword: false,
        axe: false,
        shield: false,
        armor: false,
        super_armor: false,
        attack_count: 0,
    };

    pub const STICK: Self = Self {
        stick: true,
        attack_count: 3,
        ..Self::NONE
    };
    pub const AXE: Self = Self {
        axe: true,
        attack_count: 1,
        ..Self::NONE
    };
    pub const SWORD: Self = Self {
        sword: true,
        attack_count: 2,
        ..Self::NONE
    };
    pub const AXE_SHIELD_ARMOR: Self = Self {
        shield: true,
        armor: true,
        ..Self::AXE
    };
    pub const SWORD_ARMOR: Self = Self {
        armor: true,
        ..Self::SWORD
    };
    pub const SWORD_SHIELD_ARMOR: Self = Self {
        shield: true,
        armor: true,
        ..Self::SWORD
    };
    pub const SWORD_SHIELD_TANK: Self = Self {
        shield: true,
        super_armor: true,
        ..Self::SWORD
    };
    pub const AXE_SHIELD_TANK: Self = Self {
        shield: true,
        super_armor: true,
        ..Self::AXE
    };
    /// Final boss: a shielded, super-armored swordsman chaining three strikes.
    pub const KING: Self = Self {
        attack_count: 3,
        ..Self::SWORD_SHIELD_TANK
    };

    /// The stock enemy roster, strongest first.
    pub const STOCK: [(&'static str, Self); 8] = [
        ("axe_shield_tank", Self::AXE_SHIELD_TANK),
        ("axe_shield_armor", Self::AXE_SHIELD_ARMOR),
        ("stick", Self::STICK),
        ("axe", Self::AXE),
        ("sword", Self::SWORD),
        ("sword_armor", Self::SWORD_ARMOR),
        ("sword_shield_armor", Self::SWORD_SHIELD_ARMOR),
        ("sword_shield_tank", Self::SWORD_SHIELD_TANK),
    ];

    /// Damage reduction tag in `[0, 1]`; shortens stagger and raises health.
    pub fn protection(&self) -> f32 {
        // Summed in tenths so stacked pieces land on exact values
        let tenths = [(self.shield, 3), (self.armor, 5), (self.super_armor, 7)]
            .into_iter()
            .filter(|(carried, _)| *carried)
            .map(|(_, tenths)| tenths)
            .sum::<u32>();
        tenths.min(10) as f32 / 10.0
    }

    /// Encumbrance in `[0, 1]`; slows the character down.
    pub fn weight(&self) -> f32 {
        let tenths = [
            (self.armor, 2),
            (self.super_armor, 3),
            (self.axe, 1),
            (self.sword, 3),
            (self.shield, 3),
        ]
        .into_iter()
        .filter(|(carried, _)| *carried)
        .map(|(_, tenths)| tenths)
        .sum::<u32>();
        tenths.min(10) as f32 / 10.0
    }

    pub fn gibs(&self) -> Gibs {
        let mut gibs = Gibs::new();
        let pieces = [
            (self.stick, Gib::Stick),
            (self.sword, Gib::Sword),
            (self.shield, Gib::Shield),
            (self.axe, Gib::Axe),
        ];
        for (carried, gib) in pieces {
            if carried {
                gibs.push(gib);
            }
        }
        gibs
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Everything the spawner needs to build a character.
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterPreset {
    pub kind: CharacterKind,
    pub max_health: f32,
    /// Damage dealt by a fully charged strike.
    pub strength: f32,
    pub base_speed: f32,
    pub strike_radius_x: f32,
    pub strike_radius_y: f32,
    /// Lunge targeting reach; zero disables lunging.
    pub magnet_radius_x: f32,
    pub magnet_radius_y: f32,
    pub collision_radius: f32,
    pub protection: f32,
    pub stagger_duration: f32,
    pub charge_duration: f32,
    pub aggression: u32,
    pub loadout: Loadout,
    pub gibs: Gibs,
}

impl CharacterPreset {
    pub const DEFAULT_STRIKE_RADIUS_X: f32 = 80.0;
    pub const DEFAULT_STRIKE_RADIUS_Y: f32 = 40.0;
    pub const DEFAULT_COLLISION_RADIUS: f32 = 30.0;

    /// The hero.
    pub fn player() -> Self {
        Self {
            kind: CharacterKind::Player,
            max_health: 100.0,
            strength: 25.0,
            base_speed: 200.0,
            strike_radius_x: Self::DEFAULT_STRIKE_RADIUS_X,
            strike_radius_y: Self::DEFAULT_STRIKE_RADIUS_Y,
            magnet_radius_x: 250.0,
            magnet_radius_y: 125.0,
            collision_radius: Self::DEFAULT_COLLISION_RADIUS,
            protection: 0.0,
            stagger_duration: 0.2,
            charge_duration: 0.4,
            aggression: 0,
            loadout: Loadout {
                sword: true,
                shield: true,
                ..Loadout::NONE
            },
            gibs: Gibs::from_iter([Gib::Sword, Gib::Shield]),
        }
    }

    /// Derives an enemy's stats from its equipment tags.
    pub fn enemy(loadout: &Loadout) -> Self {
        let protection = loadout.protection();
        let strength = if loadout.axe {
            40.0
        } else if loadout.sword {
            30.0
        } else {
            10.0
        };

        let mut aggression = 1;
        if loadout.sword {
            aggression += 1;
        }
        if loadout.axe {
            aggression += 2;
        }

        Self {
            kind: CharacterKind::Enemy,
            max_health: lerp(100.0, 400.0, protection).floor(),
            strength,
            base_speed: lerp(120.0, 50.0, loadout.weight()),
            strike_radius_x: Self::DEFAULT_STRIKE_RADIUS_X,
            strike_radius_y: Self::DEFAULT_STRIKE_RADIUS_Y,
            magnet_radius_x: 0.0,
            magnet_radius_y: 0.0,
            collision_radius: Self::DEFAULT_COLLISION_RADIUS,
            protection,
            stagger_duration: (1.0 - protection) * 0.3,
            charge_duration: 0.5,
            aggression,
            loadout: *loadout,
            gibs: loadout.gibs(),
        }
    }

    pub fn with_max_health(mut self, max_health: f32) -> Self {
        self.max_health = max_health;
        self
    }

    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_magnet(mut self, radius_x: f32, radius_y: f32) -> Self {
        self.magnet_radius_x = radius_x;
        self.magnet_radius_y = radius_y;
        self
    }

    /// Rejects presets that would break resource or geometry invariants.
    pub fn validate(&self) -> Result<(), PresetError> {
        if !(self.max_health > 0.0) {
            return Err(PresetError::NonPositiveHealth(self.max_health));
        }
        let non_negative = [
            ("strength", self.strength),
            ("base_speed", self.base_speed),
            ("magnet_radius_x", self.magnet_radius_x),
            ("magnet_radius_y", self.magnet_radius_y),
            ("collision_radius", self.collision_radius),
            ("stagger_duration", self.stagger_duration),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(PresetError::Negative { field, value });
            }
        }
        if !(self.strike_radius_x > 0.0 && self.strike_radius_y > 0.0) {
            return Err(PresetError::EmptyStrikeZone {
                radius_x: self.strike_radius_x,
                radius_y: self.strike_radius_y,
            });
        }
        if !(self.charge_duration > 0.0) {
            return Err(PresetError::Negative {
                field: "charge_duration",
                value: self.charge_duration,
            });
        }
        if !(0.0..=1.0).contains(&self.protection) {
            return Err(PresetError::ProtectionOutOfRange(self.protection));
        }
        Ok(())
    }
}

/// Error raised when a preset cannot be spawned.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PresetError {
    #[error("max health must be positive, got {0}")]
    NonPositiveHealth(f32),

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("strike ellipse {radius_x}x{radius_y} has no area")]
    EmptyStrikeZone { radius_x: f32, radius_y: f32 },

    #[error("protection must lie in [0, 1], got {0}")]
    ProtectionOutOfRange(f32),
}

impl GameError for PresetError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveHealth(_) => "PRESET_NON_POSITIVE_HEALTH",
            Self::Negative { .. } => "PRESET_NEGATIVE",
            Self::EmptyStrikeZone { .. } => "PRESET_EMPTY_STRIKE_ZONE",
            Self::ProtectionOutOfRange(_) => "PRESET_PROTECTION_OUT_OF_RANGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_roster_presets_are_valid() {
        for (name, loadout) in Loadout::STOCK {
            let preset = CharacterPreset::enemy(&loadout);
            assert_eq!(preset.validate(), Ok(()), "{name}");
        }
        assert_eq!(CharacterPreset::player().validate(), Ok(()));
    }

    #[test]
    fn enemy_stats_follow_equipment() {
        let stick = CharacterPreset::enemy(&Loadout::STICK);
        assert_eq!(stick.max_health, 100.0);
        assert_eq!(stick.strength, 10.0);
        assert_eq!(stick.base_speed, 120.0);
        assert!((stick.stagger_duration - 0.3).abs() < 1e-6);
        assert_eq!(stick.gibs.as_slice(), &[Gib::Stick]);

        let tank = CharacterPreset::enemy(&Loadout::AXE_SHIELD_TANK);
        assert_eq!(tank.protection, 1.0);
        assert_eq!(tank.max_health, 400.0);
        assert_eq!(tank.strength, 40.0);
        assert_eq!(tank.aggression, 3);
        assert_eq!(tank.stagger_duration, 0.0);
        assert_eq!(tank.gibs.as_slice(), &[Gib::Shield, Gib::Axe]);

        let armored = CharacterPreset::enemy(&Loadout::SWORD_ARMOR);
        assert_eq!(armored.max_health, 250.0);
        assert_eq!(armored.aggression, 2);
    }

    #[test]
    fn invalid_presets_are_rejected() {
        let preset = CharacterPreset::player().with_max_health(0.0);
        assert_eq!(preset.validate(), Err(PresetError::NonPositiveHealth(0.0)));

        let mut preset = CharacterPreset::player();
        preset.strike_radius_y = 0.0;
        assert!(matches!(
            preset.validate(),
            Err(PresetError::EmptyStrikeZone { .. })
        ));
    }
}
