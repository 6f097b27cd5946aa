//! Damage and knockback formulas.

use crate::config::CombatConfig;

/// Health removed by a strike.
///
/// ```text
/// damage = strength * relative_strength
/// ```
pub fn calculate_damage(strength: f32, relative_strength: f32) -> f32 {
    (strength * relative_strength).max(0.0)
}

/// Distance a victim is pushed along the attack angle.
///
/// ```text
/// knockback = min(damage * knockback_per_damage, max_knockback)
/// ```
pub fn knockback_distance(damage: f32, config: &CombatConfig) -> f32 {
    (damage * config.knockback_per_damage).min(config.max_knockback)
}

/// Stamina lost by the victim of a hit, as a share of its health pool.
///
/// ```text
/// loss = damage_stamina_ratio * damage / max_health
/// ```
pub fn damage_stamina_loss(damage: f32, max_health: f32, config: &CombatConfig) -> f32 {
    if max_health <= 0.0 {
        return 0.0;
    }
    config.damage_stamina_ratio * damage / max_health
}

/// Stamina a regular parry costs the defender.
pub fn parry_stamina_loss(relative_strength: f32, config: &CombatConfig) -> f32 {
    config.parry_stamina * relative_strength
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_scales_with_charge() {
        assert_eq!(calculate_damage(100.0, 0.5), 50.0);
        assert_eq!(calculate_damage(40.0, 1.0), 40.0);
        assert_eq!(calculate_damage(40.0, -1.0), 0.0);
    }

    #[test]
    fn knockback_is_capped() {
        let config = CombatConfig::default();
        assert_eq!(knockback_distance(20.0, &config), 30.0);
        assert_eq!(knockback_distance(100.0, &config), config.max_knockback);
    }

    #[test]
    fn stamina_loss_scales_with_health_pool() {
        let config = CombatConfig::default();
        let light = damage_stamina_loss(50.0, 100.0, &config);
        let heavy = damage_stamina_loss(50.0, 400.0, &config);
        assert!((light - 0.15).abs() < 1e-6);
        assert!(heavy < light);
        assert_eq!(damage_stamina_loss(10.0, 0.0, &config), 0.0);
    }
}
