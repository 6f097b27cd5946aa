//! Health, stamina and combo meters.
//!
//! Each meter remembers the simulation age of its last relevant event so the
//! world can run decay and regeneration windows:
//! - Health: last damage (hit flash)
//! - Stamina: last loss (regeneration cooldown)
//! - Combo: last change (reset window)

/// Rejects NaN and negative inputs, logging the programming fault.
fn sanitize(amount: f32, what: &'static str) -> f32 {
    if amount.is_nan() || amount < 0.0 {
        tracing::warn!(amount, what, "clamping invalid resource delta to zero");
        0.0
    } else {
        amount
    }
}

// ============================================================================
// Health
// ============================================================================

/// Hit points, clamped to `[0, maximum]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Health {
    current: f32,
    maximum: f32,
    last_damage: Option<f32>,
}

impl Health {
    /// Full health bar of the given size. Non-positive sizes become 1.
    pub fn new(maximum: f32) -> Self {
        let maximum = if maximum > 0.0 { maximum } else { 1.0 };
        Self {
            current: maximum,
            maximum,
            last_damage: None,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    /// Current health as a fraction of the maximum.
    pub fn ratio(&self) -> f32 {
        self.current / self.maximum
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Age at which damage was last taken.
    pub fn last_damage(&self) -> Option<f32> {
        self.last_damage
    }

    /// Removes up to `amount` health and returns what was actually removed.
    pub fn damage(&mut self, amount: f32, now: f32) -> f32 {
        let amount = sanitize(amount, "damage");
        let applied = amount.min(self.current);
        self.current = (self.current - amount).max(0.0);
        self.last_damage = Some(now);
        applied
    }
}

// ============================================================================
// Stamina
// ============================================================================

/// Stamina bar, clamped to `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stamina {
    current: f32,
    last_loss: f32,
}

impl Stamina {
    pub const FULL: f32 = 1.0;

    pub fn full() -> Self {
        Self {
            current: Self::FULL,
            last_loss: 0.0,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    /// Age at which stamina was last lost.
    pub fn last_loss(&self) -> f32 {
        self.last_loss
    }

    pub fn lose(&mut self, amount: f32, now: f32) {
        let amount = sanitize(amount, "stamina loss");
        self.current = (self.current - amount).max(0.0);
        self.last_loss = now;
    }

    pub fn restore_full(&mut self) {
        self.current = Self::FULL;
    }

    pub fn regenerate(&mut self, amount: f32) {
        let amount = sanitize(amount, "stamina regen");
        self.current = (self.current + amount).min(Self::FULL);
    }
}

impl Default for Stamina {
    fn default() -> Self {
        Self::full()
    }
}

// ============================================================================
// Combo
// ============================================================================

/// Consecutive-success counter with the reason of its last change.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combo {
    value: u32,
    last_change: f32,
    reason: String,
}

impl Combo {
    /// Delta large enough to zero any combo.
    pub const RESET: i64 = -99_999;

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Reason of the last change, upper-cased for display.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Age of the last change.
    pub fn last_change(&self) -> f32 {
        self.last_change
    }

    /// Applies `delta`, never going below zero, and restarts the decay window.
    pub fn update(&mut self, delta: i64, reason: &str, now: f32) {
        let value = (i64::from(self.value) + delta).clamp(0, i64::from(u32::MAX));
        self.value = value as u32;
        self.last_change = now;
        self.reason = reason.to_uppercase();
    }

    /// Zeroes the combo if it has not changed for longer than `window`.
    pub fn decay(&mut self, now: f32, window: f32) -> bool {
        if now - self.last_change > window {
            let had_combo = self.value > 0;
            self.update(Self::RESET, "", now);
            had_combo
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_never_goes_negative() {
        let mut health = Health::new(40.0);
        let applied = health.damage(50.0, 1.0);
        assert_eq!(applied, 40.0);
        assert_eq!(health.current(), 0.0);
        assert!(health.is_depleted());
        assert_eq!(health.last_damage(), Some(1.0));
    }

    #[test]
    fn invalid_deltas_are_clamped() {
        let mut health = Health::new(10.0);
        health.damage(-5.0, 0.0);
        assert_eq!(health.current(), 10.0);
        health.damage(f32::NAN, 0.0);
        assert_eq!(health.current(), 10.0);
        assert_eq!(health.damage(3.0, 0.0), 3.0);
        assert_eq!(health.current(), 7.0);

        let mut stamina = Stamina::full();
        stamina.lose(f32::NAN, 0.0);
        assert_eq!(stamina.current(), 1.0);
        stamina.lose(5.0, 2.0);
        assert_eq!(stamina.current(), 0.0);
        assert_eq!(stamina.last_loss(), 2.0);
        stamina.regenerate(7.0);
        assert_eq!(stamina.current(), 1.0);
    }

    #[test]
    fn combo_reset_uses_large_negative_delta() {
        let mut combo = Combo::default();
        combo.update(1, "hit", 0.5);
        combo.update(1, "hit", 0.6);
        assert_eq!(combo.value(), 2);
        assert_eq!(combo.reason(), "HIT");

        combo.update(Combo::RESET, "Ouch!", 1.0);
        assert_eq!(combo.value(), 0);
        assert_eq!(combo.reason(), "OUCH!");
        assert_eq!(combo.last_change(), 1.0);
    }

    #[test]
    fn combo_decays_after_window() {
        let mut combo = Combo::default();
        combo.update(3, "hit", 1.0);
        assert!(!combo.decay(5.5, 5.0));
        assert_eq!(combo.value(), 3);
        assert!(combo.decay(6.5, 5.0));
        assert_eq!(combo.value(), 0);
    }
}
