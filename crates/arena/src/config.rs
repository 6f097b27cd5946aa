//! Arena run configuration.
use std::env;
use std::path::PathBuf;

/// Settings of one headless arena run.
#[derive(Clone, Debug, PartialEq)]
pub struct ArenaConfig {
    /// Upper bound on simulated ticks.
    pub ticks: u64,
    /// Ticks per simulated time unit.
    pub tick_rate: f32,
    /// Regular enemies in the opening wave.
    pub enemies: usize,
    /// Tick at which the King joins the fight.
    pub boss_after: u64,
    /// Combat tunables; the bundled `config.toml` when unset.
    pub config_path: Option<PathBuf>,
    /// Enemy roster; the bundled `roster.ron` when unset.
    pub roster_path: Option<PathBuf>,
}

impl ArenaConfig {
    /// Construct arena configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_TICKS` - Maximum ticks to simulate (default: 3600)
    /// - `ARENA_TICK_RATE` - Ticks per time unit (default: 60)
    /// - `ARENA_ENEMIES` - Size of the opening wave (default: 4)
    /// - `ARENA_BOSS_AFTER` - Tick at which the King activates (default: 600)
    /// - `ARENA_CONFIG` - Path to a combat config TOML
    /// - `ARENA_ROSTER` - Path to an enemy roster RON
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ticks) = read_env::<u64>("ARENA_TICKS") {
            config.ticks = ticks;
        }
        if let Some(rate) = read_env::<f32>("ARENA_TICK_RATE").filter(|rate| *rate > 0.0) {
            config.tick_rate = rate;
        }
        if let Some(enemies) = read_env::<usize>("ARENA_ENEMIES") {
            config.enemies = enemies;
        }
        if let Some(boss_after) = read_env::<u64>("ARENA_BOSS_AFTER") {
            config.boss_after = boss_after;
        }
        config.config_path = read_env::<PathBuf>("ARENA_CONFIG");
        config.roster_path = read_env::<PathBuf>("ARENA_ROSTER");

        config
    }

    /// Simulated time covered by one tick.
    pub fn tick_duration(&self) -> f32 {
        1.0 / self.tick_rate
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            ticks: 3600,
            tick_rate: 60.0,
            enemies: 4,
            boss_after: 600,
            config_path: None,
            roster_path: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
