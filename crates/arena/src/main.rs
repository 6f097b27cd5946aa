//! Headless arena binary.
//!
//! Pits a scripted hero against a wave of enemies drawn from the roster and
//! brings in the King partway through by swapping its controller, then logs
//! how the fight went.
//!
//! ```bash
//! RUST_LOG=game_core=debug ARENA_ENEMIES=6 cargo run -p arena
//! ```
mod config;

use anyhow::{Context, Result};
use config::ArenaConfig;
use game_content::{ConfigLoader, ContentFactory, RosterLoader};
use game_core::{
    CharacterPreset, EntityId, GameError, InputController, InputHandle, Loadout, Point, RecordingPresentation,
    StrikeOutcome, Team, World, duelist_routine, enemy_routine,
};

/// Distance from the hero at which enemies spawn.
const SPAWN_RING: f32 = 400.0;
/// Charge the hero bot holds before each swing.
const HERO_CHARGE: f32 = 0.3;
/// How long the King's entrance plays in slow motion.
const ENTRANCE_TIME: f32 = 1.0;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ArenaConfig::from_env();
    tracing::info!(?config, "starting arena");

    let factory = ContentFactory::bundled();
    let combat = match &config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => factory.load_config()?,
    };
    let roster = match &config.roster_path {
        Some(path) => RosterLoader::load(path)?,
        None => factory.load_roster()?,
    };
    anyhow::ensure!(!roster.is_empty(), "enemy roster is empty");

    let mut world = World::new(combat, RecordingPresentation::new()).context("failed to build world")?;

    let hero_bot = world.ai_controller(duelist_routine(HERO_CHARGE));
    let hero = world.spawn(&CharacterPreset::player(), Point::ORIGIN, Some(hero_bot))?;
    world.set_affected_by_speed_ratio(hero, false)?;

    for index in 0..config.enemies {
        let (name, loadout) = &roster[index % roster.len()];
        let angle = index as f32 * std::f32::consts::TAU / config.enemies as f32;
        let id = world.spawn_enemy(loadout, Point::ORIGIN.offset(angle, SPAWN_RING))?;
        tracing::info!(entity = %id, loadout = %name, "enemy joins the wave");
    }

    // The King waits motionless until its entrance
    let king = world.spawn(
        &CharacterPreset::enemy(&Loadout::KING),
        Point::new(0.0, -SPAWN_RING * 1.5),
        Some(Box::new(InputController::new(InputHandle::new()))),
    )?;

    let tick_duration = config.tick_duration();
    let entrance_ticks = (ENTRANCE_TIME / tick_duration).ceil() as u64;
    let mut slow_motion_until = None;
    let mut hero_fell = None;

    for tick in 0..config.ticks {
        if tick == config.boss_after {
            let routine = world.ai_controller(enemy_routine(&Loadout::KING));
            match world.set_controller(king, routine) {
                Ok(()) => {
                    world.set_speed_ratio(0.5);
                    slow_motion_until = Some(tick + entrance_ticks);
                    tracing::info!(entity = %king, tick, "the King enters the fight");
                }
                // Killed by a stray swing before its entrance
                Err(err) if err.severity().is_recoverable() => {
                    tracing::warn!(
                        entity = %king,
                        code = err.error_code(),
                        severity = %err.severity(),
                        %err,
                        "the King could not enter"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }
        if slow_motion_until == Some(tick) {
            world.set_speed_ratio(1.0);
        }

        let report = world.tick(tick_duration);
        for (attacker, outcome) in &report.strikes {
            log_strike(*attacker, outcome);
        }
        if report.deaths.contains(&hero) {
            hero_fell = Some(tick);
            break;
        }
        if world.team(Team::Enemy).count() == 0 {
            tracing::info!(tick, "every enemy is down");
            break;
        }
    }

    summarize(&world, hero, hero_fell);
    Ok(())
}

fn log_strike(attacker: EntityId, outcome: &StrikeOutcome) {
    match outcome {
        StrikeOutcome::Hit {
            victim,
            damage,
            killed,
        } => tracing::info!(%attacker, %victim, damage, killed, "hit"),
        StrikeOutcome::Parried { victim } => tracing::info!(%attacker, %victim, "parried"),
        StrikeOutcome::PerfectParry { victim, riposted } => {
            tracing::info!(%attacker, %victim, riposted = riposted.len(), "perfect parry")
        }
        StrikeOutcome::Whiff | StrikeOutcome::Blocked => tracing::debug!(%attacker, ?outcome, "no contact"),
    }
}

fn summarize(world: &World<RecordingPresentation>, hero: EntityId, hero_fell: Option<u64>) {
    let survivors = world.team(Team::Enemy).count();
    let deaths = world.presentation().deaths().count();
    match (world.character(hero), hero_fell) {
        (Some(hero), _) => tracing::info!(
            ticks = world.ticks(),
            health = hero.health().current(),
            combo = hero.combo().value(),
            survivors,
            deaths,
            "arena finished, hero standing"
        ),
        (None, tick) => tracing::info!(ticks = world.ticks(), fell_at = ?tick, survivors, deaths, "arena finished, hero fell"),
    }
}
