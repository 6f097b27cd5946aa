//! Stock task trees.

use behavior_tree::builder::{always_succeed, idle, race, repeat, sequence, timeout, wait};

use super::Task;
use super::tasks::{Attack, BecomeAggressive, BecomePassive, HoldShield, ReachPlayer, RetreatAi};
use crate::character::Loadout;

/// Radius at which an enemy starts queueing for the aggression grant.
pub const APPROACH_RADIUS: f32 = 300.0;
/// Distance an enemy backs off to after its attack run.
pub const RETREAT_RADIUS: f32 = 200.0;
/// How long an enemy waits for the grant, or chases before giving up.
pub const PATIENCE: f32 = 3.0;
pub const ATTACK_CHARGE: f32 = 0.5;

/// The enemy loop.
///
/// ```text
/// repeat:
///   reach the player within 300x300
///   race(become aggressive, timeout 3)       failure restarts the loop
///   try:
///     race(timeout 3, reach strike range)
///     attack x attack_count
///     wait 0.5
///   become passive
///   race(retreat 200x200, wait 2, hold shield | idle)
///   wait 1
/// ```
pub fn enemy_routine(loadout: &Loadout) -> Task {
    let mut engage: Vec<Task> = vec![race(vec![timeout(PATIENCE), Box::new(ReachPlayer::strike_range())])];
    engage.extend((0..loadout.attack_count.max(1)).map(|_| Box::new(Attack::new(ATTACK_CHARGE)) as Task));
    engage.push(wait(0.5));

    let guard: Task = if loadout.shield {
        Box::new(HoldShield::new())
    } else {
        idle()
    };

    repeat(sequence(vec![
        Box::new(ReachPlayer::new(APPROACH_RADIUS, APPROACH_RADIUS)),
        // A grant that frees up on the expiring tick is still taken
        race(vec![Box::new(BecomeAggressive::new()), timeout(PATIENCE)]),
        always_succeed(sequence(engage)),
        Box::new(BecomePassive),
        race(vec![
            Box::new(RetreatAi::new(RETREAT_RADIUS, RETREAT_RADIUS)),
            wait(2.0),
            guard,
        ]),
        wait(1.0),
    ]))
}

/// Chase the nearest opponent and keep swinging; drives the arena's player bot.
pub fn duelist_routine(charge_duration: f32) -> Task {
    repeat(sequence(vec![
        Box::new(ReachPlayer::strike_range()),
        Box::new(Attack::new(charge_duration)),
    ]))
}
