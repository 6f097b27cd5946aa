use super::damage::{calculate_damage, damage_stamina_loss, knockback_distance, parry_stamina_loss};
use super::result::StrikeOutcome;
use crate::character::{Character, EntityId, Motion, MotionKind};
use crate::config::CombatConfig;
use crate::geometry::{Point, facing_sign};
use crate::presentation::{Presentation, PresentationEvent, Sound};
use crate::stats::Combo;
use crate::targeting::{select_target, strikability};
use crate::world::Roster;

/// Animation time reported for instantaneous knockbacks.
const KNOCKBACK_ANIMATION: f32 = 0.1;

/// Resolves one strike released by `attacker`.
///
/// Never kills: a hit that empties the victim's health reports
/// `killed: true` and the caller runs the death sequence.
pub(crate) fn resolve_strike<P>(
    roster: &mut Roster,
    config: &CombatConfig,
    presentation: &mut P,
    attacker: EntityId,
    relative_strength: f32,
) -> StrikeOutcome
where
    P: Presentation + ?Sized,
{
    let Some(a) = roster.index_of(attacker) else {
        return StrikeOutcome::Blocked;
    };
    {
        let character = roster.at(a);
        if !character.is_alive() || character.state_machine().is_exhausted() || character.stamina().is_empty() {
            tracing::trace!(entity = %attacker, "strike blocked");
            return StrikeOutcome::Blocked;
        }
    }

    let relative_strength = if relative_strength > 0.0 {
        relative_strength.min(1.0)
    } else {
        tracing::warn!(entity = %attacker, relative_strength, "invalid strike strength, using minimum");
        config.min_strike_ratio
    };

    let target_team = roster.at(a).target_team();
    let candidates = roster.candidates(target_team);

    lunge(roster.at_mut(a), &candidates, config, presentation);

    let (origin, aim, zone) = {
        let character = roster.at_mut(a);
        let step_angle = character.position.angle_to(character.controls.aim);
        character.position = character.position.offset(step_angle, config.strike_step);
        character.lose_stamina(config.strike_stamina);
        (
            character.position,
            character.controls.aim,
            character.strike_zone(config.strike_fov),
        )
    };

    let Some((victim, score)) = select_target(origin, aim, candidates.iter().copied(), zone) else {
        tracing::trace!(entity = %attacker, "strike whiffed");
        return StrikeOutcome::Whiff;
    };
    tracing::debug!(attacker = %attacker, victim = %victim, score, relative_strength, "strike connects");

    let Some(v) = roster.index_of(victim) else {
        return StrikeOutcome::Whiff;
    };

    if roster.at(v).state_machine().is_shielded() {
        parry(roster, a, v, relative_strength, config, presentation)
    } else {
        hit(roster, a, v, relative_strength, config, presentation)
    }
}

/// Pulls the attacker next to the best target in its magnet zone.
///
/// Only fires when that target is out of regular strike reach.
fn lunge<P>(attacker: &mut Character, candidates: &[(EntityId, Point)], config: &CombatConfig, presentation: &mut P)
where
    P: Presentation + ?Sized,
{
    let magnet = attacker.magnet_zone(config.lunge_fov);
    if magnet.is_empty() {
        return;
    }

    let origin = attacker.position;
    let aim = attacker.controls.aim;
    let Some((target, _)) = select_target(origin, aim, candidates.iter().copied(), magnet) else {
        return;
    };
    let Some(&(_, target_position)) = candidates.iter().find(|(id, _)| *id == target) else {
        return;
    };
    if strikability(origin, aim, target_position, attacker.strike_zone(config.strike_fov)) > 0.0 {
        return;
    }

    let distance = origin.distance(target_position) - attacker.stats().collision_radius;
    if distance <= 0.0 {
        return;
    }
    let to = origin.offset(origin.angle_to(target_position), distance);
    attacker.position = to;
    // Land facing the target so the strike aims at it
    attacker.controls.aim = target_position;
    tracing::debug!(entity = %attacker.id(), target = %target, distance, "lunge");
    presentation.request(PresentationEvent::Knockback {
        entity: attacker.id(),
        to,
        duration: config.dash_duration,
    });
}

fn parry<P>(
    roster: &mut Roster,
    a: usize,
    v: usize,
    relative_strength: f32,
    config: &CombatConfig,
    presentation: &mut P,
) -> StrikeOutcome
where
    P: Presentation + ?Sized,
{
    let Some((attacker, victim)) = roster.pair_mut(a, v) else {
        return StrikeOutcome::Whiff;
    };
    let perfect = victim.state_machine().is_perfect_parry();

    let dx = attacker.position.x - victim.position.x;
    if dx != 0.0 {
        victim.facing = facing_sign(dx);
    }

    let away = victim.position.angle_to(attacker.position);
    attacker.position = attacker.position.offset(away, config.parry_knockback);
    presentation.request(PresentationEvent::Knockback {
        entity: attacker.id(),
        to: attacker.position,
        duration: KNOCKBACK_ANIMATION,
    });
    presentation.request(PresentationEvent::ShieldBlock {
        entity: victim.id(),
        at: victim.position,
    });
    presentation.request(PresentationEvent::Sound {
        sound: Sound::Shield,
        at: victim.position,
    });

    let victim_id = victim.id();
    if !perfect {
        victim.lose_stamina(parry_stamina_loss(relative_strength, config));
        show_label(victim, "Parry", presentation);
        tracing::debug!(entity = %victim_id, "parry");
        return StrikeOutcome::Parried { victim: victim_id };
    }

    victim.stamina.restore_full();
    victim.update_combo(1, "Perfect Parry!");
    show_label(victim, "Perfect Parry!", presentation);
    presentation.request(PresentationEvent::PerfectParry {
        entity: victim_id,
        at: victim.position,
    });
    presentation.request(PresentationEvent::Sound {
        sound: Sound::PerfectParry,
        at: victim.position,
    });

    let center = victim.position;
    let zone = (victim.stats().strike_radius_x, victim.stats().strike_radius_y);
    let team = victim.target_team();

    let mut riposted = Vec::new();
    for character in roster.iter_mut() {
        if !character.is_alive()
            || character.team() != team
            || !center.is_within_radii(character.position, zone.0, zone.1)
        {
            continue;
        }
        let from = character.position;
        let to = from.offset(center.angle_to(from), config.riposte_knockback);
        character.motion = Some(Motion::new(MotionKind::Knockback, from, to, config.riposte_duration));
        character.lose_stamina(config.riposte_stamina);
        presentation.request(PresentationEvent::Knockback {
            entity: character.id(),
            to,
            duration: config.riposte_duration,
        });
        riposted.push(character.id());
    }
    tracing::debug!(entity = %victim_id, riposted = riposted.len(), "perfect parry");

    StrikeOutcome::PerfectParry {
        victim: victim_id,
        riposted,
    }
}

fn hit<P>(
    roster: &mut Roster,
    a: usize,
    v: usize,
    relative_strength: f32,
    config: &CombatConfig,
    presentation: &mut P,
) -> StrikeOutcome
where
    P: Presentation + ?Sized,
{
    let Some((attacker, victim)) = roster.pair_mut(a, v) else {
        return StrikeOutcome::Whiff;
    };

    let damage = calculate_damage(attacker.stats().strength, relative_strength);
    let now = victim.age;
    let applied = victim.health.damage(damage, now);

    // An exhausted victim has no reserve left to pay with
    if !victim.state_machine().is_exhausted() {
        let loss = damage_stamina_loss(applied, victim.health().maximum(), config);
        victim.lose_stamina(loss);
    }
    victim.update_combo(Combo::RESET, "Ouch!");

    let angle = attacker.position.angle_to(victim.position);
    victim.position = victim.position.offset(angle, knockback_distance(applied, config));
    victim.motion = None;
    victim.machine.stagger();
    presentation.request(PresentationEvent::Knockback {
        entity: victim.id(),
        to: victim.position,
        duration: KNOCKBACK_ANIMATION,
    });

    attacker.update_combo(1, "Hit");

    show_label(victim, format!("-{}", applied.round()), presentation);
    presentation.request(PresentationEvent::Hit {
        entity: victim.id(),
        at: victim.position,
        damage: applied,
    });
    presentation.request(PresentationEvent::Sound {
        sound: Sound::Hit,
        at: victim.position,
    });

    let killed = victim.health().is_depleted();
    tracing::debug!(
        attacker = %attacker.id(),
        victim = %victim.id(),
        damage = applied,
        health = victim.health().current(),
        killed,
        "hit"
    );
    StrikeOutcome::Hit {
        victim: victim.id(),
        damage: applied,
        killed,
    }
}

fn show_label<P>(character: &mut Character, text: impl Into<String>, presentation: &mut P)
where
    P: Presentation + ?Sized,
{
    let text = character.show_label(text).text.clone();
    presentation.request(PresentationEvent::Label {
        entity: character.id(),
        text,
    });
}
