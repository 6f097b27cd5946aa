use game_core::{
    CharacterPreset, CharacterState, CombatConfig, Controls, EntityId, ErrorSeverity, GameError, InputController,
    InputHandle, Loadout, MotionKind, Point, RecordingPresentation, Team, WaterZone, World, WorldError,
    duelist_routine,
};

fn input_player(world: &mut World<RecordingPresentation>) -> (EntityId, InputHandle) {
    let handle = InputHandle::new();
    handle.set(Controls::idle(Point::new(100.0, 0.0)));
    let id = world
        .spawn(
            &CharacterPreset::player(),
            Point::ORIGIN,
            Some(Box::new(InputController::new(handle.clone()))),
        )
        .unwrap();
    (id, handle)
}

#[test]
fn resources_stay_in_bounds_through_a_brawl() {
    let mut world = World::new(CombatConfig::default(), RecordingPresentation::new()).unwrap();
    let bot = world.ai_controller(duelist_routine(0.3));
    world
        .spawn(&CharacterPreset::player(), Point::ORIGIN, Some(bot))
        .unwrap();
    world.add_water(WaterZone::new(Point::new(-100.0, -100.0), Point::new(100.0, 100.0)));
    for (index, (_, loadout)) in Loadout::STOCK.iter().take(4).enumerate() {
        world
            .spawn_enemy(loadout, Point::new(150.0 + 60.0 * index as f32, 40.0 * index as f32))
            .unwrap();
    }

    for _ in 0..1200 {
        world.tick(1.0 / 60.0);
        for character in world.characters() {
            let health = character.health();
            assert!(health.current() >= 0.0 && health.current() <= health.maximum());
            let stamina = character.stamina().current();
            assert!((0.0..=1.0).contains(&stamina), "stamina {stamina}");
            assert!(character.last_label().is_none_or(|label| !label.text.is_empty()));
        }
        assert!(world.tracker().holders().len() <= 1);
    }

    // Something must have happened in twenty seconds of fighting
    assert!(!world.presentation().events.is_empty());
}

#[test]
fn dash_runs_its_full_course_once_per_press() {
    let mut world = World::new(CombatConfig::default(), RecordingPresentation::new()).unwrap();
    let (player, input) = input_player(&mut world);

    input.update(|controls| controls.dash = true);
    world.tick(0.1);
    let dashing = world.character(player).unwrap();
    assert_eq!(dashing.state_machine().state(), CharacterState::Dashing);
    assert_eq!(dashing.motion().map(|motion| motion.kind), Some(MotionKind::Dash));
    assert!((dashing.stamina().current() - 0.8).abs() < 1e-5);

    world.tick(0.1);
    world.tick(0.1);
    let landed = world.character(player).unwrap();
    assert!((landed.position().x - 150.0).abs() < 1e-3);
    assert!(landed.motion().is_none());
    // Still holding dash does not start another one
    assert_eq!(landed.state_machine().state(), CharacterState::Idle);

    input.update(|controls| controls.dash = false);
    world.tick(0.1);
    input.update(|controls| controls.dash = true);
    world.tick(0.1);
    assert_eq!(
        world.character(player).unwrap().state_machine().state(),
        CharacterState::Dashing
    );
}

#[test]
fn slow_motion_scales_movement() {
    let mut world = World::new(CombatConfig::default(), RecordingPresentation::new()).unwrap();
    let (player, input) = input_player(&mut world);
    input.update(|controls| controls.force = 1.0);

    world.set_speed_ratio(0.5);
    world.tick(1.0);
    assert!((world.character(player).unwrap().position().x - 100.0).abs() < 1e-3);

    world.set_affected_by_speed_ratio(player, false).unwrap();
    world.tick(1.0);
    assert!((world.character(player).unwrap().position().x - 300.0).abs() < 1e-3);
}

#[test]
fn invalid_speed_ratio_keeps_the_current_one() {
    let mut world = World::new(CombatConfig::default(), RecordingPresentation::new()).unwrap();
    world.set_speed_ratio(0.5);

    for ratio in [f32::INFINITY, f32::NAN, -1.0] {
        world.set_speed_ratio(ratio);
        assert_eq!(world.speed_ratio(), 0.5);
    }

    world.set_speed_ratio(0.0);
    assert_eq!(world.speed_ratio(), 0.0);
}

#[test]
fn non_finite_aim_keeps_the_previous_one() {
    let mut world = World::new(CombatConfig::default(), RecordingPresentation::new()).unwrap();
    let (player, input) = input_player(&mut world);
    world.tick(0.0);

    input.update(|controls| controls.aim = Point::new(f32::NAN, 0.0));
    world.tick(0.1);
    let character = world.character(player).unwrap();
    assert_eq!(character.controls().aim, Point::new(100.0, 0.0));

    world.strike(player, 1.0);
    let position = world.character(player).unwrap().position();
    assert!((position.x - 5.0).abs() < 1e-3);
    assert_eq!(position.y, 0.0);
}

#[test]
fn exhaustion_regenerates_inside_the_cooldown() {
    let config = CombatConfig {
        strike_stamina: 0.25,
        ..CombatConfig::default()
    };
    let mut world = World::new(config, RecordingPresentation::new()).unwrap();
    let (tired, _) = input_player(&mut world);
    let fresh = world
        .spawn(
            &CharacterPreset::player(),
            Point::new(0.0, 1000.0),
            Some(Box::new(InputController::new(InputHandle::new()))),
        )
        .unwrap();
    world.tick(0.0);

    for _ in 0..4 {
        world.strike(tired, 1.0);
    }
    world.strike(fresh, 1.0);

    world.tick(0.5);
    let tired = world.character(tired).unwrap();
    assert_eq!(tired.state_machine().state(), CharacterState::Exhausted);
    assert!((tired.stamina().current() - 0.15).abs() < 1e-5);
    // Winded but not exhausted: no regen until the cooldown passes
    let fresh = world.character(fresh).unwrap();
    assert!((fresh.stamina().current() - 0.75).abs() < 1e-5);
}

#[test]
fn characters_do_not_overlap() {
    let mut world = World::new(CombatConfig::default(), RecordingPresentation::new()).unwrap();
    let (player, input) = input_player(&mut world);
    let wall = world
        .spawn(&CharacterPreset::enemy(&Loadout::STICK), Point::new(100.0, 0.0), None)
        .unwrap();

    input.update(|controls| controls.force = 1.0);
    for _ in 0..30 {
        world.tick(1.0 / 30.0);
    }

    let player = world.character(player).unwrap().position();
    let wall = world.character(wall).unwrap().position();
    assert!(player.distance(wall) >= 30.0 - 1e-3);
    assert!(player.x < wall.x);
}

#[test]
fn water_drains_and_rest_restores_stamina() {
    let mut world = World::new(CombatConfig::default(), RecordingPresentation::new()).unwrap();
    let (player, input) = input_player(&mut world);
    world.add_water(WaterZone::new(Point::new(-50.0, -50.0), Point::new(50.0, 50.0)));

    for _ in 0..10 {
        world.tick(0.1);
    }
    let drained = world.character(player).unwrap().stamina().current();
    assert!((drained - 0.8).abs() < 1e-4);

    // Walk out of the puddle and rest past the cooldown
    input.update(|controls| {
        controls.force = 1.0;
        controls.angle = 0.0;
    });
    world.tick(0.5);
    input.update(|controls| controls.force = 0.0);
    for _ in 0..30 {
        world.tick(0.1);
    }
    assert!(world.character(player).unwrap().stamina().current() > drained);
}

#[test]
fn team_queries_follow_spawns_and_deaths() {
    let mut world = World::new(CombatConfig::default(), RecordingPresentation::new()).unwrap();
    let (player, _) = input_player(&mut world);
    let first = world.spawn_enemy(&Loadout::AXE, Point::new(500.0, 0.0)).unwrap();
    let second = world.spawn_enemy(&Loadout::SWORD, Point::new(-500.0, 0.0)).unwrap();

    assert_eq!(world.player().map(|character| character.id()), Some(player));
    let enemies: Vec<_> = world.team(Team::Enemy).map(|character| character.id()).collect();
    assert_eq!(enemies, vec![first, second]);

    world.kill(first);
    assert_eq!(world.team(Team::Enemy).count(), 1);
    world.tick(0.016);
    assert_eq!(world.characters().count(), 2);
    assert!(world.presentation().deaths().eq([first]));
}

#[test]
fn setup_errors_are_classified() {
    let mut world = World::new(CombatConfig::default(), RecordingPresentation::new()).unwrap();
    let (player, _) = input_player(&mut world);
    assert!(world.kill(player));

    let dead = world
        .set_controller(player, Box::new(InputController::new(InputHandle::new())))
        .unwrap_err();
    assert_eq!(dead, WorldError::Dead(player));
    assert!(dead.severity().is_recoverable());
    assert_eq!(dead.error_code(), "WORLD_DEAD_ENTITY");

    let missing = world
        .set_controller(EntityId(77), Box::new(InputController::new(InputHandle::new())))
        .unwrap_err();
    assert_eq!(missing.severity(), ErrorSeverity::Recoverable);
    assert_eq!(missing.error_code(), "WORLD_UNKNOWN_ENTITY");

    let invalid = world
        .spawn(&CharacterPreset::player().with_max_health(0.0), Point::ORIGIN, None)
        .unwrap_err();
    assert_eq!(invalid.severity(), ErrorSeverity::Validation);
    assert_eq!(invalid.severity().to_string(), "validation");
    assert_eq!(invalid.error_code(), "PRESET_NON_POSITIVE_HEALTH");
}
