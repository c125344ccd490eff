//! Unit tests for the world module.

use super::*;
use crate::core::RespawnSettings;
use crate::enemies::RespawnBudget;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn point(index: u32, x: f32, z: f32, visible: bool) -> (Entity, Vec3, bool) {
    (Entity::from_raw(index), Vec3::new(x, 0.0, z), visible)
}

fn candidates(count: u32) -> Vec<SpawnCandidate> {
    (0..count)
        .map(|i| SpawnCandidate {
            entity: Entity::from_raw(i),
            position: Vec3::new(i as f32 * 10.0, 0.0, 0.0),
        })
        .collect()
}

// -----------------------------------------------------------------------------
// Spawn point filtering and selection
// -----------------------------------------------------------------------------

#[test]
fn points_near_the_player_are_excluded() {
    let points = vec![
        point(1, 3.0, 0.0, false),
        point(2, 10.0, 0.0, false),
        point(3, 0.0, -25.0, false),
    ];

    let valid = filter_valid_points(points, Vec3::ZERO, 10.0);

    // Exactly at the minimum distance doesn't count as beyond it
    assert_eq!(valid.len(), 1);
    assert_eq!(valid[0].entity, Entity::from_raw(3));
    assert_eq!(valid[0].position, Vec3::new(0.0, 0.0, -25.0));
}

#[test]
fn visible_points_are_excluded() {
    let points = vec![point(1, 40.0, 0.0, true), point(2, -40.0, 0.0, false)];

    let valid = filter_valid_points(points, Vec3::ZERO, 10.0);

    assert_eq!(valid.len(), 1);
    assert_eq!(valid[0].entity, Entity::from_raw(2));
}

#[test]
fn distance_is_measured_from_the_player() {
    let points = vec![point(1, 50.0, 0.0, false)];
    let player = Vec3::new(45.0, 0.0, 0.0);

    assert!(filter_valid_points(points, player, 10.0).is_empty());
}

#[test]
fn picking_from_no_candidates_is_an_error() {
    let mut rng = StdRng::seed_from_u64(1);
    let result = pick_random(&[], "goblin", &mut rng);
    assert_eq!(
        result,
        Err(RespawnError::NoValidSpawnPoint {
            enemy_type: "goblin".to_string()
        })
    );
}

#[test]
fn picking_covers_every_candidate() {
    let options = candidates(3);
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut counts = [0usize; 3];

    for _ in 0..3000 {
        let picked = pick_random(&options, "goblin", &mut rng).expect("non-empty candidates");
        counts[picked.entity.index() as usize] += 1;
    }

    for count in counts {
        assert!(count > 800, "selection is far from uniform: {:?}", counts);
    }
}

#[test]
fn single_candidate_is_always_picked() {
    let options = candidates(1);
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        assert_eq!(pick_random(&options, "goblin", &mut rng), Ok(options[0]));
    }
}

// -----------------------------------------------------------------------------
// Visibility probe
// -----------------------------------------------------------------------------

#[test]
fn view_cone_sees_ahead_but_not_behind() {
    let eye = Vec3::ZERO;
    let forward = Vec3::NEG_Z;
    let half_fov = 45f32.to_radians();

    assert!(in_view_cone(eye, forward, Vec3::new(0.0, 0.0, -20.0), half_fov, 60.0));
    assert!(in_view_cone(eye, forward, Vec3::new(5.0, 0.0, -20.0), half_fov, 60.0));
    assert!(!in_view_cone(eye, forward, Vec3::new(0.0, 0.0, 20.0), half_fov, 60.0));
    assert!(!in_view_cone(eye, forward, Vec3::new(30.0, 0.0, -5.0), half_fov, 60.0));
}

#[test]
fn view_cone_is_limited_by_distance() {
    let half_fov = 45f32.to_radians();
    assert!(!in_view_cone(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -80.0), half_fov, 60.0));
}

// -----------------------------------------------------------------------------
// Level data
// -----------------------------------------------------------------------------

#[test]
fn shipped_levels_parse() {
    let levels = parse_levels(include_str!("../../assets/data/levels.ron"), "levels.ron")
        .expect("shipped levels file is valid");

    assert_eq!(levels.len(), 2);
    assert_eq!(levels[0].name, "Crypt Entrance");
    assert_eq!(RespawnBudget::from_specs(&levels[0].enemies).max(), 6);
    assert_eq!(levels[0].spawn_points.len(), 4);
    assert_eq!(levels[0].min_respawn_distance, Some(8.0));
    assert_eq!(levels[1].respawn_delay, Some(1.5));
}

#[test]
fn malformed_levels_report_their_path() {
    let result = parse_levels("(levels: [ (enemies: [] ) ])", "broken.ron");
    match result {
        Err(DataLoadError::ParseError { path, .. }) => assert_eq!(path, "broken.ron"),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn missing_levels_file_is_not_found() {
    let result = read_levels(std::path::Path::new("assets/data/does_not_exist.ron"));
    assert!(matches!(result, Err(DataLoadError::FileNotFound(_))));
}

#[test]
fn level_overrides_fall_back_to_settings() {
    let settings = RespawnSettings::default();
    let mut level = LevelDefinition::new("test", vec![EnemyTypeSpec::new("goblin", 1)]);

    assert_eq!(level.respawn_delay(&settings), settings.respawn_delay);
    assert_eq!(level.min_respawn_distance(&settings), settings.min_respawn_distance);

    level.respawn_delay = Some(0.25);
    level.min_respawn_distance = Some(3.0);
    assert_eq!(level.respawn_delay(&settings), 0.25);
    assert_eq!(level.min_respawn_distance(&settings), 3.0);
}

#[test]
fn shipped_settings_parse() {
    let settings: RespawnSettings = ron::from_str(include_str!("../../assets/data/respawn.ron"))
        .expect("shipped settings file is valid");
    assert_eq!(settings.respawn_delay, 2.0);
    assert!(settings.auto_advance);
}

// -----------------------------------------------------------------------------
// Session rules
// -----------------------------------------------------------------------------

#[test]
fn level_needs_one_player_and_some_points() {
    assert_eq!(verify_level_world(1, 3), Ok(()));
    assert_eq!(verify_level_world(0, 3), Err(RespawnError::MissingPlayer));
    assert_eq!(verify_level_world(2, 3), Err(RespawnError::MissingPlayer));
    assert_eq!(verify_level_world(1, 0), Err(RespawnError::MissingSpawnPoints));
}

#[test]
fn completion_requires_spent_budget_and_no_active_enemies() {
    let fresh = RespawnBudget::new(2);
    assert!(!is_level_complete(fresh, 0));
    assert!(!is_level_complete(RespawnBudget::new(0), 1));
    assert!(is_level_complete(RespawnBudget::new(0), 0));
}

#[test]
fn first_request_resolves_to_level_zero() {
    let session = LevelSession::default();
    assert_eq!(session.status(), LevelStatus::NotStarted);
    assert_eq!(session.next_index(None), 0);
    assert_eq!(session.next_index(Some(3)), 3);
}

#[test]
fn only_initialization_errors_are_fatal() {
    assert!(RespawnError::MissingPlayer.is_fatal());
    assert!(RespawnError::MissingSpawnPoints.is_fatal());
    assert!(RespawnError::LevelOutOfRange { index: 4, available: 2 }.is_fatal());
    assert!(!RespawnError::PoolExhausted { enemy_type: "goblin".into() }.is_fatal());
    assert!(!RespawnError::NoValidSpawnPoint { enemy_type: "goblin".into() }.is_fatal());
    assert!(!RespawnError::Configuration { enemy_type: "goblin".into(), count: 0 }.is_fatal());
}
