use std::path::Path;

use sidescroller::compute::init_state;
use sidescroller::config::Tuning;
use sidescroller::error::GameError;
use sidescroller::geometry::Facing;
use sidescroller::level::*;

const TINY_LEVEL: &str = r#"
(
    name: "Tiny",
    world_width: 1200.0,
    platforms: [
        (x: 0.0, y: 500.0, w: 1200.0, h: 40.0),
        (x: 200.0, y: 400.0, w: 100.0, h: 20.0),
    ],
    goal: (x: 1100.0, y: 380.0, w: 20.0, h: 120.0),
    collectibles: [(x: 220.0, y: 370.0, w: 18.0, h: 12.0)],
    enemies: [
        (platform: 1, start_x: 210.0, speed: 1.0),
        (platform: 7, start_x: 50.0, speed: 1.0),
    ],
    spawn_x: 30.0,
)
"#;

fn tiny_level() -> LevelData {
    LevelData::from_ron_str(TINY_LEVEL, &Tuning::default()).expect("valid level")
}

// ── Built-in courses ──────────────────────────────────────────────────────────

#[test]
fn builtin_courses_share_geometry() {
    let easy = LevelData::builtin(Difficulty::Easy);
    let hard = LevelData::builtin(Difficulty::Hard);
    assert_eq!(easy.platforms, hard.platforms);
    assert_eq!(easy.platforms.len(), 17);
    assert_eq!(easy.ground().w, easy.world_width);
    assert_eq!(easy.goal, hard.goal);
}

#[test]
fn builtin_courses_scale_with_difficulty() {
    let counts: Vec<_> = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
        .into_iter()
        .map(LevelData::builtin)
        .map(|l| (l.enemies.len(), l.collectibles.len()))
        .collect();
    assert_eq!(counts, vec![(3, 8), (5, 10), (8, 12)]);
}

#[test]
fn builtin_enemies_reference_real_platforms() {
    for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let level = LevelData::builtin(d);
        assert!(level.validate(&Tuning::default()).is_ok());
        for spawn in &level.enemies {
            assert!(spawn.platform < level.platforms.len());
        }
    }
}

#[test]
fn spawn_point_stands_on_ground() {
    let level = LevelData::builtin(Difficulty::Easy);
    assert_eq!(level.spawn_point(36.0), (30.0, 464.0));
}

// ── Custom levels ─────────────────────────────────────────────────────────────

#[test]
fn custom_level_parses_from_ron() {
    let level = tiny_level();
    assert_eq!(level.name, "Tiny");
    assert_eq!(level.platforms.len(), 2);
    assert_eq!(level.collectibles.len(), 1);
    assert_eq!(level.enemies[0].platform, 1);
}

#[test]
fn unknown_enemy_platform_falls_back_to_ground() {
    let level = tiny_level();
    let state = init_state(level, Tuning::default()).expect("valid level");
    let stray = &state.enemies[1];
    assert_eq!(stray.platform, 0);
    assert_eq!(stray.body.rect.bottom(), 500.0);
    assert_eq!(state.enemies[0].body.rect.bottom(), 400.0);
}

#[test]
fn level_without_ground_is_rejected() {
    let mut level = tiny_level();
    level.platforms.clear();
    let err = level.validate(&Tuning::default()).unwrap_err();
    assert!(matches!(err, GameError::InvalidLevel { .. }));
}

#[test]
fn level_with_empty_world_is_rejected() {
    let source = TINY_LEVEL.replace("world_width: 1200.0", "world_width: 0.0");
    let err = LevelData::from_ron_str(&source, &Tuning::default()).unwrap_err();
    assert!(matches!(err, GameError::InvalidLevel { .. }));
}

#[test]
fn ground_below_the_view_is_rejected() {
    let source = TINY_LEVEL.replace(
        "(x: 0.0, y: 500.0, w: 1200.0, h: 40.0)",
        "(x: 0.0, y: 700.0, w: 1200.0, h: 40.0)",
    );
    let err = LevelData::from_ron_str(&source, &Tuning::default()).unwrap_err();
    assert!(matches!(err, GameError::InvalidLevel { .. }));
}

#[test]
fn ground_fit_depends_on_view_height() {
    let level = tiny_level();
    let short_view = Tuning {
        view_height: 400.0,
        ..Tuning::default()
    };
    assert!(level.validate(&short_view).is_err());
    assert!(init_state(level, short_view).is_err());
}

#[test]
fn unvalidated_level_cannot_start_a_run() {
    let mut level: LevelData = ron::from_str(TINY_LEVEL).expect("well-formed RON");
    level.platforms.clear();
    let err = init_state(level, Tuning::default()).unwrap_err();
    assert!(matches!(err, GameError::InvalidLevel { .. }));
}

#[test]
fn enemy_spawn_facing_defaults_right_and_can_be_set() {
    let source = TINY_LEVEL.replace(
        "(platform: 1, start_x: 210.0, speed: 1.0)",
        "(platform: 1, start_x: 210.0, speed: 1.0, facing: Left)",
    );
    let level = LevelData::from_ron_str(&source, &Tuning::default()).expect("valid level");
    assert_eq!(level.enemies[0].facing, Facing::Left);
    assert_eq!(level.enemies[1].facing, Facing::Right);

    let state = init_state(level, Tuning::default()).expect("valid level");
    assert_eq!(state.enemies[0].direction, -1.0);
    assert_eq!(state.enemies[1].direction, 1.0);
}

#[test]
fn malformed_level_is_a_parse_error() {
    let err = LevelData::from_ron_str("(name: \"broken\"", &Tuning::default()).unwrap_err();
    assert!(matches!(err, GameError::Parse { .. }));
}

#[test]
fn missing_level_file_is_an_io_error() {
    let err = LevelData::load(Path::new("no/such/level.ron"), &Tuning::default())
        .unwrap_err();
    assert!(matches!(err, GameError::Io { .. }));
}

// ── Tuning ────────────────────────────────────────────────────────────────────

#[test]
fn default_tuning_matches_shipped_feel() {
    let t = Tuning::default();
    assert_eq!(t.fps, 60);
    assert_eq!(t.gravity, 0.7);
    assert_eq!(t.jump_velocity, -15.0);
    assert_eq!(t.max_fall_speed, 18.0);
    assert_eq!(t.starting_lives, 3);
    assert_eq!(t.stomp_bounce_velocity(), -10.0);
    assert_eq!(t.invulnerability_ticks(), 60);
}

#[test]
fn partial_tuning_keeps_other_defaults() {
    let t = Tuning::from_ron_str("(gravity: 1.0, fps: 30)").expect("valid tuning");
    assert_eq!(t.gravity, 1.0);
    assert_eq!(t.invulnerability_ticks(), 30);
    assert_eq!(t.move_speed, Tuning::default().move_speed);
}

#[test]
fn mistyped_tuning_field_is_a_parse_error() {
    let err = Tuning::from_ron_str("(gravity: \"heavy\")").unwrap_err();
    assert!(matches!(err, GameError::Parse { .. }));
}

#[test]
fn bundled_practice_course_loads() {
    let source = include_str!("../levels/short_course.ron");
    let level = LevelData::from_ron_str(source, &Tuning::default())
        .expect("bundled level parses");
    assert_eq!(level.name, "Practice Field");
    let state = init_state(level, Tuning::default()).expect("valid level");
    assert_eq!(state.enemies[1].platform, 3);
    assert_eq!(state.player.collectible_total, 3);
}
