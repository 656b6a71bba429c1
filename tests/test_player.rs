use sidescroller::config::Tuning;
use sidescroller::entities::{GameEvent, Input, Player, Vitality};
use sidescroller::geometry::{Facing, Rect};
use sidescroller::level::{Difficulty, LevelData};
use sidescroller::player::*;

fn setup() -> (LevelData, Tuning, Player) {
    let level = LevelData::builtin(Difficulty::Easy);
    let tuning = Tuning::default();
    let player = new_player(&level, &tuning);
    (level, tuning, player)
}

/// Run one player update with no collectibles in play.
fn step(player: &mut Player, level: &LevelData, tuning: &Tuning, input: Input) -> bool {
    let mut none = Vec::new();
    let mut events = Vec::new();
    update_player(player, &input, &level.platforms, &mut none, tuning, &mut events)
}

const RIGHT: Input = Input { left: false, right: true, jump: false };
const LEFT: Input = Input { left: true, right: false, jump: false };
const JUMP: Input = Input { left: false, right: false, jump: true };
const IDLE: Input = Input { left: false, right: false, jump: false };

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn new_player_starts_at_spawn() {
    let (_, _, p) = setup();
    assert_eq!(p.body.rect, Rect::new(30.0, 464.0, 28.0, 36.0));
    assert_eq!(p.lives, 3);
    assert_eq!(p.score, 0);
    assert_eq!(p.collected, 0);
    assert_eq!(p.collectible_total, 8);
    assert_eq!(p.vitality, Vitality::Alive);
}

// ── Input mapping ─────────────────────────────────────────────────────────────

#[test]
fn right_moves_and_faces_right() {
    let (level, tuning, mut p) = setup();
    step(&mut p, &level, &tuning, RIGHT);
    assert!((p.body.rect.x - 34.2).abs() < 1e-4);
    assert_eq!(p.body.facing, Facing::Right);
    assert!(p.body.on_ground);
}

#[test]
fn left_moves_and_faces_left() {
    let (level, tuning, mut p) = setup();
    step(&mut p, &level, &tuning, LEFT);
    assert!((p.body.rect.x - 25.8).abs() < 1e-4);
    assert_eq!(p.body.facing, Facing::Left);
}

#[test]
fn both_directions_held_moves_right() {
    let (level, tuning, mut p) = setup();
    let both = Input { left: true, right: true, jump: false };
    step(&mut p, &level, &tuning, both);
    assert_eq!(p.body.vx, tuning.move_speed);
    assert_eq!(p.body.facing, Facing::Right);
}

#[test]
fn no_input_stops_horizontal_motion() {
    let (level, tuning, mut p) = setup();
    step(&mut p, &level, &tuning, RIGHT);
    step(&mut p, &level, &tuning, IDLE);
    assert_eq!(p.body.vx, 0.0);
}

// ── Jumping ───────────────────────────────────────────────────────────────────

#[test]
fn jump_from_ground_launches_upward() {
    let (level, tuning, mut p) = setup();
    step(&mut p, &level, &tuning, IDLE);
    assert!(p.body.on_ground);

    step(&mut p, &level, &tuning, JUMP);
    assert!((p.body.vy - (-14.3)).abs() < 1e-4);
    assert!((p.body.rect.y - 449.7).abs() < 1e-3);
    assert!(!p.body.on_ground);
}

#[test]
fn jump_in_midair_is_ignored() {
    let (level, tuning, mut p) = setup();
    step(&mut p, &level, &tuning, IDLE);
    step(&mut p, &level, &tuning, JUMP);
    let vy = p.body.vy;
    step(&mut p, &level, &tuning, JUMP);
    assert!((p.body.vy - (vy + tuning.gravity)).abs() < 1e-4);
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[test]
fn overlapping_collectible_is_picked_once() {
    let (level, tuning, mut p) = setup();
    let ball = Rect::new(35.0, 470.0, 18.0, 12.0);
    let mut collectibles = vec![ball, Rect::new(900.0, 470.0, 18.0, 12.0)];
    let mut events = Vec::new();

    update_player(&mut p, &IDLE, &level.platforms, &mut collectibles, &tuning, &mut events);
    assert_eq!(p.collected, 1);
    assert_eq!(p.score, 100);
    assert_eq!(collectibles.len(), 1);
    assert_eq!(events, vec![GameEvent::CollectiblePicked { points: 100 }]);

    // Standing on the same spot again scores nothing more.
    events.clear();
    update_player(&mut p, &IDLE, &level.platforms, &mut collectibles, &tuning, &mut events);
    assert_eq!(p.score, 100);
    assert!(events.is_empty());
}

#[test]
fn several_overlapping_collectibles_score_each() {
    let (level, tuning, mut p) = setup();
    let mut collectibles = vec![
        Rect::new(32.0, 470.0, 10.0, 10.0),
        Rect::new(44.0, 480.0, 10.0, 10.0),
    ];
    let mut events = Vec::new();
    update_player(&mut p, &IDLE, &level.platforms, &mut collectibles, &tuning, &mut events);
    assert!(collectibles.is_empty());
    assert_eq!(p.collected, 2);
    assert_eq!(p.score, 200);
}

// ── Damage ────────────────────────────────────────────────────────────────────

#[test]
fn hurt_costs_a_life_and_grants_invulnerability() {
    let (_, tuning, mut p) = setup();
    let mut events = Vec::new();
    assert_eq!(hurt(&mut p, &tuning, &mut events), HurtOutcome::Damaged);
    assert_eq!(p.lives, 2);
    assert_eq!(p.invuln_ticks, 60);
    assert_eq!(p.body.rect.y, 454.0);
    assert_eq!(events, vec![GameEvent::PlayerHurt { lives_left: 2 }]);
}

#[test]
fn hurt_while_invulnerable_is_ignored() {
    let (_, tuning, mut p) = setup();
    let mut events = Vec::new();
    hurt(&mut p, &tuning, &mut events);
    assert_eq!(hurt(&mut p, &tuning, &mut events), HurtOutcome::Ignored);
    assert_eq!(p.lives, 2);
}

#[test]
fn invulnerability_counts_down_each_tick() {
    let (level, tuning, mut p) = setup();
    p.invuln_ticks = 5;
    step(&mut p, &level, &tuning, IDLE);
    assert_eq!(p.invuln_ticks, 4);
}

#[test]
fn blink_follows_invulnerability_windows() {
    let (_, _, mut p) = setup();
    assert!(!p.blink_hidden());
    p.invuln_ticks = 8;
    assert!(p.blink_hidden());
    p.invuln_ticks = 4;
    assert!(!p.blink_hidden());
}

// ── Death sequence ────────────────────────────────────────────────────────────

#[test]
fn last_life_starts_death_sequence_once() {
    let (_, tuning, mut p) = setup();
    p.lives = 1;
    let mut events = Vec::new();
    assert_eq!(hurt(&mut p, &tuning, &mut events), HurtOutcome::Killed);
    assert_eq!(p.lives, 0);
    assert!(p.is_dying());

    p.invuln_ticks = 0;
    assert_eq!(hurt(&mut p, &tuning, &mut events), HurtOutcome::Ignored);
    assert_eq!(p.lives, 0);
    let started = events.iter().filter(|e| **e == GameEvent::DeathStarted).count();
    assert_eq!(started, 1);
}

#[test]
fn death_fall_ignores_input_and_geometry() {
    let (level, tuning, mut p) = setup();
    p.body.facing = Facing::Left;
    p.lives = 1;
    hurt(&mut p, &tuning, &mut Vec::new());
    let start_x = p.body.rect.x;

    let mut finished = 0;
    for _ in 0..600 {
        if step(&mut p, &level, &tuning, RIGHT) {
            finished += 1;
        }
    }
    assert_eq!(finished, 1);
    assert_eq!(p.vitality, Vitality::Dead);
    // Drifted in the facing direction and dropped straight through the ground.
    assert!(p.body.rect.x < start_x);
    assert!(p.body.rect.top() > tuning.view_height + tuning.death_exit_margin);
}

#[test]
fn dead_player_no_longer_moves() {
    let (level, tuning, mut p) = setup();
    p.vitality = Vitality::Dead;
    let before = p.body.rect;
    assert!(!step(&mut p, &level, &tuning, RIGHT));
    assert_eq!(p.body.rect, before);
}

// ── Respawn ───────────────────────────────────────────────────────────────────

#[test]
fn respawn_returns_to_spawn_point() {
    let (level, tuning, mut p) = setup();
    p.body.rect.x = 1234.0;
    p.body.rect.y = 700.0;
    p.body.vy = 18.0;
    p.score = 300;
    respawn(&mut p, &level, &tuning);
    assert_eq!(p.body.rect.x, 30.0);
    assert_eq!(p.body.rect.y, 464.0);
    assert_eq!(p.body.vy, 0.0);
    assert_eq!(p.score, 300);
}
