/// Session orchestration: building, ticking and resetting the simulation.
///
/// `tick` takes an immutable reference to the current `GameState` (plus the
/// injected RNG used for confetti) and returns a brand-new `GameState`.
use rand::Rng;
use tracing::{debug, info};

use crate::camera;
use crate::celebration;
use crate::collisions;
use crate::config::Tuning;
use crate::entities::{GameEvent, GameState, Input, RunState};
use crate::error::GameError;
use crate::geometry::{Facing, Rect};
use crate::level::LevelData;
use crate::patrol;
use crate::player;

/// Longest step a single tick will simulate, in seconds.
pub const MAX_DT: f32 = 0.1;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh run: full lives, zero score, every collectible and enemy
/// in its starting place.  The level is validated against `tuning` first.
pub fn init_state(level: LevelData, tuning: Tuning) -> Result<GameState, GameError> {
    level.validate(&tuning)?;
    let enemy_size = (tuning.enemy_width, tuning.enemy_height);
    let enemies = level
        .enemies
        .iter()
        .map(|spawn| patrol::spawn_enemy(&level.platforms, spawn, enemy_size))
        .collect();
    let player = player::new_player(&level, &tuning);
    let camera_x = camera::camera_offset(
        player.body.rect.center_x(),
        tuning.view_width,
        level.world_width,
    );

    Ok(GameState {
        collectibles: level.collectibles.clone(),
        enemies,
        player,
        run: RunState::default(),
        camera_x,
        events: Vec::new(),
        frame: 0,
        level,
        tuning,
    })
}

/// Rebuild the run from scratch.  Refused while the death sequence is
/// playing; allowed at any other time, including after game over.
pub fn reset(state: &GameState) -> Result<GameState, GameError> {
    if state.death_sequence_active() {
        return Err(GameError::ResetRefused);
    }
    let mut fresh = init_state(state.level.clone(), state.tuning.clone())?;
    fresh.run.message = Some("Game reset - good luck!".to_string());
    fresh.run.message_ticks = fresh.tuning.seconds_to_ticks(fresh.tuning.reset_message_secs);
    fresh.events.push(GameEvent::Reset);
    info!(level = %fresh.level.name, "run reset");
    Ok(fresh)
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one tick of `dt` seconds.
///
/// Order: player, enemies, cross-entity resolution, cosmetic timers, camera.
/// Once the level is won the player gets neutral input and no further
/// contacts are resolved.
pub fn tick(state: &GameState, input: &Input, dt: f32, rng: &mut impl Rng) -> GameState {
    let dt = dt.clamp(0.0, MAX_DT);
    let mut next = state.clone();
    next.frame += 1;
    next.events.clear();

    if next.run.message_ticks > 0 {
        next.run.message_ticks -= 1;
        if next.run.message_ticks == 0 {
            next.run.message = None;
        }
    }

    // ── 1. Player ────────────────────────────────────────────────────────────
    let input = if next.run.won { Input::default() } else { *input };
    player::update_player(
        &mut next.player,
        &input,
        &next.level.platforms,
        &mut next.collectibles,
        &next.tuning,
        &mut next.events,
    );

    // ── 2. Enemies ───────────────────────────────────────────────────────────
    let pause = next.tuning.enemy_pause;
    for (i, enemy) in next.enemies.iter_mut().enumerate() {
        if patrol::update_enemy(enemy, dt, pause) {
            next.events.push(GameEvent::EnemyTaunt { enemy: i });
            debug!(enemy = i, "enemy taunts");
        }
    }

    // ── 3. Cross-entity checks ───────────────────────────────────────────────
    if !next.run.won {
        collisions::resolve(&mut next, rng);
    }

    // ── 4. Celebration ───────────────────────────────────────────────────────
    celebration::update_confetti(&mut next.run.confetti, dt);
    if next.run.won {
        next.run.time_since_win += dt;
    }

    // ── 5. Camera ────────────────────────────────────────────────────────────
    next.camera_x = camera::camera_offset(
        next.player.body.rect.center_x(),
        next.tuning.view_width,
        next.level.world_width,
    );

    next
}

// ── Presentation view ────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerView {
    pub rect: Rect,
    pub facing: Facing,
    /// Skip drawing this frame (invulnerability blink).
    pub hidden: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnemyView {
    pub rect: Rect,
    pub facing: Facing,
    pub flexing: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub lives: u32,
    pub collected: usize,
    pub total: usize,
    pub message: Option<String>,
}

/// Everything the renderer needs for one frame, in world coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameView {
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub collectibles: Vec<Rect>,
    pub platforms: Vec<Rect>,
    pub goal: Rect,
    /// Confetti positions, empty until the goal is first reached.
    pub confetti: Vec<(f32, f32)>,
    pub camera_x: f32,
    pub hud: Hud,
}

/// HUD line for the current frame.  Game over and victory override any
/// transient notice; the retry prompt waits until the death fall is done.
pub fn status_text(state: &GameState) -> Option<String> {
    if state.game_over() && !state.death_sequence_active() {
        Some("Game Over! Press R to retry".to_string())
    } else if state.run.won {
        Some("Victory! The flag is yours. Press R to replay".to_string())
    } else {
        state.run.message.clone()
    }
}

pub fn snapshot(state: &GameState) -> FrameView {
    let player = &state.player;
    FrameView {
        player: PlayerView {
            rect: player.body.rect,
            facing: player.body.facing,
            hidden: player.blink_hidden(),
        },
        enemies: state
            .enemies
            .iter()
            .map(|e| EnemyView {
                rect: e.body.rect,
                facing: e.body.facing,
                flexing: e.is_flexing(),
            })
            .collect(),
        collectibles: state.collectibles.clone(),
        platforms: state.level.platforms.clone(),
        goal: state.level.goal,
        confetti: state.run.confetti.iter().map(|p| (p.x, p.y)).collect(),
        camera_x: state.camera_x,
        hud: Hud {
            score: player.score,
            lives: player.lives,
            collected: player.collected,
            total: player.collectible_total,
            message: status_text(state),
        },
    }
}
