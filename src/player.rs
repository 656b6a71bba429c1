/// Player controller: input mapping, jumping, pickups, damage and the
/// scripted death fall.
use tracing::{debug, info};

use crate::config::Tuning;
use crate::entities::{Body, GameEvent, Input, Player, Vitality};
use crate::geometry::{Facing, Rect};
use crate::level::LevelData;
use crate::physics;

/// Result of a `hurt` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HurtOutcome {
    /// Invulnerable, dying or dead; nothing changed.
    Ignored,
    Damaged,
    /// Last life lost; the death sequence has begun.
    Killed,
}

pub fn new_player(level: &LevelData, tuning: &Tuning) -> Player {
    Player {
        body: spawn_body(level, tuning),
        lives: tuning.starting_lives,
        score: 0,
        invuln_ticks: 0,
        collected: 0,
        collectible_total: level.collectibles.len(),
        vitality: Vitality::Alive,
    }
}

fn spawn_body(level: &LevelData, tuning: &Tuning) -> Body {
    let (x, y) = level.spawn_point(tuning.player_height);
    Body::at(Rect::new(x, y, tuning.player_width, tuning.player_height))
}

/// Put the player back at the level's spawn point, keeping facing, lives,
/// score and timers.
pub fn respawn(player: &mut Player, level: &LevelData, tuning: &Tuning) {
    let facing = player.body.facing;
    player.body = spawn_body(level, tuning);
    player.body.facing = facing;
}

/// Map intents to horizontal velocity.  Right is applied last, so holding
/// both directions moves right.
fn handle_input(body: &mut Body, input: &Input, tuning: &Tuning) {
    body.vx = 0.0;
    if input.left {
        body.vx = -tuning.move_speed;
        body.facing = Facing::Left;
    }
    if input.right {
        body.vx = tuning.move_speed;
        body.facing = Facing::Right;
    }
    if input.jump && body.on_ground {
        body.vy = tuning.jump_velocity;
        body.on_ground = false;
    }
}

/// Remove every collectible the player overlaps and award points for each.
fn collect(
    player: &mut Player,
    collectibles: &mut Vec<Rect>,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    let rect = player.body.rect;
    let before = collectibles.len();
    collectibles.retain(|c| !rect.overlaps(c));
    let picked = before - collectibles.len();

    for _ in 0..picked {
        player.collected += 1;
        player.score += tuning.pickup_points;
        events.push(GameEvent::CollectiblePicked {
            points: tuning.pickup_points,
        });
    }
    if picked > 0 {
        debug!(picked, remaining = collectibles.len(), "collectibles picked up");
    }
}

/// Scripted death fall: amplified gravity, no input, no geometry.  Returns
/// `true` once the player has left the bottom of the view.
fn update_dying(player: &mut Player, tuning: &Tuning) -> bool {
    let Vitality::Dying { vx, vy } = &mut player.vitality else {
        return false;
    };
    *vy += tuning.gravity * tuning.death_gravity_multiplier;
    player.body.rect.x += *vx;
    player.body.rect.y += *vy;

    if player.body.rect.top() > tuning.view_height + tuning.death_exit_margin {
        player.vitality = Vitality::Dead;
        info!(score = player.score, "death sequence finished");
        return true;
    }
    false
}

/// Advance the player one tick.  Returns `true` on the tick the death
/// sequence finishes.
pub fn update_player(
    player: &mut Player,
    input: &Input,
    platforms: &[Rect],
    collectibles: &mut Vec<Rect>,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> bool {
    match player.vitality {
        Vitality::Dead => return false,
        Vitality::Dying { .. } => {
            let finished = update_dying(player, tuning);
            if finished {
                events.push(GameEvent::DeathFinished);
            }
            return finished;
        }
        Vitality::Alive => {}
    }

    handle_input(&mut player.body, input, tuning);
    physics::integrate(&mut player.body, platforms, tuning);
    collect(player, collectibles, tuning, events);

    if player.invuln_ticks > 0 {
        player.invuln_ticks -= 1;
    }
    false
}

/// Take one point of damage unless invulnerable.  Losing the last life
/// starts the death sequence exactly once.
pub fn hurt(player: &mut Player, tuning: &Tuning, events: &mut Vec<GameEvent>) -> HurtOutcome {
    if !player.is_alive() || player.invuln_ticks > 0 {
        return HurtOutcome::Ignored;
    }

    player.lives = player.lives.saturating_sub(1);
    player.invuln_ticks = tuning.invulnerability_ticks();
    player.body.rect.y -= tuning.hurt_nudge;
    events.push(GameEvent::PlayerHurt {
        lives_left: player.lives,
    });
    debug!(lives = player.lives, "player hurt");

    if player.lives == 0 {
        player.vitality = Vitality::Dying {
            vx: player.body.facing.sign() * tuning.death_drift,
            vy: tuning.death_launch_velocity,
        };
        events.push(GameEvent::DeathStarted);
        info!(score = player.score, "out of lives, death sequence started");
        return HurtOutcome::Killed;
    }
    HurtOutcome::Damaged
}
