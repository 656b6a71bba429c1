/// Enemy patrol: walk to one end of the owning platform, pause, turn around.
///
/// Every pause flips a period-2 toggle, so the first pause taunts, the
/// second does not, and so on for the enemy's whole lifetime.
use tracing::debug;

use crate::entities::{Body, Enemy, PatrolState};
use crate::geometry::{Facing, Rect};
use crate::level::EnemySpawn;

/// Build an enemy standing on `platforms[spawn.platform]` at `spawn.start_x`
/// (clamped into the patrol bounds), walking the way `spawn.facing` points.
/// An unknown platform index falls back to the ground at index 0, which a
/// validated level always has.
pub fn spawn_enemy(platforms: &[Rect], spawn: &EnemySpawn, size: (f32, f32)) -> Enemy {
    let EnemySpawn {
        platform,
        start_x,
        speed,
        facing,
    } = *spawn;
    let (platform, owner) = match platforms.get(platform) {
        Some(rect) => (platform, *rect),
        None => {
            debug!(platform, "enemy platform missing, using ground");
            (0, platforms[0])
        }
    };
    let (width, height) = size;

    let left_bound = owner.left();
    let right_bound = owner.right() - width;

    let mut rect = Rect::new(0.0, 0.0, width, height);
    rect.set_left(start_x.min(right_bound).max(left_bound));
    rect.set_bottom(owner.top());

    let direction = facing.sign();
    let mut body = Body::at(rect);
    body.vx = direction * speed;
    body.facing = facing;

    Enemy {
        body,
        platform,
        left_bound,
        right_bound,
        speed,
        direction,
        state: PatrolState::Moving,
        pause_timer: 0.0,
        taunting: false,
        next_taunt: true,
    }
}

fn start_pause(enemy: &mut Enemy, pause_secs: f32) {
    enemy.state = PatrolState::Paused;
    enemy.pause_timer = pause_secs;
    enemy.body.vx = 0.0;
    enemy.taunting = enemy.next_taunt;
    enemy.next_taunt = !enemy.next_taunt;
}

fn end_pause_and_turn(enemy: &mut Enemy) {
    enemy.direction = -enemy.direction;
    enemy.body.facing = if enemy.direction > 0.0 {
        Facing::Right
    } else {
        Facing::Left
    };
    enemy.body.vx = enemy.direction * enemy.speed;
    enemy.state = PatrolState::Moving;
    enemy.pause_timer = 0.0;
    enemy.taunting = false;
}

/// Advance one enemy by `dt` seconds.  Returns `true` when this update
/// entered a taunting pause.
pub fn update_enemy(enemy: &mut Enemy, dt: f32, pause_secs: f32) -> bool {
    match enemy.state {
        PatrolState::Paused => {
            enemy.pause_timer -= dt;
            if enemy.pause_timer <= 0.0 {
                end_pause_and_turn(enemy);
            }
            false
        }
        PatrolState::Moving => {
            let next_left = enemy.body.rect.left() + enemy.direction * enemy.speed;
            let bound = if enemy.direction > 0.0 {
                (next_left >= enemy.right_bound).then_some(enemy.right_bound)
            } else {
                (next_left <= enemy.left_bound).then_some(enemy.left_bound)
            };
            match bound {
                Some(edge) => {
                    enemy.body.rect.set_left(edge);
                    start_pause(enemy, pause_secs);
                    enemy.taunting
                }
                None => {
                    enemy.body.rect.set_left(next_left);
                    false
                }
            }
        }
    }
}
