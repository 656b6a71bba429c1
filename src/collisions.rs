/// Cross-entity checks run after every entity has moved: falling out of the
/// world, enemy contact (stomp or damage) and reaching the goal.
use rand::Rng;
use tracing::{debug, info};

use crate::celebration;
use crate::entities::{GameEvent, GameState};
use crate::player::{self, HurtOutcome};

/// What a single enemy contact turned into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyContact {
    Stomp { enemy: usize },
    Damage { enemy: usize },
}

/// Top edge below the view plus margin: counts as a hit, then respawn.
pub fn check_fall_out(state: &mut GameState) -> bool {
    let tuning = &state.tuning;
    if state.player.body.rect.top() <= tuning.view_height + tuning.fall_out_margin {
        return false;
    }
    state.events.push(GameEvent::FellOut);
    player::hurt(&mut state.player, tuning, &mut state.events);
    player::respawn(&mut state.player, &state.level, tuning);
    debug!(lives = state.player.lives, "player fell out of the world");
    true
}

/// Classify the first enemy the player overlaps, if any.  A stomp needs the
/// player moving down with its feet within the threshold of the enemy's top.
pub fn classify_enemy_contact(state: &GameState) -> Option<EnemyContact> {
    let body = &state.player.body;
    let (index, enemy) = state
        .enemies
        .iter()
        .enumerate()
        .find(|(_, e)| body.rect.overlaps(&e.body.rect))?;

    let gap = body.rect.bottom() - enemy.body.rect.top();
    if body.vy > 0.0 && gap < state.tuning.stomp_threshold {
        Some(EnemyContact::Stomp { enemy: index })
    } else {
        Some(EnemyContact::Damage { enemy: index })
    }
}

/// Handle at most one enemy interaction this tick.  Contact is ignored
/// entirely while the player is invulnerable.
pub fn check_enemy_collisions(state: &mut GameState) -> Option<EnemyContact> {
    if state.player.invuln_ticks > 0 {
        return None;
    }
    let contact = classify_enemy_contact(state)?;
    let tuning = &state.tuning;

    match contact {
        EnemyContact::Stomp { enemy } => {
            state.enemies.remove(enemy);
            state.player.body.vy = tuning.stomp_bounce_velocity();
            state.player.score += tuning.stomp_points;
            state.events.push(GameEvent::EnemyStomped {
                points: tuning.stomp_points,
            });
            state.run.message = Some(format!("Stomped a defender! +{}", tuning.stomp_points));
            debug!(enemy, score = state.player.score, "enemy stomped");
        }
        EnemyContact::Damage { enemy } => {
            let outcome = player::hurt(&mut state.player, tuning, &mut state.events);
            state.run.message = Some(match outcome {
                HurtOutcome::Killed => "Tackled! Out of lives".to_string(),
                _ => "Hit by a defender! -1 life".to_string(),
            });
            debug!(enemy, ?outcome, "player touched enemy");
        }
    }
    state.run.message_ticks = tuning.seconds_to_ticks(tuning.event_message_secs);
    Some(contact)
}

/// Latch goal contact and decide victory.  Winning needs the goal touched
/// with every collectible gathered; the first touch also fires confetti.
pub fn check_goal(state: &mut GameState, rng: &mut impl Rng) {
    let touching = state.player.body.rect.overlaps(&state.level.goal);
    if !touching {
        return;
    }

    if !state.run.goal_reached {
        state.run.goal_reached = true;
        state.run.confetti =
            celebration::spawn_confetti(&state.level.goal, state.tuning.confetti_count, rng);
        state.events.push(GameEvent::GoalReached);
        debug!(remaining = state.collectibles.len(), "goal reached");
    }

    if !state.run.won && state.collectibles.is_empty() {
        state.run.won = true;
        state.run.time_since_win = 0.0;
        state.events.push(GameEvent::Victory);
        info!(score = state.player.score, lives = state.player.lives, "level won");
    }
}

/// Run every cross-entity check for one tick.  Skipped entirely while the
/// player is dying or dead.
pub fn resolve(state: &mut GameState, rng: &mut impl Rng) {
    if !state.player.is_alive() {
        return;
    }
    check_fall_out(state);
    if !state.player.is_alive() {
        return;
    }
    check_enemy_collisions(state);
    if !state.player.is_alive() {
        return;
    }
    check_goal(state, rng);
}
