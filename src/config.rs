/// Gameplay tuning.  Defaults reproduce the shipped feel of the game; a RON
/// file may override any subset of fields.
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::GameError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // ── Display-facing extents ───────────────────────────────────────────────
    pub view_width: f32,
    pub view_height: f32,
    /// Ticks per second; timers expressed "in ticks" derive from this.
    pub fps: u32,

    // ── Kinematics (per tick) ────────────────────────────────────────────────
    pub gravity: f32,
    pub move_speed: f32,
    pub jump_velocity: f32,
    pub max_fall_speed: f32,

    // ── Entity sizes ─────────────────────────────────────────────────────────
    pub player_width: f32,
    pub player_height: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,

    // ── Combat & scoring ─────────────────────────────────────────────────────
    pub starting_lives: u32,
    pub stomp_threshold: f32,
    pub stomp_bounce_factor: f32,
    pub stomp_points: u32,
    pub pickup_points: u32,
    pub hurt_nudge: f32,
    /// How far below the view the player's top edge may go before falling out.
    pub fall_out_margin: f32,

    // ── Enemy patrol ─────────────────────────────────────────────────────────
    /// Seconds an enemy waits at each end of its platform.
    pub enemy_pause: f32,

    // ── Death sequence ───────────────────────────────────────────────────────
    pub death_gravity_multiplier: f32,
    pub death_launch_velocity: f32,
    pub death_drift: f32,
    pub death_exit_margin: f32,

    // ── HUD ──────────────────────────────────────────────────────────────────
    /// Seconds an enemy-interaction notice stays on screen.
    pub event_message_secs: f32,
    pub reset_message_secs: f32,

    // ── Celebration ──────────────────────────────────────────────────────────
    pub confetti_count: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            view_width: 900.0,
            view_height: 540.0,
            fps: 60,

            gravity: 0.7,
            move_speed: 4.2,
            jump_velocity: -15.0,
            max_fall_speed: 18.0,

            player_width: 28.0,
            player_height: 36.0,
            enemy_width: 28.0,
            enemy_height: 24.0,

            starting_lives: 3,
            stomp_threshold: 16.0,
            stomp_bounce_factor: 0.7,
            stomp_points: 200,
            pickup_points: 100,
            hurt_nudge: 10.0,
            fall_out_margin: 80.0,

            enemy_pause: 1.0,

            death_gravity_multiplier: 1.5,
            death_launch_velocity: -12.0,
            death_drift: 1.5,
            death_exit_margin: 60.0,

            event_message_secs: 1.2,
            reset_message_secs: 1.0,

            confetti_count: 80,
        }
    }
}

impl Tuning {
    pub fn from_ron_str(source: &str) -> Result<Self, GameError> {
        ron::from_str(source).map_err(|source| GameError::Parse {
            what: "tuning".to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, GameError> {
        let contents = fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&contents)
    }

    /// Invulnerability window after a hit: one second of ticks.
    pub fn invulnerability_ticks(&self) -> u32 {
        self.fps
    }

    pub fn seconds_to_ticks(&self, secs: f32) -> u32 {
        (self.fps as f32 * secs) as u32
    }

    /// Upward velocity applied after a stomp, truncated toward zero.
    pub fn stomp_bounce_velocity(&self) -> f32 {
        (self.jump_velocity * self.stomp_bounce_factor).trunc()
    }
}
