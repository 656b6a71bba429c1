/// All simulation types: pure data, no logic beyond trivial accessors.
use crate::config::Tuning;
use crate::geometry::{Facing, Rect};
use crate::level::LevelData;

// ── Input ─────────────────────────────────────────────────────────────────────

/// Boolean intents sampled once per tick by the presentation layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

// ── Shared entity shape ───────────────────────────────────────────────────────

/// Position, velocity and facing shared by the player and enemies.  The
/// rectangle is authoritative: velocity is applied to it, then collision
/// resolution corrects it.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub rect: Rect,
    pub vx: f32,
    pub vy: f32,
    pub facing: Facing,
    pub on_ground: bool,
}

impl Body {
    pub fn at(rect: Rect) -> Self {
        Self {
            rect,
            vx: 0.0,
            vy: 0.0,
            facing: Facing::Right,
            on_ground: false,
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Life cycle of the player character.  Vulnerability while alive is derived
/// from `Player::invuln_ticks`.
#[derive(Clone, Debug, PartialEq)]
pub enum Vitality {
    Alive,
    /// Scripted fall off the screen; has its own velocity pair and ignores
    /// level geometry.
    Dying { vx: f32, vy: f32 },
    Dead,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Body,
    pub lives: u32,
    pub score: u32,
    /// Ticks of remaining invulnerability; damage is ignored while > 0.
    pub invuln_ticks: u32,
    pub collected: usize,
    pub collectible_total: usize,
    pub vitality: Vitality,
}

impl Player {
    pub fn is_dying(&self) -> bool {
        matches!(self.vitality, Vitality::Dying { .. })
    }

    pub fn is_alive(&self) -> bool {
        self.vitality == Vitality::Alive
    }

    /// Sprite is hidden on alternating 4-tick windows while invulnerable.
    pub fn blink_hidden(&self) -> bool {
        self.invuln_ticks > 0 && (self.invuln_ticks / 4) % 2 == 0
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatrolState {
    Moving,
    Paused,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub body: Body,
    /// Index of the owning platform, fixed at construction.
    pub platform: usize,
    pub left_bound: f32,
    pub right_bound: f32,
    pub speed: f32,
    /// +1 moving right, -1 moving left.
    pub direction: f32,
    pub state: PatrolState,
    /// Seconds left in the current pause.
    pub pause_timer: f32,
    /// Whether the current pause is a taunting one.
    pub taunting: bool,
    /// Value `taunting` takes on the next pause; flips every pause.
    pub next_taunt: bool,
}

impl Enemy {
    pub fn is_flexing(&self) -> bool {
        self.state == PatrolState::Paused && self.taunting
    }
}

// ── Celebration ───────────────────────────────────────────────────────────────

/// A confetti piece. Cosmetic only.
#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub rotation: f32,
    pub spin: f32,
    pub age: f32,
    pub lifespan: f32,
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Things that happened during the last tick, for sound and effects.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    CollectiblePicked { points: u32 },
    EnemyStomped { points: u32 },
    PlayerHurt { lives_left: u32 },
    FellOut,
    EnemyTaunt { enemy: usize },
    GoalReached,
    Victory,
    DeathStarted,
    DeathFinished,
    Reset,
}

// ── Run / session ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct RunState {
    /// Transient HUD notice and the ticks it has left.
    pub message: Option<String>,
    pub message_ticks: u32,
    /// Latched on first contact with the goal.
    pub goal_reached: bool,
    /// Goal touched with every collectible gathered.
    pub won: bool,
    pub time_since_win: f32,
    pub confetti: Vec<Particle>,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire simulation.  Cloneable so the tick can return a fresh copy
/// without mutating the caller's state.
#[derive(Clone, Debug)]
pub struct GameState {
    pub level: LevelData,
    pub tuning: Tuning,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Remaining collectibles; membership means "not yet picked up".
    pub collectibles: Vec<Rect>,
    pub run: RunState,
    pub camera_x: f32,
    pub events: Vec<GameEvent>,
    pub frame: u64,
}

impl GameState {
    pub fn death_sequence_active(&self) -> bool {
        self.player.is_dying()
    }

    pub fn game_over(&self) -> bool {
        self.player.lives == 0
    }
}
