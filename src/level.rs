/// Level layouts: static geometry, goal, collectible placements and enemy
/// spawns.  Three built-in variants share one course and differ in how many
/// defenders patrol it and how fast they move.
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::Tuning;
use crate::error::GameError;
use crate::geometry::{Facing, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Where an enemy starts.  `platform` indexes [`LevelData::platforms`];
/// an index that does not exist falls back to the ground.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct EnemySpawn {
    pub platform: usize,
    pub start_x: f32,
    pub speed: f32,
    /// Initial walking direction.
    #[serde(default)]
    pub facing: Facing,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LevelData {
    pub name: String,
    pub world_width: f32,
    /// Index 0 is always the full-length ground.
    pub platforms: Vec<Rect>,
    pub goal: Rect,
    pub collectibles: Vec<Rect>,
    pub enemies: Vec<EnemySpawn>,
    pub spawn_x: f32,
}

// ── Built-in course ──────────────────────────────────────────────────────────

const WORLD_WIDTH: f32 = 5000.0;
const VIEW_H: f32 = 540.0;

fn course_platforms() -> Vec<Rect> {
    vec![
        Rect::new(0.0, VIEW_H - 40.0, WORLD_WIDTH, 40.0),
        Rect::new(80.0, VIEW_H - 120.0, 120.0, 20.0),
        Rect::new(260.0, VIEW_H - 190.0, 120.0, 20.0),
        Rect::new(460.0, VIEW_H - 150.0, 120.0, 20.0),
        Rect::new(640.0, VIEW_H - 220.0, 140.0, 20.0),
        Rect::new(300.0, VIEW_H - 320.0, 180.0, 20.0),
        Rect::new(700.0, VIEW_H - 410.0, 180.0, 20.0),
        Rect::new(800.0, VIEW_H - 300.0, 180.0, 20.0),
        Rect::new(900.0, VIEW_H - 150.0, 180.0, 20.0),
        Rect::new(1000.0, VIEW_H - 400.0, 180.0, 20.0),
        Rect::new(1200.0, VIEW_H - 275.0, 180.0, 20.0),
        Rect::new(1400.0, VIEW_H - 320.0, 180.0, 20.0),
        Rect::new(1650.0, VIEW_H - 215.0, 180.0, 20.0),
        Rect::new(1800.0, VIEW_H - 100.0, 180.0, 20.0),
        Rect::new(2050.0, VIEW_H - 420.0, 180.0, 20.0),
        Rect::new(2300.0, VIEW_H - 293.0, 180.0, 20.0),
        Rect::new(2450.0, VIEW_H - 360.0, 180.0, 20.0),
    ]
}

fn football(x: f32, y_from_bottom: f32) -> Rect {
    Rect::new(x, VIEW_H - y_from_bottom, 18.0, 12.0)
}

fn course_collectibles() -> Vec<Rect> {
    vec![
        football(120.0, 155.0),
        football(300.0, 225.0),
        football(520.0, 185.0),
        football(700.0, 255.0),
        football(380.0, 355.0),
        football(60.0, 80.0),
        football(460.0, 80.0),
        football(820.0, 80.0),
    ]
}

fn spawn(platform: usize, start_x: f32, speed: f32) -> EnemySpawn {
    EnemySpawn {
        platform,
        start_x,
        speed,
        facing: Facing::Right,
    }
}

impl LevelData {
    pub fn builtin(difficulty: Difficulty) -> Self {
        let platforms = course_platforms();
        let near = |i: usize| platforms[i].left() + 10.0;

        let (name, enemies, collectibles) = match difficulty {
            Difficulty::Easy => (
                "Red River Warmup",
                vec![spawn(0, 100.0, 1.4), spawn(1, near(1), 1.4), spawn(2, near(2), 1.4)],
                course_collectibles(),
            ),
            Difficulty::Medium => (
                "Red River Showdown",
                vec![
                    spawn(0, 100.0, 1.8),
                    spawn(1, near(1), 1.8),
                    spawn(2, near(2), 1.8),
                    spawn(4, near(4), 1.6),
                    spawn(10, near(10), 1.6),
                ],
                {
                    let mut c = course_collectibles();
                    c.push(football(1260.0, 310.0));
                    c.push(football(1700.0, 250.0));
                    c
                },
            ),
            Difficulty::Hard => (
                "Red River Shootout",
                vec![
                    spawn(0, 100.0, 2.4),
                    spawn(0, 1500.0, 2.4),
                    spawn(1, near(1), 2.2),
                    spawn(2, near(2), 2.2),
                    spawn(4, near(4), 2.2),
                    spawn(8, near(8), 2.2),
                    spawn(10, near(10), 2.0),
                    spawn(15, near(15), 2.0),
                ],
                {
                    let mut c = course_collectibles();
                    c.push(football(1260.0, 310.0));
                    c.push(football(1700.0, 250.0));
                    c.push(football(2100.0, 455.0));
                    c.push(football(2500.0, 395.0));
                    c
                },
            ),
        };

        Self {
            name: name.to_string(),
            world_width: WORLD_WIDTH,
            platforms,
            goal: Rect::new(WORLD_WIDTH - 70.0, VIEW_H - 160.0, 20.0, 120.0),
            collectibles,
            enemies,
            spawn_x: 30.0,
        }
    }

    /// Parse a RON level and check it against the tuning it will be played with.
    pub fn from_ron_str(source: &str, tuning: &Tuning) -> Result<Self, GameError> {
        let level: LevelData = ron::from_str(source).map_err(|source| GameError::Parse {
            what: "level".to_string(),
            source,
        })?;
        level.validate(tuning)?;
        Ok(level)
    }

    pub fn load(path: &Path, tuning: &Tuning) -> Result<Self, GameError> {
        let contents = fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&contents, tuning)
    }

    /// The ground must exist and its top must lie inside the view, otherwise
    /// the spawn point is already past the fall-out line.
    pub fn validate(&self, tuning: &Tuning) -> Result<(), GameError> {
        let invalid = |reason: &str| GameError::InvalidLevel {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.world_width <= 0.0 {
            return Err(invalid("world width must be positive"));
        }
        if self.platforms.is_empty() {
            return Err(invalid("platform 0 (the ground) is required"));
        }
        let ground_top = self.platforms[0].top();
        if ground_top > tuning.view_height || ground_top - tuning.player_height < 0.0 {
            return Err(invalid("the ground must sit inside the view"));
        }
        Ok(())
    }

    pub fn ground(&self) -> Rect {
        self.platforms[0]
    }

    /// Player top-left at spawn: standing on the ground at `spawn_x`.
    pub fn spawn_point(&self, player_height: f32) -> (f32, f32) {
        (self.spawn_x, self.ground().top() - player_height)
    }
}
