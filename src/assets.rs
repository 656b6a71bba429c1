/// Presentation assets, resolved once at load time.
///
/// A sprite is a small block of text art read from `<dir>/<name>.txt`.  If
/// the file is missing or unreadable the entity is drawn as a plain filled
/// block instead; the choice is never revisited.
use std::fs;
use std::path::Path;

use tracing::{info, warn};

#[derive(Clone, Debug, PartialEq)]
pub enum Appearance {
    Sprite(Vec<String>),
    Placeholder,
}

impl Appearance {
    pub fn load(dir: &Path, name: &str) -> Self {
        let path = dir.join(format!("{name}.txt"));
        match fs::read_to_string(&path) {
            Ok(text) => {
                let rows: Vec<String> = text
                    .lines()
                    .map(|l| l.trim_end().to_string())
                    .filter(|l| !l.is_empty())
                    .collect();
                if rows.is_empty() {
                    warn!(path = %path.display(), "sprite file is empty, using placeholder");
                    Appearance::Placeholder
                } else {
                    Appearance::Sprite(rows)
                }
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "sprite unavailable, using placeholder");
                Appearance::Placeholder
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Assets {
    pub player: Appearance,
    pub enemy: Appearance,
    pub collectible: Appearance,
}

impl Assets {
    pub fn load(dir: &Path) -> Self {
        let assets = Self {
            player: Appearance::load(dir, "player"),
            enemy: Appearance::load(dir, "enemy"),
            collectible: Appearance::load(dir, "collectible"),
        };
        info!(dir = %dir.display(), "assets resolved");
        assets
    }

    pub fn placeholders() -> Self {
        Self {
            player: Appearance::Placeholder,
            enemy: Appearance::Placeholder,
            collectible: Appearance::Placeholder,
        }
    }
}

/// Audible cues.  Output stays silent until the first key press unlocks it,
/// and never unlocks when muted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    Bell,
    Silent,
}

#[derive(Clone, Debug)]
pub struct AudioGate {
    muted: bool,
    unlocked: bool,
}

impl AudioGate {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            unlocked: false,
        }
    }

    /// Called on every key press; only the first one matters.
    pub fn unlock(&mut self) {
        if !self.unlocked && !self.muted {
            self.unlocked = true;
            info!("audio unlocked");
        }
    }

    pub fn cue(&self) -> AudioCue {
        if self.unlocked {
            AudioCue::Bell
        } else {
            AudioCue::Silent
        }
    }
}
