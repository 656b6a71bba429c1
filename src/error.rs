use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid level `{name}`: {reason}")]
    InvalidLevel { name: String, reason: String },
    #[error("reset refused while the death sequence is playing")]
    ResetRefused,
}
