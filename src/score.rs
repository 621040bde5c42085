use std::cell::Cell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "torus-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Errors raised by high-score storage.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score file {} could not be accessed: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("score file {} is malformed: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("score storage is unavailable")]
    Unavailable,
}

/// Durable high-score storage.
pub trait HighScoreStore {
    /// Returns the stored high score, `0` when nothing was stored yet.
    fn load_high_score(&self) -> Result<u32, ScoreError>;

    fn save_high_score(&self, score: u32) -> Result<(), ScoreError>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    snake_highscore: u32,
}

/// Stores the high score as a small JSON document.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the platform-correct data location.
    #[must_use]
    pub fn default_location() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonScoreStore {
    fn load_high_score(&self) -> Result<u32, ScoreError> {
        load_high_score_from_path(&self.path)
    }

    fn save_high_score(&self, score: u32) -> Result<(), ScoreError> {
        save_high_score_to_path(&self.path, score)
    }
}

/// In-process store, optionally failing every call.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    score: Cell<u32>,
    failing: bool,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new(score: u32) -> Self {
        Self {
            score: Cell::new(score),
            failing: false,
        }
    }

    /// A store whose reads and writes always fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            score: Cell::new(0),
            failing: true,
        }
    }

    #[must_use]
    pub fn stored(&self) -> u32 {
        self.score.get()
    }
}

impl HighScoreStore for MemoryScoreStore {
    fn load_high_score(&self) -> Result<u32, ScoreError> {
        if self.failing {
            return Err(ScoreError::Unavailable);
        }
        Ok(self.score.get())
    }

    fn save_high_score(&self, score: u32) -> Result<(), ScoreError> {
        if self.failing {
            return Err(ScoreError::Unavailable);
        }
        self.score.set(score);
        Ok(())
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

fn load_high_score_from_path(path: &Path) -> Result<u32, ScoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(source) => {
            return Err(ScoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str::<ScoreFile>(&raw)
        .map(|file| file.snake_highscore)
        .map_err(|source| ScoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn save_high_score_to_path(path: &Path, score: u32) -> Result<(), ScoreError> {
    let io_error = |source: io::Error| ScoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let payload = ScoreFile {
        snake_highscore: score,
    };
    let json = serde_json::to_string_pretty(&payload).map_err(|source| ScoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, json).map_err(io_error)
}
