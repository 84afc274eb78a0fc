use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for word normalization, configuration and dataset I/O failures.
///
/// The text transformations themselves are total; only the word-level
/// collaborator and the surrounding I/O can fail.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("word normalizer '{normalizer}' failed on {word:?}: {reason}")]
    Normalizer {
        normalizer: String,
        word: String,
        reason: String,
    },
    #[error("word normalizer '{normalizer}' returned {got} words for {expected} inputs")]
    BatchMismatch {
        normalizer: String,
        expected: usize,
        got: usize,
    },
    #[error("failed to load lexicon {path:?}: {reason}")]
    Lexicon { path: PathBuf, reason: String },
    #[error("column '{column}' not found in {path:?}")]
    MissingColumn { column: String, path: PathBuf },
    #[error("record {line} in {path:?} is invalid: {reason}")]
    InvalidRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("unsupported dataset format: {0:?}")]
    UnsupportedFormat(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CleanError>;
