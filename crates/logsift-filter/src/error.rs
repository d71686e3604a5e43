use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Direction of a history step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryDirection {
    Undo,
    Redo,
}

impl fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undo => f.write_str("undo"),
            Self::Redo => f.write_str("redo"),
        }
    }
}

/// Errors raised by filter operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Criteria is malformed or incomplete; the operation was aborted
    #[error("invalid filter: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Undo or redo at a history boundary
    #[error("nothing to {0}")]
    NoOp(HistoryDirection),

    /// Criteria reached the engine with no values
    #[error("criteria has no values")]
    InvalidCriteria,
}

impl FilterError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    /// Messages suitable for showing to the user
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation(errors) => errors.clone(),
            other => vec![other.to_string()],
        }
    }
}

/// Errors raised by persistence stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to determine data directory")]
    NoDataDir,

    #[error("failed to access store file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage quota exceeded ({needed} bytes needed, {quota} available)")]
    QuotaExceeded { needed: usize, quota: usize },
}

pub type Result<T> = std::result::Result<T, FilterError>;
