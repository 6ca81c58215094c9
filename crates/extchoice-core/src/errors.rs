//! Error types for extchoice-core.
//!
//! Lookups never produce errors: a missing entry is `None` or an empty list.
//! Errors are reserved for persistence and for explicitly invalid arguments
//! (bad config, unsupported persisted versions).

use thiserror::Error;

/// Result alias used across the core crate.
pub type ChoiceResult<T> = Result<T, ChoiceError>;

#[derive(Debug, Error)]
pub enum ChoiceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChoiceError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Stable short code, reported by the CLI's `--json` error output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::NotFound(_) => "not_found",
            Self::Store(_) => "store",
            Self::Serialization(_) => "serialization",
            Self::Other(_) => "other",
        }
    }
}
