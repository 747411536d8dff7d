//! Error types for the fiction engine.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for fiction operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Errors that can occur while playing a story.
#[derive(Debug, Error)]
pub enum FictionError {
    /// The player asked for a choice that is not currently available.
    /// Recoverable: nothing was changed, prompt again.
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// A destination or the current location is missing from the content.
    /// Fatal: the content is broken.
    #[error("location not found: \"{0}\"")]
    UnknownLocation(String),

    /// The session has already reached an ending or deadlock.
    #[error("the investigation is over")]
    SessionEnded,

    /// The engine configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    ConfigIo {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The engine configuration is not valid TOML or has bad values.
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    /// The content could not be loaded.
    #[error(transparent)]
    Content(#[from] bw_core::CoreError),
}

impl FictionError {
    /// Whether the turn can simply be retried.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FictionError::InvalidChoice(_))
    }
}
