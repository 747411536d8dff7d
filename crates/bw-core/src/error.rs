use std::path::PathBuf;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while loading or assembling content.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The content file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The content file is not valid JSON or does not match the schema.
    #[error("invalid content: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two locations share the same id.
    #[error("duplicate location id: \"{0}\"")]
    DuplicateLocation(String),

    /// Two evidence entries share the same id.
    #[error("duplicate evidence id: \"{0}\"")]
    DuplicateEvidence(String),

    /// Two evidence entries share the same display name.
    #[error("evidence name \"{name}\" is used by both \"{first}\" and \"{second}\"")]
    DuplicateEvidenceName {
        /// The shared display name.
        name: String,
        /// Id of the entry registered first.
        first: String,
        /// Id of the conflicting entry.
        second: String,
    },
}
