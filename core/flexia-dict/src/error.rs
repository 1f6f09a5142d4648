use std::path::PathBuf;

/// Result alias used across the dictionary crate.
pub type Result<T, E = DictError> = std::result::Result<T, E>;

/// Failures that can only come from the line source or a snapshot buffer.
/// Malformed dictionary text is never an error.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("failed to read dictionary '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write snapshot '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid snapshot: {0}")]
    Snapshot(String),
}
