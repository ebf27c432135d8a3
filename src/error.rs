//! Error types for the snapshot and drift-detection system.

use std::path::PathBuf;
use thiserror::Error;

/// Domain errors raised while building, loading, or scanning snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// A path was missing or unreadable. Fatal during a build; during a
    /// drift scan the same condition is recorded as a dirty node instead.
    #[error("filesystem error at {path:?}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// More than one root-flagged folder was found in the persisted
    /// snapshot. Indicates snapshot corruption.
    #[error("multiple root folders found in persisted snapshot")]
    MultipleRoot,

    /// A root folder was expected but none is persisted.
    #[error("no root folder found in persisted snapshot")]
    NoRoot,

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Persistence-layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[from] sled::Error),

    #[error("record encoding error: {0}")]
    Codec(#[from] bincode::Error),

    /// A persisted folder referenced a child record that does not exist.
    #[error("missing record for {0}")]
    MissingRecord(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for SnapshotError {
    fn from(err: config::ConfigError) -> Self {
        SnapshotError::Config(err.to_string())
    }
}
