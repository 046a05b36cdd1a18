//! Store error types for atlas-store.

use std::path::PathBuf;

use atlas_core::errors::CoreError;
use thiserror::Error;

/// Errors from reading, writing, or mutating the on-disk stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A document produced by an earlier pipeline stage is absent.
    #[error("{} not found. {hint}", path.display())]
    MissingStage { path: PathBuf, hint: &'static str },

    /// A store document exists but is not valid JSON for its type.
    #[error("Malformed {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Another process holds the data directory write lock.
    #[error("`atlas {command}` (pid {pid}) is writing the data directory; lock file {}", path.display())]
    LockHeld {
        pid: u32,
        command: String,
        path: PathBuf,
    },

    /// The lock file exists but its owner could not be determined.
    #[error("could not acquire write lock at {}; remove it if no atlas process is running", path.display())]
    LockUnavailable { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}
