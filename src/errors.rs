// src/errors.rs

//! Crate-wide error type and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcyardError {
    /// A directory the run depends on is missing or not a directory.
    /// Fatal: surfaced before any process is spawned.
    #[error("path {0:?} does not exist or is not a directory")]
    NotADirectory(PathBuf),

    /// The OS failed to create a new process. No process exists after this;
    /// callers skip the affected work item and keep going.
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ProcyardError>;
