//! Error types for the writer pipeline.
//!
//! Two families:
//!
//! - [`WriteError`]: failures of a single write task. Collected into a
//!   [`BatchReport`](crate::batch::BatchReport), never fatal.
//! - [`FanoutError`]: failures of the directory lifecycle (create, list,
//!   delete). These abort the run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A single write task failed.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The file could not be written.
    #[error("write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Injected failure, raised after the file was fully written.
    #[error("simulated error during file write: {filename}")]
    Simulated { filename: String },

    /// The task panicked or was aborted before reporting an outcome.
    #[error("write task {index} did not complete: {message}")]
    Join { index: usize, message: String },
}

impl WriteError {
    /// True for injected failures.
    pub fn is_simulated(&self) -> bool {
        matches!(self, WriteError::Simulated { .. })
    }
}

/// Fatal errors that stop the run.
#[derive(Debug, Error)]
pub enum FanoutError {
    #[error("initialize output directory {}: {source}", .path.display())]
    DirectoryInit {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("list directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("delete {}: {source}", .path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
