//! Error types for lsc-fs

use std::path::PathBuf;

/// Result type for lsc-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lsc-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rules file missing or not readable
    #[error("{path} does not exist or is not readable.")]
    NotReadable { path: PathBuf },

    /// Rules file cannot be written
    #[error("File is not writable: {path}")]
    NotWritable { path: PathBuf },

    /// Pre-overwrite backup copy failed; the overwrite must not proceed
    #[error("Failed to back up {path} to {backup}, abort changes.")]
    BackupFailed {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Fewer bytes landed on disk than were handed to the overwrite
    #[error("Failed to overwrite {path}: wrote {written} of {expected} bytes.")]
    ShortWrite {
        path: PathBuf,
        written: u64,
        expected: u64,
    },

    /// Exclusive lock could not be acquired for the overwrite
    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    /// Underlying I/O failure
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
