//! Storage error types
//!
//! Error codes:
//! - DOCSTORE_STORAGE_IO_ERROR (ERROR severity)
//! - DOCSTORE_DATA_CORRUPTION (FATAL severity)
//! - DOCSTORE_ENCODE_FAILED (ERROR severity)
//! - DOCSTORE_INVALID_COLLECTION (ERROR severity, caller's fault)
//!
//! "Not found" is not an error here. Lookups return `Option` and
//! mutations return [`Mutation`](super::Mutation).

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Severity levels for storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, the store stays usable
    Error,
    /// Persisted state cannot be trusted
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Errors raised by the collection store and the index table
#[derive(Debug, Error)]
pub enum StoreError {
    /// A container could not be read or written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A container exists but does not hold the expected JSON shape
    #[error("Malformed container {}: {source}", .path.display())]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// In-memory state could not be encoded back to JSON
    #[error("Failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The collection name cannot be mapped to a container file
    #[error("Invalid collection name '{name}': {reason}")]
    InvalidCollectionName { name: String, reason: &'static str },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupted(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StoreError::Corrupted {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_name(name: &str, reason: &'static str) -> Self {
        StoreError::InvalidCollectionName {
            name: name.to_string(),
            reason,
        }
    }

    /// Returns the string error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "DOCSTORE_STORAGE_IO_ERROR",
            StoreError::Corrupted { .. } => "DOCSTORE_DATA_CORRUPTION",
            StoreError::Encode { .. } => "DOCSTORE_ENCODE_FAILED",
            StoreError::InvalidCollectionName { .. } => "DOCSTORE_INVALID_COLLECTION",
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        match self {
            StoreError::Corrupted { .. } => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    /// Whether persisted state is unreadable
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    /// Whether the caller supplied bad input rather than the disk failing
    pub fn is_client_error(&self) -> bool {
        matches!(self, StoreError::InvalidCollectionName { .. })
    }
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;
