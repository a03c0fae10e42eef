//! CLI-specific error types
//!
//! These abort the process. Request-level failures (400/404/500) are not
//! CLI errors; they are printed as responses.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StoreError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The data directory or index could not be opened
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An argument that must be JSON was not
    #[error("Invalid JSON for {arg}: {source}")]
    InvalidJson {
        arg: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// stdin/stdout failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(e) => e.code(),
            CliError::Store(e) => e.code(),
            CliError::InvalidJson { .. } => "DOCSTORE_CLI_INVALID_JSON",
            CliError::Io(_) => "DOCSTORE_CLI_IO_ERROR",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
