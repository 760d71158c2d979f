//! Error types for the CLI application.

use logsweep_janitor::JanitorError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// The sweep could not run
    #[error("{0}")]
    Janitor(#[from] JanitorError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Janitor(err) => err.exit_code(),
            CliError::Io(_) | CliError::Serialization(_) => 1,
        }
    }
}
