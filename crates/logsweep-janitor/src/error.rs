//! Error types for Janitor operations

use logsweep_domain::StoreError;
use thiserror::Error;

/// Errors that abort a sweep
///
/// Per-entity failures never surface here; they are absorbed by the sweep
/// and reported through events and the skip list.
#[derive(Error, Debug)]
pub enum JanitorError {
    /// The initial group listing failed, nothing can proceed
    #[error("Listing log groups failed: {0}")]
    Listing(StoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl JanitorError {
    /// Process exit code matching this error
    ///
    /// A failed listing exits with the store's own status code.
    pub fn exit_code(&self) -> i32 {
        match self {
            JanitorError::Listing(err) => err.code(),
            JanitorError::Config(_) => 2,
        }
    }
}
