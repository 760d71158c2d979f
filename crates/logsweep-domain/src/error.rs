//! Error module - failures reported by a log store

use std::fmt;

/// Exit code used when a failure carries no status of its own
pub const UNEXPECTED_EXIT_CODE: i32 = 1;

/// Failure of a single log store call
///
/// The sweep treats the two kinds differently: a reported failure is logged
/// and the entity is skipped, an unexpected one is also recorded in the skip
/// list for manual review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store answered with a non-zero status
    Reported {
        /// Status code returned by the store
        code: i32,
        /// Diagnostic output accompanying the status
        message: String,
    },

    /// Anything else: transport failure, undecodable response, missing status
    Unexpected(String),
}

impl StoreError {
    /// Create a reported failure
    pub fn reported(code: i32, message: impl Into<String>) -> Self {
        Self::Reported {
            code,
            message: message.into(),
        }
    }

    /// Create an unexpected failure
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Status code to surface for this failure
    ///
    /// # Examples
    ///
    /// ```
    /// use logsweep_domain::StoreError;
    ///
    /// assert_eq!(StoreError::reported(254, "denied").code(), 254);
    /// assert_eq!(StoreError::unexpected("bad json").code(), 1);
    /// ```
    pub fn code(&self) -> i32 {
        match self {
            StoreError::Reported { code, .. } => *code,
            StoreError::Unexpected(_) => UNEXPECTED_EXIT_CODE,
        }
    }

    /// Whether this failure was reported by the store itself
    pub fn is_reported(&self) -> bool {
        matches!(self, StoreError::Reported { .. })
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Reported { code, message } if message.is_empty() => {
                write!(f, "store call failed (error code: {})", code)
            }
            StoreError::Reported { code, message } => {
                write!(f, "{} (error code: {})", message, code)
            }
            StoreError::Unexpected(message) => write!(f, "unexpected problem: {}", message),
        }
    }
}

impl std::error::Error for StoreError {}
