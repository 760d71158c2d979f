//! Trait definitions for external interactions
//!
//! The log store is an external collaborator. Implementations live in other
//! crates (`logsweep-aws`) or in tests.

use crate::{LogGroup, LogStream, StoreError};

/// Trait for querying and pruning a hierarchical log store
///
/// Calls are blocking request/response with no retry. Every failure is
/// classified as either [`StoreError::Reported`] or [`StoreError::Unexpected`].
pub trait LogStore {
    /// List every log group with its stored-byte size
    fn list_log_groups(&mut self) -> Result<Vec<LogGroup>, StoreError>;

    /// List the streams of a group, newest-first by last-event timestamp
    fn list_log_streams(&mut self, group: &str) -> Result<Vec<LogStream>, StoreError>;

    /// Delete a group together with all of its streams
    fn delete_log_group(&mut self, group: &str) -> Result<(), StoreError>;

    /// Delete a single stream from a group
    fn delete_log_stream(&mut self, group: &str, stream: &str) -> Result<(), StoreError>;
}
