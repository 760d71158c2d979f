//! Logsweep Domain Layer
//!
//! Core model for the retention sweep. It has ZERO external dependencies and
//! defines the view objects, the retention rule, and the trait interface the
//! sweep engine uses to talk to a log store.
//!
//! ## Key Concepts
//!
//! - **Log group**: a named container of streams with a stored-bytes figure
//! - **Log stream**: a named sequence of entries, seen here only through its
//!   last-event timestamp
//! - **Retention policy**: the window (in days) that decides staleness
//! - **Log store**: the external system that lists and deletes groups/streams
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Infrastructure implementations (`logsweep-aws`) live in other crates
//! - Everything is an ephemeral view, materialized once per sweep

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod group;
pub mod retention;
pub mod traits;

// Re-exports for convenience
pub use error::StoreError;
pub use group::{total_stored_bytes, LogGroup, LogStream};
pub use retention::{is_newest_first, RetentionPolicy, MILLIS_PER_DAY};
pub use traits::LogStore;
