//! Logsweep Janitor
//!
//! Retention sweep engine for hierarchical log stores.
//!
//! # Overview
//!
//! One sweep:
//! 1. Lists all log groups and records their total stored bytes (fatal on failure)
//! 2. Lists each group's streams newest-first and classifies them against the
//!    retention window
//! 3. Deletes a group whose newest stream is stale
//! 4. Isolates per-group failures: reported failures are logged and skipped,
//!    unexpected ones are also recorded for manual review
//! 5. Lists the groups again to measure the size after the sweep
//!
//! # Usage
//!
//! ```no_run
//! use logsweep_janitor::{Janitor, JanitorConfig, SweepEvent};
//! # use logsweep_domain::{LogGroup, LogStream, LogStore, StoreError};
//! # struct Store;
//! # impl LogStore for Store {
//! #     fn list_log_groups(&mut self) -> Result<Vec<LogGroup>, StoreError> { Ok(vec![]) }
//! #     fn list_log_streams(&mut self, _: &str) -> Result<Vec<LogStream>, StoreError> { Ok(vec![]) }
//! #     fn delete_log_group(&mut self, _: &str) -> Result<(), StoreError> { Ok(()) }
//! #     fn delete_log_stream(&mut self, _: &str, _: &str) -> Result<(), StoreError> { Ok(()) }
//! # }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = Store;
//! let janitor = Janitor::new(JanitorConfig::with_retention(10).dry_run(true));
//!
//! let result = janitor.sweep(&mut store, &mut |event: &SweepEvent| {
//!     println!("{:?}", event);
//! })?;
//!
//! println!("{}", result.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod events;
mod janitor;
mod metrics;

pub use config::JanitorConfig;
pub use error::JanitorError;
pub use events::{NoopObserver, SweepEvent, SweepObserver};
pub use janitor::Janitor;
pub use metrics::{SkippedEntity, SweepResult};
