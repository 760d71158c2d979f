//! Configuration for Janitor operations
//!
//! Defines the retention window and operational modes of a sweep.

use crate::JanitorError;
use logsweep_domain::RetentionPolicy;
use serde::{Deserialize, Serialize};

/// Configuration for the Janitor
///
/// # Examples
///
/// ```
/// use logsweep_janitor::JanitorConfig;
///
/// let config = JanitorConfig::default();
/// assert_eq!(config.retention_days, 7);
///
/// let config = JanitorConfig::with_retention(30).dry_run(true);
/// assert!(config.dry_run);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JanitorConfig {
    /// Streams whose last event is older than this many days are stale
    /// Default: 7 days
    pub retention_days: u32,

    /// Dry-run mode: classify and count without issuing any delete call
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,

    /// Warn when a stream listing is not ordered newest-first
    /// Default: true
    #[serde(default = "default_verify_ordering")]
    pub verify_ordering: bool,

    /// Keep inspecting a group whose newest stream is live, deleting every
    /// stale trailing stream individually
    /// Default: false (a live head keeps the whole group)
    #[serde(default)]
    pub prune_tail_streams: bool,
}

fn default_verify_ordering() -> bool {
    true
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            retention_days: 7,
            dry_run: false,
            verify_ordering: true,
            prune_tail_streams: false,
        }
    }
}

impl JanitorConfig {
    /// Configuration with the given retention window and defaults otherwise
    pub fn with_retention(retention_days: u32) -> Self {
        Self {
            retention_days,
            ..Default::default()
        }
    }

    /// Toggle dry-run mode
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Reject configurations the sweep cannot run with
    pub fn validate(&self) -> Result<(), JanitorError> {
        if self.retention_days == 0 {
            return Err(JanitorError::Config(
                "retention_days must be a positive number of days".into(),
            ));
        }
        Ok(())
    }

    /// Retention policy derived from this configuration
    pub fn policy(&self) -> RetentionPolicy {
        RetentionPolicy::new(self.retention_days).with_dry_run(self.dry_run)
    }
}
