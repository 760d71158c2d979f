//! Retention module - the staleness rule

use crate::LogStream;

/// Milliseconds in one retention day
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Retention policy for one sweep
///
/// A stream is stale when its last event lies strictly before
/// `now - retention_days`. Exactly on the boundary is live.
///
/// # Examples
///
/// ```
/// use logsweep_domain::{LogStream, RetentionPolicy, MILLIS_PER_DAY};
///
/// let policy = RetentionPolicy::new(7);
/// let now = 100 * MILLIS_PER_DAY;
///
/// assert!(policy.is_stale(&LogStream::new("old", now - 8 * MILLIS_PER_DAY), now));
/// assert!(!policy.is_stale(&LogStream::new("edge", now - 7 * MILLIS_PER_DAY), now));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Retention window in days (positive, validated at the boundary)
    pub retention_days: u32,

    /// Suppress delete side effects while keeping classification and counting
    pub dry_run: bool,
}

impl RetentionPolicy {
    /// Create a policy that performs real deletions
    pub fn new(retention_days: u32) -> Self {
        Self {
            retention_days,
            dry_run: false,
        }
    }

    /// Toggle dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Retention window in milliseconds
    pub fn window_millis(&self) -> i64 {
        i64::from(self.retention_days).saturating_mul(MILLIS_PER_DAY)
    }

    /// Oldest timestamp (epoch ms) that still counts as live at `now_millis`
    pub fn cutoff_millis(&self, now_millis: i64) -> i64 {
        now_millis.saturating_sub(self.window_millis())
    }

    /// Check whether a stream is stale at `now_millis`
    ///
    /// Streams without a last-event timestamp are never stale.
    pub fn is_stale(&self, stream: &LogStream, now_millis: i64) -> bool {
        match stream.last_event_timestamp {
            Some(ts) => ts < self.cutoff_millis(now_millis),
            None => false,
        }
    }
}

/// Check that a stream listing is ordered newest-first
///
/// Streams without a timestamp carry no ordering information and are ignored.
pub fn is_newest_first(streams: &[LogStream]) -> bool {
    let timestamps: Vec<i64> = streams
        .iter()
        .filter_map(|s| s.last_event_timestamp)
        .collect();

    timestamps.windows(2).all(|w| w[0] >= w[1])
}
