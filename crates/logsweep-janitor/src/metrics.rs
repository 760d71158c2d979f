//! Run-scoped accounting for a sweep

use serde::{Serialize, Serializer};
use std::fmt;

/// An entity the sweep gave up on after an unexpected failure
///
/// Displays as `group` or `group > stream`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntity {
    /// Group being processed
    pub group: String,

    /// Stream in progress when the failure occurred, if any
    pub stream: Option<String>,
}

impl SkippedEntity {
    /// A whole group was skipped
    pub fn group(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            stream: None,
        }
    }

    /// A stream was in progress when its group was abandoned
    pub fn stream(group: impl Into<String>, stream: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            stream: Some(stream.into()),
        }
    }
}

impl fmt::Display for SkippedEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.stream {
            Some(stream) => write!(f, "{} > {}", self.group, stream),
            None => write!(f, "{}", self.group),
        }
    }
}

impl Serialize for SkippedEntity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result of one sweep
///
/// Created when the sweep starts, mutated by the sweep only, and handed to the
/// reporting step at the end.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepResult {
    /// Groups deleted (or that would have been, in dry-run mode)
    pub groups_deleted: usize,

    /// Streams deleted, counting every stream of a deleted group
    pub streams_deleted: usize,

    /// Sum of stored bytes from the listing taken before any deletion
    pub bytes_before: u64,

    /// Sum of stored bytes from a fresh listing after the sweep
    ///
    /// `None` when that listing failed.
    pub bytes_after: Option<u64>,

    /// Store calls refused with a reported error; the sweep moved past them
    pub failed_calls: usize,

    /// Entities skipped due to unexpected errors, for manual review
    pub skipped: Vec<SkippedEntity>,

    /// Whether delete calls were suppressed
    pub dry_run: bool,

    /// Wall-clock runtime of the sweep in milliseconds
    pub runtime_ms: u64,
}

impl SweepResult {
    /// Create new empty result
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Record a group deletion that took `stream_count` streams with it
    pub fn record_group_deletion(&mut self, stream_count: usize) {
        self.groups_deleted += 1;
        self.streams_deleted += stream_count;
    }

    /// Record a single stream deletion
    pub fn record_stream_deletion(&mut self) {
        self.streams_deleted += 1;
    }

    /// Record a store call that was refused with a reported error
    pub fn record_failure(&mut self) {
        self.failed_calls += 1;
    }

    /// Record an entity skipped for manual review
    pub fn record_skip(&mut self, entity: SkippedEntity) {
        self.skipped.push(entity);
    }

    /// Whether anything needs manual follow-up
    pub fn has_skips(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Bytes released between the two listings
    pub fn bytes_reclaimed(&self) -> Option<u64> {
        self.bytes_after
            .map(|after| self.bytes_before.saturating_sub(after))
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let after = match self.bytes_after {
            Some(bytes) => bytes.to_string(),
            None => "unknown".to_string(),
        };

        let mut lines = vec![
            format!("deleted log groups: {}", self.groups_deleted),
            format!("deleted log streams: {}", self.streams_deleted),
            format!(
                "total log size before and after execution: {} -> {} bytes",
                self.bytes_before, after
            ),
        ];

        if self.failed_calls > 0 {
            lines.push(format!("failed store calls: {}", self.failed_calls));
        }

        if self.dry_run {
            lines.push("dry run: nothing was actually deleted".to_string());
        }

        if self.has_skips() {
            lines.push(String::new());
            lines.push("skipped due to unexpected errors (review manually):".to_string());
            for entity in &self.skipped {
                lines.push(format!("  {}", entity));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_creation() {
        let result = SweepResult::new(true);
        assert_eq!(result.groups_deleted, 0);
        assert_eq!(result.streams_deleted, 0);
        assert!(result.dry_run);
        assert!(!result.has_skips());
    }

    #[test]
    fn test_record_deletions() {
        let mut result = SweepResult::new(false);
        result.record_group_deletion(3);
        result.record_stream_deletion();
        result.record_group_deletion(1);

        assert_eq!(result.groups_deleted, 2);
        assert_eq!(result.streams_deleted, 5);
    }

    #[test]
    fn test_skipped_entity_display() {
        assert_eq!(SkippedEntity::group("G6").to_string(), "G6");
        assert_eq!(SkippedEntity::stream("G6", "S2").to_string(), "G6 > S2");
    }

    #[test]
    fn test_bytes_reclaimed() {
        let mut result = SweepResult::new(false);
        result.bytes_before = 1000;
        assert_eq!(result.bytes_reclaimed(), None);

        result.bytes_after = Some(400);
        assert_eq!(result.bytes_reclaimed(), Some(600));

        result.bytes_after = Some(1200);
        assert_eq!(result.bytes_reclaimed(), Some(0));
    }

    #[test]
    fn test_summary() {
        let mut result = SweepResult::new(false);
        result.record_group_deletion(2);
        result.bytes_before = 500;
        result.bytes_after = Some(120);
        result.record_skip(SkippedEntity::stream("/aws/lambda/api", "2024/01/01"));

        let summary = result.summary();
        assert!(summary.contains("deleted log groups: 1"));
        assert!(summary.contains("deleted log streams: 2"));
        assert!(summary.contains("500 -> 120 bytes"));
        assert!(summary.contains("/aws/lambda/api > 2024/01/01"));
        assert!(!summary.contains("dry run"));
        assert!(!summary.contains("failed store calls"));
    }

    #[test]
    fn test_summary_counts_failures() {
        let mut result = SweepResult::new(false);
        result.record_failure();
        result.record_failure();
        assert!(result.summary().contains("failed store calls: 2"));
    }

    #[test]
    fn test_summary_unknown_after() {
        let result = SweepResult::new(true);
        let summary = result.summary();
        assert!(summary.contains("0 -> unknown bytes"));
        assert!(summary.contains("dry run"));
    }

    #[test]
    fn test_json_shape() {
        let mut result = SweepResult::new(false);
        result.record_skip(SkippedEntity::group("broken"));
        result.record_failure();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["skipped"][0], "broken");
        assert_eq!(value["failed_calls"], 1);
        assert_eq!(value["bytes_after"], serde_json::Value::Null);
    }
}
