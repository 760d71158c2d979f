//! Core Janitor implementation: the retention sweep

use crate::{JanitorConfig, JanitorError, SkippedEntity, SweepEvent, SweepObserver, SweepResult};
use logsweep_domain::traits::LogStore;
use logsweep_domain::{is_newest_first, total_stored_bytes, LogGroup, RetentionPolicy, StoreError};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Current time in milliseconds since Unix epoch
fn current_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}

/// Unexpected failure that ends the processing of one group
struct GroupAbort {
    entity: SkippedEntity,
    error: StoreError,
}

impl GroupAbort {
    fn group(group: &str, error: StoreError) -> Self {
        Self {
            entity: SkippedEntity::group(group),
            error,
        }
    }

    fn stream(group: &str, stream: &str, error: StoreError) -> Self {
        Self {
            entity: SkippedEntity::stream(group, stream),
            error,
        }
    }
}

/// Janitor for retention-based cleanup of a log store
///
/// One sweep walks every group sequentially. For each group the streams are
/// listed newest-first and the head decides the group's fate:
/// - head stale: the whole group is deleted, no per-stream calls follow
/// - head live: the group is kept and, by default, the tail is not inspected
///
/// With `prune_tail_streams` enabled a live head no longer ends the group:
/// every stale trailing stream is deleted individually.
///
/// The head-only decision trusts the store's newest-first ordering. If that
/// ordering is violated a stale trailing stream can be missed;
/// `verify_ordering` reports such listings.
///
/// # Examples
///
/// ```no_run
/// use logsweep_janitor::{Janitor, JanitorConfig, NoopObserver};
/// # use logsweep_domain::{LogGroup, LogStream, LogStore, StoreError};
/// # struct Store;
/// # impl LogStore for Store {
/// #     fn list_log_groups(&mut self) -> Result<Vec<LogGroup>, StoreError> { Ok(vec![]) }
/// #     fn list_log_streams(&mut self, _: &str) -> Result<Vec<LogStream>, StoreError> { Ok(vec![]) }
/// #     fn delete_log_group(&mut self, _: &str) -> Result<(), StoreError> { Ok(()) }
/// #     fn delete_log_stream(&mut self, _: &str, _: &str) -> Result<(), StoreError> { Ok(()) }
/// # }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = Store;
/// let janitor = Janitor::new(JanitorConfig::with_retention(7));
///
/// let result = janitor.sweep(&mut store, &mut NoopObserver)?;
/// println!("{}", result.summary());
/// # Ok(())
/// # }
/// ```
pub struct Janitor {
    config: JanitorConfig,
}

impl Janitor {
    /// Create a new Janitor with the given configuration
    pub fn new(config: JanitorConfig) -> Self {
        Self { config }
    }

    /// Create a Janitor with default configuration
    pub fn default_config() -> Self {
        Self::new(JanitorConfig::default())
    }

    /// Get the configuration this Janitor runs with
    pub fn config(&self) -> &JanitorConfig {
        &self.config
    }

    /// Perform one sweep against the current system time
    ///
    /// Fails only when the initial group listing fails. Every later failure
    /// is isolated to its group and surfaces through events and
    /// [`SweepResult::skipped`].
    pub fn sweep<S, O>(&self, store: &mut S, observer: &mut O) -> Result<SweepResult, JanitorError>
    where
        S: LogStore,
        O: SweepObserver + ?Sized,
    {
        self.sweep_at(current_millis(), store, observer)
    }

    /// Perform one sweep with `now_millis` as the current time
    pub fn sweep_at<S, O>(
        &self,
        now_millis: i64,
        store: &mut S,
        observer: &mut O,
    ) -> Result<SweepResult, JanitorError>
    where
        S: LogStore,
        O: SweepObserver + ?Sized,
    {
        let start = Instant::now();
        let policy = self.config.policy();
        let mut result = SweepResult::new(policy.dry_run);

        let groups = store.list_log_groups().map_err(JanitorError::Listing)?;
        result.bytes_before = total_stored_bytes(&groups);

        tracing::info!(
            "Sweeping {} log groups (retention: {} days, dry run: {})",
            groups.len(),
            policy.retention_days,
            policy.dry_run
        );

        for group in &groups {
            let outcome =
                self.sweep_group(store, group, &policy, now_millis, &mut result, observer);
            if let Err(abort) = outcome {
                tracing::warn!(
                    "One entry may have been skipped ({}): {}",
                    abort.entity,
                    abort.error
                );
                observer.on_event(&SweepEvent::EntitySkipped {
                    entity: abort.entity.clone(),
                    error: abort.error,
                });
                result.record_skip(abort.entity);
            }
        }

        match store.list_log_groups() {
            Ok(groups) => result.bytes_after = Some(total_stored_bytes(&groups)),
            Err(error) => {
                tracing::warn!("Could not measure log size after sweep: {}", error);
                observer.on_event(&SweepEvent::AfterListingFailed { error });
            }
        }

        result.runtime_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        tracing::info!(
            "Sweep completed: {} groups, {} streams deleted, {} failed, {} skipped",
            result.groups_deleted,
            result.streams_deleted,
            result.failed_calls,
            result.skipped.len()
        );

        Ok(result)
    }

    /// Classify and prune one group
    ///
    /// Reported store failures are handled here and end in `Ok`. Unexpected
    /// failures abort the group and are returned to the caller for recording.
    fn sweep_group<S, O>(
        &self,
        store: &mut S,
        group: &LogGroup,
        policy: &RetentionPolicy,
        now_millis: i64,
        result: &mut SweepResult,
        observer: &mut O,
    ) -> Result<(), GroupAbort>
    where
        S: LogStore,
        O: SweepObserver + ?Sized,
    {
        let name = group.name.as_str();

        let streams = match store.list_log_streams(name) {
            Ok(streams) => streams,
            Err(error) if error.is_reported() => {
                tracing::warn!("Listing streams of group {} failed: {}", name, error);
                result.record_failure();
                observer.on_event(&SweepEvent::StreamListFailed {
                    group: name.to_string(),
                    error,
                });
                return Ok(());
            }
            Err(error) => return Err(GroupAbort::group(name, error)),
        };

        if streams.is_empty() {
            tracing::info!("No streams in group {}, skipping", name);
            observer.on_event(&SweepEvent::GroupEmpty {
                group: name.to_string(),
            });
            return Ok(());
        }

        if self.config.verify_ordering && !is_newest_first(&streams) {
            tracing::warn!(
                "Streams of group {} are not ordered newest-first; only the head is trusted",
                name
            );
            observer.on_event(&SweepEvent::OrderingViolated {
                group: name.to_string(),
            });
        }

        for (i, stream) in streams.iter().enumerate() {
            let stale = policy.is_stale(stream, now_millis);

            match (stale, i) {
                (true, 0) => {
                    tracing::info!("Deleting group {} ({} streams)", name, streams.len());
                    observer.on_event(&SweepEvent::GroupDeleting {
                        group: name.to_string(),
                        streams: streams.len(),
                    });

                    if !policy.dry_run {
                        match store.delete_log_group(name) {
                            Ok(()) => {}
                            Err(error) if error.is_reported() => {
                                tracing::warn!("Deleting group {} failed: {}", name, error);
                                result.record_failure();
                                observer.on_event(&SweepEvent::GroupDeleteFailed {
                                    group: name.to_string(),
                                    error,
                                });
                                return Ok(());
                            }
                            Err(error) => return Err(GroupAbort::group(name, error)),
                        }
                    }

                    result.record_group_deletion(streams.len());
                    observer.on_event(&SweepEvent::GroupDeleted {
                        group: name.to_string(),
                        total: result.groups_deleted,
                    });
                    // The group took its streams with it.
                    return Ok(());
                }
                (true, _) => {
                    tracing::info!("Deleting stream {} from group {}", stream.name, name);
                    observer.on_event(&SweepEvent::StreamDeleting {
                        group: name.to_string(),
                        stream: stream.name.clone(),
                    });

                    if !policy.dry_run {
                        match store.delete_log_stream(name, &stream.name) {
                            Ok(()) => {}
                            Err(error) if error.is_reported() => {
                                tracing::warn!(
                                    "Deleting stream {} from group {} failed: {}",
                                    stream.name,
                                    name,
                                    error
                                );
                                result.record_failure();
                                observer.on_event(&SweepEvent::StreamDeleteFailed {
                                    group: name.to_string(),
                                    stream: stream.name.clone(),
                                    error,
                                });
                                continue;
                            }
                            Err(error) => return Err(GroupAbort::stream(name, &stream.name, error)),
                        }
                    }

                    result.record_stream_deletion();
                    observer.on_event(&SweepEvent::StreamDeleted {
                        group: name.to_string(),
                        stream: stream.name.clone(),
                        total: result.streams_deleted,
                    });
                }
                (false, 0) => {
                    tracing::info!("Ignoring group {}", name);
                    observer.on_event(&SweepEvent::GroupLive {
                        group: name.to_string(),
                    });
                    // Newest-first: a live head keeps the group.
                    if !self.config.prune_tail_streams {
                        return Ok(());
                    }
                }
                (false, _) => {
                    tracing::debug!("Ignoring stream {} of group {}", stream.name, name);
                    observer.on_event(&SweepEvent::StreamIgnored {
                        group: name.to_string(),
                        stream: stream.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logsweep_domain::{LogStream, MILLIS_PER_DAY};
    use std::collections::HashMap;

    const NOW: i64 = 1_760_000_000_000;

    // Mock store for testing
    struct MockStore {
        groups: Vec<LogGroup>,
        streams: HashMap<String, Vec<LogStream>>,
        deleted_groups: Vec<String>,
        deleted_streams: Vec<(String, String)>,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                groups: Vec::new(),
                streams: HashMap::new(),
                deleted_groups: Vec::new(),
                deleted_streams: Vec::new(),
            }
        }

        fn add_group(&mut self, name: &str, bytes: u64, streams: Vec<LogStream>) {
            self.groups.push(LogGroup::new(name, bytes));
            self.streams.insert(name.to_string(), streams);
        }
    }

    impl LogStore for MockStore {
        fn list_log_groups(&mut self) -> Result<Vec<LogGroup>, StoreError> {
            Ok(self.groups.clone())
        }

        fn list_log_streams(&mut self, group: &str) -> Result<Vec<LogStream>, StoreError> {
            Ok(self.streams.get(group).cloned().unwrap_or_default())
        }

        fn delete_log_group(&mut self, group: &str) -> Result<(), StoreError> {
            self.groups.retain(|g| g.name != group);
            self.streams.remove(group);
            self.deleted_groups.push(group.to_string());
            Ok(())
        }

        fn delete_log_stream(&mut self, group: &str, stream: &str) -> Result<(), StoreError> {
            if let Some(streams) = self.streams.get_mut(group) {
                streams.retain(|s| s.name != stream);
            }
            self.deleted_streams.push((group.to_string(), stream.to_string()));
            Ok(())
        }
    }

    fn aged(name: &str, days: i64) -> LogStream {
        LogStream::new(name, NOW - days * MILLIS_PER_DAY)
    }

    fn janitor(retention_days: u32) -> Janitor {
        Janitor::new(JanitorConfig::with_retention(retention_days))
    }

    #[test]
    fn test_janitor_creation() {
        let janitor = Janitor::default_config();
        assert_eq!(janitor.config().retention_days, 7);
        assert!(!janitor.config().dry_run);
    }

    #[test]
    fn test_live_head_keeps_group() {
        let mut store = MockStore::new();
        store.add_group("G1", 100, vec![aged("S1", 1), aged("S2", 10)]);

        let result = janitor(7)
            .sweep_at(NOW, &mut store, &mut crate::NoopObserver)
            .unwrap();

        assert_eq!(result.groups_deleted, 0);
        assert_eq!(result.streams_deleted, 0);
        assert!(store.deleted_groups.is_empty());
        assert!(store.deleted_streams.is_empty());
    }

    #[test]
    fn test_stale_head_deletes_group() {
        let mut store = MockStore::new();
        store.add_group("G2", 300, vec![aged("S1", 10), aged("S2", 20)]);

        let result = janitor(7)
            .sweep_at(NOW, &mut store, &mut crate::NoopObserver)
            .unwrap();

        assert_eq!(result.groups_deleted, 1);
        assert_eq!(result.streams_deleted, 2);
        assert_eq!(store.deleted_groups, vec!["G2".to_string()]);
        assert!(store.deleted_streams.is_empty());
        assert_eq!(result.bytes_before, 300);
        assert_eq!(result.bytes_after, Some(0));
    }

    #[test]
    fn test_empty_group_is_skipped() {
        let mut store = MockStore::new();
        store.add_group("empty", 0, vec![]);

        let mut events = Vec::new();
        let result = janitor(7)
            .sweep_at(NOW, &mut store, &mut |e: &SweepEvent| events.push(e.clone()))
            .unwrap();

        assert_eq!(result.groups_deleted, 0);
        assert!(!result.has_skips());
        assert_eq!(
            events,
            vec![SweepEvent::GroupEmpty {
                group: "empty".to_string()
            }]
        );
    }

    #[test]
    fn test_head_without_timestamp_is_live() {
        let mut store = MockStore::new();
        store.add_group("quiet", 10, vec![LogStream::without_events("S1"), aged("S2", 90)]);

        let result = janitor(7)
            .sweep_at(NOW, &mut store, &mut crate::NoopObserver)
            .unwrap();

        assert_eq!(result.groups_deleted, 0);
        assert!(store.deleted_groups.is_empty());
    }

    #[test]
    fn test_unordered_listing_is_reported() {
        let mut store = MockStore::new();
        store.add_group("G", 10, vec![aged("S1", 30), aged("S2", 1), aged("S3", 40)]);

        let mut events = Vec::new();
        let result = janitor(7)
            .sweep_at(NOW, &mut store, &mut |e: &SweepEvent| events.push(e.clone()))
            .unwrap();

        // Head still decides: the group goes, no per-stream calls.
        assert_eq!(result.groups_deleted, 1);
        assert_eq!(result.streams_deleted, 3);
        assert!(store.deleted_streams.is_empty());
        assert!(events.contains(&SweepEvent::OrderingViolated {
            group: "G".to_string()
        }));
    }

    #[test]
    fn test_prune_tail_streams() {
        let mut store = MockStore::new();
        store.add_group(
            "G3",
            10,
            vec![aged("S1", 1), aged("S2", 3), aged("S3", 30), aged("S4", 45)],
        );

        let config = JanitorConfig {
            prune_tail_streams: true,
            ..JanitorConfig::with_retention(7)
        };
        let mut events = Vec::new();
        let result = Janitor::new(config)
            .sweep_at(NOW, &mut store, &mut |e: &SweepEvent| events.push(e.clone()))
            .unwrap();

        assert_eq!(result.groups_deleted, 0);
        assert_eq!(result.streams_deleted, 2);
        assert_eq!(
            store.deleted_streams,
            vec![
                ("G3".to_string(), "S3".to_string()),
                ("G3".to_string(), "S4".to_string()),
            ]
        );
        assert!(events.contains(&SweepEvent::StreamIgnored {
            group: "G3".to_string(),
            stream: "S2".to_string(),
        }));
    }

    #[test]
    fn test_ordering_check_can_be_disabled() {
        let mut store = MockStore::new();
        store.add_group("G", 10, vec![aged("S1", 1), aged("S2", 0)]);

        let config = JanitorConfig {
            verify_ordering: false,
            ..JanitorConfig::with_retention(7)
        };
        let mut events = Vec::new();
        Janitor::new(config)
            .sweep_at(NOW, &mut store, &mut |e: &SweepEvent| events.push(e.clone()))
            .unwrap();

        assert!(!events
            .iter()
            .any(|e| matches!(e, SweepEvent::OrderingViolated { .. })));
    }

    #[test]
    fn test_dry_run_counts_without_deleting() {
        let mut store = MockStore::new();
        store.add_group("G2", 300, vec![aged("S1", 10), aged("S2", 20)]);
        store.add_group("G1", 100, vec![aged("S1", 1)]);

        let config = JanitorConfig::with_retention(7).dry_run(true);
        let result = Janitor::new(config)
            .sweep_at(NOW, &mut store, &mut crate::NoopObserver)
            .unwrap();

        assert!(result.dry_run);
        assert_eq!(result.groups_deleted, 1);
        assert_eq!(result.streams_deleted, 2);
        assert!(store.deleted_groups.is_empty());
        assert_eq!(result.bytes_before, 400);
        assert_eq!(result.bytes_after, Some(400));
    }

    #[test]
    fn test_sweep_uses_system_clock() {
        let mut store = MockStore::new();
        // Year 2001: stale for any sane clock.
        store.add_group("ancient", 1, vec![LogStream::new("S1", 1_000_000_000_000)]);

        let result = janitor(7).sweep(&mut store, &mut crate::NoopObserver).unwrap();
        assert_eq!(result.groups_deleted, 1);
    }
}
