//! Group module - view objects for log groups and their streams

/// A log group as reported by the store listing
///
/// `stored_bytes` is informational and only feeds before/after accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogGroup {
    /// Group name, unique within the store
    pub name: String,

    /// Total bytes the store reports for this group
    pub stored_bytes: u64,
}

impl LogGroup {
    /// Create a new group view
    pub fn new(name: impl Into<String>, stored_bytes: u64) -> Self {
        Self {
            name: name.into(),
            stored_bytes,
        }
    }
}

/// A log stream inside a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogStream {
    /// Stream name, unique within its group
    pub name: String,

    /// Time of the most recent entry, in milliseconds since the Unix epoch
    ///
    /// `None` when the store has never recorded an event for the stream.
    /// Such streams are treated as live.
    pub last_event_timestamp: Option<i64>,
}

impl LogStream {
    /// Create a stream with a known last-event timestamp
    ///
    /// # Examples
    ///
    /// ```
    /// use logsweep_domain::LogStream;
    ///
    /// let stream = LogStream::new("app/2024-01-01", 1_700_000_000_000);
    /// assert_eq!(stream.last_event_timestamp, Some(1_700_000_000_000));
    /// ```
    pub fn new(name: impl Into<String>, last_event_timestamp: i64) -> Self {
        Self {
            name: name.into(),
            last_event_timestamp: Some(last_event_timestamp),
        }
    }

    /// Create a stream that has no recorded events
    pub fn without_events(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_event_timestamp: None,
        }
    }
}

/// Sum the stored bytes of a group listing
pub fn total_stored_bytes(groups: &[LogGroup]) -> u64 {
    groups
        .iter()
        .fold(0u64, |acc, g| acc.saturating_add(g.stored_bytes))
}
