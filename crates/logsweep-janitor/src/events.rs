//! Progress events emitted while a sweep runs
//!
//! The engine never prints. Presentation layers implement [`SweepObserver`]
//! and render each decision however they like.

use crate::SkippedEntity;
use logsweep_domain::StoreError;

/// One decision or outcome during a sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepEvent {
    /// The group has no streams and was left alone
    GroupEmpty {
        /// Group name
        group: String,
    },

    /// The newest stream is live, so the whole group is kept
    GroupLive {
        /// Group name
        group: String,
    },

    /// The newest stream is stale, the group is about to be deleted
    GroupDeleting {
        /// Group name
        group: String,
        /// Number of streams going with it
        streams: usize,
    },

    /// Group deletion succeeded (or was simulated)
    GroupDeleted {
        /// Group name
        group: String,
        /// Groups deleted so far in this sweep
        total: usize,
    },

    /// The store refused to delete the group
    GroupDeleteFailed {
        /// Group name
        group: String,
        /// Reported failure
        error: StoreError,
    },

    /// A trailing stream is stale and about to be deleted
    StreamDeleting {
        /// Group name
        group: String,
        /// Stream name
        stream: String,
    },

    /// Stream deletion succeeded (or was simulated)
    StreamDeleted {
        /// Group name
        group: String,
        /// Stream name
        stream: String,
        /// Streams deleted so far in this sweep
        total: usize,
    },

    /// The store refused to delete the stream
    StreamDeleteFailed {
        /// Group name
        group: String,
        /// Stream name
        stream: String,
        /// Reported failure
        error: StoreError,
    },

    /// A trailing stream is live and left untouched
    StreamIgnored {
        /// Group name
        group: String,
        /// Stream name
        stream: String,
    },

    /// The store refused to list the group's streams
    StreamListFailed {
        /// Group name
        group: String,
        /// Reported failure
        error: StoreError,
    },

    /// An unexpected failure made the sweep abandon an entity
    EntitySkipped {
        /// The abandoned group or group/stream pair
        entity: SkippedEntity,
        /// The failure
        error: StoreError,
    },

    /// The stream listing of a group was not ordered newest-first
    OrderingViolated {
        /// Group name
        group: String,
    },

    /// The closing group listing failed, so the after-size is unknown
    AfterListingFailed {
        /// The failure
        error: StoreError,
    },
}

/// Receiver of sweep progress
pub trait SweepObserver {
    /// Called once for every event, in sweep order
    fn on_event(&mut self, event: &SweepEvent);
}

/// Observer that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SweepObserver for NoopObserver {
    fn on_event(&mut self, _event: &SweepEvent) {}
}

impl<F> SweepObserver for F
where
    F: FnMut(&SweepEvent),
{
    fn on_event(&mut self, event: &SweepEvent) {
        self(event)
    }
}
