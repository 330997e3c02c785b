//! Synchronization events
//!
//! Event-based communication for UI and observability. Events are emitted
//! at key points of the monitor loop:
//! - State transitions of the drift machine
//! - Drift detection and corrections (issued / confirmed / failed)
//! - Day-boundary rotations (pending, then applied at track end)
//! - Clock and provider health

use crate::monitor::SyncState;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Events emitted by the sync session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncEvent {
    /// First playlist loaded and playback started on the shared timeline
    Started {
        /// Day the active playlist was computed for
        rotation_date: NaiveDate,
        /// Number of tracks in the active order
        track_count: usize,
    },

    /// Drift machine transitioned
    StateChanged {
        /// The new state
        state: SyncState,
    },

    /// Expected and actual positions disagree beyond the threshold
    DriftDetected {
        /// Offset the timeline math expects, in seconds
        expected_secs: u64,
        /// Offset the device reported, in seconds
        actual_secs: u64,
        /// Whether the device is on the wrong track entirely
        track_mismatch: bool,
    },

    /// A corrective seek/load was issued to the device
    CorrectionIssued {
        /// Sequence number tagging this correction
        sequence: u64,
        /// Track index being corrected to
        track_index: usize,
        /// Offset being corrected to, in seconds
        offset_secs: u64,
    },

    /// A reported position confirmed the correction landed
    Resynced {
        /// Sequence number of the confirmed correction
        sequence: u64,
    },

    /// A correction failed or its confirmation timed out
    CorrectionFailed {
        /// Sequence number of the failed correction
        sequence: u64,
        /// Consecutive failures so far
        consecutive_failures: u32,
    },

    /// Corrections keep failing; surfaced as a warning while retries
    /// continue
    PersistentDesync {
        /// Consecutive failures so far
        consecutive_failures: u32,
    },

    /// A new day's playlist is ready, waiting for the current track to end
    RotationPending {
        /// Day the pending playlist was computed for
        rotation_date: NaiveDate,
    },

    /// The pending playlist became the active order
    PlaylistRotated {
        /// Day the new active playlist was computed for
        rotation_date: NaiveDate,
        /// Number of tracks in the new order
        track_count: usize,
    },

    /// The clock reading fell outside the plausible window; sync suspended
    ClockSuspect {
        /// The rejected reading
        reading: DateTime<Utc>,
    },

    /// Clock readings are sane again; sync resumed
    ClockRecovered,

    /// Playlist fetch failed; the active playlist stays in use
    ProviderUnavailable {
        /// Provider-reported failure
        message: String,
    },

    /// The playback device reported an error
    PlayerError {
        /// Device-reported failure
        message: String,
    },
}
