/// Derived playback position
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A position on the shared timeline
///
/// Recomputed on demand from wall-clock time; never persisted and never
/// the source of truth. Two values computed for the same instant against
/// the same playlist are always equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackPosition {
    /// Index into the (shuffled) playlist
    pub track_index: usize,

    /// Offset within that track, `0 <= offset < track duration`
    pub offset: Duration,
}

impl PlaybackPosition {
    /// Offset within the track in whole seconds
    pub fn offset_secs(&self) -> u64 {
        self.offset.as_secs()
    }
}
