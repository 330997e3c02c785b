/// Playlist domain type
use crate::error::{CoreError, Result};
use crate::types::Track;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// The ordered track list for one UTC day
///
/// Insertion order is significant: it is the input ordering the daily
/// shuffle permutes, and every client must start from the same one.
/// Construction validates the timeline invariant (non-empty, total
/// duration > 0, unique ids); an instance that exists is always usable as
/// a timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// UTC calendar day this playlist was computed for
    pub rotation_date: NaiveDate,

    /// Ordered member tracks
    tracks: Vec<Track>,
}

impl Playlist {
    /// Create a playlist, validating the timeline invariant
    pub fn new(rotation_date: NaiveDate, tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(CoreError::EmptyPlaylist(rotation_date));
        }

        let mut seen = HashSet::new();
        for track in &tracks {
            if track.duration_secs == 0 {
                return Err(CoreError::InvalidTrackDuration {
                    id: track.id.clone(),
                });
            }
            if !seen.insert(track.id.as_str()) {
                return Err(CoreError::DuplicateTrackId {
                    id: track.id.clone(),
                });
            }
        }

        // Unreachable while per-track durations are positive, but the
        // invariant is total > 0, so it is checked on its own terms.
        if tracks.iter().map(|t| t.duration_secs).sum::<u64>() == 0 {
            return Err(CoreError::ZeroTotalDuration(rotation_date));
        }

        Ok(Self {
            rotation_date,
            tracks,
        })
    }

    /// Ordered member tracks
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of member tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false for a constructed playlist; kept for idiomatic pairing
    /// with `len`
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Sum of member durations in whole seconds
    pub fn total_duration_secs(&self) -> u64 {
        self.tracks.iter().map(|t| t.duration_secs).sum()
    }

    /// Sum of member durations
    pub fn total_duration(&self) -> Duration {
        Duration::from_secs(self.total_duration_secs())
    }

    /// Find the index of a track by id
    pub fn index_of(&self, track_id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == track_id)
    }

    /// Replace the track ordering with a permutation of the same tracks
    ///
    /// Used after the daily shuffle; the caller guarantees `tracks` is a
    /// permutation of the current members, so the invariant still holds.
    pub fn with_order(&self, tracks: Vec<Track>) -> Self {
        debug_assert_eq!(tracks.len(), self.tracks.len());
        Self {
            rotation_date: self.rotation_date,
            tracks,
        }
    }
}
