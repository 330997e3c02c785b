//! Wire types for the published playlist document
//!
//! The document is an ordered JSON array of track records. Field names are
//! the published camelCase ones; ordering in the array is the input
//! ordering the daily shuffle permutes, so it is preserved exactly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use unison_core::{Playlist, ProviderError, Track};

/// One track record as published
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRecord {
    /// Unique track identifier
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Duration in whole seconds
    pub duration: u64,

    /// Media URL
    pub media_uri: String,

    /// Artwork URL
    pub artwork_uri: String,
}

impl From<TrackRecord> for Track {
    fn from(record: TrackRecord) -> Self {
        Track {
            id: record.id,
            title: record.title,
            artist: record.artist,
            duration_secs: record.duration,
            media_uri: record.media_uri,
            artwork_uri: record.artwork_uri,
        }
    }
}

/// Validate a fetched document into a domain playlist
pub fn into_playlist(
    records: Vec<TrackRecord>,
    date: NaiveDate,
) -> Result<Playlist, ProviderError> {
    let tracks = records.into_iter().map(Track::from).collect();
    Playlist::new(date, tracks).map_err(ProviderError::from)
}
