/// Track domain type
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single entry in the shared timeline
///
/// Tracks are immutable once loaded: every client must agree on the exact
/// same durations, or their computed positions diverge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Track duration in whole seconds (always positive)
    pub duration_secs: u64,

    /// Where the audio lives (CDN/file URL, resolved by the device)
    pub media_uri: String,

    /// Artwork image URL
    pub artwork_uri: String,
}

impl Track {
    /// Get the track duration as a `Duration`
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_conversion() {
        let track = Track {
            id: "t1".to_string(),
            title: "Test Song".to_string(),
            artist: "Test Artist".to_string(),
            duration_secs: 180,
            media_uri: "https://cdn.example.com/t1.mp3".to_string(),
            artwork_uri: "https://cdn.example.com/t1.jpg".to_string(),
        };

        assert_eq!(track.duration(), Duration::from_secs(180));
    }
}
