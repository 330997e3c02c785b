/// Core error types for Unison
use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors in the domain model itself
///
/// These are configuration errors: a playlist that cannot anchor a timeline
/// is rejected at load time, before any synchronization starts.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Playlist contains no tracks
    #[error("Playlist for {0} is empty")]
    EmptyPlaylist(NaiveDate),

    /// Playlist durations sum to zero
    #[error("Playlist for {0} has zero total duration")]
    ZeroTotalDuration(NaiveDate),

    /// A track carries a non-positive duration
    #[error("Track {id} has non-positive duration")]
    InvalidTrackDuration {
        /// Offending track id
        id: String,
    },

    /// A track id appears more than once
    #[error("Duplicate track id: {id}")]
    DuplicateTrackId {
        /// Offending track id
        id: String,
    },
}

/// Errors surfaced by a playlist provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Provider endpoint URL could not be used
    #[error("Invalid provider URL: {0}")]
    InvalidUrl(String),

    /// No playlist published for the requested date
    #[error("No playlist published for {0}")]
    NotFound(NaiveDate),

    /// Transport-level failure (connect, timeout, read)
    #[error("Network error: {0}")]
    Network(String),

    /// Response decoded but did not form a valid playlist
    #[error("Invalid playlist: {0}")]
    InvalidPlaylist(#[from] CoreError),

    /// Response body could not be decoded at all
    #[error("Malformed playlist document: {0}")]
    Malformed(String),
}

impl ProviderError {
    /// Whether a retry has any chance of succeeding
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProviderError::Network(_))
    }
}

/// Errors surfaced by a playback controller
#[derive(Error, Debug)]
pub enum PlayerError {
    /// Track could not be loaded into the device
    #[error("Load failed: {0}")]
    Load(String),

    /// Seek was rejected or could not complete
    #[error("Seek failed: {0}")]
    Seek(String),

    /// Device cannot report a position right now
    #[error("Device unavailable: {0}")]
    Unavailable(String),
}
