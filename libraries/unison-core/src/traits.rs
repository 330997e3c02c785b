/// Capability traits at the system boundary
use crate::error::{PlayerError, ProviderError};
use crate::types::{PlaybackSnapshot, Playlist, Track};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;

/// Source of published playlists
///
/// Implementations own transport, caching, and headers entirely. The
/// engine only cares that a given UTC date resolves to a validated
/// `Playlist` or a classified failure.
#[async_trait]
pub trait PlaylistProvider: Send + Sync {
    /// Fetch the playlist published for a UTC calendar day
    async fn fetch(&self, date: NaiveDate) -> Result<Playlist, ProviderError>;
}

/// The actual media device being driven
///
/// Operations may complete asynchronously on the device side; the engine
/// tolerates that by confirming corrections against later reported
/// positions rather than trusting call completion.
#[async_trait]
pub trait PlaybackController: Send + Sync {
    /// Load a track and begin playback at the given offset
    async fn load(&self, track: &Track, offset: Duration) -> Result<(), PlayerError>;

    /// Seek within the currently loaded track
    async fn seek(&self, offset: Duration) -> Result<(), PlayerError>;

    /// Report what is actually playing right now
    async fn report(&self) -> Result<PlaybackSnapshot, PlayerError>;
}
