/// Playback device reporting types
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What the playback device reports it is actually doing
///
/// The device reports the id of the track it is rendering, not an index:
/// it has no notion of the day's shuffled order. The drift monitor
/// resolves the id against its own active ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Id of the track currently rendering
    pub track_id: String,

    /// Position within that track
    pub offset: Duration,
}

/// Asynchronous device notifications
///
/// Delivered to the sync session over a channel, decoupled from the
/// request/response surface of `PlaybackController`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// The current track played to its end
    TrackEnded {
        /// Id of the track that finished
        track_id: String,
    },

    /// The device hit an error it could not recover internally
    Error {
        /// Device-provided description
        message: String,
    },
}
