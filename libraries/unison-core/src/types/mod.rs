mod drift;
mod player;
mod playlist;
mod position;
mod track;

pub use drift::DriftSample;
pub use player::{PlaybackSnapshot, PlayerEvent};
pub use playlist::Playlist;
pub use position::PlaybackPosition;
pub use track::Track;
