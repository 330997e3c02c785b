//! Unison Core
//!
//! Platform-agnostic types, capability traits, and error handling for the
//! Unison shared-timeline playback system.
//!
//! Every Unison client derives "what should be playing right now" from
//! wall-clock time and a published playlist. This crate provides the
//! building blocks that derivation is expressed in:
//! - **Domain Types**: `Track`, `Playlist`, `PlaybackPosition`, `DriftSample`
//! - **Capability Traits**: `PlaylistProvider`, `PlaybackController`
//! - **Error Handling**: `CoreError`, `ProviderError`, `PlayerError`
//!
//! The actual synchronization math lives in `unison-engine`; network
//! transport lives in `unison-provider`. Audio decoding, rendering, and UI
//! are outside the system entirely and reach it only through the
//! capability traits defined here.

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, PlayerError, ProviderError, Result};
pub use traits::{PlaybackController, PlaylistProvider};
pub use types::{DriftSample, PlaybackPosition, PlaybackSnapshot, PlayerEvent, Playlist, Track};
