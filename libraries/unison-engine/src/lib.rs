//! Unison - Temporal Synchronization Engine
//!
//! Maps wall-clock time onto a shared audio timeline so that independent,
//! uncoordinated clients all play the same thing at the same moment.
//!
//! This crate provides:
//! - Daily seed derivation from UTC midnight (`seed`)
//! - Deterministic fixed-constant shuffle (`shuffle`)
//! - Timeline position calculation (`timeline`)
//! - Drift detection and correction state machine (`monitor`)
//! - The cooperatively scheduled tick loop with cancellation (`session`)
//! - A serializable event stream for UI/observability (`events`)
//!
//! # Architecture
//!
//! All the synchronization math is pure: seed, shuffle, and locate are
//! plain functions of their inputs and are safe to recompute freely. The
//! only persistent state - the seed in use, the active shuffled order, a
//! pending day-boundary rotation - is owned by the [`DriftMonitor`] and
//! written exclusively from within its own tick. There is no coordination
//! between clients: agreement is emergent from everyone computing the same
//! function of the same clock.
//!
//! # Example
//!
//! ```rust
//! use unison_engine::{daily_seed, locate, shuffle_playlist};
//! use unison_core::{Playlist, Track};
//! use chrono::{NaiveDate, TimeZone, Utc};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let tracks = vec![
//!     Track {
//!         id: "a".into(),
//!         title: "Opener".into(),
//!         artist: "Band".into(),
//!         duration_secs: 180,
//!         media_uri: "https://cdn.example.com/a.mp3".into(),
//!         artwork_uri: "https://cdn.example.com/a.jpg".into(),
//!     },
//!     Track {
//!         id: "b".into(),
//!         title: "Closer".into(),
//!         artist: "Band".into(),
//!         duration_secs: 120,
//!         media_uri: "https://cdn.example.com/b.mp3".into(),
//!         artwork_uri: "https://cdn.example.com/b.jpg".into(),
//!     },
//! ];
//! let playlist = Playlist::new(date, tracks).unwrap();
//!
//! // Every client computes the same order and the same position.
//! let now = Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap();
//! let order = shuffle_playlist(&playlist, daily_seed(now));
//! let position = locate(&order, unison_engine::elapsed_seconds(now)).unwrap();
//! assert!(position.track_index < order.len());
//! ```

#![forbid(unsafe_code)]

pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod monitor;
pub mod seed;
pub mod session;
pub mod shuffle;
pub mod timeline;

// Public exports
pub use clock::{Clock, SystemClock};
pub use config::SyncConfig;
pub use error::{EngineError, Result};
pub use events::SyncEvent;
pub use monitor::{DriftMonitor, SyncState};
pub use seed::{daily_seed, elapsed_seconds, rotation_date, TEMPORAL_ANCHOR};
pub use session::SyncSession;
pub use shuffle::{shuffle, shuffle_in_place, shuffle_playlist};
pub use timeline::locate;
