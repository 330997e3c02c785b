//! HTTP playlist provider for Unison.
//!
//! Fetches the published daily playlist document over HTTP and turns it
//! into a validated [`unison_core::Playlist`]. Transport concerns -
//! timeouts, retry with backoff, last-good caching - live entirely here,
//! behind the narrow [`unison_core::PlaylistProvider`] seam.
//!
//! # Example
//!
//! ```ignore
//! use unison_provider::{HttpPlaylistProvider, ProviderConfig};
//! use unison_core::PlaylistProvider;
//! use chrono::Utc;
//!
//! let provider = HttpPlaylistProvider::new(ProviderConfig::new("https://station.example.com"))?;
//! let playlist = provider.fetch(Utc::now().date_naive()).await?;
//! println!("{} tracks today", playlist.len());
//! ```

#![forbid(unsafe_code)]

mod client;
pub mod types;

pub use client::{HttpPlaylistProvider, ProviderConfig};
