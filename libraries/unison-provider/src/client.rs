//! HTTP playlist provider client.

use crate::types::{self, TrackRecord};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use unison_core::{Playlist, PlaylistProvider, ProviderError};

/// Provider configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the station, e.g. `https://station.example.com`
    pub base_url: String,

    /// Per-request timeout in seconds (default: 30)
    pub request_timeout_secs: u64,

    /// Connect timeout in seconds (default: 10)
    pub connect_timeout_secs: u64,

    /// Total attempts per fetch, including the first (default: 3)
    pub max_attempts: u32,

    /// Base delay between retries in milliseconds, doubled per attempt
    /// (default: 500)
    pub retry_base_ms: u64,
}

impl ProviderConfig {
    /// Configuration with defaults for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            max_attempts: 3,
            retry_base_ms: 500,
        }
    }
}

/// Playlist provider backed by the station's published JSON documents
///
/// Fetches `{base}/playlists/{date}.json`, validates the document into a
/// domain [`Playlist`], retries transport failures with exponential
/// backoff, and keeps the last successfully fetched playlist so a caller
/// can keep operating through an outage.
pub struct HttpPlaylistProvider {
    http: Client,
    base_url: String,
    max_attempts: u32,
    retry_base: Duration,
    last_good: RwLock<Option<Playlist>>,
}

impl HttpPlaylistProvider {
    /// Create a provider with the given configuration.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        if config.base_url.is_empty() {
            return Err(ProviderError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ProviderError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(format!("Unison/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            max_attempts: config.max_attempts.max(1),
            retry_base: Duration::from_millis(config.retry_base_ms),
            last_good: RwLock::new(None),
        })
    }

    /// The last playlist a fetch returned successfully, if any.
    pub async fn cached(&self) -> Option<Playlist> {
        self.last_good.read().await.clone()
    }

    /// One fetch attempt, no retries.
    async fn fetch_once(&self, date: NaiveDate) -> Result<Playlist, ProviderError> {
        let url = format!(
            "{}/playlists/{}.json",
            self.base_url,
            date.format("%Y-%m-%d")
        );
        debug!(url = %url, "fetching playlist document");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(date));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Network(format!(
                "server returned {status}: {body}"
            )));
        }

        let records: Vec<TrackRecord> = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        types::into_playlist(records, date)
    }
}

#[async_trait]
impl PlaylistProvider for HttpPlaylistProvider {
    async fn fetch(&self, date: NaiveDate) -> Result<Playlist, ProviderError> {
        let mut attempt = 1u32;
        loop {
            match self.fetch_once(date).await {
                Ok(playlist) => {
                    info!(
                        date = %date,
                        tracks = playlist.len(),
                        total_secs = playlist.total_duration_secs(),
                        "playlist fetched"
                    );
                    *self.last_good.write().await = Some(playlist.clone());
                    return Ok(playlist);
                }
                Err(e) if e.is_retryable() && attempt < self.max_attempts => {
                    let delay = self.retry_base * 2u32.saturating_pow(attempt - 1);
                    warn!(
                        error = %e,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "playlist fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
