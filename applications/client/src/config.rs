/// Client configuration
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use unison_engine::SyncConfig;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_station")]
    pub station: StationSettings,

    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationSettings {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl ClientConfig {
    /// Load configuration from file and environment
    pub fn load() -> anyhow::Result<Self> {
        let mut settings = config::Config::builder();

        // Load from config file if it exists
        let config_path = PathBuf::from("config.toml");
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        // Override with environment variables (prefixed with UNISON_)
        settings = settings.add_source(
            config::Environment::with_prefix("UNISON")
                .separator("_")
                .try_parsing(true),
        );

        let config = settings.build().context("building configuration")?;

        config
            .try_deserialize()
            .context("deserializing configuration")
    }
}

// Default values
fn default_station() -> StationSettings {
    StationSettings {
        url: default_url(),
        request_timeout_secs: default_request_timeout_secs(),
        max_attempts: default_max_attempts(),
    }
}

fn default_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    3
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            station: default_station(),
            sync: SyncConfig::default(),
        }
    }
}
