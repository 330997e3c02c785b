//! Engine configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the drift monitor loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Seconds between monitor ticks (default: 5)
    pub tick_interval_secs: u64,

    /// Drift beyond this many seconds triggers a correction (default: 5)
    pub drift_threshold_secs: u64,

    /// Seconds to wait for a correction to be confirmed by a reported
    /// position before counting it as failed (default: 10)
    pub resync_timeout_secs: u64,

    /// Base delay before retrying a failed correction (default: 1)
    pub backoff_base_secs: u64,

    /// Upper bound on the retry delay (default: 30)
    pub backoff_cap_secs: u64,

    /// Consecutive correction failures before a persistent-desync warning
    /// is surfaced (default: 3); retries continue regardless
    pub escalation_after: u32,
}

impl SyncConfig {
    /// Tick interval as a `Duration`
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }

    /// Drift threshold as a `Duration`
    pub fn drift_threshold(&self) -> Duration {
        Duration::from_secs(self.drift_threshold_secs)
    }

    /// Confirmation timeout as a `Duration`
    pub fn resync_timeout(&self) -> Duration {
        Duration::from_secs(self.resync_timeout_secs)
    }

    /// Retry delay after the given number of consecutive failures
    ///
    /// Exponential: base doubles per failure, capped. One failure yields
    /// the base delay.
    pub fn backoff_delay(&self, consecutive_failures: u32) -> Duration {
        let exponent = consecutive_failures.saturating_sub(1).min(16);
        let delay = self
            .backoff_base_secs
            .saturating_mul(1u64 << exponent)
            .min(self.backoff_cap_secs);
        Duration::from_secs(delay)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 5,
            drift_threshold_secs: 5,
            resync_timeout_secs: 10,
            backoff_base_secs: 1,
            backoff_cap_secs: 30,
            escalation_after: 3,
        }
    }
}
