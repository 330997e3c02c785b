//! Error types for the synchronization engine

use chrono::{DateTime, Utc};
use thiserror::Error;
use unison_core::CoreError;

/// Engine errors
///
/// Provider and device failures never appear here: both are recoverable
/// by design and are absorbed inside the monitor loop (retry, backoff,
/// keep playing). What remains is what genuinely stops synchronization.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid timeline configuration (empty playlist, zero total duration)
    #[error(transparent)]
    Configuration(#[from] CoreError),

    /// System clock reading outside the plausible window
    #[error("Implausible clock reading: {reading}")]
    ImplausibleClock {
        /// The rejected reading
        reading: DateTime<Utc>,
    },
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
