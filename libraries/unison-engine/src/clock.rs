//! Time source capability
//!
//! The engine never reads the system clock directly; it goes through the
//! [`Clock`] trait so tests (and unusual deployments) can supply their
//! own. Readings are gated for plausibility before any timeline math
//! runs: a reading before the temporal anchor or absurdly far past it
//! suspends synchronization until the clock looks sane again.

use crate::error::EngineError;
use crate::seed::TEMPORAL_ANCHOR;
use chrono::{DateTime, Duration, Utc};

/// Upper plausibility bound, in days past the anchor (~200 years)
const PLAUSIBLE_WINDOW_DAYS: i64 = 200 * 365;

/// Supplier of the current instant
pub trait Clock: Send + Sync {
    /// The current instant
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Whether a reading can be trusted for synchronization
pub fn is_plausible(reading: DateTime<Utc>) -> bool {
    reading >= TEMPORAL_ANCHOR
        && reading - TEMPORAL_ANCHOR <= Duration::days(PLAUSIBLE_WINDOW_DAYS)
}

/// Gate a reading, rejecting implausible ones
pub fn check(reading: DateTime<Utc>) -> Result<(), EngineError> {
    if is_plausible(reading) {
        Ok(())
    } else {
        Err(EngineError::ImplausibleClock { reading })
    }
}
