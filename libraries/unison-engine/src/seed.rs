//! Daily seed derivation
//!
//! The seed is the integer second count from the temporal anchor to the
//! current day's UTC midnight. Every instant within one UTC calendar day
//! maps to the same seed; the value changes exactly once, at midnight.
//! The calling environment's timezone plays no part in any of this.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// The fixed epoch reference all clients treat as instant zero
///
/// A single global constant, identical across all clients and all time.
/// Changing it is a protocol break.
pub const TEMPORAL_ANCHOR: DateTime<Utc> = DateTime::UNIX_EPOCH;

/// Rotation seed for the UTC calendar day containing `now`
///
/// Equal for any two instants within the same UTC day; any valid instant
/// produces a result.
pub fn daily_seed(now: DateTime<Utc>) -> u64 {
    let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    (midnight - TEMPORAL_ANCHOR).num_seconds().max(0) as u64
}

/// Whole seconds elapsed from the temporal anchor to `now`
///
/// Negative for instants before the anchor; the clock plausibility gate
/// rejects those before any timeline math runs.
pub fn elapsed_seconds(now: DateTime<Utc>) -> i64 {
    (now - TEMPORAL_ANCHOR).num_seconds()
}

/// The UTC calendar day a playlist should be fetched for at `now`
pub fn rotation_date(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}
