/// Drift measurement
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One expected-vs-actual comparison
///
/// Produced once per monitor tick and discarded after evaluation; samples
/// have no identity beyond the tick that measured them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftSample {
    /// Offset the timeline math says the device should be at
    pub expected: Duration,

    /// Offset the device reported
    pub actual: Duration,

    /// When the sample was taken
    pub measured_at: DateTime<Utc>,
}

impl DriftSample {
    /// Absolute difference between expected and actual offsets
    pub fn magnitude(&self) -> Duration {
        if self.expected >= self.actual {
            self.expected - self.actual
        } else {
            self.actual - self.expected
        }
    }

    /// Whether the sample exceeds the given threshold
    pub fn exceeds(&self, threshold: Duration) -> bool {
        self.magnitude() > threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(expected: u64, actual: u64) -> DriftSample {
        DriftSample {
            expected: Duration::from_secs(expected),
            actual: Duration::from_secs(actual),
            measured_at: Utc::now(),
        }
    }

    #[test]
    fn magnitude_is_symmetric() {
        assert_eq!(sample(100, 106).magnitude(), Duration::from_secs(6));
        assert_eq!(sample(106, 100).magnitude(), Duration::from_secs(6));
    }

    #[test]
    fn threshold_is_strict() {
        let threshold = Duration::from_secs(5);
        assert!(sample(100, 106).exceeds(threshold));
        assert!(!sample(100, 103).exceeds(threshold));
        // Exactly at threshold is not drift
        assert!(!sample(100, 105).exceeds(threshold));
    }
}
