//! Time utilities

use chrono::{DateTime, Utc};

use crate::constants::SECONDS_PER_DAY;

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        now_utc()
    }
}

/// Clock frozen at a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Freeze at the given Unix timestamp (seconds)
    pub fn at_unix(seconds: i64) -> Option<Self> {
        DateTime::from_timestamp(seconds, 0).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Truncate a Unix timestamp to 00:00:00 UTC of the same day
pub fn start_of_utc_day(unix_seconds: i64) -> i64 {
    unix_seconds.div_euclid(SECONDS_PER_DAY) * SECONDS_PER_DAY
}

/// Epoch day of the clock's current instant, as Unix seconds
pub fn epoch_day(clock: &dyn Clock) -> i64 {
    start_of_utc_day(clock.now().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_of_utc_day() {
        assert_eq!(start_of_utc_day(0), 0);
        assert_eq!(start_of_utc_day(86_399), 0);
        assert_eq!(start_of_utc_day(86_400), 86_400);
        // 2024-01-15T12:34:56Z
        assert_eq!(start_of_utc_day(1_705_322_096), 1_705_276_800);
    }

    #[test]
    fn test_start_of_utc_day_is_stable_within_a_day() {
        let midnight = 1_705_276_800;
        for offset in [0, 1, 3_600, 43_200, 86_399] {
            assert_eq!(start_of_utc_day(midnight + offset), midnight);
        }
        assert_eq!(start_of_utc_day(midnight + 86_400), midnight + 86_400);
        assert_eq!(start_of_utc_day(midnight - 1), midnight - 86_400);
    }

    #[test]
    fn test_start_of_utc_day_before_epoch() {
        assert_eq!(start_of_utc_day(-1), -86_400);
    }

    #[test]
    fn test_epoch_day_uses_clock() {
        let clock = FixedClock::at_unix(1_705_322_096).unwrap();
        assert_eq!(epoch_day(&clock), 1_705_276_800);
    }
}
