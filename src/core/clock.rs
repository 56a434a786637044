//! Source of the current calendar date

use chrono::{NaiveDate, Utc};

/// Provides "today" for invoice creation dates.
///
/// Every date in the system comes from one clock so that creation dates are
/// consistent. The default [`SystemClock`] uses UTC.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock, UTC calendar date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A clock frozen on one date (tests, replays)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_its_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(FixedClock(date).today(), date);
    }

    #[test]
    fn test_system_clock_matches_utc_today() {
        let before = Utc::now().date_naive();
        let today = SystemClock.today();
        let after = Utc::now().date_naive();
        assert!(before <= today && today <= after);
    }
}
