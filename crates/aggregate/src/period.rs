use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The calendar month a snapshot reports on.
///
/// Always passed in by the caller; the aggregator itself never reads the
/// wall clock, which keeps month-boundary behavior testable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillingPeriod {
    pub year: i32,
    pub month: u32,
}

impl BillingPeriod {
    /// The period containing the given instant.
    pub fn containing(at: DateTime<Utc>) -> Self {
        Self {
            year: at.year(),
            month: at.month(),
        }
    }

    /// The period containing now. Convenience for callers without an
    /// injected clock.
    pub fn current() -> Self {
        Self::containing(Utc::now())
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at.year() == self.year && at.month() == self.month
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month {
            1..=12 => write!(f, "{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year),
            _ => write!(f, "month {} of {}", self.month, self.year),
        }
    }
}
