//! Injectable wall clock.
//!
//! Every temporal decision (week boundaries, "completed today", overdue
//! checks) is made against an explicit `now`. The offset carried by that
//! instant defines the caller's local calendar; stored timestamps are UTC
//! and get converted into it before any date comparison.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the system clock in the machine's local zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always returns the same instant. Used by tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Local calendar date of a stored UTC instant, as seen from `now`'s offset.
pub fn local_date(at: DateTime<Utc>, now: &DateTime<FixedOffset>) -> NaiveDate {
    at.with_timezone(now.offset()).date_naive()
}

/// True when `at` falls on the same local calendar day as `now`.
pub fn is_same_local_day(at: DateTime<Utc>, now: &DateTime<FixedOffset>) -> bool {
    local_date(at, now) == now.date_naive()
}

/// First day of the calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// The first day of the week containing `date`.
    pub fn week_of(self, date: NaiveDate) -> NaiveDate {
        let days_back = match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
            WeekStart::Monday => date.weekday().num_days_from_monday(),
        };
        date - Duration::days(days_back as i64)
    }
}
