//! Weekly target progress for the priority habit.
//!
//! The window is the local calendar week containing `now`: start-of-week
//! 00:00:00 through the last day's 23:59:59. It is recomputed on every call,
//! so results roll over on their own as time passes.

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checkin::PriorityHabitEvent;
use crate::clock::WeekStart;

/// An event that may count toward a weekly target.
pub trait DatedEvent {
    /// `None` excludes the event from aggregation.
    fn date(&self) -> Option<DateTime<Utc>>;
    fn is_completed(&self) -> bool;
}

impl DatedEvent for PriorityHabitEvent {
    fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    fn is_completed(&self) -> bool {
        self.completed
    }
}

/// Progress toward a days-per-week target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyProgress {
    pub completed_count: u32,
    pub target: u32,
    /// `min(completed / target, 1.0)`; `None` when there is no target.
    pub ratio: Option<f64>,
    pub remaining: u32,
    pub week_start: DateTime<FixedOffset>,
    pub week_end: DateTime<FixedOffset>,
}

impl WeeklyProgress {
    pub fn has_target(&self) -> bool {
        self.target > 0
    }

    pub fn is_met(&self) -> bool {
        self.has_target() && self.completed_count >= self.target
    }
}

/// Computes weekly progress for a fixed week start.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeeklyAggregator {
    week_start: WeekStart,
}

impl WeeklyAggregator {
    pub fn new(week_start: WeekStart) -> Self {
        Self { week_start }
    }

    /// `[start, next_start)` of the week containing `now`, in `now`'s offset.
    pub fn week_bounds(
        &self,
        now: &DateTime<FixedOffset>,
    ) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
        let offset = *now.offset();
        let first_day = self.week_start.week_of(now.date_naive());
        let local_midnight = first_day.and_time(NaiveTime::MIN);
        let utc_midnight =
            local_midnight - Duration::seconds(offset.local_minus_utc() as i64);

        let start = DateTime::from_naive_utc_and_offset(utc_midnight, offset);
        (start, start + Duration::weeks(1))
    }

    pub fn progress<E: DatedEvent>(
        &self,
        events: &[E],
        target: u32,
        now: &DateTime<FixedOffset>,
    ) -> WeeklyProgress {
        let (start, next_start) = self.week_bounds(now);
        let window = start.with_timezone(&Utc)..next_start.with_timezone(&Utc);

        let completed_count = events
            .iter()
            .filter(|e| e.is_completed())
            .filter_map(|e| e.date())
            .filter(|d| window.contains(d))
            .count() as u32;

        let ratio = (target > 0).then(|| (completed_count as f64 / target as f64).min(1.0));

        WeeklyProgress {
            completed_count,
            target,
            ratio,
            remaining: target.saturating_sub(completed_count),
            week_start: start,
            week_end: next_start - Duration::seconds(1),
        }
    }
}

/// Weekly progress over a Sunday-based week.
pub fn weekly_progress<E: DatedEvent>(
    events: &[E],
    target: u32,
    now: &DateTime<FixedOffset>,
) -> WeeklyProgress {
    WeeklyAggregator::new(WeekStart::Sunday).progress(events, target, now)
}
