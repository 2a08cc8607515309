//! Habit streak tracking.
//!
//! Streaks are derived from a habit's completion dates every time they are
//! asked for. Nothing is cached or counted incrementally, so a streak can
//! never drift from the visible calendar history. Duplicate completions on
//! the same day (or week, for weekly habits) count once.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::clock::{is_same_local_day, local_date, WeekStart};
use crate::subject::{Frequency, Habit};

/// Streak derivation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakConfig {
    /// Keep a run that ended yesterday alive while today is still open.
    #[serde(default = "default_true")]
    pub count_today_pending: bool,
    /// Week boundaries for weekly habits; set from the `[week]` section.
    #[serde(skip)]
    pub week_start: WeekStart,
}

fn default_true() -> bool {
    true
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            count_today_pending: true,
            week_start: WeekStart::Sunday,
        }
    }
}

/// Derived streak values for one habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitStreak {
    /// Consecutive periods ending in the current (or, if still open, the
    /// previous) period.
    pub current: u32,
    /// Longest run anywhere in the history.
    pub longest: u32,
    pub completed_today: bool,
}

/// Badge shown next to a streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTier {
    Seedling,
    Building,
    Star,
    OnFire,
    Trophy,
}

impl StreakTier {
    pub fn for_streak(streak: u32) -> Self {
        match streak {
            30.. => StreakTier::Trophy,
            14..=29 => StreakTier::OnFire,
            7..=13 => StreakTier::Star,
            3..=6 => StreakTier::Building,
            _ => StreakTier::Seedling,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            StreakTier::Trophy => "🏆",
            StreakTier::OnFire => "🔥",
            StreakTier::Star => "⭐",
            StreakTier::Building => "💪",
            StreakTier::Seedling => "🌱",
        }
    }
}

/// One cell of the seven-day completion strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMark {
    pub date: NaiveDate,
    pub completed: bool,
}

/// Aggregate view over all tracked habits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitsSummary {
    pub total: usize,
    pub completed_today: usize,
    /// Mean current streak; 0.0 when there are no habits.
    pub average_streak: f64,
}

/// True if any completion shares the local calendar date of `now`.
pub fn is_completed_today(habit: &Habit, now: &DateTime<FixedOffset>) -> bool {
    habit
        .completed_dates
        .iter()
        .any(|d| is_same_local_day(*d, now))
}

/// Append a completion stamped `now`. The input habit is left untouched.
pub fn complete_habit(habit: &Habit, now: &DateTime<FixedOffset>) -> Habit {
    let mut next = habit.clone();
    next.completed_dates.push(now.with_timezone(&Utc));
    next
}

/// Completion strip for the seven days ending today, oldest first.
pub fn last_seven_days(habit: &Habit, now: &DateTime<FixedOffset>) -> Vec<DayMark> {
    let done: BTreeSet<NaiveDate> = habit
        .completed_dates
        .iter()
        .map(|d| local_date(*d, now))
        .collect();
    let today = now.date_naive();

    (0..7)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            DayMark {
                date,
                completed: done.contains(&date),
            }
        })
        .collect()
}

/// Derives streaks from completion history.
#[derive(Debug, Clone, Default)]
pub struct StreakCalculator {
    config: StreakConfig,
}

impl StreakCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StreakConfig) -> Self {
        Self { config }
    }

    pub fn streak(&self, habit: &Habit, now: &DateTime<FixedOffset>) -> HabitStreak {
        let step = match habit.target_frequency {
            Frequency::Daily => Duration::days(1),
            Frequency::Weekly => Duration::weeks(1),
        };
        let period_of = |date: NaiveDate| match habit.target_frequency {
            Frequency::Daily => date,
            Frequency::Weekly => self.config.week_start.week_of(date),
        };

        let current_period = period_of(now.date_naive());
        let periods: BTreeSet<NaiveDate> = habit
            .completed_dates
            .iter()
            .map(|d| period_of(local_date(*d, now)))
            .filter(|p| *p <= current_period)
            .collect();

        let anchor = if periods.contains(&current_period) {
            Some(current_period)
        } else if self.config.count_today_pending {
            Some(current_period - step)
        } else {
            None
        };

        let current = anchor.map_or(0, |mut cursor| {
            let mut run = 0;
            while periods.contains(&cursor) {
                run += 1;
                cursor -= step;
            }
            run
        });

        let streak = HabitStreak {
            current,
            longest: longest_run(&periods, step).max(current),
            completed_today: is_completed_today(habit, now),
        };

        tracing::trace!(habit = %habit.id, ?streak, "derived streak");
        streak
    }

    pub fn summary(&self, habits: &[Habit], now: &DateTime<FixedOffset>) -> HabitsSummary {
        let total = habits.len();
        let completed_today = habits.iter().filter(|h| is_completed_today(h, now)).count();
        let average_streak = if total == 0 {
            0.0
        } else {
            let sum: u32 = habits.iter().map(|h| self.streak(h, now).current).sum();
            sum as f64 / total as f64
        };

        HabitsSummary {
            total,
            completed_today,
            average_streak,
        }
    }
}

/// Longest run of periods spaced exactly `step` apart.
pub(crate) fn longest_run(periods: &BTreeSet<NaiveDate>, step: Duration) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for &period in periods {
        run = match previous {
            Some(p) if p + step == period => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(period);
    }

    longest
}
