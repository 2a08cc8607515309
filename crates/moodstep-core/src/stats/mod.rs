//! Statistics module for moodstep
//!
//! Read-only aggregations recomputed on every call: weekly target progress,
//! before/after mood trends and achievement progress. None of them mutate
//! their inputs, and none of them fail; degenerate input yields a defined
//! default instead.

mod achievements;
mod mood_trend;
mod weekly;

pub use achievements::{achievement_progress, AchievementKind, AchievementProgress};
pub use mood_trend::{mood_samples, mood_trend, MoodSample, MoodTrend};
pub use weekly::{weekly_progress, DatedEvent, WeeklyAggregator, WeeklyProgress};
