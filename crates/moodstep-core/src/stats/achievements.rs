//! Progress toward long-running achievements.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::clock::local_date;
use crate::mood::MoodEntry;
use crate::streak::{longest_run, StreakCalculator};
use crate::subject::{AdHocTask, Habit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    TaskMaster,
    HabitBuilder,
    MoodTracker,
}

impl AchievementKind {
    pub const ALL: [AchievementKind; 3] = [
        AchievementKind::TaskMaster,
        AchievementKind::HabitBuilder,
        AchievementKind::MoodTracker,
    ];

    pub fn title(self) -> &'static str {
        match self {
            AchievementKind::TaskMaster => "Task Master",
            AchievementKind::HabitBuilder => "Habit Builder",
            AchievementKind::MoodTracker => "Mood Tracker",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AchievementKind::TaskMaster => "Complete 50 tasks",
            AchievementKind::HabitBuilder => "Maintain a 30-day streak",
            AchievementKind::MoodTracker => "Log mood for 14 consecutive days",
        }
    }

    pub fn goal(self) -> u32 {
        match self {
            AchievementKind::TaskMaster => 50,
            AchievementKind::HabitBuilder => 30,
            AchievementKind::MoodTracker => 14,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementProgress {
    pub kind: AchievementKind,
    pub title: String,
    pub description: String,
    pub progress: u32,
    pub total: u32,
    pub unlocked: bool,
    /// 0.0..=100.0
    pub percent: f64,
}

impl AchievementProgress {
    fn new(kind: AchievementKind, progress: u32) -> Self {
        let total = kind.goal();
        Self {
            kind,
            title: kind.title().to_string(),
            description: kind.description().to_string(),
            progress,
            total,
            unlocked: progress >= total,
            percent: (progress as f64 * 100.0 / total as f64).min(100.0),
        }
    }
}

/// Progress for every achievement, in [`AchievementKind::ALL`] order.
pub fn achievement_progress(
    tasks: &[AdHocTask],
    habits: &[Habit],
    mood_entries: &[MoodEntry],
    streaks: &StreakCalculator,
    now: &DateTime<FixedOffset>,
) -> Vec<AchievementProgress> {
    let completed_tasks = tasks.iter().filter(|t| t.completed).count() as u32;

    let best_streak = habits
        .iter()
        .map(|h| streaks.streak(h, now).longest)
        .max()
        .unwrap_or(0);

    let logged_days: BTreeSet<NaiveDate> = mood_entries
        .iter()
        .map(|e| local_date(e.timestamp, now))
        .collect();

    let mood_run = longest_run(&logged_days, Duration::days(1));

    AchievementKind::ALL
        .into_iter()
        .map(|kind| {
            let progress = match kind {
                AchievementKind::TaskMaster => completed_tasks,
                AchievementKind::HabitBuilder => best_streak,
                AchievementKind::MoodTracker => mood_run,
            };
            AchievementProgress::new(kind, progress)
        })
        .collect()
}
