use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::mood::{EmotionalState, WillingnessLevel};

/// Outcome of a finished check-in. Immutable; a later check-in on the same
/// subject supersedes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinRecord {
    pub subject_id: String,
    pub mood: EmotionalState,
    pub willingness: WillingnessLevel,
    pub timestamp: DateTime<Utc>,
    /// Always non-empty.
    pub resolved_action: String,
}

/// Emitted when an ad-hoc task is marked done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub subject_id: String,
    /// Mood captured by the task's last check-in, if any.
    pub initial_mood: Option<EmotionalState>,
    pub mood: EmotionalState,
    pub completed_at: DateTime<Utc>,
}

/// Entry in the priority habit's append-only event log.
///
/// Check-ins append an event with `completed = false`; marking the habit
/// done for the day appends one with `completed = true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityHabitEvent {
    pub id: String,
    pub habit_id: String,
    /// Events without a date are ignored by weekly aggregation.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub checkin: Option<CheckinRecord>,
}

impl PriorityHabitEvent {
    pub fn from_checkin(record: CheckinRecord) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            habit_id: record.subject_id.clone(),
            date: Some(record.timestamp),
            completed: false,
            checkin: Some(record),
        }
    }

    pub fn completion(habit_id: impl Into<String>, now: &DateTime<FixedOffset>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            habit_id: habit_id.into(),
            date: Some(now.with_timezone(&Utc)),
            completed: true,
            checkin: None,
        }
    }
}
