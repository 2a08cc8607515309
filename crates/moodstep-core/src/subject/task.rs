use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SubjectKind;
use crate::checkin::{CheckinRecord, CompletionRecord};
use crate::error::ValidationError;
use crate::mood::EmotionalState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A one-off scheduled task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdHocTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub priority: Priority,
    pub scheduled_time: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Most recent check-in; earlier ones are superseded, not kept.
    #[serde(default)]
    pub last_checkin: Option<CheckinRecord>,
    #[serde(default)]
    pub adapted_action: Option<String>,
    #[serde(default)]
    pub completion_mood: Option<EmotionalState>,
}

impl AdHocTask {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        priority: Priority,
        scheduled_time: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "title".into() });
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title,
            description: None,
            category: category.into(),
            priority,
            scheduled_time,
            completed: false,
            created_at,
            completed_at: None,
            last_checkin: None,
            adapted_action: None,
            completion_mood: None,
        })
    }

    pub fn kind(&self) -> SubjectKind {
        SubjectKind::detect(&self.title, &self.category)
    }

    /// Not completed and scheduled at or before `now`.
    pub fn is_overdue(&self, now: &DateTime<FixedOffset>) -> bool {
        !self.completed && self.scheduled_time <= now.with_timezone(&Utc)
    }

    /// Attach a check-in, superseding the previous one.
    pub fn with_checkin(mut self, record: CheckinRecord) -> Self {
        self.adapted_action = Some(record.resolved_action.clone());
        self.last_checkin = Some(record);
        self
    }

    /// Mark the task done. The completion time is set once; a second call
    /// is refused.
    pub fn complete(
        &self,
        mood: EmotionalState,
        now: &DateTime<FixedOffset>,
    ) -> Result<(AdHocTask, CompletionRecord), ValidationError> {
        if self.completed {
            return Err(ValidationError::AlreadyCompleted(self.id.clone()));
        }

        let completed_at = now.with_timezone(&Utc);
        let record = CompletionRecord {
            subject_id: self.id.clone(),
            initial_mood: self.last_checkin.as_ref().map(|c| c.mood),
            mood,
            completed_at,
        };

        let mut task = self.clone();
        task.completed = true;
        task.completed_at = Some(completed_at);
        task.completion_mood = Some(mood);

        Ok((task, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::Level;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 12, 15, 0, 0)
            .unwrap()
    }

    fn task(offset_minutes: i64) -> AdHocTask {
        let now = now().with_timezone(&Utc);
        AdHocTask::new(
            "Write project report",
            "Work",
            Priority::High,
            now + Duration::minutes(offset_minutes),
            now - Duration::days(1),
        )
        .unwrap()
    }

    #[test]
    fn rejects_blank_title() {
        let at = now().with_timezone(&Utc);
        let err = AdHocTask::new("   ", "Work", Priority::Low, at, at).unwrap_err();
        assert_eq!(err, ValidationError::EmptyField { field: "title".into() });
    }

    #[test]
    fn overdue_when_scheduled_at_or_before_now() {
        assert!(task(-30).is_overdue(&now()));
        assert!(task(0).is_overdue(&now()));
        assert!(!task(30).is_overdue(&now()));
    }

    #[test]
    fn completed_task_is_never_overdue() {
        let (done, _) = task(-30).complete(EmotionalState::Good, &now()).unwrap();
        assert!(!done.is_overdue(&now()));
    }

    #[test]
    fn completion_captures_initial_mood_from_last_checkin() {
        let record = CheckinRecord {
            subject_id: "t".into(),
            mood: EmotionalState::Tired,
            willingness: Level::Low,
            timestamp: now().with_timezone(&Utc),
            resolved_action: "Open the document and write one sentence".into(),
        };
        let t = task(10).with_checkin(record);
        assert_eq!(
            t.adapted_action.as_deref(),
            Some("Open the document and write one sentence")
        );

        let (done, completion) = t.complete(EmotionalState::Good, &now()).unwrap();
        assert!(done.completed);
        assert_eq!(done.completion_mood, Some(EmotionalState::Good));
        assert_eq!(completion.initial_mood, Some(EmotionalState::Tired));
        assert_eq!(completion.completed_at, now().with_timezone(&Utc));
    }

    #[test]
    fn second_completion_is_refused() {
        let (done, _) = task(0).complete(EmotionalState::Neutral, &now()).unwrap();
        let later = now() + Duration::hours(1);
        assert!(matches!(
            done.complete(EmotionalState::Good, &later),
            Err(ValidationError::AlreadyCompleted(_))
        ));
    }
}
