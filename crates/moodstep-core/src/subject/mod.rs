//! Things a user can check in on.
//!
//! Two variants exist: ad-hoc tasks (one-off, scheduled) and the single
//! priority habit (recurring, with a weekly day-count target). Plain
//! [`Habit`]s are tracked for streaks only and never receive check-ins.

mod habit;
mod task;

pub use habit::{Frequency, Habit, PriorityHabit, PriorityHabitPreset};
pub use task::{AdHocTask, Priority};

use serde::{Deserialize, Serialize};

/// Activity family used to pick family-specific micro-actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    Generic,
    Gym,
    Reading,
    Meditation,
}

const GYM_KEYWORDS: &[&str] = &["gym", "workout"];
const READING_KEYWORDS: &[&str] = &["reading", "book"];
const MEDITATION_KEYWORDS: &[&str] = &["meditation", "meditate", "mindful"];

impl SubjectKind {
    /// Detect the family from the subject's name, then its category.
    pub fn detect(name: &str, category: &str) -> Self {
        Self::from_text(name)
            .or_else(|| Self::from_text(category))
            .unwrap_or(SubjectKind::Generic)
    }

    fn from_text(text: &str) -> Option<Self> {
        let text = text.to_lowercase();
        let has_any = |words: &[&str]| words.iter().any(|w| text.contains(w));

        if has_any(GYM_KEYWORDS) {
            Some(SubjectKind::Gym)
        } else if has_any(READING_KEYWORDS) {
            Some(SubjectKind::Reading)
        } else if has_any(MEDITATION_KEYWORDS) {
            Some(SubjectKind::Meditation)
        } else {
            None
        }
    }
}

/// Whether recommendations should talk about a "task" or a "session".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectVariant {
    Task,
    Habit,
}

/// Borrowed view of a subject, as consumed by the action resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectRef<'a> {
    pub name: &'a str,
    pub kind: SubjectKind,
    pub variant: SubjectVariant,
}

impl<'a> SubjectRef<'a> {
    pub fn task(name: &'a str, kind: SubjectKind) -> Self {
        Self { name, kind, variant: SubjectVariant::Task }
    }

    pub fn habit(name: &'a str, kind: SubjectKind) -> Self {
        Self { name, kind, variant: SubjectVariant::Habit }
    }
}

/// A check-in target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Subject {
    AdHocTask(AdHocTask),
    PriorityHabit(PriorityHabit),
}

impl Subject {
    pub fn id(&self) -> &str {
        match self {
            Subject::AdHocTask(t) => &t.id,
            Subject::PriorityHabit(h) => &h.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Subject::AdHocTask(t) => &t.title,
            Subject::PriorityHabit(h) => &h.name,
        }
    }

    pub fn category(&self) -> &str {
        match self {
            Subject::AdHocTask(t) => &t.category,
            Subject::PriorityHabit(h) => &h.category,
        }
    }

    pub fn kind(&self) -> SubjectKind {
        SubjectKind::detect(self.name(), self.category())
    }

    pub fn variant(&self) -> SubjectVariant {
        match self {
            Subject::AdHocTask(_) => SubjectVariant::Task,
            Subject::PriorityHabit(_) => SubjectVariant::Habit,
        }
    }

    pub fn view(&self) -> SubjectRef<'_> {
        SubjectRef {
            name: self.name(),
            kind: self.kind(),
            variant: self.variant(),
        }
    }
}

impl From<AdHocTask> for Subject {
    fn from(task: AdHocTask) -> Self {
        Subject::AdHocTask(task)
    }
}

impl From<PriorityHabit> for Subject {
    fn from(habit: PriorityHabit) -> Self {
        Subject::PriorityHabit(habit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_family_from_name() {
        assert_eq!(SubjectKind::detect("Go to gym", "Health"), SubjectKind::Gym);
        assert_eq!(SubjectKind::detect("Morning Workout", ""), SubjectKind::Gym);
        assert_eq!(SubjectKind::detect("Reading", "Learning"), SubjectKind::Reading);
        assert_eq!(SubjectKind::detect("Morning Meditation", "Wellness"), SubjectKind::Meditation);
    }

    #[test]
    fn falls_back_to_category_then_generic() {
        assert_eq!(SubjectKind::detect("Sci-fi club", "Book club"), SubjectKind::Reading);
        assert_eq!(SubjectKind::detect("Clean kitchen", "Home"), SubjectKind::Generic);
    }

    #[test]
    fn name_match_wins_over_category() {
        assert_eq!(SubjectKind::detect("Gym session", "Mindfulness"), SubjectKind::Gym);
    }
}
