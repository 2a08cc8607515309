use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SubjectKind;
use crate::error::ValidationError;

/// Granularity a habit's streak is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
}

/// A recurring habit tracked by completion dates.
///
/// There is no stored streak counter: streaks are derived from
/// `completed_dates` on demand (see [`crate::streak`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub target_frequency: Frequency,
    /// Append-only completion log.
    #[serde(default)]
    pub completed_dates: Vec<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        target_frequency: Frequency,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "name".into() });
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            description: None,
            category: category.into(),
            target_frequency,
            completed_dates: Vec::new(),
            created_at,
        })
    }
}

/// The single designated habit with a weekly day-count target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityHabit {
    pub id: String,
    pub name: String,
    pub category: String,
    /// 0 disables weekly-target tracking.
    pub days_per_week: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl PriorityHabit {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        days_per_week: u32,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "name".into() });
        }
        if days_per_week > 7 {
            return Err(ValidationError::DaysPerWeekOutOfRange(days_per_week));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            category: category.into(),
            days_per_week,
            is_active: true,
            created_at,
        })
    }

    /// Build from one of the onboarding presets. `custom_name` is only read
    /// for [`PriorityHabitPreset::Custom`].
    pub fn from_preset(
        preset: PriorityHabitPreset,
        custom_name: Option<&str>,
        days_per_week: u32,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let name = match preset {
            PriorityHabitPreset::Custom => custom_name.unwrap_or_default(),
            other => other.name(),
        };
        Self::new(name, preset.category(), days_per_week, created_at)
    }

    pub fn kind(&self) -> SubjectKind {
        SubjectKind::detect(&self.name, &self.category)
    }
}

/// Habits offered when picking a priority habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityHabitPreset {
    Gym,
    Reading,
    Meditation,
    Custom,
}

impl PriorityHabitPreset {
    pub fn name(self) -> &'static str {
        match self {
            PriorityHabitPreset::Gym => "Gym Workout",
            PriorityHabitPreset::Reading => "Reading",
            PriorityHabitPreset::Meditation => "Meditation",
            PriorityHabitPreset::Custom => "Custom Habit",
        }
    }

    pub fn category(self) -> &'static str {
        match self {
            PriorityHabitPreset::Gym => "Fitness",
            PriorityHabitPreset::Reading => "Learning",
            PriorityHabitPreset::Meditation => "Wellness",
            PriorityHabitPreset::Custom => "Personal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_habit_target_must_fit_in_a_week() {
        let now = Utc::now();
        assert!(PriorityHabit::new("Reading", "Learning", 7, now).is_ok());
        assert!(PriorityHabit::new("Reading", "Learning", 0, now).is_ok());
        assert_eq!(
            PriorityHabit::new("Reading", "Learning", 8, now).unwrap_err(),
            ValidationError::DaysPerWeekOutOfRange(8)
        );
    }

    #[test]
    fn presets_carry_name_category_and_family() {
        let now = Utc::now();
        let gym = PriorityHabit::from_preset(PriorityHabitPreset::Gym, None, 3, now).unwrap();
        assert_eq!(gym.name, "Gym Workout");
        assert_eq!(gym.category, "Fitness");
        assert_eq!(gym.kind(), SubjectKind::Gym);
        assert!(gym.is_active);
    }

    #[test]
    fn custom_preset_requires_a_name() {
        let now = Utc::now();
        let err = PriorityHabit::from_preset(PriorityHabitPreset::Custom, Some("  "), 3, now);
        assert!(matches!(err, Err(ValidationError::EmptyField { .. })));

        let ok =
            PriorityHabit::from_preset(PriorityHabitPreset::Custom, Some(" Journal "), 2, now)
                .unwrap();
        assert_eq!(ok.name, "Journal");
        assert_eq!(ok.category, "Personal");
        assert_eq!(ok.kind(), SubjectKind::Generic);
    }

    #[test]
    fn habit_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "1",
            "name": "Morning Meditation",
            "category": "Wellness",
            "created_at": "2024-06-01T07:00:00Z"
        }"#;
        let habit: Habit = serde_json::from_str(json).unwrap();
        assert_eq!(habit.target_frequency, Frequency::Daily);
        assert!(habit.completed_dates.is_empty());
    }
}
