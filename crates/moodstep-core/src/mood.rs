//! Emotional-state taxonomy and the mood journal.
//!
//! The ordinal score is used only for averaging. `Tired` and `Unmotivated`
//! intentionally share a score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Score assigned to an empty sample set so averages never become NaN.
pub const NEUTRAL_SCORE: f64 = 3.0;

/// How the user feels right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalState {
    Stressed,
    Tired,
    Unmotivated,
    Neutral,
    Good,
}

impl EmotionalState {
    pub const ALL: [EmotionalState; 5] = [
        EmotionalState::Stressed,
        EmotionalState::Tired,
        EmotionalState::Unmotivated,
        EmotionalState::Neutral,
        EmotionalState::Good,
    ];

    /// Ordinal score on the 1-5 scale.
    pub fn score(self) -> u8 {
        match self {
            EmotionalState::Stressed => 1,
            EmotionalState::Tired => 2,
            EmotionalState::Unmotivated => 2,
            EmotionalState::Neutral => 3,
            EmotionalState::Good => 5,
        }
    }

    /// Moods that allow a full-commitment recommendation.
    pub fn is_positive(self) -> bool {
        matches!(self, EmotionalState::Good | EmotionalState::Neutral)
    }

    pub fn label(self) -> &'static str {
        match self {
            EmotionalState::Stressed => "Stressed",
            EmotionalState::Tired => "Tired",
            EmotionalState::Unmotivated => "Unmotivated",
            EmotionalState::Neutral => "Neutral",
            EmotionalState::Good => "Good",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            EmotionalState::Stressed => "stressed",
            EmotionalState::Tired => "tired",
            EmotionalState::Unmotivated => "unmotivated",
            EmotionalState::Neutral => "neutral",
            EmotionalState::Good => "good",
        }
    }
}

impl fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionalState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmotionalState::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown mood: {s}"))
    }
}

/// Three-step scale shared by willingness, energy and stress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

/// Willingness to start the subject right now.
pub type WillingnessLevel = Level;

impl Level {
    pub const ALL: [Level; 3] = [Level::Low, Level::Medium, Level::High];

    fn as_str(self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown level: {s}"))
    }
}

/// A free-standing mood journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: String,
    pub mood: EmotionalState,
    pub energy: Level,
    pub stress: Level,
    #[serde(default)]
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub triggers: Vec<String>,
}

/// Mean of the given moods' scores, or [`NEUTRAL_SCORE`] when empty.
pub fn mean_score<I>(moods: I) -> f64
where
    I: IntoIterator<Item = EmotionalState>,
{
    let (sum, count) = moods
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), m| (sum + m.score() as u64, count + 1));

    if count == 0 {
        NEUTRAL_SCORE
    } else {
        sum as f64 / count as f64
    }
}

/// Average journal mood.
pub fn average_mood(entries: &[MoodEntry]) -> f64 {
    mean_score(entries.iter().map(|e| e.mood))
}
