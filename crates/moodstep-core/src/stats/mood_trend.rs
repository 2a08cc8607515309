//! Before/after mood trend across completed tasks.
//!
//! Only samples with both an initial (check-in) mood and a completion mood
//! count. Partial samples are dropped, never defaulted.

use serde::{Deserialize, Serialize};

use crate::checkin::CompletionRecord;
use crate::mood::{mean_score, EmotionalState};
use crate::subject::AdHocTask;

/// Mood before starting and after finishing one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodSample {
    pub initial: Option<EmotionalState>,
    pub completion: Option<EmotionalState>,
}

impl MoodSample {
    pub fn new(initial: EmotionalState, completion: EmotionalState) -> Self {
        Self {
            initial: Some(initial),
            completion: Some(completion),
        }
    }

    fn pair(&self) -> Option<(EmotionalState, EmotionalState)> {
        Some((self.initial?, self.completion?))
    }
}

impl From<&CompletionRecord> for MoodSample {
    fn from(record: &CompletionRecord) -> Self {
        Self {
            initial: record.initial_mood,
            completion: Some(record.mood),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodTrend {
    pub avg_initial: f64,
    pub avg_final: f64,
    pub percent_delta: f64,
    /// Number of complete samples that went into the averages.
    pub sample_count: usize,
}

impl MoodTrend {
    pub fn is_improvement(&self) -> bool {
        self.percent_delta > 0.0
    }

    /// Rounded, signed percentage such as `+400%` or `-20%`.
    pub fn delta_label(&self) -> String {
        // Round half up so -2.5 reads as -2, not -3.
        let rounded = (self.percent_delta + 0.5).floor() as i64;
        if rounded > 0 {
            format!("+{rounded}%")
        } else {
            format!("{rounded}%")
        }
    }
}

/// Average initial and completion moods plus the relative change.
pub fn mood_trend(samples: &[MoodSample]) -> MoodTrend {
    let pairs: Vec<(EmotionalState, EmotionalState)> =
        samples.iter().filter_map(MoodSample::pair).collect();

    let avg_initial = mean_score(pairs.iter().map(|(initial, _)| *initial));
    let avg_final = mean_score(pairs.iter().map(|(_, completion)| *completion));

    let percent_delta = if avg_initial == 0.0 {
        0.0
    } else {
        (avg_final - avg_initial) / avg_initial * 100.0
    };

    MoodTrend {
        avg_initial,
        avg_final,
        percent_delta,
        sample_count: pairs.len(),
    }
}

/// Samples from completed tasks that carry both moods.
pub fn mood_samples(tasks: &[AdHocTask]) -> Vec<MoodSample> {
    tasks
        .iter()
        .filter(|t| t.completed)
        .map(|t| MoodSample {
            initial: t.last_checkin.as_ref().map(|c| c.mood),
            completion: t.completion_mood,
        })
        .filter(|s| s.pair().is_some())
        .collect()
}
