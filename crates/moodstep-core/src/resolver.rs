//! Rule-based action resolver.
//!
//! Converts a `{willingness, mood}` pair into a concrete next action for a
//! subject. Rules are priority ordered and the first match wins:
//!
//! 1. High willingness with a good or neutral mood: full commitment.
//! 2. Medium willingness: a scaled-down version of the activity.
//! 3. Anything else: a micro-action.
//!
//! For tiers 2 and 3 the text comes from, in order, the exact-title table
//! (user overrides, then the built-in canonical titles), the activity
//! family, and finally a generic template. The generic template always
//! produces text, so the resolver is total over its inputs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::mood::{EmotionalState, Level, WillingnessLevel};
use crate::subject::{SubjectKind, SubjectRef, SubjectVariant};

/// How much of the activity to recommend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    Full,
    Scaled,
    Micro,
}

impl Effort {
    pub fn for_state(willingness: WillingnessLevel, mood: EmotionalState) -> Self {
        match (willingness, mood) {
            (Level::High, m) if m.is_positive() => Effort::Full,
            (Level::Medium, _) => Effort::Scaled,
            _ => Effort::Micro,
        }
    }
}

/// Hand-authored scaled and micro actions for one subject title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPair {
    pub medium: String,
    pub low: String,
}

impl ActionPair {
    fn pick(&self, effort: Effort) -> Option<&str> {
        let text = match effort {
            Effort::Scaled => &self.medium,
            Effort::Micro => &self.low,
            Effort::Full => return None,
        };
        Some(text.as_str()).filter(|t| !t.trim().is_empty())
    }
}

/// (title, medium, low)
const CANONICAL_ACTIONS: &[(&str, &str, &str)] = &[
    (
        "Write project report",
        "Open the document and write just one paragraph",
        "Open the document and write one sentence",
    ),
    (
        "Go to gym",
        "Put on workout clothes and do 5 minutes of stretching",
        "Put on your gym shoes and take 3 deep breaths",
    ),
    (
        "Clean kitchen",
        "Clear and wipe down just the counter",
        "Put away 3 items from the counter",
    ),
    (
        "Call mom",
        "Send a quick text saying you'll call soon",
        "Add mom's contact to your favorites",
    ),
];

/// Where a resolved action came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSource {
    FullCommitment,
    CustomTitle,
    CanonicalTitle,
    Family,
    Generic,
}

/// A recommendation plus how it was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub effort: Effort,
    pub source: ActionSource,
    pub text: String,
}

/// Stateless apart from optional per-title overrides.
#[derive(Debug, Clone, Default)]
pub struct ActionResolver {
    custom_actions: BTreeMap<String, ActionPair>,
}

impl ActionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver whose exact-title table is extended (and overridden) by
    /// `custom_actions`.
    pub fn with_custom_actions(custom_actions: BTreeMap<String, ActionPair>) -> Self {
        Self { custom_actions }
    }

    /// Recommended action text. Never empty.
    pub fn resolve(
        &self,
        subject: SubjectRef<'_>,
        willingness: WillingnessLevel,
        mood: EmotionalState,
    ) -> String {
        self.explain(subject, willingness, mood).text
    }

    /// Same as [`resolve`](Self::resolve) but also reports the tier and the
    /// rule that produced the text.
    pub fn explain(
        &self,
        subject: SubjectRef<'_>,
        willingness: WillingnessLevel,
        mood: EmotionalState,
    ) -> Resolution {
        let effort = Effort::for_state(willingness, mood);

        let (source, text) = match effort {
            Effort::Full => (ActionSource::FullCommitment, full_commitment(subject)),
            reduced => self.reduced_action(subject, reduced),
        };

        tracing::debug!(
            subject = subject.name,
            %willingness,
            %mood,
            ?effort,
            ?source,
            "resolved action"
        );

        Resolution { effort, source, text }
    }

    fn reduced_action(&self, subject: SubjectRef<'_>, effort: Effort) -> (ActionSource, String) {
        let title = subject.name.trim();

        if let Some(text) = self.custom_actions.get(title).and_then(|p| p.pick(effort)) {
            return (ActionSource::CustomTitle, text.to_string());
        }

        if let Some(text) = canonical_action(title, effort) {
            return (ActionSource::CanonicalTitle, text.to_string());
        }

        if let Some(text) = family_action(subject.kind, effort) {
            return (ActionSource::Family, text.to_string());
        }

        (ActionSource::Generic, generic_action(subject, effort))
    }
}

/// Resolve with the built-in tables only.
pub fn resolve_action(
    subject: SubjectRef<'_>,
    willingness: WillingnessLevel,
    mood: EmotionalState,
) -> String {
    ActionResolver::new().resolve(subject, willingness, mood)
}

fn full_commitment(subject: SubjectRef<'_>) -> String {
    match subject.variant {
        SubjectVariant::Task => format!("Great energy! Start the full task: \"{}\"", subject.name),
        SubjectVariant::Habit => {
            format!("Perfect energy! Do your full {} session today! 🚀", subject.name)
        }
    }
}

fn canonical_action(title: &str, effort: Effort) -> Option<&'static str> {
    CANONICAL_ACTIONS
        .iter()
        .find(|(t, _, _)| *t == title)
        .and_then(|(_, medium, low)| match effort {
            Effort::Scaled => Some(*medium),
            Effort::Micro => Some(*low),
            Effort::Full => None,
        })
}

fn family_action(kind: SubjectKind, effort: Effort) -> Option<&'static str> {
    let text = match (kind, effort) {
        (SubjectKind::Gym, Effort::Scaled) => {
            "Put on your workout clothes and do 10 minutes of light movement"
        }
        (SubjectKind::Gym, Effort::Micro) => {
            "Just put on your workout clothes and take 3 deep breaths"
        }
        (SubjectKind::Reading, Effort::Scaled) => "Read just one page or chapter - that counts!",
        (SubjectKind::Reading, Effort::Micro) => "Open your book and read one paragraph",
        (SubjectKind::Meditation, Effort::Scaled) => "Try a 5-minute breathing exercise instead",
        (SubjectKind::Meditation, Effort::Micro) => "Take 3 mindful breaths right where you are",
        _ => return None,
    };
    Some(text)
}

fn generic_action(subject: SubjectRef<'_>, effort: Effort) -> String {
    let name = subject.name;
    match (subject.variant, effort) {
        (SubjectVariant::Task, Effort::Scaled) => format!("Break \"{name}\" into smaller steps"),
        (SubjectVariant::Task, _) => format!("Take one tiny step toward \"{name}\""),
        (SubjectVariant::Habit, Effort::Scaled) => {
            format!("Do a mini version of {name} for just 10 minutes")
        }
        (SubjectVariant::Habit, _) => {
            format!("Take one tiny step toward {name} - even 2 minutes counts")
        }
    }
}
