//! Check-in state machine.
//!
//! ## State Transitions
//!
//! ```text
//! Priority habit:  Willingness --Continue--> Emotion --Continue--> Resolved
//! Ad-hoc task:     Combined --Continue--> Resolved
//! ```
//!
//! Every transition takes `&self` and returns a new flow, so a refused
//! transition leaves the caller's flow untouched. Abandoning a flow is just
//! dropping it; no record exists until `Resolved`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::record::CheckinRecord;
use crate::clock::Clock;
use crate::mood::{EmotionalState, WillingnessLevel};
use crate::resolver::ActionResolver;
use crate::subject::{AdHocTask, PriorityHabit, SubjectKind, SubjectRef, SubjectVariant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckinStep {
    /// Ad-hoc tasks capture both fields on one screen.
    Combined,
    Willingness,
    Emotion,
    Resolved,
}

impl fmt::Display for CheckinStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckinStep::Combined => "combined",
            CheckinStep::Willingness => "willingness",
            CheckinStep::Emotion => "emotion",
            CheckinStep::Resolved => "resolved",
        };
        f.write_str(name)
    }
}

/// User actions fed into the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "input", content = "value", rename_all = "snake_case")]
pub enum CheckinInput {
    SelectWillingness(WillingnessLevel),
    SelectEmotion(EmotionalState),
    Continue,
}

impl CheckinInput {
    fn name(&self) -> &'static str {
        match self {
            CheckinInput::SelectWillingness(_) => "willingness selection",
            CheckinInput::SelectEmotion(_) => "emotion selection",
            CheckinInput::Continue => "continue",
        }
    }
}

/// Why a transition was refused ("cannot proceed").
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckinRejection {
    #[error("cannot proceed: willingness has not been selected")]
    MissingWillingness,

    #[error("cannot proceed: emotion has not been selected")]
    MissingEmotion,

    #[error("cannot proceed: {input} is not accepted during the {step} step")]
    UnexpectedInput { step: CheckinStep, input: &'static str },

    #[error("cannot proceed: check-in is already resolved")]
    AlreadyResolved,
}

/// Single-flight check-in for one subject.
///
/// Deserializing checks the fields against each other, so only states the
/// transitions can produce are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FlowFields")]
pub struct CheckinFlow {
    subject_id: String,
    subject_name: String,
    subject_kind: SubjectKind,
    variant: SubjectVariant,
    step: CheckinStep,
    willingness: Option<WillingnessLevel>,
    emotion: Option<EmotionalState>,
    record: Option<CheckinRecord>,
}

/// Unchecked wire form of [`CheckinFlow`].
#[derive(Deserialize)]
struct FlowFields {
    subject_id: String,
    subject_name: String,
    subject_kind: SubjectKind,
    variant: SubjectVariant,
    step: CheckinStep,
    #[serde(default)]
    willingness: Option<WillingnessLevel>,
    #[serde(default)]
    emotion: Option<EmotionalState>,
    #[serde(default)]
    record: Option<CheckinRecord>,
}

impl TryFrom<FlowFields> for CheckinFlow {
    type Error = String;

    fn try_from(f: FlowFields) -> Result<Self, Self::Error> {
        use CheckinStep::*;

        match (f.variant, f.step) {
            (SubjectVariant::Task, Willingness | Emotion) | (SubjectVariant::Habit, Combined) => {
                return Err(format!("{} step is not used for this subject", f.step));
            }
            _ => {}
        }

        match (f.step, f.willingness, f.emotion) {
            (Willingness, _, Some(_)) => {
                return Err("emotion cannot be set before the emotion step".into())
            }
            (Emotion, None, _) => return Err("emotion step requires a willingness".into()),
            _ => {}
        }

        match (f.step, &f.record) {
            (Resolved, None) => return Err("resolved check-in has no record".into()),
            (Resolved, Some(record)) => {
                let consistent = record.subject_id == f.subject_id
                    && Some(record.willingness) == f.willingness
                    && Some(record.mood) == f.emotion
                    && !record.resolved_action.trim().is_empty();
                if !consistent {
                    return Err("record does not match the check-in".into());
                }
            }
            (_, Some(_)) => return Err(format!("{} step cannot carry a record", f.step)),
            (_, None) => {}
        }

        Ok(Self {
            subject_id: f.subject_id,
            subject_name: f.subject_name,
            subject_kind: f.subject_kind,
            variant: f.variant,
            step: f.step,
            willingness: f.willingness,
            emotion: f.emotion,
            record: f.record,
        })
    }
}

impl CheckinFlow {
    /// One-step flow for an ad-hoc task.
    pub fn for_task(task: &AdHocTask) -> Self {
        Self::start(&task.id, &task.title, task.kind(), SubjectVariant::Task, CheckinStep::Combined)
    }

    /// Two-step flow for the priority habit.
    pub fn for_priority_habit(habit: &PriorityHabit) -> Self {
        Self::start(
            &habit.id,
            &habit.name,
            habit.kind(),
            SubjectVariant::Habit,
            CheckinStep::Willingness,
        )
    }

    fn start(
        id: &str,
        name: &str,
        kind: SubjectKind,
        variant: SubjectVariant,
        step: CheckinStep,
    ) -> Self {
        Self {
            subject_id: id.to_string(),
            subject_name: name.to_string(),
            subject_kind: kind,
            variant,
            step,
            willingness: None,
            emotion: None,
            record: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn step(&self) -> CheckinStep {
        self.step
    }

    pub fn willingness(&self) -> Option<WillingnessLevel> {
        self.willingness
    }

    pub fn emotion(&self) -> Option<EmotionalState> {
        self.emotion
    }

    pub fn is_resolved(&self) -> bool {
        self.step == CheckinStep::Resolved
    }

    /// The finished record, only present once resolved.
    pub fn record(&self) -> Option<&CheckinRecord> {
        self.record.as_ref()
    }

    pub fn into_record(self) -> Option<CheckinRecord> {
        self.record
    }

    /// Whether `Continue` would be accepted right now.
    pub fn can_proceed(&self) -> bool {
        match self.step {
            CheckinStep::Willingness => self.willingness.is_some(),
            CheckinStep::Emotion | CheckinStep::Combined => {
                self.willingness.is_some() && self.emotion.is_some()
            }
            CheckinStep::Resolved => false,
        }
    }

    /// `(current, total)` screens, for a progress indicator.
    pub fn progress(&self) -> (u8, u8) {
        match (self.variant, self.step) {
            (SubjectVariant::Task, _) => (1, 1),
            (_, CheckinStep::Willingness) => (1, 2),
            _ => (2, 2),
        }
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Apply one input. On `Err` the caller keeps its previous flow.
    pub fn advance(
        &self,
        input: CheckinInput,
        resolver: &ActionResolver,
        clock: &dyn Clock,
    ) -> Result<CheckinFlow, CheckinRejection> {
        let result = self.transition(input, resolver, clock);

        match &result {
            Ok(next) => tracing::debug!(
                subject = %self.subject_id,
                from = %self.step,
                to = %next.step,
                "check-in advanced"
            ),
            Err(reason) => tracing::debug!(
                subject = %self.subject_id,
                step = %self.step,
                %reason,
                "check-in transition refused"
            ),
        }

        result
    }

    fn transition(
        &self,
        input: CheckinInput,
        resolver: &ActionResolver,
        clock: &dyn Clock,
    ) -> Result<CheckinFlow, CheckinRejection> {
        use CheckinInput::*;
        use CheckinStep::*;

        match (self.step, input) {
            (Resolved, _) => Err(CheckinRejection::AlreadyResolved),

            (Combined | Willingness, SelectWillingness(level)) => Ok(Self {
                willingness: Some(level),
                ..self.clone()
            }),
            (Combined | Emotion, SelectEmotion(mood)) => Ok(Self {
                emotion: Some(mood),
                ..self.clone()
            }),

            (Willingness, Continue) => match self.willingness {
                Some(_) => Ok(Self { step: Emotion, ..self.clone() }),
                None => Err(CheckinRejection::MissingWillingness),
            },
            (Combined | Emotion, Continue) => self.resolve(resolver, clock),

            (step, other) => Err(CheckinRejection::UnexpectedInput {
                step,
                input: other.name(),
            }),
        }
    }

    fn resolve(
        &self,
        resolver: &ActionResolver,
        clock: &dyn Clock,
    ) -> Result<CheckinFlow, CheckinRejection> {
        let willingness = self.willingness.ok_or(CheckinRejection::MissingWillingness)?;
        let mood = self.emotion.ok_or(CheckinRejection::MissingEmotion)?;

        let subject = SubjectRef {
            name: &self.subject_name,
            kind: self.subject_kind,
            variant: self.variant,
        };
        let record = CheckinRecord {
            subject_id: self.subject_id.clone(),
            mood,
            willingness,
            timestamp: clock.now().with_timezone(&Utc),
            resolved_action: resolver.resolve(subject, willingness, mood),
        };

        Ok(Self {
            step: CheckinStep::Resolved,
            record: Some(record),
            ..self.clone()
        })
    }

    /// Navigate back. Returns `None` when backing out abandons the flow.
    pub fn back(&self) -> Option<CheckinFlow> {
        match self.step {
            CheckinStep::Emotion => Some(Self {
                step: CheckinStep::Willingness,
                emotion: None,
                ..self.clone()
            }),
            _ => None,
        }
    }
}
