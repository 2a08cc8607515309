//! # Moodstep Core Library
//!
//! This library provides the decision logic behind moodstep: adaptive
//! check-ins that turn a reported mood and willingness into a concrete next
//! action, plus the bookkeeping that turns completion history into streaks,
//! weekly-target progress and mood trends. The `moodstep` CLI and any other
//! front end are thin layers over the same core.
//!
//! ## Architecture
//!
//! - **Action Resolver**: pure, rule-based mapping from (subject, willingness,
//!   mood) to a full, scaled-down or micro action
//! - **Check-in Flow**: an immutable state machine that captures willingness
//!   and emotion, then resolves the action
//! - **Aggregators**: streaks, weekly progress, mood trend and achievements,
//!   recomputed from the caller's records on every call
//! - **Storage**: TOML-based configuration only; the event log itself is
//!   owned by the caller
//!
//! ## Key Components
//!
//! - [`Engine`]: Facade binding the operations to an injected [`Clock`]
//! - [`CheckinFlow`]: Check-in state machine
//! - [`ActionResolver`]: Recommendation rules
//! - [`Config`]: Application configuration management

pub mod agenda;
pub mod checkin;
pub mod clock;
pub mod engine;
pub mod error;
pub mod mood;
pub mod resolver;
pub mod stats;
pub mod storage;
pub mod streak;
pub mod subject;

pub use agenda::{agenda, Agenda};
pub use checkin::{
    CheckinFlow, CheckinInput, CheckinRecord, CheckinRejection, CheckinStep, CompletionRecord,
    PriorityHabitEvent,
};
pub use clock::{Clock, FixedClock, SystemClock, WeekStart};
pub use engine::{Engine, HabitReport, Snapshot, StreakReport};
pub use error::{ConfigError, CoreError, ValidationError};
pub use mood::{average_mood, EmotionalState, Level, MoodEntry, WillingnessLevel};
pub use resolver::{resolve_action, ActionPair, ActionResolver, Effort, Resolution};
pub use stats::{mood_trend, weekly_progress, MoodSample, MoodTrend, WeeklyProgress};
pub use storage::Config;
pub use streak::{complete_habit, is_completed_today, HabitStreak, StreakCalculator, StreakTier};
pub use subject::{
    AdHocTask, Frequency, Habit, Priority, PriorityHabit, PriorityHabitPreset, Subject,
    SubjectKind, SubjectRef,
};
