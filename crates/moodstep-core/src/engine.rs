//! Engine facade over a caller-supplied snapshot.
//!
//! The engine owns no data. Callers pass a [`Snapshot`] in and get a new
//! snapshot (or a derived value) back; the input is never mutated.

use serde::{Deserialize, Serialize};

use crate::agenda::{agenda, Agenda};
use crate::checkin::{
    CheckinFlow, CheckinInput, CheckinRecord, CheckinRejection, CompletionRecord,
    PriorityHabitEvent,
};
use crate::clock::Clock;
use crate::error::{Result, ValidationError};
use crate::mood::{average_mood, EmotionalState, MoodEntry, WillingnessLevel};
use crate::resolver::ActionResolver;
use crate::stats::{
    achievement_progress, mood_samples, mood_trend, AchievementProgress, DatedEvent, MoodTrend,
    WeeklyAggregator, WeeklyProgress,
};
use crate::storage::Config;
use crate::streak::{
    self, last_seven_days, DayMark, HabitStreak, HabitsSummary, StreakCalculator, StreakTier,
};
use crate::subject::{AdHocTask, Habit, PriorityHabit, Subject};

/// Everything the engine reads: the caller's in-memory event log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tasks: Vec<AdHocTask>,
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub priority_habit: Option<PriorityHabit>,
    #[serde(default)]
    pub priority_events: Vec<PriorityHabitEvent>,
    #[serde(default)]
    pub mood_entries: Vec<MoodEntry>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn task(&self, id: &str) -> Option<&AdHocTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Look up a check-in target by id: a task, or the priority habit.
    pub fn subject(&self, id: &str) -> Option<Subject> {
        if let Some(task) = self.task(id) {
            return Some(task.clone().into());
        }
        self.priority_habit
            .as_ref()
            .filter(|h| h.id == id)
            .map(|h| h.clone().into())
    }

    /// Events logged against the current priority habit.
    pub fn priority_habit_events(&self) -> Vec<&PriorityHabitEvent> {
        match &self.priority_habit {
            Some(habit) => self
                .priority_events
                .iter()
                .filter(|e| e.habit_id == habit.id)
                .collect(),
            None => Vec::new(),
        }
    }
}

fn unknown(kind: &str, id: &str) -> ValidationError {
    ValidationError::UnknownSubject {
        kind: kind.to_string(),
        id: id.to_string(),
    }
}

/// Per-habit streak view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitReport {
    pub habit_id: String,
    pub name: String,
    pub streak: HabitStreak,
    pub tier: StreakTier,
    pub last_seven_days: Vec<DayMark>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreakReport {
    pub habits: Vec<HabitReport>,
    pub summary: HabitsSummary,
}

/// Check-in, completion and aggregation operations bound to one clock.
pub struct Engine<C: Clock> {
    clock: C,
    resolver: ActionResolver,
    streaks: StreakCalculator,
    weekly: WeeklyAggregator,
}

impl<C: Clock> Engine<C> {
    /// Engine with built-in defaults (Sunday weeks, no custom actions).
    pub fn new(clock: C) -> Self {
        Self::with_config(clock, &Config::default())
    }

    pub fn with_config(clock: C, config: &Config) -> Self {
        Self {
            clock,
            resolver: config.resolver(),
            streaks: config.streak_calculator(),
            weekly: config.weekly_aggregator(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn resolver(&self) -> &ActionResolver {
        &self.resolver
    }

    // ── Check-ins ────────────────────────────────────────────────────

    pub fn resolve_action(
        &self,
        subject: &Subject,
        willingness: WillingnessLevel,
        mood: EmotionalState,
    ) -> String {
        self.resolver.resolve(subject.view(), willingness, mood)
    }

    pub fn start_checkin(&self, subject: &Subject) -> CheckinFlow {
        match subject {
            Subject::AdHocTask(task) => CheckinFlow::for_task(task),
            Subject::PriorityHabit(habit) => CheckinFlow::for_priority_habit(habit),
        }
    }

    pub fn advance_checkin(
        &self,
        flow: &CheckinFlow,
        input: CheckinInput,
    ) -> Result<CheckinFlow, CheckinRejection> {
        flow.advance(input, &self.resolver, &self.clock)
    }

    /// Store a resolved check-in: it becomes a task's last check-in, or a
    /// new (not completed) priority-habit event.
    pub fn apply_checkin(&self, snapshot: &Snapshot, record: CheckinRecord) -> Result<Snapshot> {
        if record.resolved_action.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "resolved_action".into(),
            }
            .into());
        }

        let mut next = snapshot.clone();

        if let Some(task) = next.tasks.iter_mut().find(|t| t.id == record.subject_id) {
            *task = task.clone().with_checkin(record);
            return Ok(next);
        }

        let is_priority = next
            .priority_habit
            .as_ref()
            .is_some_and(|h| h.id == record.subject_id);
        if !is_priority {
            return Err(unknown("subject", &record.subject_id).into());
        }

        next.priority_events.push(PriorityHabitEvent::from_checkin(record));
        Ok(next)
    }

    // ── Completions ──────────────────────────────────────────────────

    /// Mark an ad-hoc task done with the mood reported on completion.
    pub fn record_completion(
        &self,
        snapshot: &Snapshot,
        task_id: &str,
        mood: EmotionalState,
    ) -> Result<(Snapshot, CompletionRecord)> {
        let now = self.clock.now();
        let mut next = snapshot.clone();
        let task = next
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| unknown("task", task_id))?;

        let (done, record) = task.complete(mood, &now)?;
        *task = done;

        tracing::debug!(task = task_id, %mood, "task completed");
        Ok((next, record))
    }

    pub fn complete_habit(&self, habit: &Habit) -> Habit {
        streak::complete_habit(habit, &self.clock.now())
    }

    /// [`complete_habit`](Self::complete_habit) applied to a habit in the snapshot.
    pub fn complete_habit_in(&self, snapshot: &Snapshot, habit_id: &str) -> Result<Snapshot> {
        let mut next = snapshot.clone();
        let habit = next
            .habits
            .iter_mut()
            .find(|h| h.id == habit_id)
            .ok_or_else(|| unknown("habit", habit_id))?;
        *habit = self.complete_habit(habit);
        Ok(next)
    }

    /// Append a completed event for the priority habit.
    pub fn complete_priority_habit(&self, snapshot: &Snapshot) -> Result<Snapshot> {
        let habit = snapshot
            .priority_habit
            .as_ref()
            .ok_or_else(|| unknown("priority habit", ""))?;

        let mut next = snapshot.clone();
        next.priority_events
            .push(PriorityHabitEvent::completion(&habit.id, &self.clock.now()));
        Ok(next)
    }

    pub fn is_completed_today(&self, habit: &Habit) -> bool {
        streak::is_completed_today(habit, &self.clock.now())
    }

    // ── Aggregations ─────────────────────────────────────────────────

    pub fn weekly_progress<E: DatedEvent>(&self, events: &[E], target: u32) -> WeeklyProgress {
        self.weekly.progress(events, target, &self.clock.now())
    }

    /// Progress of the active priority habit toward its weekly target.
    /// `None` when there is no active priority habit.
    pub fn priority_progress(&self, snapshot: &Snapshot) -> Option<WeeklyProgress> {
        let habit = snapshot.priority_habit.as_ref().filter(|h| h.is_active)?;
        let events: Vec<PriorityHabitEvent> =
            snapshot.priority_habit_events().into_iter().cloned().collect();
        Some(self.weekly_progress(&events, habit.days_per_week))
    }

    pub fn mood_trend(&self, snapshot: &Snapshot) -> MoodTrend {
        mood_trend(&mood_samples(&snapshot.tasks))
    }

    /// Mean score of the mood journal; neutral when nothing is logged.
    pub fn journal_average(&self, snapshot: &Snapshot) -> f64 {
        average_mood(&snapshot.mood_entries)
    }

    pub fn streaks(&self, snapshot: &Snapshot) -> StreakReport {
        let now = self.clock.now();
        let habits = snapshot
            .habits
            .iter()
            .map(|h| {
                let streak = self.streaks.streak(h, &now);
                HabitReport {
                    habit_id: h.id.clone(),
                    name: h.name.clone(),
                    tier: StreakTier::for_streak(streak.current),
                    streak,
                    last_seven_days: last_seven_days(h, &now),
                }
            })
            .collect();

        StreakReport {
            habits,
            summary: self.streaks.summary(&snapshot.habits, &now),
        }
    }

    pub fn agenda<'a>(&self, snapshot: &'a Snapshot) -> Agenda<'a> {
        agenda(&snapshot.tasks, &self.clock.now())
    }

    pub fn achievements(&self, snapshot: &Snapshot) -> Vec<AchievementProgress> {
        achievement_progress(
            &snapshot.tasks,
            &snapshot.habits,
            &snapshot.mood_entries,
            &self.streaks,
            &self.clock.now(),
        )
    }
}
