use clap::Args;
use moodstep_core::EmotionalState;
use serde_json::json;

use super::{print_json, SnapshotArgs};

#[derive(Args)]
pub struct CompleteTaskArgs {
    #[command(flatten)]
    source: SnapshotArgs,
    /// Task id
    task_id: String,
    /// Mood after finishing
    #[arg(long, short)]
    mood: EmotionalState,
}

#[derive(Args)]
pub struct CompleteHabitArgs {
    #[command(flatten)]
    source: SnapshotArgs,
    /// Habit id; omit with --priority
    #[arg(required_unless_present = "priority")]
    habit_id: Option<String>,
    /// Log a completion for the priority habit instead
    #[arg(long, conflicts_with = "habit_id")]
    priority: bool,
}

pub fn run_task(args: CompleteTaskArgs) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = args.source.load()?;
    let engine = args.source.engine();
    let (updated, completion) = engine.record_completion(&snapshot, &args.task_id, args.mood)?;

    print_json(&json!({
        "completion": completion,
        "snapshot": updated,
    }))
}

pub fn run_habit(args: CompleteHabitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = args.source.load()?;
    let engine = args.source.engine();

    let updated = match (&args.habit_id, args.priority) {
        (_, true) => engine.complete_priority_habit(&snapshot)?,
        (Some(id), false) => engine.complete_habit_in(&snapshot, id)?,
        (None, false) => return Err("a habit id or --priority is required".into()),
    };

    print_json(&updated)
}
