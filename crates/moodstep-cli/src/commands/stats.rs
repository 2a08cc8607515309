use clap::Subcommand;
use serde_json::json;

use super::{print_json, SnapshotArgs};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Priority habit progress for the current week
    Weekly(SnapshotArgs),
    /// Mood before check-in vs. after completion, plus the journal average
    Trend(SnapshotArgs),
    /// Habit streaks and the seven-day strip
    Streaks(SnapshotArgs),
    /// Achievement progress
    Achievements(SnapshotArgs),
    /// Overdue, upcoming and completed-today tasks
    Agenda(SnapshotArgs),
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StatsAction::Weekly(source) => {
            let snapshot = source.load()?;
            match source.engine().priority_progress(&snapshot) {
                Some(progress) => print_json(&progress)?,
                None => print_json(&json!({ "target": null }))?,
            }
        }
        StatsAction::Trend(source) => {
            let snapshot = source.load()?;
            let engine = source.engine();
            let trend = engine.mood_trend(&snapshot);
            print_json(&json!({
                "avg_initial": trend.avg_initial,
                "avg_final": trend.avg_final,
                "percent_delta": trend.percent_delta,
                "label": trend.delta_label(),
                "sample_count": trend.sample_count,
                "journal_average": engine.journal_average(&snapshot),
            }))?;
        }
        StatsAction::Streaks(source) => {
            let snapshot = source.load()?;
            print_json(&source.engine().streaks(&snapshot))?;
        }
        StatsAction::Achievements(source) => {
            let snapshot = source.load()?;
            print_json(&source.engine().achievements(&snapshot))?;
        }
        StatsAction::Agenda(source) => {
            let snapshot = source.load()?;
            print_json(&source.engine().agenda(&snapshot))?;
        }
    }
    Ok(())
}
