use clap::Args;
use moodstep_core::{CheckinInput, CheckinStep, EmotionalState, WillingnessLevel};
use serde_json::json;

use super::{print_json, SnapshotArgs};

#[derive(Args)]
pub struct CheckinArgs {
    #[command(flatten)]
    source: SnapshotArgs,
    /// Task id or priority habit id
    subject_id: String,
    /// Willingness: low, medium or high
    #[arg(long, short)]
    willingness: WillingnessLevel,
    /// Mood: stressed, tired, unmotivated, neutral or good
    #[arg(long, short)]
    mood: EmotionalState,
}

/// Runs the whole flow and prints the record with the updated snapshot.
/// The snapshot file itself is left as is.
pub fn run(args: CheckinArgs) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = args.source.load()?;
    let engine = args.source.engine();
    let subject = snapshot
        .subject(&args.subject_id)
        .ok_or_else(|| format!("no task or priority habit with id '{}'", args.subject_id))?;

    let mut flow = engine.start_checkin(&subject);
    while !flow.is_resolved() {
        let input = match (flow.step(), flow.willingness(), flow.emotion()) {
            (CheckinStep::Willingness | CheckinStep::Combined, None, _) => {
                CheckinInput::SelectWillingness(args.willingness)
            }
            (CheckinStep::Emotion | CheckinStep::Combined, _, None) => {
                CheckinInput::SelectEmotion(args.mood)
            }
            _ => CheckinInput::Continue,
        };
        flow = engine.advance_checkin(&flow, input)?;
    }

    let record = flow
        .into_record()
        .ok_or("check-in resolved without a record")?;
    let updated = engine.apply_checkin(&snapshot, record.clone())?;

    print_json(&json!({
        "record": record,
        "snapshot": updated,
    }))
}
