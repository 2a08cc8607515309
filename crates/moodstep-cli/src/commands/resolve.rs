use clap::Args;
use moodstep_core::{EmotionalState, SubjectKind, SubjectRef, WillingnessLevel};

use super::{engine_at, print_json};

#[derive(Args)]
pub struct ResolveArgs {
    /// Subject title or habit name
    name: String,
    /// Willingness: low, medium or high
    #[arg(long, short)]
    willingness: WillingnessLevel,
    /// Mood: stressed, tired, unmotivated, neutral or good
    #[arg(long, short)]
    mood: EmotionalState,
    /// Category used for family detection when the name has no keyword
    #[arg(long, default_value = "")]
    category: String,
    /// Treat the subject as a habit session rather than a task
    #[arg(long)]
    habit: bool,
    /// Print the effort tier and matching rule as JSON
    #[arg(long)]
    explain: bool,
}

pub fn run(args: ResolveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let engine = engine_at(None);
    let kind = SubjectKind::detect(&args.name, &args.category);
    let subject = if args.habit {
        SubjectRef::habit(&args.name, kind)
    } else {
        SubjectRef::task(&args.name, kind)
    };

    if args.explain {
        let resolution = engine.resolver().explain(subject, args.willingness, args.mood);
        print_json(&resolution)?;
    } else {
        println!("{}", engine.resolver().resolve(subject, args.willingness, args.mood));
    }
    Ok(())
}
