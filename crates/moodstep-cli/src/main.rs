use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "moodstep", version, about = "Moodstep CLI")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend an action for a subject
    Resolve(commands::resolve::ResolveArgs),
    /// Run a check-in against a snapshot
    Checkin(commands::checkin::CheckinArgs),
    /// Mark an ad-hoc task done
    CompleteTask(commands::complete::CompleteTaskArgs),
    /// Mark a habit (or the priority habit) done for today
    CompleteHabit(commands::complete::CompleteHabitArgs),
    /// Aggregated statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions(commands::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MOODSTEP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Resolve(args) => commands::resolve::run(args),
        Commands::Checkin(args) => commands::checkin::run(args),
        Commands::CompleteTask(args) => commands::complete::run_task(args),
        Commands::CompleteHabit(args) => commands::complete::run_habit(args),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn complete_habit_needs_id_or_priority() {
        assert!(Cli::try_parse_from(["moodstep", "complete-habit", "-s", "s.json"]).is_err());
        assert!(Cli::try_parse_from(["moodstep", "complete-habit", "-s", "s.json", "--priority"]).is_ok());
        assert!(Cli::try_parse_from(["moodstep", "complete-habit", "-s", "s.json", "h-1"]).is_ok());
    }

    #[test]
    fn moods_and_levels_parse_from_arguments() {
        let cli = Cli::try_parse_from(["moodstep", "resolve", "Go to gym", "-w", "medium", "-m", "Tired"]);
        assert!(cli.is_ok());
        assert!(Cli::try_parse_from(["moodstep", "resolve", "x", "-w", "maybe", "-m", "good"]).is_err());
    }
}
