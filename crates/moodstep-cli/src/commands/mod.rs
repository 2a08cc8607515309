pub mod checkin;
pub mod complete;
pub mod completions;
pub mod config;
pub mod resolve;
pub mod stats;

use chrono::{DateTime, FixedOffset};
use clap::Args;
use moodstep_core::{Clock, Config, Engine, FixedClock, Snapshot, SystemClock};
use serde::Serialize;
use std::path::PathBuf;

/// Where the event log comes from and which instant to evaluate at.
#[derive(Args)]
pub struct SnapshotArgs {
    /// JSON snapshot file (tasks, habits, priority habit, events, mood entries)
    #[arg(long, short)]
    pub snapshot: PathBuf,
    /// Evaluate at this RFC 3339 instant instead of the system clock
    #[arg(long)]
    pub now: Option<DateTime<FixedOffset>>,
}

impl SnapshotArgs {
    pub fn load(&self) -> Result<Snapshot, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(&self.snapshot)
            .map_err(|e| format!("cannot read {}: {e}", self.snapshot.display()))?;
        let snapshot = Snapshot::from_json(&json)?;
        tracing::debug!(
            path = %self.snapshot.display(),
            tasks = snapshot.tasks.len(),
            habits = snapshot.habits.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    pub fn engine(&self) -> Engine<FixedClock> {
        engine_at(self.now)
    }
}

/// Engine pinned to `now` (or the current instant) with the user's config.
pub fn engine_at(now: Option<DateTime<FixedOffset>>) -> Engine<FixedClock> {
    let now = now.unwrap_or_else(|| SystemClock.now());
    Engine::with_config(FixedClock::new(now), &Config::load_or_default())
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
