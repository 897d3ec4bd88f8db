pub mod config;
pub mod health;
pub mod stats;
pub mod study;
pub mod work;

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use focusflow_core::schedule::time_format;
use focusflow_core::{AppState, CommandGenerator, Config, Planner, PlannerConfig, ScheduleItem};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Loaded state plus where to write it back.
pub struct Session {
    pub config: Config,
    pub state: AppState,
    path: PathBuf,
}

impl Session {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load_or_default();
        let path = AppState::path()?;
        let state = AppState::load_or_default(&path);
        tracing::debug!(path = %path.display(), "opened state");
        Ok(Self { config, state, path })
    }

    pub fn planner(&self) -> Planner {
        Planner::new(PlannerConfig::from(&self.config))
    }

    /// External feedback generator, if one is configured.
    pub fn generator(&self) -> Option<CommandGenerator> {
        self.config.feedback.generator()
    }

    pub fn save(&self) -> CliResult {
        self.state.save(&self.path)?;
        Ok(())
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

pub fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    time_format::parse(raw).map_err(|e| format!("expected HH:MM: {e}"))
}

/// One line per item, in stored order, prefixed with its index.
pub fn print_items(items: &[ScheduleItem], json: bool) -> CliResult {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }
    for (idx, item) in items.iter().enumerate() {
        let kind = if item.is_break { "Break" } else { "Work " };
        let mark = if item.completed { "x" } else { " " };
        let owner = item
            .module
            .as_deref()
            .map(|m| format!("{m} - "))
            .unwrap_or_default();
        println!(
            "{idx:>3} [{mark}] {kind} | {} {} | {:>3} min | {owner}{}",
            item.day,
            item.start.format("%H:%M"),
            item.duration_minutes,
            item.label,
        );
    }
    Ok(())
}
