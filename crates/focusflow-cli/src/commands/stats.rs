use serde::Serialize;

use super::{CliResult, Session};

#[derive(Serialize)]
struct StatsRow {
    #[serde(flatten)]
    day: focusflow_core::DaySummary,
    /// Missing when no health data was saved for the day.
    hydration_percent: Option<f64>,
}

pub fn run() -> CliResult {
    let session = Session::open()?;
    let rows: Vec<StatsRow> = session
        .state
        .analytics
        .summaries()
        .into_iter()
        .map(|day| StatsRow {
            hydration_percent: session
                .state
                .health_days
                .get(&day.date)
                .map(|h| h.hydration_percent()),
            day,
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
