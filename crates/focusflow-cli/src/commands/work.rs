//! Work schedule commands for CLI.

use chrono::{NaiveDate, NaiveTime};
use clap::Subcommand;
use focusflow_core::storage::state::toggle_completed;
use focusflow_core::{Deadline, Meeting};

use super::{parse_date, parse_time, print_items, CliResult, Session};

#[derive(Subcommand)]
pub enum WorkAction {
    /// Queue a meeting for the next `work plan`
    Meeting {
        #[arg(long)]
        title: String,
        /// Meeting date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        /// Start time (HH:MM)
        #[arg(long, value_parser = parse_time)]
        start: NaiveTime,
        /// Duration in minutes (default from config)
        #[arg(long)]
        duration: Option<i64>,
    },
    /// Queue a project deadline for the next `work plan`
    Deadline {
        #[arg(long)]
        title: String,
        /// Deadline date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
    },
    /// Build the balanced work schedule from queued meetings and deadlines
    Plan {
        #[arg(long)]
        json: bool,
    },
    /// Show the saved work schedule
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Toggle completion of a work task
    Toggle {
        /// Task index as printed by `work show`
        index: usize,
    },
    /// Forget queued meetings and deadlines
    Clear,
}

pub fn run(action: WorkAction) -> CliResult {
    let mut session = Session::open()?;

    match action {
        WorkAction::Meeting {
            title,
            date,
            start,
            duration,
        } => {
            if duration.is_some_and(|d| d <= 0) {
                return Err("meeting duration must be positive".into());
            }
            session.state.pending_meetings.push(Meeting {
                title,
                date,
                start_time: start,
                duration_minutes: duration,
            });
            session.save()?;
            println!("meeting queued ({} pending)", session.state.pending_meetings.len());
        }
        WorkAction::Deadline { title, date } => {
            session.state.pending_deadlines.push(Deadline { title, date });
            session.save()?;
            println!("deadline queued ({} pending)", session.state.pending_deadlines.len());
        }
        WorkAction::Plan { json } => {
            let tasks = session
                .planner()
                .plan_work(&session.state.pending_meetings, &session.state.pending_deadlines)?;
            session.state.work_tasks = tasks;
            session.save()?;
            print_items(&session.state.work_tasks, json)?;
        }
        WorkAction::Show { json } => {
            if session.state.work_tasks.is_empty() && !json {
                println!("No work tasks yet. Queue meetings/deadlines and run `focusflow work plan`.");
            } else {
                print_items(&session.state.work_tasks, json)?;
            }
        }
        WorkAction::Toggle { index } => {
            let done = toggle_completed(&mut session.state.work_tasks, "work_tasks", index)?;
            session.save()?;
            println!("{}", if done { "completed" } else { "pending" });
        }
        WorkAction::Clear => {
            session.state.pending_meetings.clear();
            session.state.pending_deadlines.clear();
            session.save()?;
            println!("queued meetings and deadlines cleared");
        }
    }
    Ok(())
}
