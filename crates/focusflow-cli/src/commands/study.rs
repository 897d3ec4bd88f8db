//! Study timetable commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use focusflow_core::storage::state::toggle_completed;
use focusflow_core::{feedback, ScheduleItem, TextGenerator};

use super::{parse_date, print_items, CliResult, Session};

#[derive(Subcommand)]
pub enum StudyAction {
    /// Generate and save a study timetable
    Plan {
        /// Module name
        #[arg(long)]
        module: String,
        /// Exam date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        exam_date: NaiveDate,
        /// Hours available per day
        #[arg(long, default_value = "2.0")]
        hours: f64,
        /// Topics, in study order
        #[arg(required = true)]
        topics: Vec<String>,
        /// Print the timetable as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the saved timetable
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Summary advice for the saved timetable
    Feedback,
    /// Suggested learning order for topics (default: the saved timetable's)
    Breakdown {
        topics: Vec<String>,
    },
    /// Toggle completion of an entry
    Toggle {
        /// Entry index as printed by `study show`
        index: usize,
    },
}

pub fn run(action: StudyAction) -> CliResult {
    let mut session = Session::open()?;

    match action {
        StudyAction::Plan {
            module,
            exam_date,
            hours,
            topics,
            json,
        } => {
            let topics: Vec<String> = topics
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            if module.trim().is_empty() || topics.is_empty() {
                return Err("module name and at least one topic are required".into());
            }

            let plan = session.planner().plan_study(&module, exam_date, &topics, hours)?;
            for dropped in &plan.dropped {
                eprintln!("warning: '{}' did not fit the daily budget and was dropped", dropped.title);
            }
            session.state.study_plan = plan.items;
            session.save()?;
            print_items(&session.state.study_plan, json)?;
        }
        StudyAction::Show { json } => {
            if session.state.study_plan.is_empty() && !json {
                println!("No study timetable yet. Run `focusflow study plan` first.");
            } else {
                print_items(&session.state.study_plan, json)?;
            }
        }
        StudyAction::Feedback => {
            let generator = session.generator();
            let generator = generator.as_ref().map(|g| g as &dyn TextGenerator);
            println!("{}", feedback::encouragement(generator, &session.state.study_plan));
        }
        StudyAction::Breakdown { topics } => {
            let topics = if topics.is_empty() {
                plan_topics(&session.state.study_plan)
            } else {
                topics
            };
            if topics.is_empty() {
                return Err("no topics given and no study timetable saved".into());
            }
            let generator = session.generator();
            let generator = generator.as_ref().map(|g| g as &dyn TextGenerator);
            println!("{}", feedback::breakdown(generator, &topics));
        }
        StudyAction::Toggle { index } => {
            let done = toggle_completed(&mut session.state.study_plan, "study_plan", index)?;
            session.save()?;
            println!("{}", if done { "completed" } else { "pending" });
        }
    }
    Ok(())
}

/// Distinct work labels of a plan, in first-seen order.
fn plan_topics(plan: &[ScheduleItem]) -> Vec<String> {
    let mut topics: Vec<String> = Vec::new();
    for item in plan.iter().filter(|i| !i.is_break) {
        if !topics.contains(&item.label) {
            topics.push(item.label.clone());
        }
    }
    topics
}
