use chrono::NaiveDate;
use clap::Subcommand;
use focusflow_core::{Clock, DailyMetrics, SystemClock, Target};

use super::{parse_date, CliResult, Session};

#[derive(Subcommand)]
pub enum HealthAction {
    /// Save a day's health data and update analytics
    Log {
        /// Day to record (YYYY-MM-DD, default today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Glasses of water drunk
        #[arg(long, default_value = "0")]
        water: f64,
        /// Minutes of exercise done
        #[arg(long, default_value = "0")]
        exercise: f64,
        /// Hours slept
        #[arg(long, default_value = "0")]
        sleep: f64,
        /// Water goal in glasses (default from config)
        #[arg(long)]
        water_goal: Option<f64>,
        /// Exercise goal in minutes (default from config)
        #[arg(long)]
        exercise_goal: Option<f64>,
        /// Sleep goal in hours (default from config)
        #[arg(long)]
        sleep_goal: Option<f64>,
    },
    /// Show a day's health summary
    Show {
        /// Day to show (YYYY-MM-DD, default today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: HealthAction) -> CliResult {
    let mut session = Session::open()?;
    let today = SystemClock.today();

    match action {
        HealthAction::Log {
            date,
            water,
            exercise,
            sleep,
            water_goal,
            exercise_goal,
            sleep_goal,
        } => {
            let goals = &session.config.health;
            let date = date.unwrap_or(today);
            let metrics = DailyMetrics {
                date,
                water: Target::new(water_goal.unwrap_or(goals.water_goal_glasses), water),
                exercise: Target::new(exercise_goal.unwrap_or(goals.exercise_goal_minutes), exercise),
                sleep: Target::new(sleep_goal.unwrap_or(goals.sleep_goal_hours), sleep),
            };
            let score = metrics.score();
            session.state.health_days.insert(date, metrics);
            session
                .state
                .analytics
                .record_day(date, &session.state.work_tasks, score);
            session.save()?;
            println!("health data saved for {date}: wellness score {score:.1} / 100");
        }
        HealthAction::Show { date, json } => {
            let date = date.unwrap_or(today);
            let Some(h) = session.state.health_days.get(&date) else {
                return Err(format!("no health data recorded for {date}").into());
            };
            if json {
                let mut value = serde_json::to_value(h)?;
                value["score"] = serde_json::json!(h.score());
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("Water: {}/{} glasses", h.water.actual, h.water.goal);
                println!("Exercise: {}/{} minutes", h.exercise.actual, h.exercise.goal);
                println!("Sleep: {}/{} hours", h.sleep.actual, h.sleep.goal);
                println!("Daily wellness score: {:.1} / 100", h.score());
            }
        }
    }
    Ok(())
}
