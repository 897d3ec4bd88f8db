//! Encouragement text for a generated study plan.
//!
//! A rule-based message is always available. An optional [`TextGenerator`]
//! (an external language model, for instance) can replace it; any failure
//! of the generator falls back to the rule-based text.
//!
//! [`CommandGenerator`] is the bundled generator: it hands the prompt to an
//! external program on stdin and reads the reply from stdout.

use std::io::Write;
use std::process::{Command, Stdio};

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::schedule::ScheduleItem;

pub const EMPTY_PLAN_MESSAGE: &str =
    "No study sessions scheduled yet. Add topics to generate a plan.";

#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("text generator not configured")]
    NotConfigured,
    #[error("text generation failed: {0}")]
    Failed(String),
    #[error("text generator returned an empty response")]
    Empty,
}

/// External free-text generation service.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, FeedbackError>;
}

/// Runs an external program with the prompt on stdin and uses its stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
}

impl CommandGenerator {
    /// Split a whitespace-separated command line. `None` when blank.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl TextGenerator for CommandGenerator {
    fn generate(&self, prompt: &str) -> Result<String, FeedbackError> {
        let failed = |e: std::io::Error| FeedbackError::Failed(format!("{}: {e}", self.program));

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(failed)?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(prompt.as_bytes()).map_err(failed)?;
        }
        let output = child.wait_with_output().map_err(failed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FeedbackError::Failed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }
        String::from_utf8(output.stdout).map_err(|e| FeedbackError::Failed(e.to_string()))
    }
}

/// Counts derived from a plan, used for both message flavours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSummary {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    /// Days spanned, first to last inclusive.
    pub days: i64,
    pub work_items: usize,
    pub items_per_day: usize,
    pub start_time: NaiveTime,
}

impl PlanSummary {
    pub fn from_plan(plan: &[ScheduleItem]) -> Option<Self> {
        let first = plan.first()?;
        let last = plan.last()?;
        let days = ((last.day - first.day).num_days() + 1).max(1);
        let work_items = plan.iter().filter(|i| !i.is_break).count();
        let items_per_day = (work_items / days as usize).max(1);

        Some(Self {
            first_day: first.day,
            last_day: last.day,
            days,
            work_items,
            items_per_day,
            start_time: first.start,
        })
    }
}

/// Canned summary of the plan.
pub fn rule_based_message(plan: &[ScheduleItem]) -> String {
    let Some(summary) = PlanSummary::from_plan(plan) else {
        return EMPTY_PLAN_MESSAGE.to_string();
    };
    format!(
        "You have {} days remaining and {} topics. \
         Study about {} topics per day starting at {}. \
         Take a 20-minute break and hydrate every 10 minutes.",
        summary.days,
        summary.work_items,
        summary.items_per_day,
        summary.start_time.format("%H:%M"),
    )
}

/// Prompt asking a study coach to order the topics.
pub fn study_prompt(topics: &[String]) -> String {
    format!(
        "Act as a study coach. I have these topics to study: {}.\n\
         1. Organize them in the most logical learning order.\n\
         2. Briefly explain why this order works.\n\
         3. Identify which topic might be the 'Deep Work' focus.\n\
         Keep the response concise and formatted for a terminal.",
        topics.join(", ")
    )
}

/// Prompt asking for a short motivational note about the plan.
pub fn encouragement_prompt(summary: &PlanSummary) -> String {
    format!(
        "Write two encouraging sentences for a student with {} study sessions \
         spread over {} days ({} to {}), starting each day at {}.",
        summary.work_items,
        summary.days,
        summary.first_day,
        summary.last_day,
        summary.start_time.format("%H:%M"),
    )
}

/// Text used when no generator can order the topics.
pub fn default_order_message(topics: &[String]) -> String {
    if topics.is_empty() {
        return "No topics to organize.".to_string();
    }
    let ordered: Vec<String> = topics
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}. {t}", i + 1))
        .collect();
    format!("No generated learning order available. Using the given order:\n{}", ordered.join("\n"))
}

/// Generated encouragement for `plan`, or the rule-based message.
pub fn encouragement(generator: Option<&dyn TextGenerator>, plan: &[ScheduleItem]) -> String {
    let Some(summary) = PlanSummary::from_plan(plan) else {
        return EMPTY_PLAN_MESSAGE.to_string();
    };
    generate_or(generator, &encouragement_prompt(&summary), || rule_based_message(plan))
}

/// Generated learning order for `topics`, or the topics as given.
pub fn breakdown(generator: Option<&dyn TextGenerator>, topics: &[String]) -> String {
    if topics.is_empty() {
        return default_order_message(topics);
    }
    generate_or(generator, &study_prompt(topics), || default_order_message(topics))
}

fn generate_or(
    generator: Option<&dyn TextGenerator>,
    prompt: &str,
    fallback: impl FnOnce() -> String,
) -> String {
    match generate_checked(generator, prompt) {
        Ok(text) => text,
        Err(FeedbackError::NotConfigured) => fallback(),
        Err(e) => {
            tracing::warn!(error = %e, "falling back to rule-based feedback");
            fallback()
        }
    }
}

/// Run the generator, treating a missing generator or blank output as a
/// failure.
pub fn generate_checked(
    generator: Option<&dyn TextGenerator>,
    prompt: &str,
) -> Result<String, FeedbackError> {
    let generator = generator.ok_or(FeedbackError::NotConfigured)?;
    let text = generator.generate(prompt)?;
    let text = text.trim();
    if text.is_empty() {
        return Err(FeedbackError::Empty);
    }
    Ok(text.to_string())
}
