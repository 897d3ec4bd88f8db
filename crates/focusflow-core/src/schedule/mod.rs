//! Schedule types: the work items fed to the planner and the timetable
//! entries it produces.

mod budget;
pub mod time_format;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

pub use budget::{BreakPolicy, TimeBudget};

/// Label used for every rest block.
pub const BREAK_LABEL: &str = "Break";

/// Where a work item came from.
///
/// Only used to order items inside a day before balancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Focus block preparing for a deadline
    Deadline,
    /// Externally scheduled meeting
    Meeting,
    /// Study topic
    Topic,
}

impl Category {
    pub fn priority(self) -> Priority {
        match self {
            Category::Deadline => Priority::High,
            Category::Meeting => Priority::Medium,
            Category::Topic => Priority::Low,
        }
    }
}

/// Scheduling priority. Sorts highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A unit of work handed to the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub title: String,
    #[serde(default)]
    pub category: Option<Category>,
    /// Anchor for meetings and deadlines. Freely placed items leave this empty.
    #[serde(default)]
    pub fixed_time: Option<NaiveDateTime>,
    pub duration_minutes: i64,
}

impl WorkItem {
    /// A freely placed item with no anchor.
    pub fn new(title: impl Into<String>, duration_minutes: i64) -> Self {
        Self {
            title: title.into(),
            category: None,
            fixed_time: None,
            duration_minutes,
        }
    }

    /// A study topic. Its length is decided by the scheduler.
    pub fn topic(title: impl Into<String>) -> Self {
        Self::new(title, 0).with_category(Category::Topic)
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn anchored_at(mut self, at: NaiveDateTime) -> Self {
        self.fixed_time = Some(at);
        self
    }

    pub fn priority(&self) -> Priority {
        self.category.map(Category::priority).unwrap_or(Priority::Low)
    }
}

/// One entry of a generated timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub label: String,
    pub day: NaiveDate,
    #[serde(with = "time_format")]
    pub start: NaiveTime,
    pub duration_minutes: i64,
    pub is_break: bool,
    /// Owned by the consumer; the planner always emits `false`.
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Study module the item belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

impl ScheduleItem {
    pub fn work(label: impl Into<String>, day: NaiveDate, start: NaiveTime, duration_minutes: i64) -> Self {
        Self {
            label: label.into(),
            day,
            start,
            duration_minutes,
            is_break: false,
            completed: false,
            category: None,
            module: None,
        }
    }

    pub fn rest(day: NaiveDate, start: NaiveTime, duration_minutes: i64) -> Self {
        Self {
            is_break: true,
            ..Self::work(BREAK_LABEL, day, start, duration_minutes)
        }
    }

    /// Time of day the item ends. Wraps past midnight only for items the
    /// scheduler did not produce (e.g. late meetings).
    pub fn end(&self) -> NaiveTime {
        self.start + Duration::minutes(self.duration_minutes)
    }

    pub fn priority(&self) -> Priority {
        self.category.map(Category::priority).unwrap_or(Priority::Low)
    }
}
