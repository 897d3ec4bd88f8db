//! # FocusFlow Core Library
//!
//! This library provides the planning logic for the FocusFlow study/work/health
//! dashboard. Every operation is available from the standalone CLI binary; the
//! library itself performs no I/O outside the `storage` module.
//!
//! ## Architecture
//!
//! - **Scheduler**: Distributes study topics over the days before an exam, with
//!   breaks after long blocks and a hard per-day budget
//! - **Workload balancer**: Caps daily minutes of fixed commitments (meetings,
//!   deadline focus blocks) by clamping to a floor, never removing, items
//! - **Wellness**: 0-100 score from water, exercise and sleep goals
//! - **Storage**: JSON application state and TOML configuration
//!
//! ## Key Components
//!
//! - [`Scheduler`]: Pure timetable generation
//! - [`WorkloadBalancer`]: Per-day overflow resolution
//! - [`Planner`]: Study and work entry points driven by [`Config`] and a [`Clock`]
//! - [`AppState`]: Persisted application state

pub mod analytics;
pub mod clock;
pub mod error;
pub mod feedback;
pub mod planner;
pub mod schedule;
pub mod scheduler;
pub mod storage;
pub mod wellness;

pub use analytics::{Analytics, DaySummary};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use feedback::{CommandGenerator, FeedbackError, PlanSummary, TextGenerator};
pub use planner::{Deadline, Meeting, Planner, PlannerConfig};
pub use schedule::{BreakPolicy, Category, Priority, ScheduleItem, TimeBudget, WorkItem};
pub use scheduler::{GeneratedSchedule, Scheduler, WorkloadBalancer};
pub use storage::{AppState, Config};
pub use wellness::{DailyMetrics, Target};
