//! Planner entry points: study timetables and work schedules.
//!
//! [`Planner`] ties the configuration and a [`Clock`] to the scheduler and
//! the workload balancer.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::schedule::{time_format, Category, ScheduleItem, WorkItem};
use crate::scheduler::{GeneratedSchedule, Scheduler};
use crate::storage::{Config, StudyConfig, WorkConfig};

/// A meeting waiting to be planned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "time_format")]
    pub start_time: NaiveTime,
    /// Falls back to the configured default meeting length.
    #[serde(default)]
    pub duration_minutes: Option<i64>,
}

/// A project deadline. Planned as a focus block on the day before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    pub title: String,
    pub date: NaiveDate,
}

/// Rules used by [`Planner`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannerConfig {
    pub study: StudyConfig,
    pub work: WorkConfig,
}

impl From<&Config> for PlannerConfig {
    fn from(config: &Config) -> Self {
        Self {
            study: config.study.clone(),
            work: config.work.clone(),
        }
    }
}

/// Rule-based study and work planner.
pub struct Planner {
    config: PlannerConfig,
    clock: Arc<dyn Clock>,
}

impl Planner {
    /// Planner on the system clock.
    pub fn new(config: PlannerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: PlannerConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Days from today until `exam_date`, at least 1.
    pub fn horizon_until(&self, exam_date: NaiveDate) -> i64 {
        (exam_date - self.clock.today()).num_days().max(1)
    }

    /// Spread `topics` over the days left before `exam_date`.
    ///
    /// # Errors
    /// Returns `ValidationError::NonPositiveBudget` if `daily_hours` gives
    /// no study time, or `ConfigError::InvalidValue` for a bad `day_start`.
    pub fn plan_study(
        &self,
        module: &str,
        exam_date: NaiveDate,
        topics: &[String],
        daily_hours: f64,
    ) -> Result<GeneratedSchedule> {
        let daily_minutes = (daily_hours * 60.0).floor() as i64;
        let budget = self.config.study.budget(daily_minutes);
        let day_start = self.config.study.day_start_time()?;
        let items: Vec<WorkItem> = topics.iter().map(|t| WorkItem::topic(t.as_str())).collect();

        let mut schedule = Scheduler::new(budget).generate_detailed(
            &items,
            self.horizon_until(exam_date),
            self.clock.today(),
            day_start,
        )?;

        for item in &mut schedule.items {
            item.module = Some(module.to_string());
        }
        if !schedule.dropped.is_empty() {
            tracing::info!(
                module,
                dropped = schedule.dropped.len(),
                "some topics did not fit the daily budget"
            );
        }
        Ok(schedule)
    }

    /// Anchored work items for meetings and deadline focus blocks.
    pub fn work_items(&self, meetings: &[Meeting], deadlines: &[Deadline]) -> Result<Vec<WorkItem>> {
        let focus_start = self.config.work.focus_start_time()?;
        let mut items = Vec::with_capacity(meetings.len() + deadlines.len());

        for deadline in deadlines {
            let day_before = deadline.date - Duration::days(1);
            items.push(
                WorkItem::new(format!("Focus: {}", deadline.title), self.config.work.focus_block_minutes)
                    .with_category(Category::Deadline)
                    .anchored_at(day_before.and_time(focus_start)),
            );
        }
        for meeting in meetings {
            let minutes = meeting
                .duration_minutes
                .unwrap_or(self.config.work.default_meeting_minutes);
            items.push(
                WorkItem::new(format!("Meeting: {}", meeting.title), minutes)
                    .with_category(Category::Meeting)
                    .anchored_at(meeting.date.and_time(meeting.start_time)),
            );
        }
        Ok(items)
    }

    /// Build the balanced work schedule.
    ///
    /// Items are ordered by priority (deadline focus blocks before meetings)
    /// so that, on an overloaded day, meetings are the ones shortened.
    pub fn plan_work(&self, meetings: &[Meeting], deadlines: &[Deadline]) -> Result<Vec<ScheduleItem>> {
        let mut tasks: Vec<ScheduleItem> = self
            .work_items(meetings, deadlines)?
            .into_iter()
            .filter_map(anchored_item)
            .collect();
        tasks.sort_by_key(|t| t.priority());

        Ok(self.config.work.balancer().balance(tasks))
    }
}

fn anchored_item(item: WorkItem) -> Option<ScheduleItem> {
    let at = item.fixed_time?;
    let mut scheduled = ScheduleItem::work(item.title, at.date(), at.time(), item.duration_minutes);
    scheduled.category = item.category;
    Some(scheduled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::{CoreError, ValidationError};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn planner_on(today: NaiveDate) -> Planner {
        Planner::with_clock(PlannerConfig::default(), Arc::new(FixedClock::on(today)))
    }

    fn topics(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn horizon_counts_days_until_exam() {
        let planner = planner_on(date(3, 1));
        assert_eq!(planner.horizon_until(date(3, 5)), 4);
        assert_eq!(planner.horizon_until(date(3, 1)), 1);
        assert_eq!(planner.horizon_until(date(2, 20)), 1);
    }

    #[test]
    fn study_plan_starts_today_and_tags_module() {
        let planner = planner_on(date(3, 1));
        let plan = planner
            .plan_study("Algorithms", date(3, 3), &topics(&["Sorting", "Graphs", "DP", "Greedy"]), 2.0)
            .unwrap();

        assert_eq!(plan.items.first().map(|i| i.day), Some(date(3, 1)));
        assert_eq!(plan.items.last().map(|i| i.day), Some(date(3, 2)));
        assert_eq!(plan.items[0].start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert!(plan.items.iter().all(|i| i.module.as_deref() == Some("Algorithms")));
        assert!(plan.items.iter().filter(|i| !i.is_break).all(|i| i.category == Some(Category::Topic)));
    }

    #[test]
    fn study_hours_are_capped_by_config() {
        let planner = planner_on(date(3, 1));
        let plan = planner.plan_study("M", date(3, 2), &topics(&["Only"]), 10.0).unwrap();
        assert_eq!(plan.items.len(), 1);
        assert_eq!(plan.items[0].duration_minutes, 360);
    }

    #[test]
    fn zero_hours_is_rejected() {
        let planner = planner_on(date(3, 1));
        let err = planner.plan_study("M", date(3, 4), &topics(&["A"]), 0.0).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::NonPositiveBudget { minutes: 0 })
        ));
    }

    #[test]
    fn deadline_becomes_focus_block_day_before() {
        let planner = planner_on(date(3, 1));
        let tasks = planner
            .plan_work(&[], &[Deadline { title: "Report".into(), date: date(3, 10) }])
            .unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].label, "Focus: Report");
        assert_eq!(tasks[0].day, date(3, 9));
        assert_eq!(tasks[0].start, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
        assert_eq!(tasks[0].duration_minutes, 50);
        assert_eq!(tasks[0].category, Some(Category::Deadline));
    }

    #[test]
    fn meeting_defaults_duration() {
        let planner = planner_on(date(3, 1));
        let meeting = Meeting {
            title: "Sync".into(),
            date: date(3, 4),
            start_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            duration_minutes: None,
        };
        let tasks = planner.plan_work(&[meeting], &[]).unwrap();
        assert_eq!(tasks[0].label, "Meeting: Sync");
        assert_eq!(tasks[0].duration_minutes, 60);
        assert!(!tasks[0].completed);
    }

    #[test]
    fn overloaded_day_shortens_meetings_not_focus_blocks() {
        let mut config = PlannerConfig::default();
        config.work.max_minutes_per_day = 120;
        let planner = Planner::with_clock(config, Arc::new(FixedClock::on(date(3, 1))));

        let at = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        let meetings = vec![
            Meeting { title: "Plan".into(), date: date(3, 5), start_time: at(9), duration_minutes: Some(90) },
            Meeting { title: "Review".into(), date: date(3, 5), start_time: at(16), duration_minutes: Some(60) },
        ];
        let deadlines = vec![Deadline { title: "Launch".into(), date: date(3, 6) }];

        let tasks = planner.plan_work(&meetings, &deadlines).unwrap();
        let got: Vec<_> = tasks.iter().map(|t| (t.label.as_str(), t.duration_minutes)).collect();
        assert_eq!(
            got,
            vec![("Focus: Launch", 50), ("Meeting: Plan", 70), ("Meeting: Review", 20)]
        );
    }
}
