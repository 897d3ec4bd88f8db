//! Rule-based timetable generation.
//!
//! This module distributes work items across a horizon of calendar days:
//! - Splits the item list into equal daily batches (ceil of items / days)
//! - Gives each batch item an even share of the day's budget, floored at
//!   the minimum block length
//! - Inserts a break after long blocks while the day still has room
//! - Drops whatever no longer fits once a day's budget is spent
//!
//! The workload balancer in [`balance`] handles fixed commitments, which are
//! shortened instead of dropped.

pub mod balance;

use chrono::{Duration, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schedule::{ScheduleItem, TimeBudget, WorkItem};

pub use balance::WorkloadBalancer;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Output of a planning run, including what did not fit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSchedule {
    pub items: Vec<ScheduleItem>,
    /// Items cut because their day's budget ran out.
    pub dropped: Vec<WorkItem>,
}

/// Distributes work items over a horizon of days.
#[derive(Debug, Clone)]
pub struct Scheduler {
    budget: TimeBudget,
}

impl Scheduler {
    pub fn new(budget: TimeBudget) -> Self {
        Self { budget }
    }

    /// Generate a timetable starting on `start_day`.
    ///
    /// # Arguments
    /// * `items` - Work items in the order they should be tackled
    /// * `horizon_days` - Days available; values below 1 are treated as 1
    /// * `start_day` - First calendar day of the plan
    /// * `day_start` - Time of day each day's first block begins
    ///
    /// # Errors
    /// Returns `ValidationError::NonPositiveBudget` when the daily budget is
    /// zero or negative, and `ValidationError::NonPositiveBlock` when the
    /// minimum block is below one minute.
    pub fn generate(
        &self,
        items: &[WorkItem],
        horizon_days: i64,
        start_day: NaiveDate,
        day_start: NaiveTime,
    ) -> Result<Vec<ScheduleItem>> {
        Ok(self.generate_detailed(items, horizon_days, start_day, day_start)?.items)
    }

    /// Same as [`Scheduler::generate`], also reporting dropped items.
    pub fn generate_detailed(
        &self,
        items: &[WorkItem],
        horizon_days: i64,
        start_day: NaiveDate,
        day_start: NaiveTime,
    ) -> Result<GeneratedSchedule> {
        self.budget.validate()?;

        let mut schedule = GeneratedSchedule::default();
        if items.is_empty() {
            return Ok(schedule);
        }

        let horizon = horizon_days.max(1) as usize;
        let items_per_day = items.len().div_ceil(horizon).max(1);
        let day_capacity = self.day_capacity(day_start);

        for (offset, batch) in items.chunks(items_per_day).enumerate() {
            let day = start_day + Duration::days(offset as i64);
            self.plan_day(batch, day, day_start, day_capacity, &mut schedule);
        }

        tracing::debug!(
            items = items.len(),
            horizon,
            items_per_day,
            scheduled = schedule.items.len(),
            dropped = schedule.dropped.len(),
            "generated schedule"
        );

        Ok(schedule)
    }

    /// Minutes usable on one day: the budget, cut at midnight.
    fn day_capacity(&self, day_start: NaiveTime) -> i64 {
        let before_start = i64::from(day_start.num_seconds_from_midnight() / 60);
        self.budget.daily_minutes.min(MINUTES_PER_DAY - before_start)
    }

    fn plan_day(
        &self,
        batch: &[WorkItem],
        day: NaiveDate,
        day_start: NaiveTime,
        capacity: i64,
        schedule: &mut GeneratedSchedule,
    ) {
        let per_item = self.budget.per_item_minutes(batch.len());
        let breaks = self.budget.breaks;
        let mut remaining = capacity;
        let mut cursor = day_start;

        for (idx, item) in batch.iter().enumerate() {
            if remaining <= 0 {
                tracing::debug!(%day, count = batch.len() - idx, "day budget spent, dropping items");
                schedule.dropped.extend(batch[idx..].iter().cloned());
                break;
            }

            let duration = per_item.min(remaining);
            let mut block = ScheduleItem::work(item.title.clone(), day, cursor, duration);
            block.category = item.category;
            schedule.items.push(block);
            remaining -= duration;
            cursor += Duration::minutes(duration);

            if remaining > 0 && breaks.applies_after(duration) {
                if breaks.duration_minutes <= remaining {
                    schedule
                        .items
                        .push(ScheduleItem::rest(day, cursor, breaks.duration_minutes));
                    remaining -= breaks.duration_minutes;
                    cursor += Duration::minutes(breaks.duration_minutes);
                } else {
                    tracing::trace!(%day, remaining, "break omitted, not enough budget left");
                }
            }
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(TimeBudget::new(120))
    }
}
