//! Per-day history of task completion and wellness.
//!
//! Kept as parallel series (one entry per recorded day) so the record
//! can be charted directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schedule::ScheduleItem;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    #[serde(default)]
    pub history_dates: Vec<NaiveDate>,
    #[serde(default)]
    pub completed_tasks: Vec<u32>,
    #[serde(default)]
    pub total_tasks: Vec<u32>,
    #[serde(default)]
    pub wellness_scores: Vec<f64>,
}

/// One row of the analytics history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub completed: u32,
    pub missed: u32,
    pub productivity: f64,
    pub wellness: f64,
}

impl Analytics {
    /// Record completion counts for `tasks` and the day's wellness score.
    ///
    /// Recording a date that is already present replaces its entry. Uneven
    /// series from a hand-edited file are first cut to the shortest one.
    pub fn record_day(&mut self, date: NaiveDate, tasks: &[ScheduleItem], wellness: f64) {
        let work = tasks.iter().filter(|t| !t.is_break);
        let total = work.clone().count() as u32;
        let completed = work.filter(|t| t.completed).count() as u32;

        self.align();
        if let Some(idx) = self.history_dates.iter().position(|d| *d == date) {
            self.completed_tasks[idx] = completed;
            self.total_tasks[idx] = total;
            self.wellness_scores[idx] = wellness;
            return;
        }
        self.history_dates.push(date);
        self.completed_tasks.push(completed);
        self.total_tasks.push(total);
        self.wellness_scores.push(wellness);
    }

    /// Truncate every series to the length of the shortest.
    fn align(&mut self) {
        let len = self
            .history_dates
            .len()
            .min(self.completed_tasks.len())
            .min(self.total_tasks.len())
            .min(self.wellness_scores.len());
        let uneven = [
            self.history_dates.len(),
            self.completed_tasks.len(),
            self.total_tasks.len(),
            self.wellness_scores.len(),
        ]
        .iter()
        .any(|&n| n != len);
        if uneven {
            tracing::warn!(len, "analytics series were uneven; truncating");
        }
        self.history_dates.truncate(len);
        self.completed_tasks.truncate(len);
        self.total_tasks.truncate(len);
        self.wellness_scores.truncate(len);
    }

    pub fn is_empty(&self) -> bool {
        self.history_dates.is_empty()
    }

    /// Tasks left undone per recorded day.
    pub fn missed(&self) -> Vec<u32> {
        self.total_tasks
            .iter()
            .zip(&self.completed_tasks)
            .map(|(total, done)| total.saturating_sub(*done))
            .collect()
    }

    /// Completed share of tasks per day, as a percentage.
    pub fn productivity(&self) -> Vec<f64> {
        self.total_tasks
            .iter()
            .zip(&self.completed_tasks)
            .map(|(total, done)| {
                if *total == 0 {
                    0.0
                } else {
                    f64::from(*done) / f64::from(*total) * 100.0
                }
            })
            .collect()
    }

    /// Row view over the parallel series. Truncates to the shortest series
    /// if a hand-edited file left them uneven.
    pub fn summaries(&self) -> Vec<DaySummary> {
        let missed = self.missed();
        let productivity = self.productivity();
        self.history_dates
            .iter()
            .zip(&self.completed_tasks)
            .zip(missed)
            .zip(productivity)
            .zip(&self.wellness_scores)
            .map(|((((date, completed), missed), productivity), wellness)| DaySummary {
                date: *date,
                completed: *completed,
                missed,
                productivity,
                wellness: *wellness,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    fn task(done: bool) -> ScheduleItem {
        let mut item = ScheduleItem::work("Task", date(1), NaiveTime::from_hms_opt(9, 0, 0).unwrap(), 30);
        item.completed = done;
        item
    }

    #[test]
    fn records_counts_ignoring_breaks() {
        let mut analytics = Analytics::default();
        let rest = ScheduleItem::rest(date(1), NaiveTime::from_hms_opt(9, 30, 0).unwrap(), 20);
        analytics.record_day(date(1), &[task(true), rest, task(false), task(false)], 50.0);

        assert_eq!(analytics.total_tasks, vec![3]);
        assert_eq!(analytics.completed_tasks, vec![1]);
        assert_eq!(analytics.missed(), vec![2]);
        let productivity = analytics.productivity();
        assert!((productivity[0] - 33.333).abs() < 0.01);
    }

    #[test]
    fn re_recording_a_day_replaces_it() {
        let mut analytics = Analytics::default();
        analytics.record_day(date(1), &[task(false)], 10.0);
        analytics.record_day(date(2), &[task(false)], 20.0);
        analytics.record_day(date(1), &[task(true)], 90.0);

        assert_eq!(analytics.history_dates, vec![date(1), date(2)]);
        assert_eq!(analytics.completed_tasks, vec![1, 0]);
        assert_eq!(analytics.wellness_scores, vec![90.0, 20.0]);
    }

    #[test]
    fn zero_tasks_is_zero_productivity() {
        let mut analytics = Analytics::default();
        analytics.record_day(date(3), &[], 70.0);
        assert_eq!(analytics.productivity(), vec![0.0]);

        let rows = analytics.summaries();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].wellness, 70.0);
        assert_eq!(rows[0].missed, 0);
    }

    #[test]
    fn uneven_series_are_truncated() {
        let analytics = Analytics {
            history_dates: vec![date(1), date(2)],
            completed_tasks: vec![1],
            total_tasks: vec![2, 2],
            wellness_scores: vec![40.0, 60.0],
        };
        assert_eq!(analytics.summaries().len(), 1);
    }

    #[test]
    fn recording_over_uneven_series_does_not_panic() {
        let mut analytics = Analytics {
            history_dates: vec![date(1)],
            ..Analytics::default()
        };
        analytics.record_day(date(1), &[task(true), task(false)], 55.0);

        assert_eq!(analytics.history_dates, vec![date(1)]);
        assert_eq!(analytics.completed_tasks, vec![1]);
        assert_eq!(analytics.total_tasks, vec![2]);
        assert_eq!(analytics.wellness_scores, vec![55.0]);
    }

    #[test]
    fn recording_keeps_aligned_prefix_of_uneven_series() {
        let mut analytics = Analytics {
            history_dates: vec![date(1), date(2), date(3)],
            completed_tasks: vec![1, 2],
            total_tasks: vec![2, 2, 2],
            wellness_scores: vec![10.0, 20.0, 30.0],
        };
        analytics.record_day(date(3), &[task(false)], 90.0);

        assert_eq!(analytics.history_dates, vec![date(1), date(2), date(3)]);
        assert_eq!(analytics.completed_tasks, vec![1, 2, 0]);
        assert_eq!(analytics.total_tasks, vec![2, 2, 1]);
        assert_eq!(analytics.wellness_scores, vec![10.0, 20.0, 90.0]);
    }
}
