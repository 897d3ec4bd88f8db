//! Daily load capping for fixed commitments.
//!
//! Meetings and deadline focus blocks cannot be dropped, so once a day
//! is full the remaining items are set to a floor instead. The total for a
//! day may therefore still exceed the cap when every late item sits at the
//! floor, and an item shorter than the floor is raised to it once the cap
//! is crossed.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::schedule::ScheduleItem;

/// Caps the total minutes per day across heterogeneous items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadBalancer {
    pub daily_cap_minutes: i64,
    pub minimum_item_minutes: i64,
}

impl Default for WorkloadBalancer {
    fn default() -> Self {
        Self {
            daily_cap_minutes: 420,
            minimum_item_minutes: 20,
        }
    }
}

impl WorkloadBalancer {
    pub fn new(daily_cap_minutes: i64, minimum_item_minutes: i64) -> Self {
        Self {
            daily_cap_minutes,
            minimum_item_minutes,
        }
    }

    /// Shrink items so each day stays within the cap where possible.
    ///
    /// Output is grouped by day and the days are emitted in calendar order,
    /// which can differ from the order days first appear in `items`. Within
    /// a day the input order is kept; later items are treated as lower
    /// priority and are the ones clamped. No item is removed.
    ///
    /// An item that would take the running total past the cap becomes
    /// `max(minimum_item_minutes, daily_cap_minutes - used)` minutes.
    pub fn balance(&self, items: Vec<ScheduleItem>) -> Vec<ScheduleItem> {
        let mut by_day: BTreeMap<NaiveDate, Vec<ScheduleItem>> = BTreeMap::new();
        for item in items {
            by_day.entry(item.day).or_default().push(item);
        }

        let mut balanced = Vec::new();
        for (day, day_items) in by_day {
            let mut used = 0;
            for mut item in day_items {
                if used + item.duration_minutes > self.daily_cap_minutes {
                    let allowed = self
                        .minimum_item_minutes
                        .max(self.daily_cap_minutes - used);
                    tracing::debug!(
                        %day,
                        label = %item.label,
                        from = item.duration_minutes,
                        to = allowed,
                        "clamped item to fit daily cap"
                    );
                    item.duration_minutes = allowed;
                }
                used += item.duration_minutes;
                balanced.push(item);
            }
            if used > self.daily_cap_minutes {
                tracing::warn!(%day, used, cap = self.daily_cap_minutes, "day over cap after clamping to floor");
            }
        }
        balanced
    }
}

/// Total minutes per day.
pub fn daily_totals(items: &[ScheduleItem]) -> BTreeMap<NaiveDate, i64> {
    let mut totals = BTreeMap::new();
    for item in items {
        *totals.entry(item.day).or_insert(0) += item.duration_minutes;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, n).unwrap()
    }

    fn meeting(title: &str, d: u32, hour: u32, minutes: i64) -> ScheduleItem {
        ScheduleItem::work(title, day(d), NaiveTime::from_hms_opt(hour, 0, 0).unwrap(), minutes)
    }

    fn durations(items: &[ScheduleItem]) -> Vec<i64> {
        items.iter().map(|i| i.duration_minutes).collect()
    }

    #[test]
    fn three_meetings_over_cap_keep_floor() {
        let balancer = WorkloadBalancer::new(100, 20);
        let out = balancer.balance(vec![
            meeting("A", 1, 9, 60),
            meeting("B", 1, 11, 60),
            meeting("C", 1, 14, 60),
        ]);
        assert_eq!(durations(&out), vec![60, 40, 20]);
        // Floor wins over the cap: every item is still present.
        assert_eq!(daily_totals(&out)[&day(1)], 120);
    }

    #[test]
    fn days_are_capped_independently() {
        let balancer = WorkloadBalancer::new(90, 20);
        let out = balancer.balance(vec![
            meeting("A", 2, 9, 60),
            meeting("B", 1, 9, 60),
            meeting("C", 2, 11, 60),
            meeting("D", 1, 11, 20),
        ]);
        let labels: Vec<_> = out.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["B", "D", "A", "C"]);
        assert_eq!(durations(&out), vec![60, 20, 60, 30]);
    }

    #[test]
    fn under_cap_is_untouched() {
        let balancer = WorkloadBalancer::default();
        let input = vec![meeting("A", 1, 9, 60), meeting("B", 1, 10, 90)];
        assert_eq!(balancer.balance(input.clone()), input);
    }

    #[test]
    fn overflowing_short_item_is_raised_to_floor() {
        let balancer = WorkloadBalancer::new(100, 20);
        let out = balancer.balance(vec![meeting("A", 1, 9, 95), meeting("B", 1, 10, 10)]);
        assert_eq!(durations(&out), vec![95, 20]);
    }

    #[test]
    fn items_after_full_day_sit_at_floor() {
        let balancer = WorkloadBalancer::new(100, 20);
        let out = balancer.balance(vec![
            meeting("A", 1, 9, 100),
            meeting("B", 1, 11, 45),
            meeting("C", 1, 13, 5),
        ]);
        assert_eq!(durations(&out), vec![100, 20, 20]);
    }

    #[test]
    fn short_item_that_fits_is_kept() {
        let balancer = WorkloadBalancer::new(100, 20);
        let out = balancer.balance(vec![meeting("A", 1, 9, 80), meeting("B", 1, 10, 10)]);
        assert_eq!(durations(&out), vec![80, 10]);
    }

    #[test]
    fn empty_input() {
        assert!(WorkloadBalancer::default().balance(Vec::new()).is_empty());
    }
}
