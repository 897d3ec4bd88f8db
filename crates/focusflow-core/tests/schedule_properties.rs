//! Property tests for the scheduler, balancer and wellness score.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime, Timelike};
use focusflow_core::scheduler::balance::daily_totals;
use focusflow_core::{
    wellness, BreakPolicy, DailyMetrics, ScheduleItem, Scheduler, Target, TimeBudget, WorkItem,
    WorkloadBalancer,
};
use proptest::prelude::*;

fn start_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn budget_strategy() -> impl Strategy<Value = TimeBudget> {
    (1i64..600, 1i64..120, 1i64..120, 0i64..40).prop_map(|(daily, floor, threshold, rest)| {
        TimeBudget::new(daily).with_min_block(floor).with_breaks(BreakPolicy {
            threshold_minutes: threshold,
            duration_minutes: rest,
        })
    })
}

fn day_start_strategy() -> impl Strategy<Value = NaiveTime> {
    (0u32..24, 0u32..60).prop_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap())
}

fn items(n: usize) -> Vec<WorkItem> {
    (0..n).map(|i| WorkItem::topic(format!("item-{i}"))).collect()
}

proptest! {
    #[test]
    fn consecutive_items_never_overlap(
        n in 0usize..25,
        horizon in -3i64..10,
        budget in budget_strategy(),
        day_start in day_start_strategy(),
    ) {
        let out = Scheduler::new(budget).generate(&items(n), horizon, start_day(), day_start).unwrap();
        for pair in out.windows(2) {
            if pair[0].day == pair[1].day {
                let end = pair[0].start.num_seconds_from_midnight() as i64 / 60 + pair[0].duration_minutes;
                let next = pair[1].start.num_seconds_from_midnight() as i64 / 60;
                prop_assert_eq!(end, next);
            }
        }
    }

    #[test]
    fn days_stay_within_budget_and_before_midnight(
        n in 0usize..25,
        horizon in 1i64..10,
        budget in budget_strategy(),
        day_start in day_start_strategy(),
    ) {
        let out = Scheduler::new(budget).generate(&items(n), horizon, start_day(), day_start).unwrap();
        for total in daily_totals(&out).values() {
            prop_assert!(*total <= budget.daily_minutes);
        }
        for item in &out {
            prop_assert!(item.duration_minutes > 0);
            prop_assert!(!item.completed);
            let start = item.start.num_seconds_from_midnight() as i64 / 60;
            prop_assert!(start + item.duration_minutes <= 24 * 60);
        }
    }

    #[test]
    fn every_item_is_scheduled_once_or_dropped(
        n in 0usize..25,
        horizon in -3i64..10,
        budget in budget_strategy(),
    ) {
        let input = items(n);
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let out = Scheduler::new(budget).generate_detailed(&input, horizon, start_day(), nine).unwrap();

        let mut seen: Vec<String> = out.items.iter().filter(|i| !i.is_break).map(|i| i.label.clone()).collect();
        seen.extend(out.dropped.iter().map(|i| i.title.clone()));
        seen.sort();
        let mut expected: Vec<String> = input.iter().map(|i| i.title.clone()).collect();
        expected.sort();
        prop_assert_eq!(seen, expected);

        let last_day = start_day() + chrono::Duration::days(horizon.max(1) - 1);
        prop_assert!(out.items.iter().all(|i| i.day <= last_day));
    }

    #[test]
    fn balancer_keeps_items_and_respects_cap_until_floor(
        durations in proptest::collection::vec((0i64..3, 1i64..300), 0..20),
        cap in 1i64..600,
        floor in 1i64..60,
    ) {
        let input: Vec<ScheduleItem> = durations
            .iter()
            .enumerate()
            .map(|(i, (day, minutes))| {
                ScheduleItem::work(
                    format!("m{i}"),
                    start_day() + chrono::Duration::days(*day),
                    NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                    *minutes,
                )
            })
            .collect();

        let out = WorkloadBalancer::new(cap, floor).balance(input.clone());
        prop_assert_eq!(out.len(), input.len());

        let mut input_by_day: BTreeMap<NaiveDate, Vec<&ScheduleItem>> = BTreeMap::new();
        for item in &input {
            input_by_day.entry(item.day).or_default().push(item);
        }
        let mut out_by_day: BTreeMap<NaiveDate, Vec<&ScheduleItem>> = BTreeMap::new();
        for item in &out {
            out_by_day.entry(item.day).or_default().push(item);
        }
        prop_assert_eq!(input_by_day.len(), out_by_day.len());

        for (day, before) in &input_by_day {
            let after = &out_by_day[day];
            prop_assert_eq!(before.len(), after.len());
            let mut used = 0;
            for (orig, item) in before.iter().zip(after.iter()) {
                prop_assert_eq!(&orig.label, &item.label);
                let expected = if used + orig.duration_minutes > cap {
                    floor.max(cap - used)
                } else {
                    orig.duration_minutes
                };
                prop_assert_eq!(item.duration_minutes, expected);
                used += item.duration_minutes;
                // Only floor-sized items may push a day past its cap.
                if used > cap {
                    prop_assert!(item.duration_minutes <= floor);
                }
            }
        }
    }

    #[test]
    fn meeting_every_goal_scores_100(
        goals in (0.1f64..50.0, 0.1f64..300.0, 0.1f64..14.0),
        extra in (0.0f64..10.0, 0.0f64..10.0, 0.0f64..10.0),
    ) {
        let metrics = DailyMetrics {
            date: start_day(),
            water: Target::new(goals.0, goals.0 + extra.0),
            exercise: Target::new(goals.1, goals.1 + extra.1),
            sleep: Target::new(goals.2, goals.2 + extra.2),
        };
        prop_assert_eq!(wellness::score(&metrics), 100.0);
    }

    #[test]
    fn any_missing_goal_scores_zero(
        which in 0usize..3,
        bad_goal in -10.0f64..=0.0,
        actual in 0.0f64..20.0,
    ) {
        let mut targets = [Target::new(8.0, actual), Target::new(30.0, actual), Target::new(8.0, actual)];
        targets[which].goal = bad_goal;
        let metrics = DailyMetrics {
            date: start_day(),
            water: targets[0],
            exercise: targets[1],
            sleep: targets[2],
        };
        prop_assert_eq!(wellness::score(&metrics), 0.0);
    }

    #[test]
    fn score_stays_in_range(
        goals in (-5.0f64..50.0, -5.0f64..300.0, -5.0f64..14.0),
        actuals in (-5.0f64..60.0, -5.0f64..400.0, -5.0f64..20.0),
    ) {
        let metrics = DailyMetrics {
            date: start_day(),
            water: Target::new(goals.0, actuals.0),
            exercise: Target::new(goals.1, actuals.1),
            sleep: Target::new(goals.2, actuals.2),
        };
        let score = wellness::score(&metrics);
        prop_assert!((0.0..=100.0).contains(&score));
    }
}
