//! Daily wellness score from tracked water, exercise and sleep.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A goal and how much of it was achieved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub goal: f64,
    pub actual: f64,
}

impl Target {
    pub fn new(goal: f64, actual: f64) -> Self {
        Self { goal, actual }
    }

    /// Fraction of the goal reached, in `[0, 1]`. `None` when no goal is set.
    pub fn ratio(&self) -> Option<f64> {
        if self.goal <= 0.0 {
            return None;
        }
        Some((self.actual / self.goal).clamp(0.0, 1.0))
    }
}

/// One day of tracked health metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    pub date: NaiveDate,
    /// Glasses of water.
    pub water: Target,
    /// Minutes of exercise.
    pub exercise: Target,
    /// Hours of sleep.
    pub sleep: Target,
}

impl DailyMetrics {
    pub fn score(&self) -> f64 {
        score(self)
    }

    /// Water intake as a percentage of the goal (uncapped), 0 without a goal.
    pub fn hydration_percent(&self) -> f64 {
        if self.water.goal <= 0.0 {
            return 0.0;
        }
        self.water.actual / self.water.goal * 100.0
    }
}

/// Score a day from 0 to 100.
///
/// Each metric contributes its goal ratio capped at 1, the three are
/// averaged, scaled to 100 and rounded to one decimal. A missing goal
/// (any goal <= 0) scores exactly 0.
pub fn score(metrics: &DailyMetrics) -> f64 {
    let ratios = [metrics.water.ratio(), metrics.exercise.ratio(), metrics.sleep.ratio()];
    let mut sum = 0.0;
    for ratio in ratios {
        match ratio {
            Some(r) => sum += r,
            None => return 0.0,
        }
    }
    round1(sum / 3.0 * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
