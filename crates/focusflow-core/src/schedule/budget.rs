use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// When rest blocks are inserted and how long they last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakPolicy {
    /// A work block at least this long is followed by a break.
    pub threshold_minutes: i64,
    /// Length of each break.
    pub duration_minutes: i64,
}

impl Default for BreakPolicy {
    fn default() -> Self {
        Self {
            threshold_minutes: 60,
            duration_minutes: 20,
        }
    }
}

impl BreakPolicy {
    pub fn applies_after(&self, work_minutes: i64) -> bool {
        self.duration_minutes > 0 && work_minutes >= self.threshold_minutes
    }
}

/// Minutes available per day and how they may be carved up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBudget {
    pub daily_minutes: i64,
    /// Floor for the even split of a day's budget across its items.
    pub min_block_minutes: i64,
    pub breaks: BreakPolicy,
}

impl TimeBudget {
    /// Budget with the default 30-minute floor and 60/20 break policy.
    pub fn new(daily_minutes: i64) -> Self {
        Self {
            daily_minutes,
            min_block_minutes: 30,
            breaks: BreakPolicy::default(),
        }
    }

    pub fn with_min_block(mut self, minutes: i64) -> Self {
        self.min_block_minutes = minutes;
        self
    }

    pub fn with_breaks(mut self, breaks: BreakPolicy) -> Self {
        self.breaks = breaks;
        self
    }

    /// Fails fast on a budget or minimum block of zero or fewer minutes.
    pub fn validate(&self) -> Result<()> {
        if self.daily_minutes <= 0 {
            return Err(ValidationError::NonPositiveBudget {
                minutes: self.daily_minutes,
            }
            .into());
        }
        if self.min_block_minutes < 1 {
            return Err(ValidationError::NonPositiveBlock {
                minutes: self.min_block_minutes,
            }
            .into());
        }
        Ok(())
    }

    /// Even share of the day for `batch_len` items, never below the floor.
    pub fn per_item_minutes(&self, batch_len: usize) -> i64 {
        let share = self.daily_minutes / batch_len.max(1) as i64;
        share.max(self.min_block_minutes)
    }
}
