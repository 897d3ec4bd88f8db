//! JSON-persisted application state.
//!
//! Holds everything the planner produced or the user tracked: study plan,
//! work tasks, health days, analytics and the meetings/deadlines waiting to
//! be planned. Loading never fails outright: a missing file, a malformed
//! file, or a single malformed section falls back to empty defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::analytics::Analytics;
use crate::error::{Result, ValidationError};
use crate::planner::{Deadline, Meeting};
use crate::schedule::ScheduleItem;
use crate::wellness::DailyMetrics;

const STATE_FILE: &str = "schedule_data.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub study_plan: Vec<ScheduleItem>,
    #[serde(default)]
    pub work_tasks: Vec<ScheduleItem>,
    #[serde(default)]
    pub health_days: BTreeMap<NaiveDate, DailyMetrics>,
    #[serde(default)]
    pub analytics: Analytics,
    #[serde(default)]
    pub pending_meetings: Vec<Meeting>,
    #[serde(default)]
    pub pending_deadlines: Vec<Deadline>,
}

impl AppState {
    /// Default location inside the data directory.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join(STATE_FILE))
    }

    /// Strict load: IO and JSON syntax errors are returned.
    ///
    /// A missing file is an empty state. Sections that are present but do
    /// not match their schema are replaced by defaults.
    pub fn try_load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        let value: serde_json::Value = serde_json::from_str(&content)?;
        Ok(Self::from_value_lenient(value))
    }

    /// Load, substituting an empty state for anything unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        Self::try_load(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "state unreadable, starting empty");
            Self::default()
        })
    }

    /// Persist as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    fn from_value_lenient(value: serde_json::Value) -> Self {
        let serde_json::Value::Object(mut map) = value else {
            tracing::warn!("state root is not an object, starting empty");
            return Self::default();
        };
        Self {
            study_plan: section(&mut map, "study_plan"),
            work_tasks: section(&mut map, "work_tasks"),
            health_days: section(&mut map, "health_days"),
            analytics: section(&mut map, "analytics"),
            pending_meetings: section(&mut map, "pending_meetings"),
            pending_deadlines: section(&mut map, "pending_deadlines"),
        }
    }
}

fn section<T: DeserializeOwned + Default>(
    map: &mut serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> T {
    let Some(raw) = map.remove(key) else {
        return T::default();
    };
    serde_json::from_value(raw).unwrap_or_else(|e| {
        tracing::warn!(section = key, error = %e, "malformed section replaced with default");
        T::default()
    })
}

/// Flip the `completed` flag of `items[index]`, returning the new value.
pub fn toggle_completed(items: &mut [ScheduleItem], collection: &str, index: usize) -> Result<bool> {
    let len = items.len();
    let item = items.get_mut(index).ok_or_else(|| ValidationError::OutOfBounds {
        collection: collection.to_string(),
        index,
        len,
    })?;
    item.completed = !item.completed;
    Ok(item.completed)
}
