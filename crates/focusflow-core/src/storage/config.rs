//! TOML-based planner configuration.
//!
//! Stores the planner rules:
//! - Study budget, day start, minimum block and break policy
//! - Work day cap, balancing floor and focus block placement
//! - Default health goals
//! - Optional external command for generated feedback
//!
//! Configuration is stored at `~/.config/focusflow/config.toml`.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::feedback::CommandGenerator;
use crate::schedule::{time_format, BreakPolicy, TimeBudget};
use crate::scheduler::WorkloadBalancer;

/// Study planning rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyConfig {
    #[serde(default = "default_study_max")]
    pub max_minutes_per_day: i64,
    #[serde(default = "default_day_start")]
    pub day_start: String,
    #[serde(default = "default_min_block")]
    pub min_block_minutes: i64,
    #[serde(default = "default_break_threshold")]
    pub break_threshold_minutes: i64,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: i64,
}

/// Work planning rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkConfig {
    #[serde(default = "default_work_max")]
    pub max_minutes_per_day: i64,
    #[serde(default = "default_min_item")]
    pub min_item_minutes: i64,
    #[serde(default = "default_focus_block")]
    pub focus_block_minutes: i64,
    #[serde(default = "default_focus_start")]
    pub focus_start: String,
    #[serde(default = "default_meeting_minutes")]
    pub default_meeting_minutes: i64,
}

/// Default daily health goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthConfig {
    #[serde(default = "default_water_goal")]
    pub water_goal_glasses: f64,
    #[serde(default = "default_exercise_goal")]
    pub exercise_goal_minutes: f64,
    #[serde(default = "default_sleep_goal")]
    pub sleep_goal_hours: f64,
}

/// Generated feedback. An empty command keeps the rule-based text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Program (plus arguments) that reads a prompt on stdin and prints a reply.
    #[serde(default)]
    pub command: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/focusflow/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub study: StudyConfig,
    #[serde(default)]
    pub work: WorkConfig,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
}

fn default_study_max() -> i64 {
    360
}
fn default_day_start() -> String {
    "09:00".into()
}
fn default_min_block() -> i64 {
    30
}
fn default_break_threshold() -> i64 {
    60
}
fn default_break_minutes() -> i64 {
    20
}
fn default_work_max() -> i64 {
    420
}
fn default_min_item() -> i64 {
    20
}
fn default_focus_block() -> i64 {
    50
}
fn default_focus_start() -> String {
    "14:00".into()
}
fn default_meeting_minutes() -> i64 {
    60
}
fn default_water_goal() -> f64 {
    8.0
}
fn default_exercise_goal() -> f64 {
    30.0
}
fn default_sleep_goal() -> f64 {
    8.0
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            max_minutes_per_day: default_study_max(),
            day_start: default_day_start(),
            min_block_minutes: default_min_block(),
            break_threshold_minutes: default_break_threshold(),
            break_minutes: default_break_minutes(),
        }
    }
}

impl Default for WorkConfig {
    fn default() -> Self {
        Self {
            max_minutes_per_day: default_work_max(),
            min_item_minutes: default_min_item(),
            focus_block_minutes: default_focus_block(),
            focus_start: default_focus_start(),
            default_meeting_minutes: default_meeting_minutes(),
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            water_goal_glasses: default_water_goal(),
            exercise_goal_minutes: default_exercise_goal(),
            sleep_goal_hours: default_sleep_goal(),
        }
    }
}

impl StudyConfig {
    pub fn day_start_time(&self) -> Result<NaiveTime> {
        parse_time("study.day_start", &self.day_start)
    }

    /// Budget for `daily_minutes`, capped at the configured maximum.
    pub fn budget(&self, daily_minutes: i64) -> TimeBudget {
        TimeBudget::new(daily_minutes.min(self.max_minutes_per_day))
            .with_min_block(self.min_block_minutes)
            .with_breaks(BreakPolicy {
                threshold_minutes: self.break_threshold_minutes,
                duration_minutes: self.break_minutes,
            })
    }
}

impl WorkConfig {
    pub fn focus_start_time(&self) -> Result<NaiveTime> {
        parse_time("work.focus_start", &self.focus_start)
    }

    pub fn balancer(&self) -> WorkloadBalancer {
        WorkloadBalancer::new(self.max_minutes_per_day, self.min_item_minutes)
    }
}

impl FeedbackConfig {
    pub fn generator(&self) -> Option<CommandGenerator> {
        CommandGenerator::parse(&self.command)
    }
}

fn parse_time(key: &str, raw: &str) -> Result<NaiveTime> {
    time_format::parse(raw).map_err(|e| {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("'{raw}' is not HH:MM ({e})"),
        }
        .into()
    })
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(root: &mut serde_json::Value, key: &str, value: &str) -> Result<()> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown().into());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => value
                        .parse::<bool>()
                        .map(serde_json::Value::Bool)
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    serde_json::Value::Number(n) if n.is_f64() => value
                        .parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Number(_) => value
                        .parse::<i64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?,
                    serde_json::Value::Object(_) => return Err(unknown().into()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown().into())
    }

    /// Default location inside the data directory.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "using default configuration");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. The caller saves.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value does not parse as
    /// the key's type, or a time-of-day value is not `HH:MM`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.study.day_start_time()?;
        updated.work.focus_start_time()?;
        if updated.study.min_block_minutes < 1 {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "study.min_block_minutes must be at least 1".into(),
            }
            .into());
        }
        *self = updated;
        Ok(())
    }
}
