// Settings module
// Per-instance widget configuration, loaded from TOML

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Weekday;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::date::MINUTES_PER_DAY;

/// How the packing engine sizes columns for a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnPolicy {
    /// Each connected overlap cluster gets its own column count.
    #[default]
    PerCluster,
    /// Every event on the day shares the number of columns opened that day.
    DayWide,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Storage key cannot be empty")]
    EmptyStorageKey,
    #[error("Slot length of {0} minutes does not divide a day")]
    InvalidSlotMinutes(u32),
    #[error("Minimum event length must be at least one minute")]
    ZeroMinimumDuration,
    #[error("A month cell must show at least one event")]
    ZeroEventsPerCell,
}

/// Configuration for one calendar widget instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Name under which the event collection is persisted.
    pub storage_key: String,
    pub week_start: Weekday,
    /// Granularity of the week view's drag-to-create slots.
    pub slot_minutes: u32,
    /// Rendered duration floor so zero-length events stay clickable.
    pub min_event_minutes: u32,
    pub max_events_per_cell: usize,
    pub persist_debounce_ms: u64,
    pub default_color: String,
    pub default_category: String,
    pub column_policy: ColumnPolicy,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            storage_key: "calendar_events_v1".to_string(),
            week_start: Weekday::Sun,
            slot_minutes: 30,
            min_event_minutes: 15,
            max_events_per_cell: 3,
            persist_debounce_ms: 250,
            default_color: "#3b82f6".to_string(),
            default_category: "General".to_string(),
            column_policy: ColumnPolicy::default(),
        }
    }
}

impl CalendarConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        if self.slot_minutes == 0 || MINUTES_PER_DAY % self.slot_minutes != 0 {
            return Err(ConfigError::InvalidSlotMinutes(self.slot_minutes));
        }
        if self.min_event_minutes == 0 {
            return Err(ConfigError::ZeroMinimumDuration);
        }
        if self.max_events_per_cell == 0 {
            return Err(ConfigError::ZeroEventsPerCell);
        }
        Ok(())
    }

    /// Number of drag slots in one day.
    pub fn slots_per_day(&self) -> u32 {
        MINUTES_PER_DAY / self.slot_minutes.max(1)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse calendar config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize calendar config")
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No config at {}; using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {}", parent.display()))?;
        }
        fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// File that holds this instance's events inside `data_dir`.
    pub fn events_file(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(format!("{}.json", self.storage_key))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "CalendarWidget", "calendar-widget")
}

/// Default config file location, if the platform exposes one.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Default directory for persisted event collections.
pub fn default_data_dir() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_dir().to_path_buf(),
        None => {
            log::warn!("Unable to resolve project directory; using current dir for events");
            PathBuf::from(".")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_valid() {
        let config = CalendarConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.week_start, Weekday::Sun);
        assert_eq!(config.slots_per_day(), 48);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CalendarConfig::from_toml_str(
            r#"
            storage_key = "team_calendar"
            week_start = "Mon"
            column_policy = "day_wide"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage_key, "team_calendar");
        assert_eq!(config.week_start, Weekday::Mon);
        assert_eq!(config.column_policy, ColumnPolicy::DayWide);
        assert_eq!(config.min_event_minutes, 15);
        assert_eq!(config.default_color, "#3b82f6");
    }

    #[test]
    fn test_rejects_slot_that_does_not_divide_day() {
        let config = CalendarConfig {
            slot_minutes: 7,
            ..CalendarConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidSlotMinutes(7)));
        assert!(CalendarConfig::from_toml_str("slot_minutes = 0").is_err());
    }

    #[test]
    fn test_rejects_empty_storage_key() {
        let config = CalendarConfig {
            storage_key: "  ".to_string(),
            ..CalendarConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyStorageKey));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = CalendarConfig {
            week_start: Weekday::Mon,
            max_events_per_cell: 5,
            ..CalendarConfig::default()
        };

        config.save(&path).unwrap();
        assert_eq!(CalendarConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalendarConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CalendarConfig::default());
    }

    #[test]
    fn test_events_file_uses_storage_key() {
        let config = CalendarConfig::default();
        let path = config.events_file(Path::new("/data"));
        assert_eq!(path, PathBuf::from("/data/calendar_events_v1.json"));
    }
}
