//! User settings, persisted as `settings.json` in the OS config directory.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::layout::CategoryOrder;
use crate::model::DisplayWindow;

/// Overrides the task store location.
pub const DATA_FILE_ENV: &str = "WEEK_GANTT_DATA";

const SETTINGS_FILE: &str = "settings.json";
const TASKS_FILE: &str = "tasks.json";

/// Deployment-wide display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GanttSettings {
    /// Days shown in the window.
    pub days_range: u32,
    /// Width of one day column in pixels.
    pub day_width: f32,
    /// Height of one lane in pixels.
    pub row_height: f32,
    /// Declared categories, in display order.
    pub categories: Vec<String>,
    /// Category for tasks that have none.
    pub default_category: String,
    pub data_file: Option<PathBuf>,
}

impl Default for GanttSettings {
    fn default() -> Self {
        let order = CategoryOrder::default();
        Self {
            days_range: 7,
            day_width: 96.0,
            row_height: 34.0,
            categories: order.declared().to_vec(),
            default_category: order.default_category().to_string(),
            data_file: None,
        }
    }
}

impl GanttSettings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|err| {
            warn!("{err}; using default settings");
            Self::default()
        })
    }

    /// Like [`load_or_default`](Self::load_or_default), but writes the
    /// defaults out on first run so there is a file to edit.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::load_or_default(path);
        }
        let settings = Self::default();
        match settings.save(path) {
            Ok(()) => info!("wrote default settings to {}", path.display()),
            Err(err) => warn!("{err}"),
        }
        settings
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }

    pub fn category_order(&self) -> CategoryOrder {
        CategoryOrder::new(self.categories.clone(), self.default_category.clone())
    }

    /// A window of the configured length starting today.
    pub fn initial_window(&self) -> DisplayWindow {
        DisplayWindow::starting_today(self.days_range)
    }

    /// Task store location: environment override, then the configured path,
    /// then the config directory.
    pub fn resolve_data_file(&self, config_dir: &Path) -> PathBuf {
        std::env::var_os(DATA_FILE_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.data_file.clone())
            .unwrap_or_else(|| config_dir.join(TASKS_FILE))
    }
}

/// Per-user config directory, or the working directory when the platform
/// has none.
pub fn config_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "WeekGantt")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn settings_path(config_dir: &Path) -> PathBuf {
    config_dir.join(SETTINGS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_describe_a_week() {
        let settings = GanttSettings::default();
        assert_eq!(settings.days_range, 7);
        assert_eq!(settings.categories.first().map(String::as_str), Some("Frontend"));
        assert_eq!(settings.category_order().resolve(""), "Frontend");
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "days_range": 14 }"#).expect("write settings");

        let settings = GanttSettings::load(&path).expect("load settings");
        assert_eq!(settings.days_range, 14);
        assert_eq!(settings.day_width, 96.0);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "days_range = 14").expect("write settings");

        assert!(matches!(GanttSettings::load(&path), Err(SettingsError::Parse { .. })));
        assert_eq!(GanttSettings::load_or_default(&path), GanttSettings::default());
    }

    #[test]
    fn save_then_load_preserves_categories() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join(SETTINGS_FILE);
        let settings = GanttSettings {
            categories: vec!["Research".into(), "Build".into()],
            default_category: "Build".into(),
            ..GanttSettings::default()
        };

        settings.save(&path).expect("save settings");
        assert_eq!(GanttSettings::load(&path).expect("load settings"), settings);
    }

    #[test]
    fn first_run_writes_default_settings() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("WeekGantt").join(SETTINGS_FILE);

        assert_eq!(GanttSettings::load_or_init(&path), GanttSettings::default());
        assert_eq!(GanttSettings::load(&path).expect("load settings"), GanttSettings::default());
    }

    #[test]
    fn existing_settings_are_not_overwritten() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "not json").expect("write settings");

        assert_eq!(GanttSettings::load_or_init(&path), GanttSettings::default());
        assert_eq!(std::fs::read_to_string(&path).expect("read settings"), "not json");
    }

    #[test]
    fn configured_data_file_beats_config_dir() {
        let settings = GanttSettings {
            data_file: Some(PathBuf::from("/srv/gantt/tasks.json")),
            ..GanttSettings::default()
        };
        if std::env::var_os(DATA_FILE_ENV).is_none() {
            assert_eq!(
                settings.resolve_data_file(Path::new("/home/me/.config")),
                PathBuf::from("/srv/gantt/tasks.json")
            );
            assert_eq!(
                GanttSettings::default().resolve_data_file(Path::new("/cfg")),
                PathBuf::from("/cfg").join(TASKS_FILE)
            );
        }
    }
}
