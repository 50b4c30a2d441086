use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stores user-configurable preferences and metadata. Every field carries a
/// serde default so config files written by older versions keep loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Days ahead a renewal counts as "upcoming".
    #[serde(default = "Config::default_upcoming_horizon_days")]
    pub upcoming_horizon_days: i64,
    /// Stricter window for the attention banner.
    #[serde(default = "Config::default_urgent_window_days")]
    pub urgent_window_days: i64,
    /// When set, totals exclude items flagged essential.
    #[serde(default)]
    pub focus_mode: bool,
    /// Year horizons for the cumulative-spend projection.
    #[serde(default = "Config::default_projection_years")]
    pub projection_years: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_opened_tracker: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for tracker files.
    pub default_tracker_root: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for backups.
    pub default_backup_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            upcoming_horizon_days: Self::default_upcoming_horizon_days(),
            urgent_window_days: Self::default_urgent_window_days(),
            focus_mode: false,
            projection_years: Self::default_projection_years(),
            last_opened_tracker: None,
            default_tracker_root: None,
            default_backup_root: None,
        }
    }
}

impl Config {
    pub fn default_upcoming_horizon_days() -> i64 {
        7
    }

    pub fn default_urgent_window_days() -> i64 {
        2
    }

    pub fn default_projection_years() -> Vec<u32> {
        vec![5, 10]
    }

    pub fn resolve_default_tracker_root(&self) -> PathBuf {
        if let Some(path) = &self.default_tracker_root {
            return path.clone();
        }
        data_base().join("Trackers")
    }

    pub fn resolve_default_backup_root(&self) -> PathBuf {
        if let Some(path) = &self.default_backup_root {
            return path.clone();
        }
        data_base().join("TrackerBackups")
    }
}

fn data_base() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Subtally")
}
