//! subtally-storage-json
//!
//! Filesystem-backed JSON persistence for trackers: atomic writes,
//! timestamped backups with retention, and load-time schema migration.

use std::{
    cmp::Reverse,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::{DateTime, NaiveDateTime, Utc};

use subtally_core::{
    storage::{TrackerBackupInfo, TrackerStorage},
    Clock, CoreError, SystemClock,
};
use subtally_domain::Tracker;

mod migrate;

pub use migrate::migrate_tracker;

const FILE_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const DEFAULT_RETENTION: usize = 5;

/// JSON persistence rooted at a pair of directories, one for live tracker
/// files and one for their backups.
#[derive(Clone)]
pub struct JsonTrackerStorage {
    trackers_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
    clock: Arc<dyn Clock>,
}

impl JsonTrackerStorage {
    pub fn new(trackers_dir: PathBuf, backups_dir: PathBuf) -> Result<Self, CoreError> {
        Self::with_retention(trackers_dir, backups_dir, DEFAULT_RETENTION)
    }

    pub fn with_retention(
        trackers_dir: PathBuf,
        backups_dir: PathBuf,
        retention: usize,
    ) -> Result<Self, CoreError> {
        Self::with_clock(trackers_dir, backups_dir, retention, Arc::new(SystemClock))
    }

    /// Injects the clock that stamps backup file names, keeping them
    /// deterministic in tests.
    pub fn with_clock(
        trackers_dir: PathBuf,
        backups_dir: PathBuf,
        retention: usize,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CoreError> {
        fs::create_dir_all(&trackers_dir)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            trackers_dir,
            backups_dir,
            retention: retention.max(1),
            clock,
        })
    }

    pub fn tracker_path(&self, name: &str) -> PathBuf {
        self.trackers_dir
            .join(format!("{}.{}", slug(name), FILE_EXTENSION))
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.backups_dir.join(slug(name))
    }

    fn prune_backups(&self, name: &str) -> Result<(), CoreError> {
        let mut entries = self.list_backups(name)?;
        entries.sort_by_key(|info| Reverse(backup_timestamp(&info.id)));
        for entry in entries.into_iter().skip(self.retention) {
            let _ = fs::remove_file(entry.path);
        }
        Ok(())
    }
}

impl TrackerStorage for JsonTrackerStorage {
    fn save_tracker(&self, name: &str, tracker: &Tracker) -> Result<(), CoreError> {
        write_tracker(tracker, &self.tracker_path(name))
    }

    fn load_tracker(&self, name: &str) -> Result<Tracker, CoreError> {
        let path = self.tracker_path(name);
        if !path.exists() {
            return Err(CoreError::TrackerNotFound(name.to_string()));
        }
        let mut tracker = read_tracker(&path)?;
        if migrate_tracker(&mut tracker) {
            write_tracker(&tracker, &path)?;
        }
        Ok(tracker)
    }

    fn list_trackers(&self) -> Result<Vec<String>, CoreError> {
        if !self.trackers_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.trackers_dir)? {
            let path = entry?.path();
            if !path.is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_tracker(&self, name: &str) -> Result<(), CoreError> {
        let path = self.tracker_path(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn save_tracker_to_path(&self, tracker: &Tracker, path: &Path) -> Result<(), CoreError> {
        write_tracker(tracker, path)
    }

    fn load_tracker_from_path(&self, path: &Path) -> Result<Tracker, CoreError> {
        read_tracker(path)
    }

    fn backup_tracker(
        &self,
        name: &str,
        tracker: &Tracker,
        note: Option<&str>,
    ) -> Result<TrackerBackupInfo, CoreError> {
        let dir = self.backup_dir(name);
        fs::create_dir_all(&dir)?;
        let timestamp = self.clock.now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut stem = format!("{}_{}", slug(name), timestamp);
        if let Some(label) = sanitize_note(note) {
            stem.push('_');
            stem.push_str(&label);
        }
        let file_name = format!("{}.{}", stem, FILE_EXTENSION);
        let path = dir.join(&file_name);
        write_tracker(tracker, &path)?;
        self.prune_backups(name)?;
        tracing::debug!(tracker = name, backup = %file_name, "backup written");
        Ok(TrackerBackupInfo {
            tracker: slug(name),
            id: file_name,
            created_at: timestamp,
            path,
        })
    }

    fn list_backups(&self, name: &str) -> Result<Vec<TrackerBackupInfo>, CoreError> {
        let dir = self.backup_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let tracker_slug = slug(name);
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
                entries.push(TrackerBackupInfo {
                    tracker: tracker_slug.clone(),
                    id: file_name.to_string(),
                    created_at: file_name.to_string(),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by_key(|info| Reverse(backup_timestamp(&info.id)));
        Ok(entries)
    }

    fn restore_backup(&self, backup: &TrackerBackupInfo) -> Result<Tracker, CoreError> {
        if !backup.path.exists() {
            return Err(CoreError::Storage(format!(
                "backup `{}` not found",
                backup.id
            )));
        }
        let target = self.tracker_path(&backup.tracker);
        fs::copy(&backup.path, &target)?;
        read_tracker(&target)
    }
}

/// Serializes a tracker to `path`, staging through a temporary file so a
/// crash mid-write cannot truncate the live file.
pub fn write_tracker(tracker: &Tracker, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(tracker)
        .map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = path.with_extension(format!("{}.tmp", FILE_EXTENSION));
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a tracker snapshot from `path` without running migrations.
pub fn read_tracker(path: &Path) -> Result<Tracker, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn slug(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "tracker".into()
    } else {
        sanitized
    }
}

fn sanitize_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !sanitized.is_empty() && !last_dash {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name.strip_suffix(&format!(".{}", FILE_EXTENSION))?;
    let segments: Vec<&str> = stem.split('_').collect();
    // Names are `slug_date8_time4` plus an optional note. The note never
    // contains underscores, so the timestamp is the last adjacent pair of
    // 8- and 4-digit segments.
    let start = segments
        .windows(2)
        .rposition(|pair| is_digits(pair[0], 8) && is_digits(pair[1], 4))?;
    let stamp = format!("{}{}", segments[start], segments[start + 1]);
    NaiveDateTime::parse_from_str(&stamp, "%Y%m%d%H%M")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}
