use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use subtally_domain::Tracker;

use crate::CoreError;

/// Describes a persisted backup artifact for a tracker.
#[derive(Debug, Clone)]
pub struct TrackerBackupInfo {
    pub tracker: String,
    pub id: String,
    pub created_at: String,
    pub path: PathBuf,
}

/// Abstraction over persistence backends capable of storing trackers and
/// backups. The date/price engine never touches this; consumers load
/// before computing and save after mutating.
pub trait TrackerStorage: Send + Sync {
    fn save_tracker(&self, name: &str, tracker: &Tracker) -> Result<(), CoreError>;
    fn load_tracker(&self, name: &str) -> Result<Tracker, CoreError>;
    fn list_trackers(&self) -> Result<Vec<String>, CoreError>;
    fn delete_tracker(&self, name: &str) -> Result<(), CoreError>;
    fn save_tracker_to_path(&self, tracker: &Tracker, path: &Path) -> Result<(), CoreError>;
    fn load_tracker_from_path(&self, path: &Path) -> Result<Tracker, CoreError>;
    fn backup_tracker(
        &self,
        name: &str,
        tracker: &Tracker,
        note: Option<&str>,
    ) -> Result<TrackerBackupInfo, CoreError>;
    fn list_backups(&self, name: &str) -> Result<Vec<TrackerBackupInfo>, CoreError>;
    fn restore_backup(&self, backup: &TrackerBackupInfo) -> Result<Tracker, CoreError>;
}

/// Detects anomalies within a tracker snapshot that the input boundary
/// should have rejected: useful after loading files edited by hand.
pub fn tracker_warnings(tracker: &Tracker) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut seen_ids = HashSet::new();

    for sub in &tracker.subscriptions {
        if !seen_ids.insert(sub.id) {
            warnings.push(format!("duplicate subscription id {}", sub.id));
        }
        if sub.price < 0.0 {
            warnings.push(format!("subscription `{}` has a negative price", sub.name));
        }
        if sub.is_trial {
            if sub.regular_price.is_none() {
                warnings.push(format!(
                    "trial subscription `{}` has no regular price",
                    sub.name
                ));
            }
            if sub.trial_end_date.is_none() {
                warnings.push(format!(
                    "trial subscription `{}` has no trial end date",
                    sub.name
                ));
            }
        }
        if sub.shared_count == Some(0) {
            warnings.push(format!(
                "subscription `{}` has a zero shared-cost divisor",
                sub.name
            ));
        }
    }
    warnings
}
