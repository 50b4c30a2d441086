use std::{fs, sync::Arc};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tempfile::tempdir;

use subtally_core::{storage::TrackerStorage, Clock};
use subtally_domain::{Cycle, Subscription, Tracker};
use subtally_storage_json::JsonTrackerStorage;

fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
}

fn sample_tracker() -> Tracker {
    let mut tracker = Tracker::new("Personal");
    tracker.add_subscription(
        Subscription::new("Video", anchor(), Cycle::Monthly, 12.99).with_category("Entertainment"),
    );
    tracker
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonTrackerStorage::new(
        dir.path().join("trackers"),
        dir.path().join("backups"),
    )
    .expect("create storage");

    let tracker = sample_tracker();
    storage.save_tracker("personal", &tracker).expect("save");
    let loaded = storage.load_tracker("personal").expect("load");

    assert_eq!(loaded.name, "Personal");
    assert_eq!(loaded.subscription_count(), 1);
    assert_eq!(loaded.subscriptions[0].cycle, Cycle::Monthly);
    assert!(storage.tracker_path("personal").exists());
}

#[test]
fn missing_tracker_reports_not_found() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonTrackerStorage::new(
        dir.path().join("trackers"),
        dir.path().join("backups"),
    )
    .expect("create storage");

    let err = storage.load_tracker("absent").unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn list_reflects_saved_trackers() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonTrackerStorage::new(
        dir.path().join("trackers"),
        dir.path().join("backups"),
    )
    .expect("create storage");

    storage
        .save_tracker("Family Shared", &sample_tracker())
        .expect("save");
    storage
        .save_tracker("personal", &sample_tracker())
        .expect("save");

    let names = storage.list_trackers().expect("list");
    assert_eq!(names, vec!["family_shared".to_string(), "personal".to_string()]);

    storage.delete_tracker("personal").expect("delete");
    assert_eq!(storage.list_trackers().expect("list").len(), 1);
}

#[test]
fn backups_are_created_listed_and_restored() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonTrackerStorage::new(
        dir.path().join("trackers"),
        dir.path().join("backups"),
    )
    .expect("create storage");

    let tracker = sample_tracker();
    storage.save_tracker("personal", &tracker).expect("save");
    let info = storage
        .backup_tracker("personal", &tracker, Some("before import"))
        .expect("backup");

    let backups = storage.list_backups("personal").expect("list backups");
    assert!(backups.iter().any(|entry| entry.id == info.id));
    assert!(info.id.contains("before-import"));

    let restored = storage.restore_backup(&info).expect("restore");
    assert_eq!(restored.name, tracker.name);
}

struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 9, 30, 0).unwrap()
    }
}

#[test]
fn backup_names_carry_the_clock_timestamp() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonTrackerStorage::with_clock(
        dir.path().join("trackers"),
        dir.path().join("backups"),
        5,
        Arc::new(FixedClock),
    )
    .expect("create storage");

    let info = storage
        .backup_tracker("personal", &sample_tracker(), None)
        .expect("backup");
    assert_eq!(info.created_at, "20260110_0930");
    assert_eq!(info.id, "personal_20260110_0930.json");
}

#[test]
fn load_migrates_legacy_category_labels_and_persists() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonTrackerStorage::new(
        dir.path().join("trackers"),
        dir.path().join("backups"),
    )
    .expect("create storage");

    let mut legacy = sample_tracker();
    legacy.schema_version = 1;
    legacy.subscriptions[0].category = Some("streaming".into());
    storage.save_tracker("legacy", &legacy).expect("save");

    let loaded = storage.load_tracker("legacy").expect("load");
    assert_eq!(
        loaded.subscriptions[0].category.as_deref(),
        Some("Entertainment")
    );
    assert_eq!(loaded.schema_version, Tracker::current_schema_version());

    // The migrated form was written back to disk.
    let raw = fs::read_to_string(storage.tracker_path("legacy")).expect("read file");
    assert!(raw.contains("Entertainment"));
}
