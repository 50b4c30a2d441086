//! subtally-export
//!
//! Serializes trackers for exchange: CSV and JSON export/import plus an
//! ICS calendar feed of renewal events. Computed columns (effective
//! monthly contribution, resolved next occurrence) come from
//! subtally-core; this crate adds no date or price logic of its own.

pub mod csv;
pub mod error;
pub mod ics;

pub use self::csv::{export_csv, import_csv};
pub use error::ExportError;
pub use ics::calendar_feed;

use subtally_domain::Tracker;

/// Serializes a whole tracker as pretty-printed JSON.
pub fn export_json(tracker: &Tracker) -> Result<String, ExportError> {
    serde_json::to_string_pretty(tracker).map_err(|err| ExportError::Serde(err.to_string()))
}

/// Parses a tracker from its JSON export.
pub fn import_json(data: &str) -> Result<Tracker, ExportError> {
    serde_json::from_str(data).map_err(|err| ExportError::Serde(err.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use subtally_domain::{Cycle, Subscription, Tracker};

    use super::{export_json, import_json};

    #[test]
    fn json_export_round_trips() {
        let mut tracker = Tracker::new("Personal");
        tracker.add_subscription(Subscription::new(
            "Video",
            NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            Cycle::Monthly,
            12.99,
        ));

        let json = export_json(&tracker).expect("export");
        let imported = import_json(&json).expect("import");
        assert_eq!(imported.name, "Personal");
        assert_eq!(imported.subscription_count(), 1);
    }
}
