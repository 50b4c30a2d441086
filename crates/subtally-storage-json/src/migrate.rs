//! Load-time schema migration. Only category labels have changed shape so
//! far: v1 files carried free-form lowercase labels that the UI now
//! expects in canonical form.

use subtally_domain::Tracker;

/// Legacy label -> canonical label. Extend when a rename ships.
const CATEGORY_ALIASES: [(&str, &str); 6] = [
    ("streaming", "Entertainment"),
    ("entertainment", "Entertainment"),
    ("music", "Entertainment"),
    ("software", "Software & Tools"),
    ("tools", "Software & Tools"),
    ("utilities", "Utilities"),
];

/// Brings a freshly loaded tracker up to the current schema. Returns true
/// when anything changed so the caller can persist the upgrade.
pub fn migrate_tracker(tracker: &mut Tracker) -> bool {
    if tracker.schema_version >= Tracker::current_schema_version() {
        return false;
    }
    let mut changed = false;
    for sub in &mut tracker.subscriptions {
        if let Some(label) = sub.category.take() {
            let migrated = canonical_category(&label);
            if migrated != label {
                changed = true;
            }
            sub.category = Some(migrated);
        }
    }
    tracker.schema_version = Tracker::current_schema_version();
    tracing::info!(
        tracker = %tracker.name,
        schema_version = tracker.schema_version,
        relabeled = changed,
        "migrated tracker schema"
    );
    true
}

fn canonical_category(label: &str) -> String {
    let trimmed = label.trim();
    let lowered = trimmed.to_ascii_lowercase();
    for (alias, canonical) in CATEGORY_ALIASES {
        if lowered == alias {
            return canonical.to_string();
        }
    }
    trimmed.to_string()
}
