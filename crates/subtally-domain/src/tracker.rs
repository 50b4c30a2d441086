//! The persisted unit: a named collection of subscriptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::subscription::Subscription;

const CURRENT_SCHEMA_VERSION: u8 = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tracker {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Tracker::schema_version_default")]
    pub schema_version: u8,
}

impl Tracker {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            subscriptions: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_subscription(&mut self, subscription: Subscription) -> Uuid {
        let id = subscription.id;
        self.subscriptions.push(subscription);
        self.touch();
        id
    }

    pub fn remove_subscription(&mut self, id: Uuid) -> Option<Subscription> {
        let index = self.subscriptions.iter().position(|sub| sub.id == id)?;
        let removed = self.subscriptions.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn subscription(&self, id: Uuid) -> Option<&Subscription> {
        self.subscriptions.iter().find(|sub| sub.id == id)
    }

    pub fn subscription_mut(&mut self, id: Uuid) -> Option<&mut Subscription> {
        self.subscriptions.iter_mut().find(|sub| sub.id == id)
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        1
    }

    pub fn current_schema_version() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::{common::Cycle, subscription::Subscription};

    use super::Tracker;

    #[test]
    fn add_lookup_and_remove_subscriptions() {
        let mut tracker = Tracker::new("Personal");
        let anchor = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let id = tracker.add_subscription(Subscription::new("News", anchor, Cycle::Monthly, 5.0));

        assert_eq!(tracker.subscription_count(), 1);
        assert_eq!(tracker.subscription(id).map(|s| s.name.as_str()), Some("News"));

        tracker.subscription_mut(id).unwrap().price = 6.0;
        assert!((tracker.subscription(id).unwrap().price - 6.0).abs() < 1e-9);

        let removed = tracker.remove_subscription(id).expect("removed");
        assert_eq!(removed.name, "News");
        assert!(tracker.subscription(id).is_none());
        assert!(tracker.remove_subscription(id).is_none());
    }
}
