//! Domain model for a single recurring subscription entry.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// A single recorded payment against a subscription.
pub struct PaymentRecord {
    pub date: NaiveDate,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Most recent or original billing date; advanced one cycle step each
    /// time a payment is recorded. This is the only mutated scheduling state.
    pub anchor_date: NaiveDate,
    pub cycle: Cycle,
    /// Current price. For trials this is the trial-period price.
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regular_price: Option<f64>,
    #[serde(default)]
    pub is_trial: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_end_date: Option<NaiveDate>,
    /// A one-off introductory charge rather than a recurring one; excluded
    /// from recurring totals while the trial is still running.
    #[serde(default)]
    pub trial_one_time: bool,
    /// Number of people the cost is split between, when shared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_count: Option<u32>,
    /// Essential items (rent, loans) can be excluded from discretionary
    /// totals in focus mode.
    #[serde(default)]
    pub essential: bool,
    /// Fluctuating bills re-estimate their price from recent payments.
    #[serde(default)]
    pub variable_price: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_paid_date: Option<NaiveDate>,
    #[serde(default)]
    pub has_ever_been_paid: bool,
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

impl Subscription {
    pub fn new(name: impl Into<String>, anchor_date: NaiveDate, cycle: Cycle, price: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: None,
            notes: None,
            anchor_date,
            cycle,
            price,
            regular_price: None,
            is_trial: false,
            trial_end_date: None,
            trial_one_time: false,
            shared_count: None,
            essential: false,
            variable_price: false,
            last_paid_date: None,
            has_ever_been_paid: false,
            payments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_trial(mut self, regular_price: f64, trial_end_date: NaiveDate) -> Self {
        self.is_trial = true;
        self.regular_price = Some(regular_price);
        self.trial_end_date = Some(trial_end_date);
        self
    }

    pub fn with_shared_count(mut self, people: u32) -> Self {
        self.shared_count = Some(people);
        self
    }

    /// Whether the trial window has ended as of `today`. Items without a
    /// trial end date never report an ended trial.
    pub fn trial_ended(&self, today: NaiveDate) -> bool {
        self.is_trial
            && self
                .trial_end_date
                .map(|end| end < today)
                .unwrap_or(false)
    }

    /// Whether a payment has been recorded on `today` itself.
    pub fn paid_on(&self, today: NaiveDate) -> bool {
        self.last_paid_date == Some(today)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Subscription {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Subscription {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Subscription {
    fn display_label(&self) -> String {
        format!("{} ({} {:.2})", self.name, self.cycle, self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn trial_ends_only_after_end_date_passes() {
        let sub = Subscription::new("Stream+", date(2026, 1, 1), Cycle::Monthly, 1.99)
            .with_trial(9.99, date(2026, 2, 1));

        assert!(!sub.trial_ended(date(2026, 2, 1)));
        assert!(sub.trial_ended(date(2026, 2, 2)));
    }

    #[test]
    fn display_label_carries_cycle_and_price() {
        let sub = Subscription::new("Gym", date(2026, 1, 5), Cycle::Biweekly, 15.5);
        assert_eq!(sub.id(), sub.id);
        assert_eq!(sub.name(), "Gym");
        assert_eq!(sub.display_label(), "Gym (Biweekly 15.50)");
    }

    #[test]
    fn legacy_json_without_new_fields_still_loads() {
        let json = r#"{
            "id": "6b8f5f38-3f3b-4a87-9d53-0a8f4f8f2b11",
            "name": "News",
            "anchor_date": "2026-01-10",
            "cycle": "monthly",
            "price": 5.0,
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-01T00:00:00Z"
        }"#;
        let sub: Subscription = serde_json::from_str(json).expect("deserialize legacy entry");

        assert_eq!(sub.cycle, Cycle::Monthly);
        assert!(!sub.is_trial);
        assert!(sub.payments.is_empty());
        assert!(!sub.has_ever_been_paid);
    }
}
