//! Derived views over a subscription collection: totals, category
//! breakdowns, the upcoming/urgent renewal set, and sort orders.

use std::cmp::Ordering;

use chrono::NaiveDate;
use uuid::Uuid;

use subtally_domain::Subscription;

use crate::{
    pricing::monthly_contribution,
    resolver::{days_until, next_occurrence_on_or_after},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendView {
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    PriceDesc,
    PriceAsc,
    NextDate,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Horizons for the renewal overview. `urgent_days` is the stricter
/// sub-threshold used for attention banners.
pub struct RenewalWindows {
    pub horizon_days: i64,
    pub urgent_days: i64,
}

impl Default for RenewalWindows {
    fn default() -> Self {
        Self {
            horizon_days: 7,
            urgent_days: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    /// Raw anchor is in the past and no payment covers it. Persists until
    /// the item is marked paid.
    PastDue,
    /// Due within the urgent sub-threshold.
    Urgent,
    /// Due within the horizon.
    Upcoming,
    /// A payment was recorded today; kept in the set for UI feedback.
    PaidToday,
}

#[derive(Debug, Clone)]
pub struct RenewalEntry {
    pub subscription_id: Uuid,
    pub name: String,
    pub due_date: NaiveDate,
    pub days_remaining: i64,
    pub status: DueStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub label: String,
    pub total: f64,
}

/// Label applied to items without an explicit category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

pub struct SummaryService;

impl SummaryService {
    /// Total recurring spend in the requested view. Focus mode drops items
    /// flagged essential so the figure reflects discretionary spend only.
    pub fn total_spend(
        subscriptions: &[Subscription],
        today: NaiveDate,
        view: SpendView,
        focus_mode: bool,
    ) -> f64 {
        let monthly: f64 = subscriptions
            .iter()
            .filter(|sub| !(focus_mode && sub.essential))
            .map(|sub| monthly_contribution(sub, today))
            .sum();
        match view {
            SpendView::Monthly => monthly,
            SpendView::Yearly => monthly * 12.0,
        }
    }

    /// Groups per-item monthly contributions by category label, sorted
    /// descending by total. The sort is stable so equal totals keep
    /// insertion order.
    pub fn category_breakdown(
        subscriptions: &[Subscription],
        today: NaiveDate,
    ) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for sub in subscriptions {
            let label = sub
                .category
                .as_deref()
                .filter(|label| !label.trim().is_empty())
                .unwrap_or(UNCATEGORIZED_LABEL);
            let contribution = monthly_contribution(sub, today);
            match totals.iter_mut().find(|entry| entry.label == label) {
                Some(entry) => entry.total += contribution,
                None => totals.push(CategoryTotal {
                    label: label.to_string(),
                    total: contribution,
                }),
            }
        }
        totals.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
        totals
    }

    /// The upcoming/urgent set: past-due items, items due within the
    /// horizon, and items paid today (retained for feedback). Entries are
    /// ordered by due date, ties by name.
    pub fn renewal_overview(
        subscriptions: &[Subscription],
        today: NaiveDate,
        windows: RenewalWindows,
    ) -> Vec<RenewalEntry> {
        let mut entries = Vec::new();
        for sub in subscriptions {
            if sub.paid_on(today) {
                // Anchor already advanced past today by the payment.
                let due = resolve_or_anchor(sub, today);
                entries.push(RenewalEntry {
                    subscription_id: sub.id,
                    name: sub.name.clone(),
                    due_date: due,
                    days_remaining: days_until(due, today),
                    status: DueStatus::PaidToday,
                });
                continue;
            }
            if sub.anchor_date < today {
                entries.push(RenewalEntry {
                    subscription_id: sub.id,
                    name: sub.name.clone(),
                    due_date: sub.anchor_date,
                    days_remaining: days_until(sub.anchor_date, today),
                    status: DueStatus::PastDue,
                });
                continue;
            }
            let due = resolve_or_anchor(sub, today);
            let remaining = days_until(due, today);
            if remaining > windows.horizon_days {
                continue;
            }
            let status = if remaining <= windows.urgent_days {
                DueStatus::Urgent
            } else {
                DueStatus::Upcoming
            };
            entries.push(RenewalEntry {
                subscription_id: sub.id,
                name: sub.name.clone(),
                due_date: due,
                days_remaining: remaining,
                status,
            });
        }
        entries.sort_by(|a, b| {
            a.due_date
                .cmp(&b.due_date)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        entries
    }

    /// Returns references ordered by the requested sort key.
    pub fn sorted<'a>(
        subscriptions: &'a [Subscription],
        today: NaiveDate,
        order: SortOrder,
    ) -> Vec<&'a Subscription> {
        let mut refs: Vec<&Subscription> = subscriptions.iter().collect();
        match order {
            SortOrder::PriceDesc => refs.sort_by(|a, b| {
                monthly_contribution(b, today)
                    .partial_cmp(&monthly_contribution(a, today))
                    .unwrap_or(Ordering::Equal)
            }),
            SortOrder::PriceAsc => refs.sort_by(|a, b| {
                monthly_contribution(a, today)
                    .partial_cmp(&monthly_contribution(b, today))
                    .unwrap_or(Ordering::Equal)
            }),
            SortOrder::NextDate => refs.sort_by(|a, b| {
                resolve_or_anchor(a, today)
                    .cmp(&resolve_or_anchor(b, today))
                    .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }),
            SortOrder::Name => {
                refs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }
        }
        refs
    }

    /// Cumulative long-horizon projection of recurring spend: the monthly
    /// total extrapolated over `years`. A plain multiplication, not a
    /// calendar walk.
    pub fn ghost_cost(subscriptions: &[Subscription], today: NaiveDate, years: u32) -> f64 {
        Self::total_spend(subscriptions, today, SpendView::Monthly, false)
            * 12.0
            * f64::from(years)
    }
}

fn resolve_or_anchor(sub: &Subscription, today: NaiveDate) -> NaiveDate {
    match next_occurrence_on_or_after(sub.anchor_date, sub.cycle, today) {
        Ok(date) => date,
        Err(err) => {
            tracing::warn!(subscription = %sub.name, %err, "falling back to raw anchor");
            sub.anchor_date
        }
    }
}
