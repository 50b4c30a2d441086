//! Converts cycle-scoped prices into comparable monthly and yearly figures.

use chrono::NaiveDate;

use subtally_domain::{Cycle, Subscription};

/// Monthly-equivalent price using the fixed per-cycle conversion factors.
/// Pure and unrounded; callers round for display only.
pub fn monthly_equivalent(price: f64, cycle: Cycle) -> f64 {
    price * cycle.monthly_factor()
}

pub fn yearly_equivalent(price: f64, cycle: Cycle) -> f64 {
    monthly_equivalent(price, cycle) * 12.0
}

/// The price a subscription actually costs as of `today`: the regular
/// price once a trial window has passed, split by the shared-cost divisor
/// when the item is shared. The divisor is validated (>= 1) at the input
/// boundary.
pub fn effective_price(sub: &Subscription, today: NaiveDate) -> f64 {
    let base = if sub.trial_ended(today) {
        sub.regular_price.unwrap_or(sub.price)
    } else {
        sub.price
    };
    match sub.shared_count {
        Some(people) if people >= 2 => base / f64::from(people),
        _ => base,
    }
}

/// What the subscription adds to recurring monthly totals as of `today`.
/// One-time trial charges contribute nothing until the trial ends and the
/// regular recurring price takes over.
pub fn monthly_contribution(sub: &Subscription, today: NaiveDate) -> f64 {
    if sub.is_trial && sub.trial_one_time && !sub.trial_ended(today) {
        return 0.0;
    }
    monthly_equivalent(effective_price(sub, today), sub.cycle)
}

/// Rounds to two decimals, the precision used for stored prices.
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
