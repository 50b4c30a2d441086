//! Mark-paid and undo-paid transitions, the only mutation path for a
//! subscription's anchor date.

use chrono::NaiveDate;
use uuid::Uuid;

use subtally_domain::{PaymentRecord, Tracker};

use crate::{
    pricing::{effective_price, round_currency},
    resolver::next_occurrence_on_or_after,
    CoreError,
};

/// How many recent payments feed the variable-price estimate.
const VARIABLE_PRICE_SAMPLE: usize = 3;

pub struct PaymentService;

impl PaymentService {
    /// Records a payment for the current cycle: stamps `last_paid_date`,
    /// advances the anchor exactly one cycle step, and appends to the
    /// payment history. Variable-price items re-estimate their price as
    /// the rounded mean of the last few recorded amounts. Returns the new
    /// anchor date.
    pub fn mark_paid(
        tracker: &mut Tracker,
        subscription_id: Uuid,
        today: NaiveDate,
        amount: Option<f64>,
    ) -> Result<NaiveDate, CoreError> {
        let sub = tracker
            .subscription_mut(subscription_id)
            .ok_or(CoreError::SubscriptionNotFound(subscription_id))?;

        let paid_amount = amount.unwrap_or_else(|| effective_price(sub, today));
        sub.payments.push(PaymentRecord {
            date: today,
            amount: paid_amount,
        });
        sub.last_paid_date = Some(today);
        sub.has_ever_been_paid = true;
        sub.anchor_date = sub.cycle.next_date(sub.anchor_date);
        if sub.variable_price {
            sub.price = variable_price_estimate(&sub.payments);
        }
        let new_anchor = sub.anchor_date;
        tracing::debug!(
            subscription = %sub.name,
            %today,
            %new_anchor,
            amount = paid_amount,
            "payment recorded"
        );
        sub.touch();
        tracker.touch();
        Ok(new_anchor)
    }

    /// Reverses the most recent payment: retreats the anchor one cycle
    /// step, re-resolving forward if the reverted date already lies in the
    /// past, and drops the matching history record. Returns the restored
    /// anchor date.
    pub fn undo_paid(
        tracker: &mut Tracker,
        subscription_id: Uuid,
        today: NaiveDate,
    ) -> Result<NaiveDate, CoreError> {
        let sub = tracker
            .subscription_mut(subscription_id)
            .ok_or(CoreError::SubscriptionNotFound(subscription_id))?;

        let last_paid = sub.last_paid_date.ok_or_else(|| {
            CoreError::InvalidOperation("no recorded payment to undo".into())
        })?;

        let mut reverted = sub.cycle.previous_date(sub.anchor_date);
        if reverted < today {
            reverted = next_occurrence_on_or_after(reverted, sub.cycle, today)?;
        }
        sub.anchor_date = reverted;

        if let Some(index) = sub
            .payments
            .iter()
            .rposition(|record| record.date == last_paid)
        {
            sub.payments.remove(index);
        }
        sub.last_paid_date = None;
        sub.has_ever_been_paid = !sub.payments.is_empty();
        tracing::debug!(subscription = %sub.name, anchor = %reverted, "payment undone");
        sub.touch();
        tracker.touch();
        Ok(reverted)
    }
}

fn variable_price_estimate(payments: &[PaymentRecord]) -> f64 {
    let recent = &payments[payments.len().saturating_sub(VARIABLE_PRICE_SAMPLE)..];
    if recent.is_empty() {
        return 0.0;
    }
    let mean = recent.iter().map(|record| record.amount).sum::<f64>() / recent.len() as f64;
    round_currency(mean)
}
