//! Computes the next occurrence of a recurring date on or after a
//! reference day.

use chrono::NaiveDate;

use subtally_domain::Cycle;

use crate::{
    calendar::{days_between, format_date, parse_date},
    CoreError,
};

/// Upper bound on resolver iterations. Realistic anchors sit at most a few
/// hundred cycles in the past; hitting this limit means the input is
/// pathological and the caller gets a distinct error instead of a hang.
pub const MAX_RESOLVER_STEPS: usize = 10_000;

/// Advances `anchor` one cycle step at a time until the result is on or
/// after `today`. An anchor already on or after `today` is returned as is.
pub fn next_occurrence_on_or_after(
    anchor: NaiveDate,
    cycle: Cycle,
    today: NaiveDate,
) -> Result<NaiveDate, CoreError> {
    let mut current = anchor;
    let mut steps = 0usize;
    while current < today {
        if steps >= MAX_RESOLVER_STEPS {
            return Err(CoreError::ResolverStepLimit { anchor, cycle });
        }
        current = cycle.next_date(current);
        steps += 1;
    }
    Ok(current)
}

/// String-boundary variant used against persisted data. An unparseable
/// anchor (or a step-limit hit) returns the input unchanged so one corrupt
/// entry cannot take down a whole dashboard render.
pub fn next_occurrence(anchor: &str, cycle: Cycle, today: NaiveDate) -> String {
    let Some(parsed) = parse_date(anchor) else {
        tracing::warn!(anchor, "unparseable anchor date, returning it unchanged");
        return anchor.to_string();
    };
    match next_occurrence_on_or_after(parsed, cycle, today) {
        Ok(resolved) => format_date(resolved),
        Err(err) => {
            tracing::warn!(anchor, %err, "resolver failed, returning anchor unchanged");
            anchor.to_string()
        }
    }
}

/// Signed day count from `today` to `target`; negative means overdue.
pub fn days_until(target: NaiveDate, today: NaiveDate) -> i64 {
    days_between(today, target)
}

/// String-boundary variant of [`days_until`]; `None` for malformed input.
pub fn days_remaining(value: &str, today: NaiveDate) -> Option<i64> {
    parse_date(value).map(|date| days_until(date, today))
}
