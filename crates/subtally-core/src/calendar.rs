//! Pure calendar arithmetic shared by the resolver and the aggregates.
//!
//! Dates are `NaiveDate` throughout: date-only arithmetic has no
//! time-of-day component, so no midnight or daylight-saving normalization
//! is ever needed.

use chrono::NaiveDate;

use subtally_domain::Cycle;

/// Wire format for dates persisted or exchanged as strings.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Signed number of whole calendar days from `a` to `b`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// Adds one cycle step, clamping month-based steps to the last valid day
/// of the target month.
pub fn advance_by_cycle(date: NaiveDate, cycle: Cycle) -> NaiveDate {
    cycle.next_date(date)
}

/// Removes one cycle step, with the same clamping rule.
pub fn retreat_by_cycle(date: NaiveDate, cycle: Cycle) -> NaiveDate {
    cycle.previous_date(date)
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD` string, returning `None` for anything malformed.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Input-boundary cycle validation. The engine itself only ever sees the
/// closed [`Cycle`] enum.
pub fn parse_cycle(value: &str) -> Result<Cycle, crate::CoreError> {
    Ok(value.parse::<Cycle>()?)
}
