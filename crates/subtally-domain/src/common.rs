//! Shared traits and the billing-cycle enum used across subscription types.

use std::{fmt, str::FromStr};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities stored in a tracker.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Enumerates the five supported billing cadences. The set is closed;
/// anything else is rejected at the parsing boundary.
pub enum Cycle {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Cycle {
    pub const ALL: [Cycle; 5] = [
        Cycle::Weekly,
        Cycle::Biweekly,
        Cycle::Monthly,
        Cycle::Quarterly,
        Cycle::Yearly,
    ];

    /// Calculates the date one cycle step after `from`. Month-based cycles
    /// clamp the day-of-month to the last valid day of the target month, so
    /// Jan 31 + one month lands on Feb 28 (or 29 in a leap year).
    pub fn next_date(self, from: NaiveDate) -> NaiveDate {
        match self {
            Cycle::Weekly => from + Duration::days(7),
            Cycle::Biweekly => from + Duration::days(14),
            Cycle::Monthly => shift_month(from, 1),
            Cycle::Quarterly => shift_month(from, 3),
            Cycle::Yearly => shift_year(from, 1),
        }
    }

    /// Calculates the date one cycle step before `from`, with the same
    /// clamping rule as [`Cycle::next_date`].
    pub fn previous_date(self, from: NaiveDate) -> NaiveDate {
        match self {
            Cycle::Weekly => from - Duration::days(7),
            Cycle::Biweekly => from - Duration::days(14),
            Cycle::Monthly => shift_month(from, -1),
            Cycle::Quarterly => shift_month(from, -3),
            Cycle::Yearly => shift_year(from, -1),
        }
    }

    /// Fixed conversion factor from a cycle-scoped price to a monthly
    /// figure. Weekly and biweekly use average-weeks-per-month constants
    /// rather than calendar-exact values so mixed-cycle totals stay
    /// comparable.
    pub fn monthly_factor(self) -> f64 {
        match self {
            Cycle::Weekly => 4.33,
            Cycle::Biweekly => 2.16,
            Cycle::Monthly => 1.0,
            Cycle::Quarterly => 1.0 / 3.0,
            Cycle::Yearly => 1.0 / 12.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Cycle::Weekly => "Weekly",
            Cycle::Biweekly => "Biweekly",
            Cycle::Monthly => "Monthly",
            Cycle::Quarterly => "Quarterly",
            Cycle::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised when a cycle string does not match one of the five known values.
pub struct ParseCycleError(pub String);

impl fmt::Display for ParseCycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown billing cycle `{}`", self.0)
    }
}

impl std::error::Error for ParseCycleError {}

impl FromStr for Cycle {
    type Err = ParseCycleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(Cycle::Weekly),
            "biweekly" => Ok(Cycle::Biweekly),
            "monthly" => Ok(Cycle::Monthly),
            "quarterly" => Ok(Cycle::Quarterly),
            "yearly" => Ok(Cycle::Yearly),
            other => Err(ParseCycleError(other.to_string())),
        }
    }
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    use chrono::Datelike;

    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}

fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    use chrono::Datelike;

    let year = date.year() + years;
    let month = date.month();
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    use chrono::Datelike;

    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}
