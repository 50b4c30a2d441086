use chrono::{DateTime, NaiveDate, Utc};

/// Clock abstracts access to the current timestamp so services and
/// consumers remain deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar date, derived from [`now`](Clock::now) so test
    /// doubles only have to override one method.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
