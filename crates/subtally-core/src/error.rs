use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use subtally_domain::{Cycle, ParseCycleError};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Tracker not found: {0}")]
    TrackerNotFound(String),
    #[error("Subscription not found: {0}")]
    SubscriptionNotFound(Uuid),
    #[error("Invalid cycle: {0}")]
    InvalidCycle(#[from] ParseCycleError),
    #[error("Recurrence from {anchor} ({cycle}) exceeded the resolver step limit")]
    ResolverStepLimit { anchor: NaiveDate, cycle: Cycle },
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}
