//! subtally-core
//!
//! The recurrence/date engine and derived views for subscription tracking.
//! Depends on subtally-domain. No CLI, no terminal I/O, no direct storage
//! interactions; persistence is injected through [`storage::TrackerStorage`].

pub mod calendar;
pub mod error;
pub mod payment_service;
pub mod pricing;
pub mod resolver;
pub mod storage;
pub mod summary_service;
pub mod time;

pub use calendar::*;
pub use error::CoreError;
pub use payment_service::*;
pub use pricing::*;
pub use resolver::*;
pub use summary_service::*;
pub use time::*;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
/// Safe to call more than once.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("subtally_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("Subtally core tracing initialized.");
    });
}
