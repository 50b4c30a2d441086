//! subtally-config
//!
//! User preferences for the tracker: display locale and currency, renewal
//! horizons, focus mode, and data directory overrides. Persisted as JSON
//! under the platform config directory.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
