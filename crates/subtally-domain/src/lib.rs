//! subtally-domain
//!
//! Pure domain models (Tracker, Subscription, Cycle, payment records).
//! No I/O, no storage. Only data types and core enums.

pub mod common;
pub mod subscription;
pub mod tracker;

pub use common::*;
pub use subscription::*;
pub use tracker::*;
