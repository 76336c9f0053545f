//! Donation tracking for food, clothing, and money contributions.
//!
//! The [`donations`] module holds the lifecycle manager together with the storage and
//! notification seams it is composed over. Configuration, telemetry, and the top-level
//! error type are shared with the API service crate.

pub mod config;
pub mod donations;
pub mod error;
pub mod telemetry;
