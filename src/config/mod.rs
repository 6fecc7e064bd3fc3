//! Configuration module for tripsplit
//!
//! - Data directory resolution
//! - Trip settings (currencies, exchange rate, log level)

pub mod paths;
pub mod settings;

pub use paths::TripPaths;
pub use settings::{CurrencyLabel, Settings};
