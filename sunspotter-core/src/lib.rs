//! Core library for the `sunspotter` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The forecast fetcher (one HTTPS call per search)
//! - Parsing and the sunny-verdict derivation
//!
//! It is used by `sunspotter-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod fetch;
pub mod forecast;
pub mod model;

pub use config::Config;
pub use error::Error;
pub use fetch::{FORECAST_URL, ForecastFetcher, ForecastSource, fetcher_from_config};
pub use forecast::{parse_forecast, parse_forecast_in};
pub use model::{ForecastEntry, ForecastReport, SunnyVerdict};
