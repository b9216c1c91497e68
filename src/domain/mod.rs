//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - catalog identifiers and forecast requests (`CommodityId`, `ForecastRequest`)
//! - the normalized forecast series (`ForecastPoint`, `ForecastSeries`)
//! - historical observations (`HistoryPoint`)
//! - the display locale (`Locale`) and trend classification (`Trend`)

pub mod types;

pub use types::*;
