//! Prediction service access.
//!
//! `ForecastService` is the seam between the pipeline and the network:
//! `HttpForecastService` talks to the real service, tests plug in fakes.

use async_trait::async_trait;

use crate::domain::{CommodityId, ForecastRequest};
use crate::error::ForecastError;

pub mod http;
pub mod wire;

pub use http::HttpForecastService;
pub use wire::{OneOrMany, RawForecastResponse, RawHistoryResponse, RawPoint};

/// One round trip per call; no caching, retry or request coalescing.
#[async_trait]
pub trait ForecastService: Send + Sync {
    /// `GET /api/commodities`. Failures are `CatalogUnavailable`.
    async fn fetch_commodities(&self) -> Result<Vec<CommodityId>, ForecastError>;

    /// `POST /api/predict`. Failures are `PredictionFailed`.
    async fn fetch_forecast(&self, req: &ForecastRequest) -> Result<RawForecastResponse, ForecastError>;

    /// `GET /api/history?commodity=..`. Failures are `PredictionFailed`.
    async fn fetch_history(&self, commodity: &CommodityId) -> Result<RawHistoryResponse, ForecastError>;
}
