//! HTTP client for the prediction service.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::ServiceConfig;
use crate::data::ForecastService;
use crate::data::wire::{
    PredictBody, RawForecastResponse, RawHistoryResponse, null_non_finite, service_error_message,
};
use crate::domain::{CommodityId, ForecastRequest};
use crate::error::ForecastError;

const COMMODITIES_PATH: &str = "/api/commodities";
const PREDICT_PATH: &str = "/api/predict";
const HISTORY_PATH: &str = "/api/history";

pub struct HttpForecastService {
    client: Client,
    base_url: String,
}

impl HttpForecastService {
    /// `base_url` without a trailing slash.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl ForecastService for HttpForecastService {
    async fn fetch_commodities(&self) -> Result<Vec<CommodityId>, ForecastError> {
        let url = self.url(COMMODITIES_PATH);
        tracing::debug!(%url, "fetching commodity catalog");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ForecastError::CatalogUnavailable(format!("request failed: {e}")))?;

        let list: Vec<CommodityId> = read_json(resp).await.map_err(ForecastError::CatalogUnavailable)?;
        tracing::debug!(count = list.len(), "catalog received");
        Ok(list)
    }

    async fn fetch_forecast(&self, req: &ForecastRequest) -> Result<RawForecastResponse, ForecastError> {
        let url = self.url(PREDICT_PATH);
        tracing::info!(commodity = %req.commodity, months = req.horizon, "requesting forecast");

        let body = PredictBody {
            commodity: req.commodity.as_str(),
            months: req.horizon,
        };
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ForecastError::PredictionFailed(format!("request failed: {e}")))?;

        read_json(resp).await.map_err(ForecastError::PredictionFailed)
    }

    async fn fetch_history(&self, commodity: &CommodityId) -> Result<RawHistoryResponse, ForecastError> {
        let url = self.url(HISTORY_PATH);
        tracing::info!(%commodity, "requesting history");

        let resp = self
            .client
            .get(&url)
            .query(&[("commodity", commodity.as_str())])
            .send()
            .await
            .map_err(|e| ForecastError::PredictionFailed(format!("request failed: {e}")))?;

        read_json(resp).await.map_err(ForecastError::PredictionFailed)
    }
}

/// Check the status and decode a JSON body; the error string is the message
/// the caller wraps into its own error kind. Bare `NaN`/`Infinity` values
/// decode as `null`.
async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, String> {
    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| format!("failed to read response body: {e}"))?;

    if !status.is_success() {
        tracing::warn!(%status, "service returned an error status");
        return Err(match service_error_message(&text) {
            Some(msg) => format!("status {status}: {msg}"),
            None => format!("status {status}"),
        });
    }

    serde_json::from_str(&null_non_finite(&text)).map_err(|e| {
        tracing::warn!(error = %e, "malformed service response");
        format!("failed to parse response: {e}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let svc = HttpForecastService::new("http://localhost:5000/");
        assert_eq!(svc.base_url(), "http://localhost:5000");
        assert_eq!(svc.url(PREDICT_PATH), "http://localhost:5000/api/predict");
    }
}
