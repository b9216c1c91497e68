//! Shared forecast pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> call service -> normalize -> {chart projection, summary}
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use serde::Serialize;

use crate::chart::{ChartSeries, project};
use crate::data::ForecastService;
use crate::domain::{CommodityId, ForecastRequest, ForecastSeries, HistoryPoint, Locale};
use crate::error::ForecastError;
use crate::report::{Summary, synthesize};

/// Fetch the commodity catalog in service order.
pub async fn list_commodities(service: &dyn ForecastService) -> Result<Vec<CommodityId>, ForecastError> {
    let list = service.fetch_commodities().await?;
    if list.is_empty() {
        tracing::warn!("service returned an empty commodity catalog");
    }
    Ok(list)
}

/// Validate, call the service once and normalize the reply.
///
/// Validation failures return before any network call.
pub async fn request_forecast(
    service: &dyn ForecastService,
    commodity: impl Into<CommodityId>,
    horizon: u32,
) -> Result<ForecastSeries, ForecastError> {
    let req = ForecastRequest::new(commodity, horizon)?;
    let raw = service.fetch_forecast(&req).await?;
    let series = raw.into_series()?;
    tracing::info!(commodity = %req.commodity, points = series.len(), "forecast normalized");
    Ok(series)
}

/// Fetch recent observed prices for a commodity.
pub async fn fetch_history(
    service: &dyn ForecastService,
    commodity: impl Into<CommodityId>,
) -> Result<Vec<HistoryPoint>, ForecastError> {
    let commodity = commodity.into();
    if commodity.as_str().is_empty() {
        return Err(ForecastError::Validation("Please select a commodity.".to_string()));
    }
    service.fetch_history(&commodity).await?.into_points()
}

/// All derived artifacts of one successful forecast.
///
/// Built in one step from a single response; a new forecast replaces the
/// whole value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastOutput {
    pub commodity: CommodityId,
    pub horizon: u32,
    pub series: ForecastSeries,
    pub chart: ChartSeries,
    pub summary: Summary,
}

impl ForecastOutput {
    pub fn derive(
        commodity: CommodityId,
        horizon: u32,
        series: ForecastSeries,
        include_bounds: bool,
        locale: Locale,
    ) -> Self {
        let chart = project(&series, include_bounds, locale);
        let summary = synthesize(&series, &commodity, horizon, locale);
        Self {
            commodity,
            horizon,
            series,
            chart,
            summary,
        }
    }
}

/// Execute the full pipeline and return every derived artifact.
pub async fn run_forecast(
    service: &dyn ForecastService,
    commodity: impl Into<CommodityId>,
    horizon: u32,
    include_bounds: bool,
    locale: Locale,
) -> Result<ForecastOutput, ForecastError> {
    let commodity = commodity.into();
    let series = request_forecast(service, commodity.clone(), horizon).await?;
    Ok(ForecastOutput::derive(commodity, horizon, series, include_bounds, locale))
}
