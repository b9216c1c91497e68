//! Forecast state owned by an interactive front-end.
//!
//! Requests may overlap (a new submit while one is in flight). Each request
//! gets a token from `begin`; only the reply carrying the latest token is
//! applied, older replies are dropped. Applying a reply swaps series, chart
//! and summary together.

use crate::app::pipeline::ForecastOutput;
use crate::domain::{CommodityId, ForecastSeries, Locale};
use crate::error::ForecastError;

/// Monotonic request identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
pub struct ForecastBoard {
    next_token: u64,
    pending: Option<RequestToken>,
    output: Option<ForecastOutput>,
    error: Option<String>,
}

impl ForecastBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request: clears the previous result and error, returns its token.
    pub fn begin(&mut self) -> RequestToken {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.pending = Some(token);
        self.output = None;
        self.error = None;
        token
    }

    /// Record a failure that happened before any request was issued.
    pub fn reject(&mut self, err: &ForecastError) {
        self.pending = None;
        self.output = None;
        self.error = Some(err.to_string());
    }

    /// Apply a finished request. Returns `false` when the token is stale and
    /// the reply was discarded.
    pub fn resolve(
        &mut self,
        token: RequestToken,
        result: Result<ForecastSeries, ForecastError>,
        commodity: CommodityId,
        horizon: u32,
        include_bounds: bool,
        locale: Locale,
    ) -> bool {
        if self.pending != Some(token) {
            tracing::debug!(?token, latest = ?self.pending, "discarding stale forecast reply");
            return false;
        }
        self.pending = None;

        match result {
            Ok(series) => {
                self.output = Some(ForecastOutput::derive(
                    commodity,
                    horizon,
                    series,
                    include_bounds,
                    locale,
                ));
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "forecast failed");
                self.output = None;
                self.error = Some(err.to_string());
            }
        }
        true
    }

    /// Re-project the current result (e.g. after toggling bounds) without a
    /// new request.
    pub fn reproject(&mut self, include_bounds: bool, locale: Locale) {
        if let Some(out) = self.output.take() {
            self.output = Some(ForecastOutput::derive(
                out.commodity,
                out.horizon,
                out.series,
                include_bounds,
                locale,
            ));
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn output(&self) -> Option<&ForecastOutput> {
        self.output.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
