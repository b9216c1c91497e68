//! Wire types for the prediction service and their normalization.
//!
//! The service is loose about shapes: `predictions` is a single object when
//! one month is forecast and an array otherwise, and `ds` arrives either as an
//! ISO date or as an HTTP-date (`Wed, 01 Jan 2025 00:00:00 GMT`). Everything is
//! decoded into these types and flattened exactly once, so the rest of the
//! crate only sees `ForecastSeries`.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::{ForecastPoint, ForecastSeries, HistoryPoint};
use crate::error::ForecastError;

/// Either a single value or an ordered list of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Body of `POST /api/predict`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictBody<'a> {
    pub commodity: &'a str,
    pub months: u32,
}

/// Reply of `POST /api/predict`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawForecastResponse {
    /// Echo of the requested commodity (informational).
    #[serde(default)]
    pub commodity: Option<String>,
    /// Absent and `null` both decode to `None`.
    #[serde(default)]
    pub predictions: Option<OneOrMany<RawPoint>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    pub ds: String,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

impl RawForecastResponse {
    /// Flatten `predictions` into a series, preserving service order.
    ///
    /// Bounds are passed through as received, even when `yhat_lower > yhat_upper`.
    pub fn into_series(self) -> Result<ForecastSeries, ForecastError> {
        let raw = self.predictions.map(OneOrMany::into_vec).unwrap_or_default();

        let mut points = Vec::with_capacity(raw.len());
        for p in raw {
            let date = parse_ds(&p.ds).ok_or_else(|| {
                ForecastError::PredictionFailed(format!("invalid forecast date '{}'", p.ds))
            })?;
            points.push(ForecastPoint {
                date,
                point_estimate: p.yhat,
                lower_bound: p.yhat_lower,
                upper_bound: p.yhat_upper,
            });
        }

        Ok(ForecastSeries::new(points))
    }
}

/// Reply of `GET /api/history`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawHistoryResponse {
    #[serde(default)]
    pub history: Vec<RawHistoryPoint>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawHistoryPoint {
    pub ds: String,
    /// Months without an observation come back as `null`.
    #[serde(default)]
    pub y: Option<f64>,
}

impl RawHistoryResponse {
    /// Convert to history points, skipping months without a value.
    pub fn into_points(self) -> Result<Vec<HistoryPoint>, ForecastError> {
        let mut out = Vec::with_capacity(self.history.len());
        for row in self.history {
            let Some(value) = row.y.filter(|v| v.is_finite()) else {
                continue;
            };
            let date = parse_ds(&row.ds).ok_or_else(|| {
                ForecastError::PredictionFailed(format!("invalid history date '{}'", row.ds))
            })?;
            out.push(HistoryPoint { date, value });
        }
        Ok(out)
    }
}

/// Error body the service sends with non-2xx replies.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceErrorBody {
    pub error: String,
}

/// Pull the `error` message out of a failure body, if there is one.
pub fn service_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ServiceErrorBody>(body)
        .ok()
        .map(|b| b.error)
        .filter(|m| !m.trim().is_empty())
}

/// Replace the bare `NaN`, `Infinity` and `-Infinity` tokens Python's `json`
/// emits for missing or non-finite numbers with `null`. Text inside string
/// literals is left alone. Borrows when there is nothing to replace.
pub fn null_non_finite(body: &str) -> Cow<'_, str> {
    if !body.contains("NaN") && !body.contains("Infinity") {
        return Cow::Borrowed(body);
    }

    let mut out = String::with_capacity(body.len());
    let mut rest = body;
    let mut in_string = false;
    let mut escaped = false;

    while let Some(ch) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
        } else if ch == '"' {
            in_string = true;
        } else if let Some(token) = ["-Infinity", "Infinity", "NaN"]
            .into_iter()
            .find(|t| rest.starts_with(t))
        {
            out.push_str("null");
            rest = &rest[token.len()..];
            continue;
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    Cow::Owned(out)
}

/// Parse a service date string into a calendar date.
///
/// Accepted forms:
/// - `2025-01-01`
/// - `2025-01-01T00:00:00`, with optional fraction and `Z`/offset
/// - `2025-01-01 00:00:00`
/// - RFC 2822 / HTTP-date, `Wed, 01 Jan 2025 00:00:00 GMT`
///
/// Date-times keep their calendar date as written; no timezone shifting.
pub fn parse_ds(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local().date());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.naive_local().date());
    }

    None
}
