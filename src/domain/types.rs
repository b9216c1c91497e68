//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between the service client, chart projection and summary
//! - printed as JSON by `pangan forecast --json`

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// Opaque catalog identifier as returned by the service (e.g. `"Beras"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommodityId(String);

impl CommodityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommodityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommodityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CommodityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A validated forecast request.
///
/// Construction is the client-side guard: an empty commodity or a zero horizon
/// is rejected before any network I/O happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastRequest {
    pub commodity: CommodityId,
    /// Number of future months to forecast (`>= 1`).
    pub horizon: u32,
}

impl ForecastRequest {
    pub fn new(commodity: impl Into<CommodityId>, horizon: u32) -> Result<Self, ForecastError> {
        let commodity = commodity.into();
        if commodity.as_str().is_empty() {
            return Err(ForecastError::Validation("Please select a commodity.".to_string()));
        }
        if horizon == 0 {
            return Err(ForecastError::Validation(
                "Horizon must be at least one month.".to_string(),
            ));
        }
        Ok(Self { commodity, horizon })
    }
}

/// One forecast period: point estimate plus confidence bounds.
///
/// `lower_bound <= point_estimate <= upper_bound` is expected but never
/// enforced; out-of-order bounds are carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub point_estimate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Forecast points in the order the service returned them.
///
/// May be empty (the service omitted `predictions`); consumers treat that as
/// "nothing to show" rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastSeries {
    points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn new(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point by position (not by date).
    pub fn first(&self) -> Option<&ForecastPoint> {
        self.points.first()
    }

    /// Last point by position (not by date).
    pub fn last(&self) -> Option<&ForecastPoint> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastPoint> {
        self.points.iter()
    }
}

impl From<Vec<ForecastPoint>> for ForecastSeries {
    fn from(points: Vec<ForecastPoint>) -> Self {
        Self::new(points)
    }
}

/// One historical monthly observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Display locale for labels, month names and number grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Indonesian (`id-ID`).
    #[default]
    Id,
    /// English (`en-US`).
    En,
}

const MONTHS_ID: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September",
    "Oktober", "November", "Desember",
];

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

impl Locale {
    /// Parse a locale tag such as `id`, `id-ID`, `en` or `en_US`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let lang = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match lang.as_str() {
            "id" | "in" => Some(Locale::Id),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// Full month name, `month` in `1..=12`.
    pub fn month_name(self, month: u32) -> &'static str {
        let idx = (month.clamp(1, 12) - 1) as usize;
        match self {
            Locale::Id => MONTHS_ID[idx],
            Locale::En => MONTHS_EN[idx],
        }
    }

    pub fn group_separator(self) -> char {
        match self {
            Locale::Id => '.',
            Locale::En => ',',
        }
    }
}

/// Direction of the forecast from the first to the last point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

impl Trend {
    /// Exact comparison, no tolerance: `last > first` rises, `last < first`
    /// falls, anything else (including NaN) is stable.
    pub fn classify(first: f64, last: f64) -> Self {
        if last > first {
            Trend::Rising
        } else if last < first {
            Trend::Falling
        } else {
            Trend::Stable
        }
    }

    pub fn word(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Id, Trend::Rising) => "cenderung naik",
            (Locale::Id, Trend::Falling) => "cenderung turun",
            (Locale::Id, Trend::Stable) => "tetap stabil",
            (Locale::En, Trend::Rising) => "rising",
            (Locale::En, Trend::Falling) => "falling",
            (Locale::En, Trend::Stable) => "stable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_rejects_empty_commodity() {
        let err = ForecastRequest::new("", 3).unwrap_err();
        assert!(matches!(err, ForecastError::Validation(_)));

        // Only the empty string counts as "no selection"; the service judges the rest.
        let req = ForecastRequest::new("   ", 3).unwrap();
        assert_eq!(req.commodity.as_str(), "   ");
    }

    #[test]
    fn request_rejects_zero_horizon() {
        let err = ForecastRequest::new("Beras", 0).unwrap_err();
        assert!(matches!(err, ForecastError::Validation(_)));
    }

    #[test]
    fn request_keeps_commodity_verbatim() {
        let req = ForecastRequest::new("Cabai Merah", 6).unwrap();
        assert_eq!(req.commodity.as_str(), "Cabai Merah");
        assert_eq!(req.horizon, 6);
    }

    #[test]
    fn trend_is_exhaustive_and_exclusive() {
        let cases = [
            (1.0, 2.0, Trend::Rising),
            (2.0, 1.0, Trend::Falling),
            (5.0, 5.0, Trend::Stable),
            (-3.0, -3.0, Trend::Stable),
            (10_000.0, 10_000.000_001, Trend::Rising),
        ];
        for (a, b, expected) in cases {
            assert_eq!(Trend::classify(a, b), expected, "a={a} b={b}");
        }
    }

    #[test]
    fn locale_tags_parse() {
        assert_eq!(Locale::from_tag("id-ID"), Some(Locale::Id));
        assert_eq!(Locale::from_tag("EN_us"), Some(Locale::En));
        assert_eq!(Locale::from_tag("fr"), None);
        assert_eq!(Locale::En.month_name(2), "February");
        assert_eq!(Locale::Id.month_name(12), "Desember");
    }
}
