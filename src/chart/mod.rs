//! Chart projection of a forecast series.
//!
//! The projection is render-agnostic: the ASCII plot and the Plotters TUI
//! widget both draw from `ChartSeries`, so shape and bound policy live here
//! and nowhere else.

use serde::Serialize;

use crate::domain::{CommodityId, ForecastSeries, Locale};
use crate::report::format::format_short_date;

/// How the series should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartShape {
    /// Exactly one point: draw bars.
    Single,
    /// Zero or several points: draw lines over time.
    Multi,
}

impl ChartShape {
    pub fn for_len(len: usize) -> Self {
        if len == 1 { ChartShape::Single } else { ChartShape::Multi }
    }
}

/// Renderable series derived from a `ForecastSeries`.
///
/// `upper_values` / `lower_values` are empty when bounds are hidden; an empty
/// vector means "nothing to draw".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub point_values: Vec<f64>,
    pub upper_values: Vec<f64>,
    pub lower_values: Vec<f64>,
    pub shape: ChartShape,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.point_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point_values.is_empty()
    }

    pub fn has_bounds(&self) -> bool {
        !self.upper_values.is_empty() || !self.lower_values.is_empty()
    }

    /// Finite min/max over every drawn value, or `None` when nothing is finite.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for &v in self
            .point_values
            .iter()
            .chain(&self.upper_values)
            .chain(&self.lower_values)
        {
            if v.is_finite() {
                min_y = min_y.min(v);
                max_y = max_y.max(v);
            }
        }
        if min_y.is_finite() && max_y.is_finite() {
            Some((min_y, max_y))
        } else {
            None
        }
    }
}

/// Project a forecast series into chart data. Pure; labels keep series order
/// and duplicates.
pub fn project(series: &ForecastSeries, include_bounds: bool, locale: Locale) -> ChartSeries {
    let labels = series
        .iter()
        .map(|p| format_short_date(p.date, locale))
        .collect();
    let point_values = series.iter().map(|p| p.point_estimate).collect();

    let (upper_values, lower_values) = if include_bounds {
        (
            series.iter().map(|p| p.upper_bound).collect(),
            series.iter().map(|p| p.lower_bound).collect(),
        )
    } else {
        (Vec::new(), Vec::new())
    };

    ChartSeries {
        labels,
        point_values,
        upper_values,
        lower_values,
        shape: ChartShape::for_len(series.len()),
    }
}

/// Titles and legend labels for a forecast chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartText {
    pub title: String,
    pub point_label: &'static str,
    pub upper_label: &'static str,
    pub lower_label: &'static str,
    pub x_axis: &'static str,
    pub y_axis: &'static str,
}

pub fn chart_text(commodity: &CommodityId, locale: Locale) -> ChartText {
    match locale {
        Locale::Id => ChartText {
            title: format!("Prediksi Harga untuk {commodity}"),
            point_label: "Prediksi Harga",
            upper_label: "Batas Atas",
            lower_label: "Batas Bawah",
            x_axis: "Tanggal",
            y_axis: "Harga (IDR)",
        },
        Locale::En => ChartText {
            title: format!("Price forecast for {commodity}"),
            point_label: "Price forecast",
            upper_label: "Upper bound",
            lower_label: "Lower bound",
            x_axis: "Date",
            y_axis: "Price (IDR)",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::domain::ForecastPoint;

    fn series(n: usize) -> ForecastSeries {
        let points = (0..n)
            .map(|i| ForecastPoint {
                date: NaiveDate::from_ymd_opt(2025, 1 + i as u32, 1).unwrap(),
                point_estimate: 100.0 + i as f64,
                lower_bound: 90.0 + i as f64,
                upper_bound: 110.0 + i as f64,
            })
            .collect();
        ForecastSeries::new(points)
    }

    #[test]
    fn shape_is_single_only_for_one_point() {
        assert_eq!(project(&series(0), true, Locale::En).shape, ChartShape::Multi);
        assert_eq!(project(&series(1), true, Locale::En).shape, ChartShape::Single);
        assert_eq!(project(&series(2), true, Locale::En).shape, ChartShape::Multi);
        assert_eq!(project(&series(12), true, Locale::En).shape, ChartShape::Multi);
    }

    #[test]
    fn hidden_bounds_are_empty_vectors() {
        for n in 1..=4 {
            let chart = project(&series(n), false, Locale::Id);
            assert!(chart.upper_values.is_empty());
            assert!(chart.lower_values.is_empty());
            assert_eq!(chart.point_values.len(), n);
            assert!(!chart.has_bounds());
        }
    }

    #[test]
    fn bounds_follow_series_order() {
        let chart = project(&series(3), true, Locale::En);
        assert_eq!(chart.point_values, vec![100.0, 101.0, 102.0]);
        assert_eq!(chart.upper_values, vec![110.0, 111.0, 112.0]);
        assert_eq!(chart.lower_values, vec![90.0, 91.0, 92.0]);
        assert_eq!(chart.labels, vec!["1/1/2025", "2/1/2025", "3/1/2025"]);
    }

    #[test]
    fn duplicate_dates_keep_their_labels() {
        let p = ForecastPoint {
            date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            point_estimate: 1.0,
            lower_bound: 0.0,
            upper_bound: 2.0,
        };
        let chart = project(&ForecastSeries::new(vec![p, p]), true, Locale::Id);
        assert_eq!(chart.labels, vec!["1/4/2025", "1/4/2025"]);
    }

    #[test]
    fn value_range_skips_non_finite() {
        let mut chart = project(&series(2), true, Locale::En);
        chart.upper_values[0] = f64::NAN;
        assert_eq!(chart.value_range(), Some((90.0, 111.0)));
        assert_eq!(project(&series(0), true, Locale::En).value_range(), None);
    }

    #[test]
    fn chart_text_is_localized() {
        let text = chart_text(&CommodityId::from("Beras"), Locale::Id);
        assert_eq!(text.title, "Prediksi Harga untuk Beras");
        assert_eq!(text.y_axis, "Harga (IDR)");
        let text = chart_text(&CommodityId::from("Beras"), Locale::En);
        assert_eq!(text.upper_label, "Upper bound");
    }
}
