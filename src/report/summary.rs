//! Natural-language forecast summary.
//!
//! The summary is a pure function of the series, commodity, horizon and
//! locale. First and last points are taken by position, not by date.

use serde::Serialize;

use crate::domain::{CommodityId, ForecastSeries, Locale, Trend};
use crate::report::format::{format_month_year, format_rupiah};

/// Numbers the summary sentence is built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryFacts {
    pub trend: Trend,
    pub start_estimate: f64,
    pub end_estimate: f64,
    /// Minimum lower bound across all points.
    pub min_lower_bound: f64,
    /// Maximum upper bound across all points.
    pub max_upper_bound: f64,
}

impl SummaryFacts {
    /// `None` for an empty series.
    pub fn from_series(series: &ForecastSeries) -> Option<Self> {
        let first = series.first()?;
        let last = series.last()?;

        let min_lower_bound = series
            .iter()
            .fold(f64::INFINITY, |min, p| min.min(p.lower_bound));
        let max_upper_bound = series
            .iter()
            .fold(f64::NEG_INFINITY, |max, p| max.max(p.upper_bound));

        Some(Self {
            trend: Trend::classify(first.point_estimate, last.point_estimate),
            start_estimate: first.point_estimate,
            end_estimate: last.point_estimate,
            min_lower_bound,
            max_upper_bound,
        })
    }
}

/// Generated summary text; empty when there was nothing to summarize.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    text: String,
    facts: Option<SummaryFacts>,
}

impl Summary {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn facts(&self) -> Option<&SummaryFacts> {
        self.facts.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Build the summary for a forecast result.
///
/// An empty series yields an empty summary, not an error.
pub fn synthesize(
    series: &ForecastSeries,
    commodity: &CommodityId,
    horizon: u32,
    locale: Locale,
) -> Summary {
    let (Some(first), Some(last), Some(facts)) =
        (series.first(), series.last(), SummaryFacts::from_series(series))
    else {
        return Summary::empty();
    };

    let start = format_month_year(first.date, locale);
    let end = format_month_year(last.date, locale);
    let trend = facts.trend.word(locale);
    let start_price = format_rupiah(facts.start_estimate, locale);
    let end_price = format_rupiah(facts.end_estimate, locale);
    let low = format_rupiah(facts.min_lower_bound, locale);
    let high = format_rupiah(facts.max_upper_bound, locale);

    let text = match locale {
        Locale::Id => format!(
            "Ringkasan prediksi untuk {commodity} selama {horizon} bulan dari {start} hingga {end}. \
             Harga awal diperkirakan sekitar {start_price}. \
             Secara umum, harga {trend}. \
             Pada akhir periode ({end}), harga diprediksi mencapai sekitar {end_price}. \
             Rentang kepercayaan terluas untuk periode ini berada antara {low} dan {high}."
        ),
        Locale::En => {
            let months = if horizon == 1 { "month" } else { "months" };
            format!(
                "Forecast summary for {commodity} over {horizon} {months} from {start} to {end}. \
                 The starting price is estimated at around {start_price}. \
                 Overall, the price is {trend}. \
                 At the end of the period ({end}), the price is forecast to reach around {end_price}. \
                 The widest confidence interval for this period lies between {low} and {high}."
            )
        }
    };

    Summary {
        text,
        facts: Some(facts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::domain::ForecastPoint;

    fn point(y: i32, m: u32, est: f64, lower: f64, upper: f64) -> ForecastPoint {
        ForecastPoint {
            date: NaiveDate::from_ymd_opt(y, m, 1).unwrap(),
            point_estimate: est,
            lower_bound: lower,
            upper_bound: upper,
        }
    }

    fn beras_series() -> ForecastSeries {
        ForecastSeries::new(vec![
            point(2025, 1, 10000.0, 9000.0, 11000.0),
            point(2025, 2, 10500.0, 9200.0, 11800.0),
        ])
    }

    #[test]
    fn two_month_rising_example() {
        let summary = synthesize(&beras_series(), &CommodityId::from("Beras"), 2, Locale::En);
        let facts = summary.facts().unwrap();
        assert_eq!(facts.trend, Trend::Rising);
        assert_eq!(facts.min_lower_bound, 9000.0);
        assert_eq!(facts.max_upper_bound, 11800.0);

        let text = summary.text();
        for needle in ["Beras", "10,000", "10,500", "9,000", "11,800", "January 2025", "February 2025", "rising"] {
            assert!(text.contains(needle), "missing {needle:?} in {text}");
        }
    }

    #[test]
    fn indonesian_text_golden() {
        let summary = synthesize(&beras_series(), &CommodityId::from("Beras"), 2, Locale::Id);
        assert_eq!(
            summary.text(),
            "Ringkasan prediksi untuk Beras selama 2 bulan dari Januari 2025 hingga Februari 2025. \
             Harga awal diperkirakan sekitar Rp 10.000. \
             Secara umum, harga cenderung naik. \
             Pada akhir periode (Februari 2025), harga diprediksi mencapai sekitar Rp 10.500. \
             Rentang kepercayaan terluas untuk periode ini berada antara Rp 9.000 dan Rp 11.800."
        );
    }

    #[test]
    fn empty_series_gives_empty_summary() {
        let summary = synthesize(&ForecastSeries::default(), &CommodityId::from("rice"), 3, Locale::En);
        assert!(summary.is_empty());
        assert!(summary.facts().is_none());
    }

    #[test]
    fn single_point_is_stable() {
        let series = ForecastSeries::new(vec![point(2025, 5, 42000.0, 40000.0, 44000.0)]);
        let summary = synthesize(&series, &CommodityId::from("Cabai"), 1, Locale::En);
        assert_eq!(summary.facts().unwrap().trend, Trend::Stable);
        assert!(summary.text().contains("over 1 month from May 2025 to May 2025"));
        assert!(summary.text().contains("stable"));
    }

    #[test]
    fn uses_positional_endpoints_and_all_bounds() {
        // Dates out of order: first/last are still positional; bounds come from
        // the middle point.
        let series = ForecastSeries::new(vec![
            point(2025, 6, 15000.0, 14000.0, 16000.0),
            point(2025, 3, 13000.0, 8000.0, 20000.0),
            point(2025, 1, 12000.0, 11000.0, 13000.0),
        ]);
        let summary = synthesize(&series, &CommodityId::from("Gula"), 3, Locale::En);
        let facts = summary.facts().unwrap();
        assert_eq!(facts.trend, Trend::Falling);
        assert_eq!(facts.start_estimate, 15000.0);
        assert_eq!(facts.end_estimate, 12000.0);
        assert_eq!(facts.min_lower_bound, 8000.0);
        assert_eq!(facts.max_upper_bound, 20000.0);
        assert!(summary.text().contains("from June 2025 to January 2025"));
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let a = synthesize(&beras_series(), &CommodityId::from("Beras"), 2, Locale::Id);
        let b = synthesize(&beras_series(), &CommodityId::from("Beras"), 2, Locale::Id);
        assert_eq!(a, b);
    }
}
