//! Locale-aware formatting and terminal tables.
//!
//! We keep formatting code in one place so:
//! - chart labels and summaries agree on how dates and prices look
//! - output changes are localized (important for snapshot-style tests)

use chrono::{Datelike, NaiveDate};

use crate::domain::{ForecastSeries, HistoryPoint, Locale};

/// Round to the nearest integer and group thousands (`10500.4` -> `10,500`).
///
/// Halves round up (`-1000.5` -> `-1,000`). Non-finite values render as `∞`, `-∞`, `NaN`.
pub fn format_grouped(value: f64, locale: Locale) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    let rounded = (value + 0.5).floor();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let sep = locale.group_separator();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}

/// Price with the rupiah prefix (`Rp 10.500`).
pub fn format_rupiah(value: f64, locale: Locale) -> String {
    format!("Rp {}", format_grouped(value, locale))
}

/// Numeric calendar date: `D/M/YYYY` (id) or `M/D/YYYY` (en).
pub fn format_short_date(date: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::Id => format!("{}/{}/{}", date.day(), date.month(), date.year()),
        Locale::En => format!("{}/{}/{}", date.month(), date.day(), date.year()),
    }
}

/// Long month and year (`Januari 2025`, `January 2025`).
pub fn format_month_year(date: NaiveDate, locale: Locale) -> String {
    format!("{} {}", locale.month_name(date.month()), date.year())
}

/// Format the forecast as a table (one row per point, service order).
pub fn format_forecast_table(series: &ForecastSeries, locale: Locale) -> String {
    let mut out = String::new();
    out.push_str(
        format!("{:<12} {:>14} {:>14} {:>14}\n", "date", "forecast", "lower", "upper").trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<12} {:-<14} {:-<14} {:-<14}\n", "", "", "", "").trim_end());
    out.push('\n');

    for p in series.iter() {
        out.push_str(
            format!(
                "{:<12} {:>14} {:>14} {:>14}\n",
                p.date.format("%Y-%m-%d"),
                format_grouped(p.point_estimate, locale),
                format_grouped(p.lower_bound, locale),
                format_grouped(p.upper_bound, locale),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format historical observations as a two-column table.
pub fn format_history_table(points: &[HistoryPoint], locale: Locale) -> String {
    let mut out = String::new();
    out.push_str(format!("{:<12} {:>14}\n", "date", "price").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<12} {:-<14}\n", "", "").trim_end());
    out.push('\n');
    for p in points {
        out.push_str(
            format!(
                "{:<12} {:>14}\n",
                p.date.format("%Y-%m-%d"),
                format_grouped(p.value, locale)
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ForecastPoint;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn groups_thousands_per_locale() {
        assert_eq!(format_grouped(10500.0, Locale::En), "10,500");
        assert_eq!(format_grouped(10500.0, Locale::Id), "10.500");
        assert_eq!(format_grouped(1234567.49, Locale::En), "1,234,567");
        assert_eq!(format_grouped(999.5, Locale::En), "1,000");
        assert_eq!(format_grouped(12.0, Locale::En), "12");
        assert_eq!(format_grouped(0.2, Locale::En), "0");
        assert_eq!(format_grouped(-9200.0, Locale::En), "-9,200");
        assert_eq!(format_grouped(-0.2, Locale::En), "0");
    }

    #[test]
    fn halves_round_toward_positive_infinity() {
        assert_eq!(format_grouped(-1000.5, Locale::En), "-1,000");
        assert_eq!(format_grouped(-1000.51, Locale::En), "-1,001");
        assert_eq!(format_grouped(1000.5, Locale::Id), "1.001");
        assert_eq!(format_grouped(-0.5, Locale::En), "0");
    }

    #[test]
    fn non_finite_values_do_not_panic() {
        assert_eq!(format_grouped(f64::INFINITY, Locale::En), "∞");
        assert_eq!(format_grouped(f64::NEG_INFINITY, Locale::Id), "-∞");
        assert_eq!(format_grouped(f64::NAN, Locale::En), "NaN");
    }

    #[test]
    fn formats_dates_per_locale() {
        let d = ymd(2025, 2, 7);
        assert_eq!(format_short_date(d, Locale::En), "2/7/2025");
        assert_eq!(format_short_date(d, Locale::Id), "7/2/2025");
        assert_eq!(format_month_year(d, Locale::En), "February 2025");
        assert_eq!(format_month_year(d, Locale::Id), "Februari 2025");
    }

    #[test]
    fn forecast_table_golden() {
        let series = ForecastSeries::new(vec![ForecastPoint {
            date: ymd(2025, 1, 1),
            point_estimate: 10000.0,
            lower_bound: 9000.0,
            upper_bound: 11000.0,
        }]);
        let txt = format_forecast_table(&series, Locale::En);
        let expected = concat!(
            "date               forecast          lower          upper\n",
            "------------ -------------- -------------- --------------\n",
            "2025-01-01           10,000          9,000         11,000\n",
        );
        assert_eq!(txt, expected);
    }
}
