//! Reporting: forecast summaries and formatted terminal output.

pub mod format;
pub mod summary;

pub use format::{
    format_forecast_table, format_grouped, format_history_table, format_month_year, format_rupiah,
    format_short_date,
};
pub use summary::{Summary, SummaryFacts, synthesize};
