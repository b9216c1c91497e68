//! Command-line parsing for the commodity price forecast client.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the service client and the forecast pipeline.

use clap::{Args, Parser, Subcommand};

use crate::domain::Locale;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pangan", version, about = "Food commodity price forecasts")]
pub struct Cli {
    /// Prediction service base URL (overrides PANGAN_API_URL).
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Locale for dates, numbers and the summary (overrides PANGAN_LOCALE).
    #[arg(long, global = true, value_enum)]
    pub locale: Option<Locale>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the commodities the service can forecast.
    Commodities,
    /// Request a forecast and print the table, chart and summary.
    Forecast(ForecastArgs),
    /// Print recent observed prices for a commodity.
    History(HistoryArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same forecast pipeline as `pangan forecast`, but renders
    /// results in a terminal UI using Ratatui.
    Tui,
}

/// Options for a single forecast.
#[derive(Debug, Args, Clone)]
pub struct ForecastArgs {
    /// Commodity name exactly as listed by `pangan commodities`.
    #[arg(short = 'c', long)]
    pub commodity: Option<String>,

    /// Number of months to forecast.
    #[arg(short = 'm', long, default_value_t = 1)]
    pub months: u32,

    /// Hide the confidence bounds in the chart.
    #[arg(long)]
    pub no_bounds: bool,

    /// Disable the terminal chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Print the full result (series, chart data, summary) as JSON.
    #[arg(long)]
    pub json: bool,

    /// Chart width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Chart height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,
}

/// Options for the history listing.
#[derive(Debug, Args, Clone)]
pub struct HistoryArgs {
    /// Commodity name exactly as listed by `pangan commodities`.
    #[arg(short = 'c', long)]
    pub commodity: Option<String>,
}
