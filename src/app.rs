//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the service configuration
//! - runs the forecast pipeline
//! - prints tables, charts and summaries (or hands off to the TUI)

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::chart::chart_text;
use crate::cli::{Command, ForecastArgs, HistoryArgs};
use crate::config::ServiceConfig;
use crate::data::HttpForecastService;
use crate::error::AppError;

pub mod pipeline;
pub mod session;

/// Entry point for the `pangan` binary.
pub fn run() -> Result<(), AppError> {
    // `pangan` with no subcommand opens the dashboard.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let config = ServiceConfig::resolve(cli.api_url, cli.locale)?;

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| AppError::new(4, format!("Failed to start async runtime: {e}")))?;

    match cli.command {
        Command::Tui => crate::tui::run(config, runtime.handle().clone()),
        command => {
            init_tracing();
            runtime.block_on(dispatch(command, &config))
        }
    }
}

async fn dispatch(command: Command, config: &ServiceConfig) -> Result<(), AppError> {
    let service = HttpForecastService::from_config(config);
    match command {
        Command::Commodities => handle_commodities(&service).await,
        Command::Forecast(args) => handle_forecast(&service, args, config).await,
        Command::History(args) => handle_history(&service, args, config).await,
        Command::Tui => Ok(()),
    }
}

/// Log to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pangan=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

async fn handle_commodities(service: &HttpForecastService) -> Result<(), AppError> {
    let list = pipeline::list_commodities(service).await?;
    for id in list {
        println!("{id}");
    }
    Ok(())
}

async fn handle_forecast(
    service: &HttpForecastService,
    args: ForecastArgs,
    config: &ServiceConfig,
) -> Result<(), AppError> {
    let commodity = args.commodity.unwrap_or_default();
    let out = pipeline::run_forecast(service, commodity, args.months, !args.no_bounds, config.locale)
        .await?;

    if args.json {
        let json = serde_json::to_string_pretty(&out)
            .map_err(|e| AppError::new(4, format!("Failed to serialize forecast: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    if out.series.is_empty() {
        println!("No forecast points returned for {}.", out.commodity);
        return Ok(());
    }

    println!("{}", crate::report::format_forecast_table(&out.series, config.locale));

    if !args.no_plot {
        let text = chart_text(&out.commodity, config.locale);
        println!(
            "{}",
            crate::plot::render_ascii_chart(&out.chart, &text, args.width, args.height)
        );
    }

    println!("{}", out.summary);
    Ok(())
}

async fn handle_history(
    service: &HttpForecastService,
    args: HistoryArgs,
    config: &ServiceConfig,
) -> Result<(), AppError> {
    let commodity = args.commodity.unwrap_or_default();
    let points = pipeline::fetch_history(service, commodity).await?;
    print!("{}", crate::report::format_history_table(&points, config.locale));
    Ok(())
}

/// Rewrite argv so `pangan` defaults to `pangan tui`.
///
/// Rules:
/// - `pangan`                          -> `pangan tui`
/// - `pangan --api-url U`              -> `pangan --api-url U tui`
/// - `pangan --help/--version/-h`      -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let has_subcommand = argv.iter().skip(1).any(|a| {
        matches!(
            a.as_str(),
            "commodities" | "forecast" | "history" | "tui" | "help"
        )
    });
    let wants_help_or_version = argv
        .iter()
        .skip(1)
        .any(|a| matches!(a.as_str(), "-h" | "--help" | "-V" | "--version"));

    if !has_subcommand && !wants_help_or_version {
        argv.push("tui".to_string());
    }
    argv
}
