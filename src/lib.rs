//! `pangan` library crate.
//!
//! The binary (`pangan`) is a thin wrapper around this library so that:
//!
//! - the forecast pipeline is testable without spawning processes
//! - the CLI and the TUI share one client, normalizer and summary
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod chart;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod plot;
pub mod report;
pub mod tui;
