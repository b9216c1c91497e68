//! Terminal plotting of projected forecast charts.

pub mod ascii;

pub use ascii::render_ascii_chart;
