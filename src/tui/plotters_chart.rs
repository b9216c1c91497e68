//! Plotters-powered forecast chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - bars and lines from the same drawing code
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
// The ratatui `Color` import below shadows the prelude's trait of the same name.
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::chart::{ChartSeries, ChartShape};

/// A render-only view over a projected forecast chart.
///
/// All data prep happens in `chart::project`; this only draws.
pub struct ForecastPlottersChart<'a> {
    pub chart: &'a ChartSeries,
    pub x_label: &'a str,
    pub y_label: &'a str,
}

impl ForecastPlottersChart<'_> {
    /// X bounds in point-index units, with half a slot of margin.
    pub fn x_bounds(&self) -> [f64; 2] {
        match self.chart.shape {
            ChartShape::Single => [-0.5, bar_count(self.chart) as f64 - 0.5],
            ChartShape::Multi => [-0.25, (self.chart.len().max(2) - 1) as f64 + 0.25],
        }
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        let (mut lo, mut hi) = self.chart.value_range().unwrap_or((0.0, 1.0));
        if self.chart.shape == ChartShape::Single {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }
        let pad = ((hi - lo).abs() * 0.05).max(1.0);
        [lo - pad, hi + pad]
    }
}

fn bar_count(chart: &ChartSeries) -> usize {
    1 + usize::from(!chart.upper_values.is_empty()) + usize::from(!chart.lower_values.is_empty())
}

fn label_at(labels: &[String], x: f64) -> String {
    let idx = x.round();
    if idx < 0.0 || (x - idx).abs() > 1e-6 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

impl Widget for ForecastPlottersChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds();
        let [y0, y1] = self.y_bounds();
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let chart_data = self.chart;
        let shape = chart_data.shape;
        let x_label = self.x_label;
        let y_label = self.y_label;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            let single_label = |v: &f64| {
                if v.round() == 0.0 {
                    chart_data.labels.first().cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            };
            let multi_label = |v: &f64| label_at(&chart_data.labels, *v);
            let y_fmt = |v: &f64| format!("{v:.0}");

            {
                let mut mesh = chart.configure_mesh();
                mesh.disable_x_mesh()
                    .disable_y_mesh()
                    .x_desc(x_label)
                    .y_desc(y_label)
                    .x_labels(chart_data.len().clamp(2, 6))
                    .y_labels(5)
                    .y_label_formatter(&y_fmt)
                    .label_style(("sans-serif", 10).into_font().color(&WHITE))
                    .axis_style(&WHITE)
                    .bold_line_style(&WHITE);
                match shape {
                    ChartShape::Single => mesh.x_label_formatter(&single_label).draw()?,
                    ChartShape::Multi => mesh.x_label_formatter(&multi_label).draw()?,
                }
            }

            // Series styling: keep the palette high-contrast for terminal readability.
            let point_color = RGBColor(62, 149, 205);
            let upper_color = RGBColor(142, 94, 162);
            let lower_color = RGBColor(196, 88, 80);

            match shape {
                ChartShape::Single => {
                    let mut bars = vec![(chart_data.point_values[0], point_color)];
                    if let Some(&v) = chart_data.upper_values.first() {
                        bars.push((v, upper_color));
                    }
                    if let Some(&v) = chart_data.lower_values.first() {
                        bars.push((v, lower_color));
                    }
                    chart.draw_series(bars.into_iter().enumerate().map(|(i, (v, color))| {
                        let x = i as f64;
                        Rectangle::new([(x - 0.3, 0.0), (x + 0.3, v)], color.filled())
                    }))?;
                }
                ChartShape::Multi => {
                    let indexed = |values: &[f64]| -> Vec<(f64, f64)> {
                        values
                            .iter()
                            .enumerate()
                            .filter(|(_, v)| v.is_finite())
                            .map(|(i, &v)| (i as f64, v))
                            .collect()
                    };
                    chart.draw_series(LineSeries::new(indexed(&chart_data.upper_values), &upper_color))?;
                    chart.draw_series(LineSeries::new(indexed(&chart_data.lower_values), &lower_color))?;
                    let points = indexed(&chart_data.point_values);
                    chart.draw_series(LineSeries::new(points.iter().copied(), &point_color))?;
                    // Colored pixels rather than circles: the backend maps circle
                    // radii to canvas units incorrectly.
                    chart.draw_series(points.iter().map(|&(x, y)| Pixel::new((x, y), WHITE)))?;
                }
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::chart::project;
    use crate::domain::{ForecastPoint, ForecastSeries, Locale};

    fn chart(n: usize, bounds: bool) -> ChartSeries {
        let series = ForecastSeries::new(
            (0..n)
                .map(|i| ForecastPoint {
                    date: NaiveDate::from_ymd_opt(2025, 1 + i as u32, 1).unwrap(),
                    point_estimate: 100.0,
                    lower_bound: 90.0,
                    upper_bound: 110.0,
                })
                .collect(),
        );
        project(&series, bounds, Locale::En)
    }

    #[test]
    fn single_bars_start_from_zero() {
        let c = chart(1, true);
        let w = ForecastPlottersChart { chart: &c, x_label: "", y_label: "" };
        assert_eq!(w.x_bounds(), [-0.5, 2.5]);
        let [lo, hi] = w.y_bounds();
        assert!(lo < 0.0 && hi > 110.0);
    }

    #[test]
    fn multi_bounds_span_all_points() {
        let c = chart(4, false);
        let w = ForecastPlottersChart { chart: &c, x_label: "", y_label: "" };
        assert_eq!(w.x_bounds(), [-0.25, 3.25]);
        let [lo, hi] = w.y_bounds();
        assert!(lo < 100.0 && hi > 100.0);
    }

    fn render(chart: &ChartSeries, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        ForecastPlottersChart { chart, x_label: "Date", y_label: "Price (IDR)" }.render(area, &mut buf);
        buf
    }

    fn drawn_cells(buf: &Buffer) -> usize {
        buf.content().iter().filter(|c| c.symbol() != " ").count()
    }

    #[test]
    fn renders_single_point_bars_into_buffer() {
        let c = chart(1, true);
        assert_eq!(c.shape, ChartShape::Single);
        assert!(drawn_cells(&render(&c, 60, 20)) > 0);
    }

    #[test]
    fn renders_multi_point_lines_into_buffer() {
        for bounds in [true, false] {
            let c = chart(6, bounds);
            assert_eq!(c.shape, ChartShape::Multi);
            assert!(drawn_cells(&render(&c, 60, 20)) > 0);
        }
    }

    #[test]
    fn tiny_area_shows_resize_hint() {
        let buf = render(&chart(3, true), 40, 4);
        let first_row: String = (0..40).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(first_row.starts_with("Chart area too small"));
    }

    #[test]
    fn labels_only_on_whole_indices() {
        let labels = vec!["1/1/2025".to_string(), "2/1/2025".to_string()];
        assert_eq!(label_at(&labels, 1.0), "2/1/2025");
        assert_eq!(label_at(&labels, 0.5), "");
        assert_eq!(label_at(&labels, 5.0), "");
        assert_eq!(label_at(&labels, -1.0), "");
    }
}
