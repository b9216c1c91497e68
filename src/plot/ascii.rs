//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! `ChartShape::Multi` draws lines over time:
//! - forecast: `-` line with `o` at each point
//! - bounds: `.` lines
//!
//! `ChartShape::Single` draws bars: forecast `#`, upper `+`, lower `=`.

use crate::chart::{ChartSeries, ChartShape, ChartText};

/// Render a projected chart as text.
pub fn render_ascii_chart(chart: &ChartSeries, text: &ChartText, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let mut out = String::new();
    out.push_str(&text.title);
    out.push('\n');

    let Some((lo, hi)) = chart.value_range() else {
        out.push_str("(no forecast points)\n");
        return out;
    };

    let (y_min, y_max) = match chart.shape {
        // Bars grow from zero.
        ChartShape::Single => pad_range(lo.min(0.0), hi.max(0.0), 0.05),
        ChartShape::Multi => pad_range(lo, hi, 0.05),
    };

    let mut grid = vec![vec![' '; width]; height];
    match chart.shape {
        ChartShape::Single => draw_bars(&mut grid, chart, y_min, y_max),
        ChartShape::Multi => draw_lines(&mut grid, chart, y_min, y_max),
    }

    let first = chart.labels.first().map(String::as_str).unwrap_or("-");
    let last = chart.labels.last().map(String::as_str).unwrap_or("-");
    out.push_str(&format!(
        "{}: {first} .. {last} | {}: [{y_min:.0}, {y_max:.0}]\n",
        text.x_axis, text.y_axis
    ));

    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    out.push_str(&legend(chart, text));
    out.push('\n');
    out
}

fn legend(chart: &ChartSeries, text: &ChartText) -> String {
    let mut parts = Vec::with_capacity(3);
    match chart.shape {
        ChartShape::Single => {
            parts.push(format!("# {}", text.point_label));
            if !chart.upper_values.is_empty() {
                parts.push(format!("+ {}", text.upper_label));
            }
            if !chart.lower_values.is_empty() {
                parts.push(format!("= {}", text.lower_label));
            }
        }
        ChartShape::Multi => {
            parts.push(format!("o {}", text.point_label));
            if chart.has_bounds() {
                parts.push(format!(". {} / {}", text.upper_label, text.lower_label));
            }
        }
    }
    parts.join("  ")
}

fn draw_lines(grid: &mut [Vec<char>], chart: &ChartSeries, y_min: f64, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();
    let n = chart.len();

    let to_cells = |values: &[f64]| -> Vec<Option<(usize, usize)>> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                v.is_finite()
                    .then(|| (map_x(i, n, width), map_y(v, y_min, y_max, height)))
            })
            .collect()
    };

    let points = to_cells(&chart.point_values);
    // Forecast line first so the dotted bounds only fill blanks.
    polyline(grid, &points, '-');
    polyline(grid, &to_cells(&chart.upper_values), '.');
    polyline(grid, &to_cells(&chart.lower_values), '.');

    for (x, y) in points.into_iter().flatten() {
        grid[y][x] = 'o';
    }
}

fn polyline(grid: &mut [Vec<char>], cells: &[Option<(usize, usize)>], ch: char) {
    let mut prev: Option<(usize, usize)> = None;
    for cell in cells {
        match (prev, *cell) {
            (Some((x0, y0)), Some((x1, y1))) => draw_line(grid, x0, y0, x1, y1, ch),
            (None, Some((x, y))) if grid[y][x] == ' ' => grid[y][x] = ch,
            _ => {}
        }
        prev = *cell;
    }
}

fn draw_bars(grid: &mut [Vec<char>], chart: &ChartSeries, y_min: f64, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();

    let mut bars: Vec<(f64, char)> = Vec::with_capacity(3);
    if let Some(&v) = chart.point_values.first() {
        bars.push((v, '#'));
    }
    if let Some(&v) = chart.upper_values.first() {
        bars.push((v, '+'));
    }
    if let Some(&v) = chart.lower_values.first() {
        bars.push((v, '='));
    }
    bars.retain(|(v, _)| v.is_finite());
    if bars.is_empty() {
        return;
    }

    let slot = width / bars.len();
    let bar_w = (slot / 2).max(1);
    let base = map_y(0.0, y_min, y_max, height);

    for (j, &(v, ch)) in bars.iter().enumerate() {
        let x0 = slot * j + (slot - bar_w) / 2;
        let top = map_y(v, y_min, y_max, height);
        let (r0, r1) = if top <= base { (top, base) } else { (base, top) };
        for row in grid.iter_mut().take(r1 + 1).skip(r0) {
            for cell in row.iter_mut().skip(x0).take(bar_w) {
                *cell = ch;
            }
        }
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = if span > 0.0 {
        span * frac
    } else {
        // Flat series: open up a band around the value.
        (min.abs() * frac).max(1.0)
    };
    (min - pad, max + pad)
}

fn map_x(i: usize, n: usize, width: usize) -> usize {
    if n <= 1 {
        return (width - 1) / 2;
    }
    let u = i as f64 / (n as f64 - 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::chart::{chart_text, project};
    use crate::domain::{CommodityId, ForecastPoint, ForecastSeries, Locale};

    fn point(m: u32, est: f64, lower: f64, upper: f64) -> ForecastPoint {
        ForecastPoint {
            date: NaiveDate::from_ymd_opt(2025, m, 1).unwrap(),
            point_estimate: est,
            lower_bound: lower,
            upper_bound: upper,
        }
    }

    fn text() -> ChartText {
        chart_text(&CommodityId::from("Beras"), Locale::En)
    }

    #[test]
    fn line_plot_golden_snapshot_small() {
        let series = ForecastSeries::new(vec![point(1, 100.0, 0.0, 0.0), point(2, 120.0, 0.0, 0.0)]);
        let chart = project(&series, false, Locale::En);

        let txt = render_ascii_chart(&chart, &text(), 10, 5);
        let expected = concat!(
            "Price forecast for Beras\n",
            "Date: 1/1/2025 .. 2/1/2025 | Price (IDR): [99, 121]\n",
            "        -o\n",
            "      --\n",
            "    --\n",
            "  --\n",
            "o-\n",
            "o Price forecast\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn single_point_draws_bars() {
        let series = ForecastSeries::new(vec![point(1, 100.0, 80.0, 120.0)]);
        let chart = project(&series, true, Locale::En);
        let txt = render_ascii_chart(&chart, &text(), 30, 8);

        assert!(txt.contains('#'));
        assert!(txt.contains('+'));
        assert!(txt.contains('='));
        assert!(txt.ends_with("# Price forecast  + Upper bound  = Lower bound\n"));
        // The bottom grid row is the zero baseline region, filled by every bar.
        let rows: Vec<&str> = txt.lines().collect();
        let bottom = rows[rows.len() - 2];
        assert!(bottom.contains('#') && bottom.contains('+') && bottom.contains('='));
    }

    #[test]
    fn bounds_are_drawn_dotted() {
        let series = ForecastSeries::new(vec![
            point(1, 100.0, 80.0, 120.0),
            point(2, 105.0, 82.0, 130.0),
            point(3, 110.0, 85.0, 140.0),
        ]);
        let chart = project(&series, true, Locale::En);
        let txt = render_ascii_chart(&chart, &text(), 20, 10);
        let rows: Vec<&str> = txt.lines().collect();
        let grid = &rows[2..rows.len() - 1];
        assert_eq!(grid.len(), 10);
        assert!(grid.iter().any(|r| r.contains('.')));
        let markers: usize = grid.iter().map(|r| r.matches('o').count()).sum();
        assert_eq!(markers, 3);
    }

    #[test]
    fn empty_chart_renders_placeholder() {
        let chart = project(&ForecastSeries::default(), true, Locale::En);
        let txt = render_ascii_chart(&chart, &text(), 20, 10);
        assert_eq!(txt, "Price forecast for Beras\n(no forecast points)\n");
    }
}
