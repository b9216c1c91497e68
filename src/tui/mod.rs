//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for choosing a commodity, horizon and
//! whether to show confidence bounds, then renders the forecast chart and the
//! generated summary. Network calls run on the tokio runtime and report back
//! over a channel, so the UI keeps redrawing while a request is in flight.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::app::pipeline;
use crate::app::session::{ForecastBoard, RequestToken};
use crate::chart::chart_text;
use crate::config::ServiceConfig;
use crate::data::{ForecastService, HttpForecastService};
use crate::domain::{CommodityId, ForecastRequest, ForecastSeries, Locale};
use crate::error::{AppError, ForecastError};

mod plotters_chart;

use plotters_chart::ForecastPlottersChart;

const MAX_HORIZON: u32 = 60;

/// Start the TUI.
pub fn run(config: ServiceConfig, runtime: Handle) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let service: Arc<dyn ForecastService> = Arc::new(HttpForecastService::from_config(&config));
    let mut app = App::new(config.locale, service, runtime);
    app.load_catalog();
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Results delivered from background tasks.
enum Reply {
    Catalog(Result<Vec<CommodityId>, ForecastError>),
    Forecast {
        token: RequestToken,
        commodity: CommodityId,
        horizon: u32,
        result: Result<ForecastSeries, ForecastError>,
    },
}

struct App {
    locale: Locale,
    service: Arc<dyn ForecastService>,
    runtime: Handle,
    tx: UnboundedSender<Reply>,
    rx: UnboundedReceiver<Reply>,

    commodities: Vec<CommodityId>,
    selected_commodity: Option<usize>,
    horizon: u32,
    show_bounds: bool,
    selected_field: usize,
    catalog_error: Option<String>,

    board: ForecastBoard,
    status: String,
}

impl App {
    fn new(locale: Locale, service: Arc<dyn ForecastService>, runtime: Handle) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            locale,
            service,
            runtime,
            tx,
            rx,
            commodities: Vec::new(),
            selected_commodity: None,
            horizon: 1,
            show_bounds: true,
            selected_field: 0,
            catalog_error: None,
            board: ForecastBoard::new(),
            status: "Fetching commodities...".to_string(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            while let Ok(reply) = self.rx.try_recv() {
                self.apply_reply(reply);
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => self.selected_field = self.selected_field.saturating_sub(1),
            KeyCode::Down => self.selected_field = (self.selected_field + 1).min(2),
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter | KeyCode::Char('p') => self.submit(),
            KeyCode::Char('b') => self.toggle_bounds(),
            KeyCode::Char('r') => self.load_catalog(),
            _ => {}
        }
        false
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.selected_field {
            0 => {
                if self.commodities.is_empty() {
                    return;
                }
                let n = self.commodities.len();
                let next = match self.selected_commodity {
                    None => 0,
                    Some(i) if delta >= 0 => (i + 1) % n,
                    Some(i) => (i + n - 1) % n,
                };
                self.selected_commodity = Some(next);
                self.status = format!("commodity: {}", self.commodities[next]);
            }
            1 => {
                self.horizon = if delta >= 0 {
                    (self.horizon + 1).min(MAX_HORIZON)
                } else {
                    self.horizon.saturating_sub(1).max(1)
                };
                self.status = format!("months: {}", self.horizon);
            }
            2 => self.toggle_bounds(),
            _ => {}
        }
    }

    fn toggle_bounds(&mut self) {
        self.show_bounds = !self.show_bounds;
        self.board.reproject(self.show_bounds, self.locale);
        self.status = format!("bounds: {}", if self.show_bounds { "on" } else { "off" });
    }

    fn selected(&self) -> Option<&CommodityId> {
        self.selected_commodity.and_then(|i| self.commodities.get(i))
    }

    fn load_catalog(&mut self) {
        self.status = "Fetching commodities...".to_string();
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = pipeline::list_commodities(service.as_ref()).await;
            let _ = tx.send(Reply::Catalog(result));
        });
    }

    fn submit(&mut self) {
        let commodity = self.selected().cloned().unwrap_or_else(|| CommodityId::new(""));
        let req = match ForecastRequest::new(commodity, self.horizon) {
            Ok(req) => req,
            Err(err) => {
                self.status = err.to_string();
                self.board.reject(&err);
                return;
            }
        };

        let token = self.board.begin();
        self.status = format!("Forecasting {} for {} month(s)...", req.commodity, req.horizon);

        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result =
                pipeline::request_forecast(service.as_ref(), req.commodity.clone(), req.horizon).await;
            let _ = tx.send(Reply::Forecast {
                token,
                commodity: req.commodity,
                horizon: req.horizon,
                result,
            });
        });
    }

    fn apply_reply(&mut self, reply: Reply) {
        match reply {
            Reply::Catalog(Ok(list)) => {
                self.status = format!("{} commodities", list.len());
                self.selected_commodity = if list.is_empty() { None } else { Some(0) };
                self.commodities = list;
                self.catalog_error = None;
            }
            Reply::Catalog(Err(err)) => {
                self.commodities.clear();
                self.selected_commodity = None;
                self.status = err.to_string();
                self.catalog_error = Some(err.to_string());
            }
            Reply::Forecast {
                token,
                commodity,
                horizon,
                result,
            } => {
                let ok = result.is_ok();
                if self.board.resolve(token, result, commodity, horizon, self.show_bounds, self.locale) {
                    self.status = if ok {
                        "Forecast ready.".to_string()
                    } else {
                        self.board.error().unwrap_or_default().to_string()
                    };
                }
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("pangan", Style::default().fg(Color::Cyan)),
            Span::raw(" - commodity price forecasts"),
        ]));

        let commodity = self
            .selected()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string());
        let state = if self.board.is_loading() {
            "loading"
        } else if self.board.output().is_some() {
            "ready"
        } else {
            "idle"
        };
        lines.push(Line::from(Span::styled(
            format!(
                "commodity: {commodity} | months: {} | bounds: {} | {state}",
                self.horizon,
                if self.show_bounds { "on" } else { "off" },
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(0)])
            .split(area);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0)])
            .split(chunks[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(8)])
            .split(chunks[1]);

        self.draw_settings(frame, left[0]);
        self.draw_commodities(frame, left[1]);
        self.draw_chart(frame, right[0]);
        self.draw_summary(frame, right[1]);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let commodity = self
            .selected()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string());

        let items = vec![
            ListItem::new(format!("Commodity: {commodity}")),
            ListItem::new(format!("Months: {}", self.horizon)),
            ListItem::new(format!("Bounds: {}", if self.show_bounds { "on" } else { "off" })),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_commodities(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Commodities").borders(Borders::ALL);

        if let Some(err) = &self.catalog_error {
            let msg = Paragraph::new(err.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(msg, area);
            return;
        }

        let items: Vec<ListItem> = self
            .commodities
            .iter()
            .map(|c| ListItem::new(c.to_string()))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(self.selected_commodity);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = self
            .board
            .output()
            .map(|out| chart_text(&out.commodity, self.locale).title)
            .unwrap_or_else(|| "Forecast".to_string());
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let placeholder = |msg: &str, color: Color| {
            Paragraph::new(msg.to_string())
                .style(Style::default().fg(color))
                .wrap(Wrap { trim: true })
        };

        if self.board.is_loading() {
            frame.render_widget(placeholder("Forecasting...", Color::Yellow), inner);
            return;
        }
        if let Some(err) = self.board.error() {
            frame.render_widget(placeholder(err, Color::Red), inner);
            return;
        }
        let Some(out) = self.board.output() else {
            frame.render_widget(
                placeholder("Pick a commodity and press Enter to forecast.", Color::Gray),
                inner,
            );
            return;
        };
        if out.chart.is_empty() {
            frame.render_widget(placeholder("No forecast points returned.", Color::Yellow), inner);
            return;
        }

        let text = chart_text(&out.commodity, self.locale);
        let widget = ForecastPlottersChart {
            chart: &out.chart,
            x_label: text.x_axis,
            y_label: text.y_axis,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_summary(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = match self.locale {
            Locale::Id => "Ringkasan Prediksi",
            Locale::En => "Forecast summary",
        };
        let body = self
            .board
            .output()
            .map(|out| out.summary.text().to_string())
            .unwrap_or_default();
        let p = Paragraph::new(body)
            .wrap(Wrap { trim: true })
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter forecast  b bounds  r reload  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
