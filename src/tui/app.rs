//! Main TUI application state and event loop

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::{Frame, Terminal};

use crate::detail::Detail;
use crate::interaction::Interaction;
use crate::layout::{resolve_canvas, Canvas, Point, Scene, SceneCache, Viewport};
use crate::model::{Chart, Spectrum};

use super::views::{draw_detail_popup, draw_diagram, draw_legend, draw_tabs, DiagramStyle};
use super::widgets::{color_bg, draw_command_palette, draw_status_bar, StatusTone};

/// Canvas units per terminal cell, horizontally and vertically
const CELL_WIDTH: f64 = 8.0;
const CELL_HEIGHT: f64 = 16.0;

const LEGEND_WIDTH: u16 = 34;

/// Configuration for launching the TUI
pub struct TuiConfig {
    pub spectrum: Spectrum,

    /// Index of the chart shown first
    pub chart: usize,

    /// Start in fullscreen mode
    pub fullscreen: bool,
}

/// Main application state
pub struct App {
    spectrum: Spectrum,

    /// Selection, fullscreen flag and active chart
    state: Interaction,

    /// Last laid out scene
    cache: SceneCache,

    /// Canvas size and screen area of the most recent draw
    canvas: Canvas,
    diagram_area: Rect,

    /// Status message and tone
    status_message: String,
    status_tone: StatusTone,

    /// Command mode state
    command_mode: bool,
    command_buffer: String,

    should_quit: bool,
}

impl App {
    fn new(config: TuiConfig) -> Self {
        let mut state = Interaction::new(config.chart);
        state.fullscreen = config.fullscreen;

        let chart = &config.spectrum.charts[config.chart];
        let viewport = Viewport {
            width: config.spectrum.canvas.width,
            height: chart.height,
        };
        let canvas = resolve_canvas(&config.spectrum.canvas, chart, viewport, state.fullscreen);

        Self {
            spectrum: config.spectrum,
            state,
            cache: SceneCache::default(),
            canvas,
            diagram_area: Rect::default(),
            status_message: "Move the mouse or press j/k to explore, ':' for commands".to_string(),
            status_tone: StatusTone::Info,
            command_mode: false,
            command_buffer: String::new(),
            should_quit: false,
        }
    }

    fn set_status<S: Into<String>>(&mut self, message: S, tone: StatusTone) {
        self.status_message = message.into();
        self.status_tone = tone;
    }

    fn chart(&self) -> &Chart {
        &self.spectrum.charts[self.state.chart]
    }

    fn scene(&mut self) -> &Scene {
        self.cache.get(&self.spectrum.charts[self.state.chart], self.canvas)
    }

    /// Recompute the canvas for the space the diagram gets on screen
    fn fit_to(&mut self, area: Rect) {
        self.diagram_area = area;
        let inner = area.inner(&Margin::new(1, 1));
        let viewport = Viewport {
            width: inner.width as f64 * CELL_WIDTH,
            height: inner.height as f64 * CELL_HEIGHT,
        };
        let chart = &self.spectrum.charts[self.state.chart];
        self.canvas = resolve_canvas(&self.spectrum.canvas, chart, viewport, self.state.fullscreen);
    }

    fn inner_area(&self) -> Rect {
        self.diagram_area.inner(&Margin::new(1, 1))
    }

    /// Screen cell -> canvas point, plus the canvas extent of half a cell
    fn cell_to_canvas(&self, column: u16, row: u16) -> Option<(Point, f64)> {
        let inner = self.inner_area();
        if inner.width == 0
            || inner.height == 0
            || column < inner.x
            || row < inner.y
            || column >= inner.x + inner.width
            || row >= inner.y + inner.height
        {
            return None;
        }
        let sx = self.canvas.width / inner.width as f64;
        let sy = self.canvas.height / inner.height as f64;
        let point = Point::new(
            (column - inner.x) as f64 * sx + sx / 2.0,
            (row - inner.y) as f64 * sy + sy / 2.0,
        );
        Some((point, sx.max(sy) / 2.0))
    }

    /// Canvas point -> screen cell
    fn canvas_to_cell(&self, point: Point) -> (u16, u16) {
        let inner = self.inner_area();
        let column = point.x / self.canvas.width * inner.width as f64;
        let row = point.y / self.canvas.height * inner.height as f64;
        (
            inner.x + (column.max(0.0) as u16).min(inner.width.saturating_sub(1)),
            inner.y + (row.max(0.0) as u16).min(inner.height.saturating_sub(1)),
        )
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Moved) {
            return;
        }
        let hit = self
            .cell_to_canvas(mouse.column, mouse.row)
            .and_then(|(point, slack)| self.scene().hit_test(point, slack));
        match hit {
            Some(target) if !self.state.is_selected(&target) => self.state.hover(target),
            Some(_) => {}
            None if self.state.selection.is_some() => self.state.leave(),
            None => {}
        }
    }

    /// Move the selection through the chart's targets in reading order
    fn step(&mut self, delta: isize) {
        let targets = self.scene().targets();
        if targets.is_empty() {
            return;
        }
        let len = targets.len() as isize;
        let next = match &self.state.selection {
            Some(current) => match targets.iter().position(|t| t == current) {
                Some(i) => (i as isize + delta).rem_euclid(len),
                None => 0,
            },
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.state.hover(targets[next as usize].clone());
    }

    fn switch_chart(&mut self, index: usize) {
        self.state.switch_chart(index);
        let tab = self.chart().tab.clone();
        self.set_status(format!("Showing {}", tab), StatusTone::Info);
    }

    fn cycle_chart(&mut self, delta: isize) {
        let len = self.spectrum.charts.len() as isize;
        let next = (self.state.chart as isize + delta).rem_euclid(len) as usize;
        self.switch_chart(next);
    }

    fn enter_command_mode(&mut self) {
        self.command_mode = true;
        self.command_buffer.clear();
        self.set_status(":", StatusTone::Info);
    }

    fn execute_command(&mut self, command: &str) {
        let (name, arg) = match command.split_once(' ') {
            Some((name, arg)) => (name, Some(arg.trim())),
            None => (command, None),
        };
        match (name, arg) {
            ("q" | "quit", None) => self.should_quit = true,
            ("fullscreen" | "fs", None) => self.state.toggle_fullscreen(),
            ("clear", None) => self.state.leave(),
            ("select" | "s", Some(id)) => match self.chart().target(id) {
                Some(target) => {
                    let message = format!("Selected {} '{}'", target.kind(), id);
                    self.set_status(message, StatusTone::Success);
                    self.state.hover(target);
                }
                None => {
                    let message = format!("No node, track or overlay '{}'", id);
                    self.set_status(message, StatusTone::Warning);
                }
            },
            ("chart" | "c", Some(id)) => match self.spectrum.chart_index(Some(id)) {
                Ok(index) => self.switch_chart(index),
                Err(e) => self.set_status(e.to_string(), StatusTone::Error),
            },
            _ => self.set_status(format!("Unknown command: {}", command), StatusTone::Error),
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) -> bool {
        if !self.command_mode {
            return false;
        }
        match key.code {
            KeyCode::Esc => {
                self.command_mode = false;
                self.command_buffer.clear();
                self.set_status("Command canceled", StatusTone::Info);
            }
            KeyCode::Enter => {
                let command = self.command_buffer.trim().to_string();
                self.command_mode = false;
                self.command_buffer.clear();
                if command.is_empty() {
                    self.set_status("Empty command", StatusTone::Info);
                } else {
                    self.execute_command(&command);
                }
            }
            KeyCode::Backspace | KeyCode::Delete => {
                self.command_buffer.pop();
            }
            KeyCode::Char(c) => {
                self.command_buffer.push(c);
            }
            _ => {}
        }
        true
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press || self.handle_command_key(key) {
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                if !self.state.escape() {
                    self.should_quit = true;
                }
            }
            KeyCode::Char(':') => self.enter_command_mode(),
            KeyCode::Tab => self.cycle_chart(1),
            KeyCode::BackTab => self.cycle_chart(-1),
            KeyCode::Char('f') => self.state.toggle_fullscreen(),
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => self.step(1),
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => self.step(-1),
            _ => {}
        }
    }

    fn state_line(&self) -> String {
        let selection = match &self.state.selection {
            Some(target) => format!("{} {}", target.kind(), target.id()),
            None => "none".to_string(),
        };
        format!(
            "Chart: {} · Selected: {} · Canvas: {}x{} · Fullscreen: {}",
            self.chart().id,
            selection,
            self.canvas.width,
            self.canvas.height,
            if self.state.fullscreen { "on" } else { "off" }
        )
    }

    fn help_line(&self) -> &'static str {
        "Keys: Tab chart · j/k step · f fullscreen · Esc close · : cmd · q quit"
    }
}

/// Run the TUI with the given configuration
pub fn run_tui(config: TuiConfig) -> Result<()> {
    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app);

    cleanup_terminal(terminal)?;
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| draw_ui(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                // The next draw fits the layout to the new size
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw_ui(frame: &mut Frame<'_>, app: &mut App) {
    // Background
    frame.render_widget(
        Block::default().style(Style::default().bg(color_bg())),
        frame.size(),
    );

    let diagram_area = if app.state.fullscreen {
        frame.size()
    } else {
        // Layout: tabs + (diagram | legend) + status bar
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(
                [
                    Constraint::Length(3),
                    Constraint::Min(10),
                    Constraint::Length(5),
                ]
                .as_ref(),
            )
            .split(frame.size());
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(LEGEND_WIDTH)].as_ref())
            .split(rows[1]);

        draw_tabs(frame, rows[0], &app.spectrum, app.state.chart);
        draw_legend(frame, columns[1], app.chart());
        draw_status_bar(
            frame,
            rows[2],
            &app.status_message,
            app.status_tone,
            &app.state_line(),
            app.help_line(),
        );
        columns[0]
    };

    app.fit_to(diagram_area);
    let title = if app.state.fullscreen {
        format!("{} · Esc to exit fullscreen", app.chart().tab)
    } else {
        app.chart().tab.clone()
    };
    let style = DiagramStyle {
        title,
        node_labels: app.state.fullscreen,
    };

    let chart = &app.spectrum.charts[app.state.chart];
    let scene = app.cache.get(chart, app.canvas);
    draw_diagram(frame, diagram_area, chart, scene, &app.state, &style);

    let popup = app.state.selection.as_ref().and_then(|target| {
        let anchor = scene.anchor(target)?;
        Some((anchor, Detail::for_target(chart, target)?))
    });
    if let Some((anchor, detail)) = popup {
        let cell = app.canvas_to_cell(anchor);
        draw_detail_popup(frame, app.inner_area(), cell, &detail);
    }

    // Draw command palette if active
    if app.command_mode {
        draw_command_palette(frame, frame.size(), &app.command_buffer);
    }
}

fn cleanup_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
