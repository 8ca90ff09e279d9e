//! src/app.rs
//!
//! Strip-chart monitor application.
//!
//! # Top-Level Application (`app.rs`)
//!
//! Builds the chart, starts the selected sample source and runs the UI main
//! loop.
//!
//! ## Sources
//! - `--file <PATH>`: replay a recording, one batch of 4 values per second,
//!   each value mirrored onto all three channels.
//! - `--serial <PORT>`: `c1,c2,c3` record lines from a serial port, read on a
//!   background thread.
//! - `--simulate [--seed N]`: synthetic trace with dropouts and spikes.
//! - `--listen <ADDR>`: TCP sample feed (see `strip_monitor::net::feed`),
//!   usable together with any of the above.
//!
//! # Keyboard Controls
//!
//! - **q** quit and restore terminal state.
//! - **← / →** pan by a quarter screen (pauses auto-follow).
//! - **Home** jump to the oldest data.
//! - **End** resume following the latest sample.
//! - **+ / -** zoom in / out.
//! - **r** drop the session and start over.
//!
//! # Mouse
//!
//! Dragging the trace pans it, dragging the scrollbar thumb moves the window
//! proportionally, clicking the scrollbar track jumps there and the wheel pans.
//! Releasing close to the right edge resumes auto-follow at once, otherwise it
//! resumes after five idle seconds.

use std::io::stdout;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use log::{info, warn};
use ratatui::Frame;

use strip_monitor::engine::{DragSource, EngineConfig, FeedDirection, InputEvent};
use strip_monitor::net::spawn_feed;
use strip_monitor::source::{
    ChannelLayout, Playback, SampleSource, Simulated, start_serial_reader, text,
};
use strip_monitor::{Sample, StripChart};

use crate::cli::Cli;
use crate::panels::strip::DOTS_X;
use crate::panels::{HelpPanel, ReadoutPanel, StripGeometry, StripPanel, TitlePanel};
use crate::ui::{Node, Panel, Slot, screen_layout};

const TITLE: &str = "Strip Monitor";
const FRAME_TIME: Duration = Duration::from_millis(100);
const FEED_PERIOD: Duration = Duration::from_secs(1);
const WHEEL_STEP_PX: f64 = 20.0;

struct App {
    chart: StripChart,
    layout: Node,
    geometry: StripGeometry,
    source: Option<Box<dyn SampleSource>>,
    source_label: String,
    rx: Receiver<Sample>,
    last_feed: Option<Instant>,
    running: bool,
}

/// Engine settings for a braille canvas: margins of one and two cell rows.
fn engine_config(cli: &Cli) -> EngineConfig {
    let mut cfg = EngineConfig::with_scale(cli.scale);
    cfg.viewport.margin_top = 4.0;
    cfg.viewport.margin_bottom = 8.0;
    cfg.viewport.snap_tolerance_px = 4.0;
    if cli.feed_left {
        cfg.viewport.feed = FeedDirection::FromLeft;
    }
    cfg
}

pub fn run(cli: Cli) -> Result<()> {
    let chart = StripChart::new(engine_config(&cli))
        .wrap_err("invalid chart configuration")?
        .with_start_time(Local::now().naive_local());

    let (tx, rx) = mpsc::channel::<Sample>();
    let mut source: Option<Box<dyn SampleSource>> = None;
    let mut source_label = "none".to_string();

    if let Some(path) = &cli.file {
        let values = text::load_values(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        source = Some(Box::new(Playback::new(values, ChannelLayout::Mirrored)));
        source_label = path.display().to_string();
    } else if let Some(port) = &cli.serial {
        start_serial_reader(port, cli.baud, tx.clone())
            .wrap_err_with(|| format!("failed to open serial port {port}"))?;
        source_label = format!("{port} @ {}", cli.baud);
    } else if cli.simulate {
        source = Some(Box::new(Simulated::new(cli.seed)));
        source_label = "simulated".to_string();
    }

    if let Some(addr) = &cli.listen {
        spawn_feed(addr.as_str(), tx.clone())
            .wrap_err_with(|| format!("failed to listen on {addr}"))?;
        source_label.push_str(&format!(" + tcp {addr}"));
    }
    drop(tx);
    info!("session started, source: {source_label}");

    let mut app = App {
        chart,
        layout: screen_layout(),
        geometry: StripGeometry::default(),
        source,
        source_label,
        rx,
        last_feed: None,
        running: true,
    };

    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;
    let result = app.main_loop(&mut terminal);
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

impl App {
    fn main_loop(&mut self, terminal: &mut ratatui::DefaultTerminal) -> Result<()> {
        while self.running {
            let frame_start = Instant::now();

            self.pull_samples(frame_start);
            self.chart.tick(frame_start);

            terminal.draw(|f| self.draw(f))?;

            while event::poll(Duration::from_millis(0))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key(key.code),
                    Event::Mouse(mouse) => self.on_mouse(mouse),
                    _ => {}
                }
            }

            let elapsed = frame_start.elapsed();
            if elapsed < FRAME_TIME {
                thread::sleep(FRAME_TIME - elapsed);
            }
        }
        Ok(())
    }

    /// Drain pushed samples, then poll the pull source once per feed period.
    fn pull_samples(&mut self, now: Instant) {
        let pushed: Vec<Sample> = self.rx.try_iter().collect();
        if !pushed.is_empty() {
            self.chart.ingest(pushed);
        }

        if self.last_feed.is_some_and(|t| now.duration_since(t) < FEED_PERIOD) {
            return;
        }
        self.last_feed = Some(now);
        let Some(source) = self.source.as_mut() else {
            return;
        };
        match source.next_batch() {
            Ok(Some(batch)) => {
                self.chart.ingest(batch);
            }
            Ok(None) => {
                info!("source {} exhausted", self.source_label);
                self.source = None;
            }
            Err(e) => {
                warn!("source {} failed: {e}", self.source_label);
                self.source = None;
            }
        }
    }

    fn draw(&mut self, f: &mut Frame<'_>) {
        if let Some(chart_area) = self.layout.area_of(f.area(), Slot::Chart) {
            self.geometry = StripGeometry::new(chart_area);
            let (w, h) = self.geometry.pixel_size();
            self.chart.resize(w, h);
        }

        let now = Instant::now();
        for (slot, area) in self.layout.split(f.area()) {
            match slot {
                Slot::Title => TitlePanel {
                    title: TITLE,
                    source: &self.source_label,
                    started: self.chart.start_time(),
                }
                .draw(f, area),
                Slot::Chart => StripPanel::new(&self.chart, "Trace").draw(f, area),
                Slot::Readout => ReadoutPanel::new(&self.chart, now).draw(f, area),
                Slot::Help => HelpPanel.draw(f, area),
            }
        }
    }

    fn on_key(&mut self, code: KeyCode) {
        let now = Instant::now();
        let (width, _) = self.chart.viewport().size();
        match code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Left => {
                self.chart
                    .handle_input(InputEvent::ScrollBy { delta: -width / 4.0 }, now);
            }
            KeyCode::Right => {
                self.chart
                    .handle_input(InputEvent::ScrollBy { delta: width / 4.0 }, now);
            }
            KeyCode::Home => {
                self.chart
                    .handle_input(InputEvent::ScrollTo { offset: 0.0 }, now);
            }
            KeyCode::End => self.chart.follow_latest(),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let scale = self.chart.viewport().state().scale;
                self.chart.set_scale(scale * 2.0);
            }
            KeyCode::Char('-') => {
                let scale = self.chart.viewport().state().scale;
                self.chart.set_scale(scale / 2.0);
            }
            KeyCode::Char('r') => self.chart.reset(),
            _ => {}
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        let now = Instant::now();
        let geo = self.geometry;
        let (col, row) = (mouse.column, mouse.row);
        let x = geo.x_px(col);

        let event = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if geo.in_scrollbar(col, row) => {
                self.scrollbar_press(x)
            }
            MouseEventKind::Down(MouseButton::Left) if geo.in_plot(col, row) => {
                Some(InputEvent::DragBegin {
                    source: DragSource::Canvas,
                    x,
                })
            }
            MouseEventKind::Drag(MouseButton::Left) if geo.in_panel(col, row) => {
                Some(InputEvent::DragMove { x })
            }
            MouseEventKind::Drag(MouseButton::Left) => Some(InputEvent::PointerLeave),
            MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::DragEnd),
            MouseEventKind::ScrollUp if geo.in_panel(col, row) => {
                Some(InputEvent::ScrollBy { delta: -WHEEL_STEP_PX })
            }
            MouseEventKind::ScrollDown if geo.in_panel(col, row) => {
                Some(InputEvent::ScrollBy { delta: WHEEL_STEP_PX })
            }
            _ => None,
        };
        if let Some(event) = event {
            self.chart.handle_input(event, now);
        }
    }

    /// Thumb press starts a drag, a press on the track centres the thumb there.
    fn scrollbar_press(&self, x: f64) -> Option<InputEvent> {
        let bar = self.chart.viewport().scrollbar()?;
        if bar.contains(x) || bar.contains(x - DOTS_X / 2.0) {
            return Some(InputEvent::DragBegin {
                source: DragSource::ScrollThumb,
                x,
            });
        }
        let travel = bar.track_width - bar.thumb_width;
        if travel <= 0.0 {
            return None;
        }
        let left = (x - bar.thumb_width / 2.0).clamp(0.0, travel);
        Some(InputEvent::ScrollTo {
            offset: left / travel * self.chart.viewport().max_offset(),
        })
    }
}
