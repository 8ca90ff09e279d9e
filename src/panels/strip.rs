//! src/panels/strip.rs
//!
//! Strip chart panel: draws the engine's primitives on a braille canvas and a
//! one-row scrollbar underneath.
//!
//! A braille cell holds 2x4 dots, so the chart is sized in dots and one
//! terminal column covers two horizontal pixels.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Paragraph,
        canvas::{Canvas, Context, Line as CanvasLine},
    },
};

use strip_monitor::StripChart;
use strip_monitor::engine::{Align, LineWeight, Mode, Primitive};

pub const DOTS_X: f64 = 2.0;
pub const DOTS_Y: f64 = 4.0;

const CHANNEL_COLORS: [Color; 3] = [Color::Green, Color::Cyan, Color::Magenta];

/// Where the plot and the scrollbar sit inside the panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StripGeometry {
    pub block: Rect,
    pub plot: Rect,
    pub scrollbar: Rect,
}

impl StripGeometry {
    pub fn new(area: Rect) -> Self {
        let inner = Block::bordered().inner(area);
        let [plot, scrollbar] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
        Self {
            block: area,
            plot,
            scrollbar,
        }
    }

    /// Plot size in canvas dots.
    pub fn pixel_size(&self) -> (f64, f64) {
        (
            f64::from(self.plot.width) * DOTS_X,
            f64::from(self.plot.height) * DOTS_Y,
        )
    }

    /// Horizontal dot position of a terminal column, relative to the plot.
    pub fn x_px(&self, column: u16) -> f64 {
        f64::from(column) * DOTS_X - f64::from(self.plot.x) * DOTS_X + DOTS_X / 2.0
    }

    pub fn in_plot(&self, column: u16, row: u16) -> bool {
        self.plot.contains(Position::new(column, row))
    }

    pub fn in_scrollbar(&self, column: u16, row: u16) -> bool {
        self.scrollbar.contains(Position::new(column, row))
    }

    pub fn in_panel(&self, column: u16, row: u16) -> bool {
        self.block.contains(Position::new(column, row))
    }
}

pub struct StripPanel<'a> {
    pub chart: &'a StripChart,
    pub title: &'a str,
}

impl<'a> StripPanel<'a> {
    pub fn new(chart: &'a StripChart, title: &'a str) -> Self {
        Self { chart, title }
    }

    fn scrollbar_line(&self, geo: &StripGeometry) -> Line<'static> {
        let cols = usize::from(geo.scrollbar.width);
        let Some(bar) = self.chart.viewport().scrollbar() else {
            return Line::styled("─".repeat(cols), Style::default().fg(Color::DarkGray));
        };
        let left = ((bar.thumb_left / DOTS_X).round() as usize).min(cols);
        let width = ((bar.thumb_width / DOTS_X).ceil() as usize).clamp(1, cols - left.min(cols - 1));
        let right = cols.saturating_sub(left + width);
        Line::from(vec![
            Span::styled("─".repeat(left), Style::default().fg(Color::DarkGray)),
            Span::styled("█".repeat(width), Style::default().fg(Color::Gray)),
            Span::styled("─".repeat(right), Style::default().fg(Color::DarkGray)),
        ])
    }
}

/// Grid and labels first, curves on a layer above.
fn paint(ctx: &mut Context<'_>, prims: &[Primitive], height: f64) {
    let flip = |y: f64| height - y;
    for p in prims {
        match p {
            Primitive::GridLine {
                weight, from, to, ..
            } => {
                let color = match weight {
                    LineWeight::Minor => Color::Rgb(40, 40, 40),
                    LineWeight::Major => Color::DarkGray,
                };
                ctx.draw(&CanvasLine::new(from.x, flip(from.y), to.x, flip(to.y), color));
            }
            Primitive::Label {
                anchor, text, align, ..
            } => {
                let x = match align {
                    Align::Start => anchor.x,
                    Align::Center => anchor.x - text.chars().count() as f64 * DOTS_X / 2.0,
                };
                let span = Span::styled(text.clone(), Style::default().fg(Color::Gray));
                ctx.print(x.max(0.0), flip(anchor.y + DOTS_Y), span);
            }
            Primitive::Background { .. } | Primitive::Segment { .. } => {}
        }
    }

    // curves above the grid
    ctx.layer();
    for p in prims {
        if let Primitive::Segment { channel, from, to } = p {
            let color = CHANNEL_COLORS[channel % CHANNEL_COLORS.len()];
            ctx.draw(&CanvasLine::new(from.x, flip(from.y), to.x, flip(to.y), color));
        }
    }
}

impl crate::ui::Panel for StripPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let geo = StripGeometry::new(area);
        let (mode, style) = match self.chart.viewport().mode() {
            Mode::Auto => ("LIVE", Style::default().fg(Color::Green)),
            Mode::Manual => (
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        };
        let block = Block::bordered().title(Line::from(vec![
            Span::raw(format!(" {} ", self.title)),
            Span::styled(format!("[{mode}] "), style),
        ]));
        f.render_widget(block, area);

        if geo.plot.width == 0 || geo.plot.height == 0 {
            return;
        }
        let (w, h) = geo.pixel_size();
        let prims: Vec<Primitive> = self.chart.render().primitives().collect();
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, w])
            .y_bounds([0.0, h])
            .paint(move |ctx| paint(ctx, &prims, h));
        f.render_widget(canvas, geo.plot);

        if geo.scrollbar.width > 0 {
            f.render_widget(Paragraph::new(self.scrollbar_line(&geo)), geo.scrollbar);
        }
    }
}
