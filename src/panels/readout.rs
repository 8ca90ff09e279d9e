//! src/panels/readout.rs
//!
//! Read-out panel: latest values, follow mode and value range.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use strip_monitor::StripChart;
use strip_monitor::engine::{CHANNELS, Mode};

pub struct ReadoutPanel<'a> {
    pub chart: &'a StripChart,
    pub now: Instant,
}

impl<'a> ReadoutPanel<'a> {
    pub fn new(chart: &'a StripChart, now: Instant) -> Self {
        Self { chart, now }
    }

    fn channel_lines(&self) -> Vec<Line<'static>> {
        let latest = self.chart.latest();
        (0..CHANNELS)
            .map(|ch| {
                let value = latest
                    .and_then(|s| s.value(ch))
                    .map_or_else(|| "--".to_string(), |v| format!("{v:.0}"));
                Line::from(vec![
                    Span::raw(format!("ch{}  ", ch + 1)),
                    Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
                ])
            })
            .collect()
    }

    fn mode_line(&self) -> Line<'static> {
        let vp = self.chart.viewport();
        match vp.mode() {
            Mode::Auto => Line::styled("following latest", Style::default().fg(Color::Green)),
            Mode::Manual => {
                let text = match vp.revert_deadline() {
                    Some(at) => format!(
                        "paused, live in {}s",
                        at.saturating_duration_since(self.now).as_secs() + 1
                    ),
                    None => "paused".to_string(),
                };
                Line::styled(text, Style::default().fg(Color::Yellow))
            }
        }
    }
}

impl crate::ui::Panel for ReadoutPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let range = self.chart.range();
        let store = self.chart.store();

        let mut lines = self.channel_lines();
        lines.push(Line::raw(""));
        lines.push(self.mode_line());
        lines.push(Line::raw(format!(
            "range {:.0}..{:.0}",
            range.display_min, range.display_max
        )));
        lines.push(Line::raw(format!(
            "samples {}  last #{}",
            store.len(),
            store
                .highest_index()
                .map_or_else(|| "-".to_string(), |i| i.to_string())
        )));
        lines.push(Line::raw(format!(
            "scale {:.2} px/sample",
            self.chart.viewport().state().scale
        )));

        let block = Block::default().title("Read-out").borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
