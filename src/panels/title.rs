//! src/panels/title.rs
//!
//! Header: monitor name, active source and session start.

use chrono::NaiveDateTime;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct TitlePanel<'a> {
    pub title: &'a str,
    pub source: &'a str,
    pub started: Option<NaiveDateTime>,
}

impl crate::ui::Panel for TitlePanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans = vec![
            Span::styled(self.title, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("  source: {}", self.source)),
        ];
        if let Some(start) = self.started {
            spans.push(Span::raw(format!("  started {}", start.format("%H:%M:%S"))));
        }
        let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
