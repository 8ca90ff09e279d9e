//! src/panels/help.rs

use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
};

const KEYS: &str = "q quit  ←/→ pan  Home oldest  End live  +/- zoom  r reset  \
                    mouse: drag trace or scrollbar, wheel pans";

pub struct HelpPanel;

impl crate::ui::Panel for HelpPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let p = Paragraph::new(KEYS).block(Block::default().title("Keys").borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
