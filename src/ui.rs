//! src/ui.rs
//!
//! Top-level UI module re-exporting node helpers.

pub mod node;

use ratatui::layout::{Constraint, Direction};

pub use node::{Node, Panel, Slot, group, leaf};

/// Title bar, chart beside the read-out, key help at the bottom.
pub fn screen_layout() -> Node {
    group(
        Direction::Vertical,
        vec![
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ],
        vec![
            leaf(Slot::Title),
            group(
                Direction::Horizontal,
                vec![Constraint::Percentage(78), Constraint::Percentage(22)],
                vec![leaf(Slot::Chart), leaf(Slot::Readout)],
            ),
            leaf(Slot::Help),
        ],
    )
}
