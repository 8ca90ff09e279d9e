//! src/ui/node.rs
//!
//! Recursive layout Node + Panel trait used across the UI.
//!
//! The tree only decides geometry. Leaves name a [`Slot`]; the app resolves
//! slots to rectangles once per frame, resizes the chart to its slot and then
//! draws the matching panel into each rectangle.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Panel trait: any renderable surface implements this.
pub trait Panel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect);
}

/// Named regions of the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Title,
    Chart,
    Readout,
    Help,
}

pub enum Node {
    Group {
        direction: Direction,
        constraints: Vec<Constraint>,
        children: Vec<Node>,
    },
    Leaf {
        slot: Slot,
    },
}

impl Node {
    /// Resolve every leaf to its rectangle inside `area`, in tree order.
    pub fn split(&self, area: Rect) -> Vec<(Slot, Rect)> {
        let mut out = Vec::new();
        self.collect(area, &mut out);
        out
    }

    /// Rectangle of `slot`, if the tree contains it.
    pub fn area_of(&self, area: Rect, slot: Slot) -> Option<Rect> {
        self.split(area)
            .into_iter()
            .find_map(|(s, r)| (s == slot).then_some(r))
    }

    fn collect(&self, area: Rect, out: &mut Vec<(Slot, Rect)>) {
        match self {
            Node::Group {
                direction,
                constraints,
                children,
            } => {
                let chunks = Layout::default()
                    .direction(*direction)
                    .constraints(constraints.clone())
                    .split(area);
                for (child, chunk) in children.iter().zip(chunks.iter()) {
                    child.collect(*chunk, out);
                }
            }
            Node::Leaf { slot } => out.push((*slot, area)),
        }
    }
}

/// Helper: create a group node.
pub fn group(direction: Direction, constraints: Vec<Constraint>, children: Vec<Node>) -> Node {
    Node::Group {
        direction,
        constraints,
        children,
    }
}

/// Helper: create a leaf node.
pub fn leaf(slot: Slot) -> Node {
    Node::Leaf { slot }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_visits_leaves_in_order() {
        let root = group(
            Direction::Vertical,
            vec![Constraint::Length(3), Constraint::Min(0)],
            vec![
                leaf(Slot::Title),
                group(
                    Direction::Horizontal,
                    vec![Constraint::Percentage(75), Constraint::Percentage(25)],
                    vec![leaf(Slot::Chart), leaf(Slot::Readout)],
                ),
            ],
        );
        let area = Rect::new(0, 0, 100, 30);
        let slots: Vec<Slot> = root.split(area).into_iter().map(|(s, _)| s).collect();
        assert_eq!(slots, vec![Slot::Title, Slot::Chart, Slot::Readout]);
        assert_eq!(root.area_of(area, Slot::Chart), Some(Rect::new(0, 3, 75, 27)));
        assert_eq!(root.area_of(area, Slot::Help), None);
    }
}
