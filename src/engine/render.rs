//! src/engine/render.rs
//!
//! Projection of the visible window into backend-independent primitives.

use std::iter;

use chrono::NaiveDateTime;

use super::config::GridConfig;
use super::mapper::{self, CoordinateMapper};
use super::outlier::OutlierFilter;
use super::store::{CHANNELS, SampleStore};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal lines, labels on the left edge.
    Value,
    /// Vertical lines, labels in the bottom margin.
    Time,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineWeight {
    Minor,
    Major,
}

/// Horizontal placement of a label relative to its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Start,
    Center,
}

/// One drawing instruction, in viewport pixels (origin top-left, y down).
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Background {
        width: f64,
        height: f64,
    },
    GridLine {
        axis: Axis,
        weight: LineWeight,
        from: Point,
        to: Point,
    },
    Label {
        axis: Axis,
        anchor: Point,
        text: String,
        align: Align,
    },
    Segment {
        channel: usize,
        from: Point,
        to: Point,
    },
}

/// Read-only view over the chart state for one redraw.
///
/// [`RenderPipeline::primitives`] may be called any number of times and
/// yields the same sequence each time.
pub struct RenderPipeline<'a> {
    store: &'a SampleStore,
    filter: &'a OutlierFilter,
    grid: &'a GridConfig,
    offsets: [f64; CHANNELS],
    start_time: Option<NaiveDateTime>,
    mapper: CoordinateMapper,
}

impl<'a> RenderPipeline<'a> {
    pub fn new(
        store: &'a SampleStore,
        filter: &'a OutlierFilter,
        grid: &'a GridConfig,
        offsets: [f64; CHANNELS],
        start_time: Option<NaiveDateTime>,
        mapper: CoordinateMapper,
    ) -> Self {
        Self {
            store,
            filter,
            grid,
            offsets,
            start_time,
            mapper,
        }
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Indices whose samples can appear on screen.
    pub fn visible_range(&self) -> Option<(i64, i64)> {
        self.mapper.visible_indices(self.store.highest_index())
    }

    /// Background, value grid, time grid, then curves channel by channel.
    /// Empty when the viewport has no drawable area.
    pub fn primitives(&self) -> impl Iterator<Item = Primitive> + '_ {
        let m = self.mapper;
        m.is_drawable()
            .then(|| {
                iter::once(Primitive::Background {
                    width: m.width,
                    height: m.height,
                })
                .chain(self.value_grid())
                .chain(self.time_grid())
                .chain(self.segments())
            })
            .into_iter()
            .flatten()
    }

    fn value_grid(&self) -> impl Iterator<Item = Primitive> + '_ {
        let m = self.mapper;
        let line = move |value: f64, weight| {
            let y = m.y(value);
            Primitive::GridLine {
                axis: Axis::Value,
                weight,
                from: Point::new(0.0, y),
                to: Point::new(m.width, y),
            }
        };

        let minor = m
            .value_lines(self.grid)
            .filter(|&(_, major)| !major)
            .map(move |(v, _)| line(v, LineWeight::Minor));
        let major = m
            .value_lines(self.grid)
            .filter(|&(_, major)| major)
            .flat_map(move |(v, _)| {
                let label = Primitive::Label {
                    axis: Axis::Value,
                    anchor: Point::new(0.0, m.y(v)),
                    text: mapper::value_label(v),
                    align: Align::Start,
                };
                [line(v, LineWeight::Major), label]
            });
        minor.chain(major)
    }

    fn time_grid(&self) -> impl Iterator<Item = Primitive> + '_ {
        let m = self.mapper;
        let first = m.index_at(0.0).floor().max(0.0) as i64;
        let last = m.index_at(m.width).ceil() as i64;
        let (top, bottom) = (m.margin_top, m.height - m.margin_bottom);
        let line = move |index: i64, weight| {
            let x = m.x(index);
            Primitive::GridLine {
                axis: Axis::Time,
                weight,
                from: Point::new(x, top),
                to: Point::new(x, bottom),
            }
        };

        let minor = m
            .time_lines(self.grid, first, last)
            .filter(|&(_, major)| !major)
            .map(move |(i, _)| line(i, LineWeight::Minor));
        let major = m
            .time_lines(self.grid, first, last)
            .filter(|&(_, major)| major)
            .flat_map(move |(i, _)| {
                let label = Primitive::Label {
                    axis: Axis::Time,
                    anchor: Point::new(m.x(i), bottom),
                    text: mapper::time_label(i, self.grid, self.start_time),
                    align: if i == 0 { Align::Start } else { Align::Center },
                };
                [line(i, LineWeight::Major), label]
            });
        minor.chain(major)
    }

    fn segments(&self) -> impl Iterator<Item = Primitive> + '_ {
        self.visible_range().into_iter().flat_map(move |(first, last)| {
            (0..CHANNELS).flat_map(move |channel| {
                (first + 1..=last).filter_map(move |i| self.segment(channel, i))
            })
        })
    }

    /// Line from `index - 1` to `index` on `channel`, if the pair passes the
    /// filter.
    fn segment(&self, channel: usize, index: i64) -> Option<Primitive> {
        let prev = self.store.get(index - 1)?.value(channel);
        let cur = self.store.get(index)?.value(channel);
        let [a, b] = self.filter.candidates(cur, prev)?;
        let m = &self.mapper;
        let dy = self.offsets[channel];
        Some(Primitive::Segment {
            channel,
            from: Point::new(m.x(index - 1), m.y(b) + dy),
            to: Point::new(m.x(index), m.y(a) + dy),
        })
    }
}
