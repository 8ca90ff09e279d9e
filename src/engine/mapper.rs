//! src/engine/mapper.rs
//!
//! Index/value to pixel conversion and grid bucketing.
//!
//! Pixel space has its origin at the top-left corner of the viewport, y grows
//! downwards. The plot area sits between `margin_top` and
//! `height - margin_bottom`; the bottom margin carries the time labels.

use chrono::{NaiveDateTime, TimeDelta};

use super::config::GridConfig;

/// Span substituted for a degenerate (zero-height) value range.
pub const EPSILON_SPAN: f64 = 1e-6;

/// Snapshot of everything needed to place a point on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    pub width: f64,
    pub height: f64,

    /// Pixels per index.
    pub scale: f64,

    /// Left edge of the window inside the content, in pixels.
    pub offset: f64,

    /// Blank space before index 0 while the content is narrower than the
    /// viewport (right-aligned feed).
    pub lead: f64,

    pub margin_top: f64,
    pub margin_bottom: f64,

    pub display_min: f64,
    pub display_max: f64,
}

impl CoordinateMapper {
    pub fn x(&self, index: i64) -> f64 {
        index as f64 * self.scale - self.offset + self.lead
    }

    pub fn y(&self, value: f64) -> f64 {
        let span = (self.display_max - self.display_min).max(EPSILON_SPAN);
        self.height - self.margin_bottom - (value - self.display_min) * self.plot_height() / span
    }

    /// Fractional index under pixel column `x`.
    pub fn index_at(&self, x: f64) -> f64 {
        (x + self.offset - self.lead) / self.scale
    }

    pub fn plot_height(&self) -> f64 {
        self.height - self.margin_top - self.margin_bottom
    }

    /// Whether anything can be drawn at all.
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.plot_height() > 0.0 && self.scale > 0.0
    }

    /// Inclusive index interval covered by the viewport, capped at `highest`.
    pub fn visible_indices(&self, highest: Option<i64>) -> Option<(i64, i64)> {
        let highest = highest?;
        if !self.is_drawable() {
            return None;
        }
        let first = self.index_at(0.0).floor().max(0.0) as i64;
        let last = (self.index_at(self.width).ceil() as i64).min(highest);
        (first <= last).then_some((first, last))
    }

    /// Horizontal grid values inside the display range, ascending, flagged
    /// `true` when major.
    pub fn value_lines(&self, grid: &GridConfig) -> impl Iterator<Item = (f64, bool)> + use<> {
        let step = grid.value_step;
        let every = grid.value_major_every;
        let lo = (self.display_min / step).ceil() as i64;
        let hi = (self.display_max / step).floor() as i64;
        (lo..=hi).map(move |k| (k as f64 * step, k.rem_euclid(every) == 0))
    }

    /// Vertical grid indices inside `[first, last]` whose column falls on
    /// screen, ascending, flagged `true` when major.
    pub fn time_lines(
        &self,
        grid: &GridConfig,
        first: i64,
        last: i64,
    ) -> impl Iterator<Item = (i64, bool)> + use<> {
        let step = grid.time_minor_step;
        let every = grid.time_major_every;
        let lo = first.max(0).div_euclid(step) + i64::from(first.max(0).rem_euclid(step) != 0);
        let hi = last.div_euclid(step);
        let mapper = *self;
        (lo..=hi)
            .map(move |k| (k * step, k.rem_euclid(every) == 0))
            .filter(move |&(index, _)| {
                let x = mapper.x(index);
                x >= 0.0 && x <= mapper.width
            })
    }
}

/// Whole seconds elapsed at `index`.
pub fn elapsed_secs(index: i64, grid: &GridConfig) -> i64 {
    (index as f64 / grid.samples_per_second).floor() as i64
}

/// Label for a major time line: wall clock on the clock modulus when the
/// session start is known, elapsed minutes otherwise.
pub fn time_label(index: i64, grid: &GridConfig, start: Option<NaiveDateTime>) -> String {
    let secs = elapsed_secs(index, grid);
    if secs.rem_euclid(grid.clock_label_modulus_secs) == 0 {
        let clock = start.and_then(|s| {
            TimeDelta::try_seconds(secs).and_then(|d| s.checked_add_signed(d))
        });
        if let Some(at) = clock {
            return at.format("%H:%M").to_string();
        }
    }
    format!("{} min", secs / 60)
}

/// Text for a value-axis label.
pub fn value_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn mapper() -> CoordinateMapper {
        CoordinateMapper {
            width: 200.0,
            height: 135.0,
            scale: 2.0,
            offset: 100.0,
            lead: 0.0,
            margin_top: 10.0,
            margin_bottom: 25.0,
            display_min: 1000.0,
            display_max: 2000.0,
        }
    }

    #[test]
    fn maps_range_onto_plot_area() {
        let m = mapper();
        assert_eq!(m.y(1000.0), 110.0);
        assert_eq!(m.y(2000.0), 10.0);
        assert_eq!(m.y(1500.0), 60.0);
    }

    #[test]
    fn x_and_index_at_are_inverse() {
        let m = mapper();
        assert_eq!(m.x(50), 0.0);
        assert_eq!(m.x(150), 200.0);
        assert_eq!(m.index_at(m.x(77)), 77.0);
    }

    #[test]
    fn zero_span_does_not_divide_by_zero() {
        let mut m = mapper();
        m.display_max = m.display_min;
        assert!(m.y(1000.0).is_finite());
        assert!(m.y(1200.0).is_finite());
    }

    #[test]
    fn visible_indices_capped_at_highest() {
        let m = mapper();
        assert_eq!(m.visible_indices(Some(400)), Some((50, 150)));
        assert_eq!(m.visible_indices(Some(120)), Some((50, 120)));
        assert_eq!(m.visible_indices(Some(10)), None);
        assert_eq!(m.visible_indices(None), None);
    }

    #[test]
    fn lead_in_shifts_content_right() {
        let mut m = mapper();
        m.offset = 0.0;
        m.lead = 180.0;
        assert_eq!(m.x(10), 200.0);
        assert_eq!(m.visible_indices(Some(10)), Some((0, 10)));
    }

    #[test]
    fn degenerate_viewport_has_no_visible_indices() {
        let mut m = mapper();
        m.height = 30.0;
        assert!(!m.is_drawable());
        assert_eq!(m.visible_indices(Some(100)), None);
    }

    #[test]
    fn value_lines_mark_every_fifth() {
        let mut m = mapper();
        m.display_min = 995.0;
        m.display_max = 1062.0;
        let lines: Vec<_> = m.value_lines(&GridConfig::default()).collect();
        assert_eq!(lines.first(), Some(&(1000.0, true)));
        assert_eq!(lines.last(), Some(&(1060.0, false)));
        let majors: Vec<f64> = lines.iter().filter(|l| l.1).map(|l| l.0).collect();
        assert_eq!(majors, vec![1000.0, 1050.0]);
    }

    #[test]
    fn time_lines_stay_on_screen() {
        let m = mapper();
        let grid = GridConfig::default();
        let lines: Vec<_> = m.time_lines(&grid, 50, 150).collect();
        assert_eq!(lines, vec![(80, false), (120, false)]);
        let m = CoordinateMapper {
            offset: 900.0,
            ..mapper()
        };
        let lines: Vec<_> = m.time_lines(&grid, 450, 550).collect();
        assert_eq!(lines, vec![(480, true), (520, false)]);
    }

    #[test]
    fn time_label_switches_between_clock_and_minutes() {
        let grid = GridConfig::default();
        let start = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(8, 30, 0));
        // 480 indices = 120 s, not on the 240 s clock modulus
        assert_eq!(time_label(480, &grid, start), "2 min");
        assert_eq!(time_label(960, &grid, start), "08:34");
        assert_eq!(time_label(0, &grid, start), "08:30");
        assert_eq!(time_label(960, &grid, None), "4 min");
    }

    #[test]
    fn value_label_drops_integral_fraction() {
        assert_eq!(value_label(1050.0), "1050");
        assert_eq!(value_label(12.5), "12.5");
    }
}
