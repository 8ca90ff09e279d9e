//! src/engine/config.rs
//!
//! Construction-time parameters for the strip-chart engine.
//!
//! Every threshold the chart depends on (physical bounds, jump threshold,
//! buffer, minimum span, idle timeout, grid densities) is passed in here
//! rather than read from global state. Defaults match a fetal heart rate
//! trace recorded in tenths of a beat per minute at 4 samples per second.

use std::time::Duration;

use super::error::ConfigError;
use super::store::CHANNELS;

/// Value-axis limits and auto-range hysteresis parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueAxisConfig {
    /// Lowest value the display range may ever reach.
    pub absolute_floor: f64,

    /// Highest value the display range may ever reach.
    pub absolute_ceiling: f64,

    /// Margin added around the observed bounds.
    pub buffer: f64,

    /// Smallest allowed height of the display range.
    pub minimum_span: f64,

    /// Observed bounds the session starts with, before any sample arrives.
    pub initial_bounds: (f64, f64),
}

impl Default for ValueAxisConfig {
    fn default() -> Self {
        Self {
            absolute_floor: 0.0,
            absolute_ceiling: 3000.0,
            buffer: 20.0,
            minimum_span: 50.0,
            initial_bounds: (1000.0, 2500.0),
        }
    }
}

/// Plausibility limits for neighbouring samples.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterConfig {
    /// Inclusive physical bounds of a channel value.
    pub physical_bounds: (f64, f64),

    /// Largest accepted difference between two neighbouring values.
    pub jump_threshold: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            physical_bounds: (0.0, 3000.0),
            jump_threshold: 400.0,
        }
    }
}

/// Where a session narrower than the viewport is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeedDirection {
    /// Newest sample at the right edge from the start (paper feeds from the right).
    #[default]
    FromRight,
    /// Oldest sample at the left edge until the viewport is full.
    FromLeft,
}

/// Horizontal scrolling, interaction and layout parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportConfig {
    /// Initial horizontal scale in pixels per index.
    pub scale: f64,

    /// Zoom limits for `scale`.
    pub min_scale: f64,
    pub max_scale: f64,

    /// Idle time after a manual interaction before auto-follow resumes.
    pub idle_timeout: Duration,

    /// Distance from the right edge at which a drag end resumes auto-follow.
    pub snap_tolerance_px: f64,

    /// Smallest scrollbar thumb width.
    pub min_thumb_width: f64,

    pub margin_top: f64,
    pub margin_bottom: f64,

    pub feed: FeedDirection,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            min_scale: 0.25,
            max_scale: 16.0,
            idle_timeout: Duration::from_secs(5),
            snap_tolerance_px: 10.0,
            min_thumb_width: 8.0,
            margin_top: 10.0,
            margin_bottom: 25.0,
            feed: FeedDirection::FromRight,
        }
    }
}

/// Grid densities and time-label rules.
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// Value distance between horizontal grid lines.
    pub value_step: f64,

    /// Every Nth horizontal line is major and labelled.
    pub value_major_every: i64,

    /// Index distance between vertical grid lines.
    pub time_minor_step: i64,

    /// Every Nth vertical line is major and labelled.
    pub time_major_every: i64,

    /// Producer sample rate, used for index to time conversion.
    pub samples_per_second: f64,

    /// Major time labels at multiples of this many elapsed seconds show the
    /// wall clock instead of elapsed minutes.
    pub clock_label_modulus_secs: i64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            value_step: 10.0,
            value_major_every: 5,
            time_minor_step: 40,
            time_major_every: 12,
            samples_per_second: 4.0,
            clock_label_modulus_secs: 240,
        }
    }
}

/// Everything the engine needs at construction time.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub value_axis: ValueAxisConfig,
    pub filter: FilterConfig,
    pub viewport: ViewportConfig,
    pub grid: GridConfig,

    /// Vertical pixel offset per channel (positive moves down).
    pub channel_offsets_px: [f64; CHANNELS],

    /// Largest index the store accepts. Bounded by [`MAX_INDEX_LIMIT`].
    pub max_index: i64,
}

/// Indices above this no longer map to distinct pixel positions.
pub const MAX_INDEX_LIMIT: i64 = 1 << 53;

impl EngineConfig {
    /// Defaults with a different initial scale.
    pub fn with_scale(scale: f64) -> Self {
        let mut cfg = Self::default();
        cfg.viewport.scale = scale;
        cfg
    }

    /// Check parameter consistency once, at construction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let axis = &self.value_axis;
        let all_finite = [
            axis.absolute_floor,
            axis.absolute_ceiling,
            axis.buffer,
            axis.minimum_span,
            axis.initial_bounds.0,
            axis.initial_bounds.1,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !all_finite {
            return Err(ConfigError::NonFinite("value_axis"));
        }
        if axis.minimum_span <= 0.0 || axis.buffer < 0.0 {
            return Err(ConfigError::InvalidValueAxis(
                "buffer must be >= 0 and minimum_span > 0".into(),
            ));
        }
        if axis.absolute_ceiling - axis.absolute_floor < axis.minimum_span {
            return Err(ConfigError::InvalidValueAxis(format!(
                "absolute bounds [{}, {}] narrower than minimum span {}",
                axis.absolute_floor, axis.absolute_ceiling, axis.minimum_span
            )));
        }
        if axis.initial_bounds.0 > axis.initial_bounds.1 {
            return Err(ConfigError::InvalidValueAxis(
                "initial_bounds must be ordered (min, max)".into(),
            ));
        }

        let (lo, hi) = self.filter.physical_bounds;
        if !lo.is_finite() || !hi.is_finite() || !self.filter.jump_threshold.is_finite() {
            return Err(ConfigError::NonFinite("filter"));
        }
        if lo > hi || self.filter.jump_threshold < 0.0 {
            return Err(ConfigError::InvalidFilter);
        }

        let vp = &self.viewport;
        if !(vp.min_scale > 0.0 && vp.min_scale <= vp.scale && vp.scale <= vp.max_scale) {
            return Err(ConfigError::InvalidScale {
                scale: vp.scale,
                min: vp.min_scale,
                max: vp.max_scale,
            });
        }
        if vp.snap_tolerance_px < 0.0 || vp.min_thumb_width < 0.0 {
            return Err(ConfigError::InvalidViewport);
        }
        if vp.margin_top < 0.0 || vp.margin_bottom < 0.0 {
            return Err(ConfigError::InvalidViewport);
        }

        let grid = &self.grid;
        if grid.value_step <= 0.0
            || grid.value_major_every <= 0
            || grid.time_minor_step <= 0
            || grid.time_major_every <= 0
            || grid.samples_per_second <= 0.0
            || grid.clock_label_modulus_secs <= 0
        {
            return Err(ConfigError::InvalidGrid);
        }

        if self.channel_offsets_px.iter().any(|o| !o.is_finite()) {
            return Err(ConfigError::NonFinite("channel_offsets_px"));
        }
        if !(0..=MAX_INDEX_LIMIT).contains(&self.max_index) {
            return Err(ConfigError::InvalidMaxIndex(self.max_index));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            value_axis: ValueAxisConfig::default(),
            filter: FilterConfig::default(),
            viewport: ViewportConfig::default(),
            grid: GridConfig::default(),
            channel_offsets_px: [0.0, 6.0, -6.0],
            max_index: 10_000_000,
        }
    }
}
