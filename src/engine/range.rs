//! src/engine/range.rs
//!
//! Auto-ranging value axis with buffer, absolute limits and a minimum span.
//!
//! The visible range only ever widens during a session: once an extreme has
//! been seen it stays on screen, so a later excursion to the same level does
//! not clip again.

use super::config::ValueAxisConfig;

/// Observed and displayed bounds of the value axis.
///
/// Maintains `display_min <= current_min <= current_max <= display_max` and
/// `display_max - display_min >= minimum_span`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeState {
    /// Tightest bounds observed so far (after outlier rejection).
    pub current_min: f64,
    pub current_max: f64,

    /// Bounds used for drawing.
    pub display_min: f64,
    pub display_max: f64,
}

impl RangeState {
    pub fn display_span(&self) -> f64 {
        self.display_max - self.display_min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.display_min && value <= self.display_max
    }
}

#[derive(Clone, Debug)]
pub struct AutoRange {
    config: ValueAxisConfig,
    state: RangeState,
}

impl AutoRange {
    pub fn new(config: ValueAxisConfig) -> Self {
        let state = Self::initial_state(&config);
        Self { config, state }
    }

    pub fn state(&self) -> RangeState {
        self.state
    }

    /// Offer an accepted value. Returns `true` when the range changed.
    pub fn offer(&mut self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let before = self.state;
        let (floor, ceiling) = (self.config.absolute_floor, self.config.absolute_ceiling);

        if value < self.state.current_min {
            self.state.current_min = value.floor().max(floor);
        }
        if value > self.state.current_max {
            self.state.current_max = value.ceil().min(ceiling);
        }
        if self.state.current_min == before.current_min
            && self.state.current_max == before.current_max
        {
            return false;
        }

        let (lo, hi) = display_for(&self.config, self.state.current_min, self.state.current_max);
        self.state.display_min = self.state.display_min.min(lo);
        self.state.display_max = self.state.display_max.max(hi);
        self.state != before
    }

    /// Back to the configured initial bounds.
    pub fn reset(&mut self) {
        self.state = Self::initial_state(&self.config);
    }

    fn initial_state(config: &ValueAxisConfig) -> RangeState {
        let (floor, ceiling) = (config.absolute_floor, config.absolute_ceiling);
        let current_min = config.initial_bounds.0.max(floor).min(ceiling);
        let current_max = config.initial_bounds.1.max(current_min).min(ceiling);
        let (display_min, display_max) = display_for(config, current_min, current_max);
        RangeState {
            current_min,
            current_max,
            display_min,
            display_max,
        }
    }
}

/// Buffered, clamped window for the given observed bounds, widened to the
/// minimum span around its midpoint and kept inside the absolute limits.
fn display_for(cfg: &ValueAxisConfig, current_min: f64, current_max: f64) -> (f64, f64) {
    let (floor, ceiling) = (cfg.absolute_floor, cfg.absolute_ceiling);
    let mut lo = (current_min - cfg.buffer).max(floor);
    let mut hi = (current_max + cfg.buffer).min(ceiling);

    if hi - lo < cfg.minimum_span {
        let mid = (hi + lo) / 2.0;
        let half = cfg.minimum_span / 2.0;
        lo = mid - half;
        hi = mid + half;
        if lo < floor {
            hi += floor - lo;
            lo = floor;
        }
        if hi > ceiling {
            lo = (lo - (hi - ceiling)).max(floor);
            hi = ceiling;
        }
    }
    (lo, hi)
}

impl Default for AutoRange {
    fn default() -> Self {
        Self::new(ValueAxisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn narrow() -> ValueAxisConfig {
        ValueAxisConfig {
            initial_bounds: (1400.0, 1400.0),
            ..ValueAxisConfig::default()
        }
    }

    #[test]
    fn initial_display_is_buffered() {
        let r = AutoRange::default().state();
        assert_eq!((r.current_min, r.current_max), (1000.0, 2500.0));
        assert_eq!((r.display_min, r.display_max), (980.0, 2520.0));
    }

    #[test]
    fn offer_widens_by_floor_and_ceil() {
        let mut r = AutoRange::default();
        assert!(r.offer(950.4));
        assert!(r.offer(2600.2));
        let s = r.state();
        assert_eq!((s.current_min, s.current_max), (950.0, 2601.0));
        assert_eq!((s.display_min, s.display_max), (930.0, 2621.0));
    }

    #[test]
    fn values_inside_do_not_change_range() {
        let mut r = AutoRange::default();
        let before = r.state();
        assert!(!r.offer(1500.0));
        assert_eq!(r.state(), before);
    }

    #[test]
    fn min_span_recenters() {
        let r = AutoRange::new(narrow()).state();
        // 1380..1420 is narrower than 50, re-centred on 1400
        assert_eq!((r.display_min, r.display_max), (1375.0, 1425.0));
    }

    #[test]
    fn min_span_shifts_away_from_floor() {
        let cfg = ValueAxisConfig {
            initial_bounds: (0.0, 0.0),
            buffer: 5.0,
            ..ValueAxisConfig::default()
        };
        let r = AutoRange::new(cfg).state();
        assert_eq!(r.display_min, 0.0);
        assert!(r.display_span() >= 50.0);
    }

    #[test]
    fn clamps_to_absolute_limits() {
        let mut r = AutoRange::default();
        r.offer(2995.0);
        r.offer(3.0);
        let s = r.state();
        assert_eq!(s.display_max, 3000.0);
        assert_eq!(s.display_min, 0.0);
    }

    #[test]
    fn never_shrinks() {
        let mut r = AutoRange::new(narrow());
        r.offer(1300.0);
        let wide = r.state();
        r.offer(1401.0);
        let after = r.state();
        assert!(after.display_min <= wide.display_min);
        assert!(after.display_max >= wide.display_max);
    }

    #[test]
    fn non_finite_is_ignored() {
        let mut r = AutoRange::default();
        assert!(!r.offer(f64::NAN));
        assert!(!r.offer(f64::NEG_INFINITY));
    }

    #[test]
    fn reset_restores_initial_bounds() {
        let mut r = AutoRange::default();
        r.offer(10.0);
        r.reset();
        assert_eq!(r.state(), AutoRange::default().state());
    }
}
