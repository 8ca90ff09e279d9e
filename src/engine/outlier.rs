//! src/engine/outlier.rs
//!
//! Plausibility check between two neighbouring samples of one channel.

use super::config::FilterConfig;

/// Why a pair was or was not accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    /// One of the two values is absent.
    Missing,
    /// A value lies outside the physical bounds.
    OutOfBounds,
    /// The values differ by more than the jump threshold (sensor artifact).
    Jump,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        self == Verdict::Accepted
    }
}

/// Stateless pair filter. Symmetric in its two arguments.
#[derive(Clone, Debug)]
pub struct OutlierFilter {
    bounds: (f64, f64),
    jump_threshold: f64,
}

impl OutlierFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            bounds: config.physical_bounds,
            jump_threshold: config.jump_threshold,
        }
    }

    pub fn check(&self, current: Option<f64>, previous: Option<f64>) -> Verdict {
        let (Some(a), Some(b)) = (current, previous) else {
            return Verdict::Missing;
        };
        if !self.in_bounds(a) || !self.in_bounds(b) {
            return Verdict::OutOfBounds;
        }
        if (a - b).abs() > self.jump_threshold {
            return Verdict::Jump;
        }
        Verdict::Accepted
    }

    pub fn accepts(&self, current: Option<f64>, previous: Option<f64>) -> bool {
        self.check(current, previous).is_accepted()
    }

    /// Values to offer to the auto-range when the pair is accepted.
    pub fn candidates(&self, current: Option<f64>, previous: Option<f64>) -> Option<[f64; 2]> {
        match (current, previous) {
            (Some(a), Some(b)) if self.accepts(current, previous) => Some([a, b]),
            _ => None,
        }
    }

    fn in_bounds(&self, v: f64) -> bool {
        // NaN fails both comparisons
        v >= self.bounds.0 && v <= self.bounds.1
    }
}

impl Default for OutlierFilter {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}
