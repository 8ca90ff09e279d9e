//! src/engine/store.rs
//!
//! Append-only sample storage keyed by time index.
//!
//! The store keeps every sample of the session; the visible window is always
//! a view over it. Insert order does not matter, index order is the drawing
//! order.

use std::collections::HashMap;

use log::debug;

/// Number of concurrently drawn channels.
pub const CHANNELS: usize = 3;

/// One time-indexed observation with up to `CHANNELS` values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub index: i64,
    pub values: [Option<f64>; CHANNELS],
}

impl Sample {
    pub fn new(index: i64, values: [Option<f64>; CHANNELS]) -> Self {
        Self { index, values }
    }

    /// The same value on every channel.
    pub fn mirrored(index: i64, value: f64) -> Self {
        Self::new(index, [Some(value); CHANNELS])
    }

    /// A value on the first channel only.
    pub fn single(index: i64, value: f64) -> Self {
        let mut values = [None; CHANNELS];
        values[0] = Some(value);
        Self::new(index, values)
    }

    pub fn value(&self, channel: usize) -> Option<f64> {
        self.values.get(channel).copied().flatten()
    }

    /// Non-finite values become absent.
    fn sanitized(mut self) -> Self {
        for v in &mut self.values {
            if v.is_some_and(|x| !x.is_finite()) {
                *v = None;
            }
        }
        self
    }
}

#[derive(Debug)]
pub struct SampleStore {
    samples: HashMap<i64, Sample>,
    highest: Option<i64>,
    max_index: i64,
}

impl SampleStore {
    pub fn new(max_index: i64) -> Self {
        Self {
            samples: HashMap::new(),
            highest: None,
            max_index,
        }
    }

    /// Insert `sample` if its index is new and in range.
    ///
    /// Returns `true` when the sample was stored. Duplicate and out-of-range
    /// indices are dropped without error.
    pub fn append(&mut self, sample: Sample) -> bool {
        if sample.index < 0 || sample.index > self.max_index {
            debug!("dropping sample with out-of-range index {}", sample.index);
            return false;
        }
        if self.samples.contains_key(&sample.index) {
            debug!("ignoring duplicate index {}", sample.index);
            return false;
        }
        self.samples.insert(sample.index, sample.sanitized());
        self.highest = Some(self.highest.map_or(sample.index, |h| h.max(sample.index)));
        true
    }

    pub fn get(&self, index: i64) -> Option<&Sample> {
        self.samples.get(&index)
    }

    /// Largest index ever inserted.
    pub fn highest_index(&self) -> Option<i64> {
        self.highest
    }

    /// Sample at the highest index.
    pub fn latest(&self) -> Option<&Sample> {
        self.highest.and_then(|h| self.samples.get(&h))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop the whole session (explicit reset only).
    pub fn clear(&mut self) {
        self.samples.clear();
        self.highest = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_index_keeps_first_sample() {
        let mut store = SampleStore::new(1_000);
        assert!(store.append(Sample::mirrored(5, 1400.0)));
        assert!(!store.append(Sample::mirrored(5, 1600.0)));
        assert_eq!(store.get(5).and_then(|s| s.value(0)), Some(1400.0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn highest_tracks_out_of_order_inserts() {
        let mut store = SampleStore::new(1_000);
        store.append(Sample::single(7, 1.0));
        store.append(Sample::single(3, 1.0));
        assert_eq!(store.highest_index(), Some(7));
        store.append(Sample::single(9, 1.0));
        assert_eq!(store.highest_index(), Some(9));
        assert_eq!(store.latest().map(|s| s.index), Some(9));
    }

    #[test]
    fn out_of_range_indices_are_dropped() {
        let mut store = SampleStore::new(100);
        assert!(!store.append(Sample::single(-1, 1.0)));
        assert!(!store.append(Sample::single(101, 1.0)));
        assert!(store.is_empty());
        assert_eq!(store.highest_index(), None);
    }

    #[test]
    fn non_finite_values_are_stored_as_absent() {
        let mut store = SampleStore::new(100);
        store.append(Sample::new(1, [Some(f64::NAN), Some(1400.0), Some(f64::INFINITY)]));
        let s = store.get(1).copied();
        assert_eq!(s.map(|s| s.values), Some([None, Some(1400.0), None]));
    }

    #[test]
    fn clear_resets_highest() {
        let mut store = SampleStore::new(100);
        store.append(Sample::single(4, 1.0));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.highest_index(), None);
    }
}
