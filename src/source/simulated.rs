//! src/source/simulated.rs
//!
//! Synthetic trace for demos: a bounded random walk around a baseline with
//! occasional dropouts and artifact spikes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{SampleSource, SourceError};
use crate::engine::{CHANNELS, Sample};

pub struct Simulated {
    rng: StdRng,
    next_index: i64,
    level: f64,
    baseline: f64,
    batch_size: usize,
    dropout_rate: f64,
    spike_rate: f64,
}

impl Simulated {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            next_index: 1,
            level: 1400.0,
            baseline: 1400.0,
            batch_size: 4,
            dropout_rate: 0.01,
            spike_rate: 0.005,
        }
    }

    fn step(&mut self) -> Sample {
        // pull back towards the baseline, keep inside a plausible band
        let drift = (self.baseline - self.level) * 0.02;
        self.level = (self.level + drift + self.rng.random_range(-8.0..8.0)).clamp(1000.0, 1900.0);

        let mut values = [None; CHANNELS];
        for (ch, slot) in values.iter_mut().enumerate() {
            if self.rng.random_bool(self.dropout_rate) {
                continue;
            }
            let jitter = self.rng.random_range(-3.0..3.0) + ch as f64 * 2.0;
            *slot = Some((self.level + jitter).round());
        }
        if self.rng.random_bool(self.spike_rate) {
            values[0] = Some(self.rng.random_range(2600.0..3500.0));
        }

        let sample = Sample::new(self.next_index, values);
        self.next_index += 1;
        sample
    }
}

impl SampleSource for Simulated {
    fn next_batch(&mut self) -> Result<Option<Vec<Sample>>, SourceError> {
        Ok(Some((0..self.batch_size).map(|_| self.step()).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take(sim: &mut Simulated, batches: usize) -> Vec<Sample> {
        (0..batches)
            .filter_map(|_| sim.next_batch().ok().flatten())
            .flatten()
            .collect()
    }

    #[test]
    fn same_seed_same_trace() {
        let a = take(&mut Simulated::new(Some(7)), 10);
        let b = take(&mut Simulated::new(Some(7)), 10);
        assert_eq!(a, b);
    }

    #[test]
    fn indices_are_sequential() {
        let samples = take(&mut Simulated::new(Some(1)), 5);
        let indices: Vec<i64> = samples.iter().map(|s| s.index).collect();
        assert_eq!(indices, (1..=20).collect::<Vec<_>>());
    }
}
