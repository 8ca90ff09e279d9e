//! src/source/playback.rs
//!
//! Replays a recorded value list in fixed-size batches.

use super::{SampleSource, SourceError};
use crate::engine::Sample;

/// How one recorded value is spread over the channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelLayout {
    /// Same value on every channel.
    #[default]
    Mirrored,
    /// First channel only.
    Single,
}

pub struct Playback {
    values: Vec<f64>,
    cursor: usize,
    batch_size: usize,
    layout: ChannelLayout,
    /// Index given to the first value.
    first_index: i64,
}

impl Playback {
    /// Four samples per batch, indices starting at 1.
    pub fn new(values: Vec<f64>, layout: ChannelLayout) -> Self {
        Self {
            values,
            cursor: 0,
            batch_size: 4,
            layout,
            first_index: 1,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn remaining(&self) -> usize {
        self.values.len() - self.cursor
    }
}

impl SampleSource for Playback {
    fn next_batch(&mut self) -> Result<Option<Vec<Sample>>, SourceError> {
        if self.cursor >= self.values.len() {
            return Ok(None);
        }
        let end = (self.cursor + self.batch_size).min(self.values.len());
        let batch = self.values[self.cursor..end]
            .iter()
            .enumerate()
            .map(|(k, &v)| {
                let index = self.first_index + (self.cursor + k) as i64;
                match self.layout {
                    ChannelLayout::Mirrored => Sample::mirrored(index, v),
                    ChannelLayout::Single => Sample::single(index, v),
                }
            })
            .collect();
        self.cursor = end;
        Ok(Some(batch))
    }
}
