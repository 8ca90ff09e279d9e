//! src/source.rs
//!
//! Producers that hand parsed samples to the chart.
//!
//! Pull-based sources implement [`SampleSource`] and are polled from the event
//! loop once per feed period. Push-based links (serial port, TCP feed) run on
//! their own thread and send samples over an `mpsc` channel instead.

pub mod playback;
pub mod serial;
pub mod simulated;
pub mod text;

use thiserror::Error;

use crate::engine::Sample;

pub use playback::{ChannelLayout, Playback};
pub use serial::start_serial_reader;
pub use simulated::Simulated;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
    #[error("no numeric data in {0}")]
    NoData(String),
}

/// Something that yields sample batches on demand.
pub trait SampleSource {
    /// Next batch, or `None` once the source is exhausted.
    fn next_batch(&mut self) -> Result<Option<Vec<Sample>>, SourceError>;
}
