//! src/lib.rs
//!
//! Streaming strip-chart engine for long-running physiological monitoring
//! (fetal heart rate, ECG), plus the sample sources that feed it.
//!
//! The engine lives in [`engine`]: samples go into a [`engine::StripChart`],
//! which owns the sample store, the auto-ranging value axis and the viewport
//! state machine, and hands out a [`engine::RenderPipeline`] that projects the
//! current state into backend-independent drawing primitives.
//!
//! [`source`] and [`net`] are thin I/O wrappers that produce parsed samples
//! (file playback, simulation, serial link, TCP feed).

pub mod engine;
pub mod net;
pub mod source;

pub use engine::{
    CHANNELS, EngineConfig, InputEvent, Mode, Primitive, RenderPipeline, Sample, StripChart,
};
