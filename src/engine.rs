//! src/engine.rs
//!
//! Top-level `engine` module exposing the strip-chart core.
//!
//! Data flow: samples are appended to the [`SampleStore`], neighbouring pairs
//! are checked by the [`OutlierFilter`] and accepted values widen the
//! [`AutoRange`]. The [`ViewportController`] decides which window is visible
//! and the [`RenderPipeline`] turns that window into [`Primitive`]s.

pub mod chart;
pub mod config;
pub mod error;
pub mod mapper;
pub mod outlier;
pub mod range;
pub mod render;
pub mod store;
pub mod viewport;

/// Re-exports
pub use chart::StripChart;
pub use config::{
    EngineConfig, FeedDirection, FilterConfig, GridConfig, MAX_INDEX_LIMIT, ValueAxisConfig,
    ViewportConfig,
};
pub use error::ConfigError;
pub use mapper::CoordinateMapper;
pub use outlier::{OutlierFilter, Verdict};
pub use range::{AutoRange, RangeState};
pub use render::{Align, Axis, LineWeight, Point, Primitive, RenderPipeline};
pub use store::{CHANNELS, Sample, SampleStore};
pub use viewport::{DragSource, InputEvent, Mode, Scrollbar, ViewportController, ViewportState};
