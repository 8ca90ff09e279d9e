//! src/engine/error.rs

use thiserror::Error;

/// Rejected engine configuration. Only raised at construction; a running
/// chart never fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("non-finite parameter in {0}")]
    NonFinite(&'static str),
    #[error("invalid value axis: {0}")]
    InvalidValueAxis(String),
    #[error("filter bounds must be ordered and the jump threshold non-negative")]
    InvalidFilter,
    #[error("scale {scale} outside zoom limits [{min}, {max}]")]
    InvalidScale { scale: f64, min: f64, max: f64 },
    #[error("viewport margins, tolerance and thumb width must be non-negative")]
    InvalidViewport,
    #[error("grid steps and sample rate must be positive")]
    InvalidGrid,
    #[error("max index must be in 0..=2^53, got {0}")]
    InvalidMaxIndex(i64),
}
