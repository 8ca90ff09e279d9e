//! src/panels.rs
//!
//! Top-level panels module and re-exports.

pub mod help;
pub mod readout;
pub mod strip;
pub mod title;

pub use help::HelpPanel;
pub use readout::ReadoutPanel;
pub use strip::{StripGeometry, StripPanel};
pub use title::TitlePanel;
