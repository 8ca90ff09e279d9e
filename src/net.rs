//! src/net.rs
//!
//! Network sample feed.

pub mod feed;

pub use feed::{Command, parse_command, serve, spawn_feed};
