//! src/logging.rs
//!
//! File logger setup. Level from `RUST_LOG`, `info` by default.

use std::fs::File;
use std::path::Path;

use env_logger::{Builder, Env, Target};

pub fn initialize(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .init();
    log::info!("logging to {}", path.display());
    Ok(())
}
