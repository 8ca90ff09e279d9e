//! src/main.rs
//!
//! Entrypoint: parse options, set up logging, delegate to `app::run()`.

mod app;
mod cli;
mod logging;
mod panels;
mod ui;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = cli::parse_args();
    logging::initialize(&cli.log_file)
        .wrap_err_with(|| format!("cannot create log file {}", cli.log_file.display()))?;
    app::run(cli)
}
