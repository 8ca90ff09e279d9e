//! src/cli.rs
//!
//! Command-line options.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "strip_monitor", version, about = "Scrolling strip-chart monitor for live waveforms")]
pub struct Cli {
    /// Replay a recorded value file (comma separated, `//` comments)
    #[arg(long, value_name = "PATH", conflicts_with_all = ["serial", "simulate"])]
    pub file: Option<PathBuf>,

    /// Read `c1,c2,c3` record lines from a serial port
    #[arg(long, value_name = "PORT", conflicts_with = "simulate")]
    pub serial: Option<String>,

    /// Serial baud rate
    #[arg(long, default_value_t = 115_200)]
    pub baud: u32,

    /// Generate a synthetic trace
    #[arg(long)]
    pub simulate: bool,

    /// Seed for the synthetic trace
    #[arg(long, requires = "simulate")]
    pub seed: Option<u64>,

    /// Accept samples over TCP on this address (e.g. 127.0.0.1:4000)
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Log file (the terminal belongs to the UI)
    #[arg(long, value_name = "PATH", default_value = "strip_monitor.log")]
    pub log_file: PathBuf,

    /// Initial horizontal scale in pixels per sample
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Feed new samples from the left edge instead of the right
    #[arg(long)]
    pub feed_left: bool,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["strip_monitor"]).expect("no args");
        assert_eq!(cli.baud, 115_200);
        assert_eq!(cli.scale, 1.0);
        assert!(cli.file.is_none() && !cli.simulate);
    }

    #[test]
    fn file_and_simulate_conflict() {
        assert!(Cli::try_parse_from(["strip_monitor", "--file", "a.txt", "--simulate"]).is_err());
    }

    #[test]
    fn seed_requires_simulate() {
        assert!(Cli::try_parse_from(["strip_monitor", "--seed", "3"]).is_err());
        assert!(Cli::try_parse_from(["strip_monitor", "--simulate", "--seed", "3"]).is_ok());
    }
}
