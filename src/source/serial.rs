//! src/source/serial.rs
//!
//! Background reader for record lines arriving on a serial port.

use std::io::{BufRead, BufReader};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info, warn};

use super::SourceError;
use super::text::parse_record;
use crate::engine::Sample;

/// Open `port_name` and spawn a thread that forwards one sample per record
/// line, numbered from 1 in arrival order.
///
/// The thread exits when the port fails or the receiving side hangs up.
pub fn start_serial_reader(
    port_name: &str,
    baud_rate: u32,
    tx: Sender<Sample>,
) -> Result<JoinHandle<()>, SourceError> {
    let port = serialport::new(port_name, baud_rate)
        .timeout(Duration::from_secs(10))
        .open()?;
    info!("serial reader started on {port_name} @ {baud_rate} baud");

    let port_name = port_name.to_string();
    let handle = thread::spawn(move || {
        let reader = BufReader::new(port);
        let mut index = 1i64;
        for line_res in reader.lines() {
            let line = match line_res {
                Ok(line) => line,
                Err(e) => {
                    warn!("error reading {port_name}: {e}");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            let Some(values) = parse_record(&line) else {
                debug!("skipping malformed record {:?}", line.trim());
                continue;
            };
            if tx.send(Sample::new(index, values)).is_err() {
                break;
            }
            index += 1;
        }
        info!("serial reader on {port_name} exiting");
    });
    Ok(handle)
}
