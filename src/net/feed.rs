//! src/net/feed.rs
//!
//! Tiny line-based TCP server accepting samples from remote producers.
//!
//! Commands (whitespace separated ASCII, one per line):
//! - `sample <index> <record>`: `<record>` is `c1,c2,c3` where an empty field
//!   or `-` marks an absent value. Indices may arrive in any order.
//! - `ping`
//! - `quit`
//!
//! Every command gets one reply line, `OK` or `ERR <msg>`.
//!
//! ```text
//! $ nc 127.0.0.1 4000
//! sample 1 1400,1402,-
//! OK
//! sample x 1400
//! ERR index
//! ```

use std::io::{self, BufRead, BufReader, Write};
use std::net::{Shutdown, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};

use crate::engine::Sample;
use crate::source::text::parse_record;

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Sample(Sample),
    Ping,
    Quit,
}

/// Parse one request line. The error is the reply text after `ERR `.
pub fn parse_command(raw: &str) -> Result<Command, String> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    let Some(head) = parts.first() else {
        return Err("empty".into());
    };
    match head.to_lowercase().as_str() {
        "sample" if parts.len() == 3 => {
            let index = parts[1].parse::<i64>().map_err(|_| "index".to_string())?;
            let values = parse_record(parts[2]).ok_or_else(|| "record".to_string())?;
            Ok(Command::Sample(Sample::new(index, values)))
        }
        "sample" => Err("usage: sample <index> <c1,c2,c3>".into()),
        "ping" => Ok(Command::Ping),
        "quit" => Ok(Command::Quit),
        _ => Err(format!("unknown {}", parts.join(" "))),
    }
}

/// Bind `addr` and serve clients on a background thread.
pub fn spawn_feed<A: ToSocketAddrs>(addr: A, tx: Sender<Sample>) -> io::Result<JoinHandle<()>> {
    let listener = TcpListener::bind(addr)?;
    info!("sample feed listening on {}", listener.local_addr()?);
    Ok(thread::spawn(move || serve(listener, tx)))
}

/// Accept loop; one handler thread per client.
pub fn serve(listener: TcpListener, tx: Sender<Sample>) {
    for stream in listener.incoming() {
        match stream {
            Ok(s) => {
                let tx = tx.clone();
                thread::spawn(move || {
                    if let Err(e) = handle_client(s, tx) {
                        debug!("feed client error: {e}");
                    }
                });
            }
            Err(e) => warn!("feed accept error: {e}"),
        }
    }
}

fn handle_client(mut s: TcpStream, tx: Sender<Sample>) -> io::Result<()> {
    let peer = s
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "<peer?>".into());
    info!("feed client {peer} connected");
    let mut rdr = BufReader::new(s.try_clone()?);
    let mut line = String::new();

    loop {
        line.clear();
        if rdr.read_line(&mut line)? == 0 {
            break;
        }
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }

        let reply = match parse_command(raw) {
            Ok(Command::Sample(sample)) => {
                if tx.send(sample).is_err() {
                    s.write_all(b"ERR closed\n")?;
                    break;
                }
                "OK\n".to_string()
            }
            Ok(Command::Ping) => "OK pong\n".to_string(),
            Ok(Command::Quit) => {
                s.write_all(b"OK bye\n")?;
                break;
            }
            Err(msg) => format!("ERR {msg}\n"),
        };
        s.write_all(reply.as_bytes())?;
    }

    info!("feed client {peer} disconnected");
    let _ = s.shutdown(Shutdown::Both);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sample_lines() {
        assert_eq!(
            parse_command("sample 12 1400,-,1390"),
            Ok(Command::Sample(Sample::new(
                12,
                [Some(1400.0), None, Some(1390.0)]
            )))
        );
        assert_eq!(parse_command("PING"), Ok(Command::Ping));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
    }

    #[test]
    fn reports_errors() {
        assert_eq!(parse_command("sample x 1400"), Err("index".into()));
        assert_eq!(parse_command("sample 1 1400,y"), Err("record".into()));
        assert!(parse_command("sample 1").is_err());
        assert_eq!(parse_command("zoom 2"), Err("unknown zoom 2".into()));
    }
}
