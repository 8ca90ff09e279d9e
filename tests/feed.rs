//! TCP sample feed over a loopback socket.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use strip_monitor::net::serve;
use strip_monitor::{EngineConfig, Sample, StripChart};

#[test]
fn samples_sent_over_tcp_reach_the_chart() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = mpsc::channel::<Sample>();
    thread::spawn(move || serve(listener, tx));

    let mut stream = TcpStream::connect(addr).expect("connect");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .expect("timeout");
    let mut reader = BufReader::new(stream.try_clone().expect("clone"));
    let mut send = |line: &str| {
        stream.write_all(format!("{line}\n").as_bytes()).expect("write");
        let mut reply = String::new();
        reader.read_line(&mut reply).expect("reply");
        reply.trim().to_string()
    };

    assert_eq!(send("ping"), "OK pong");
    assert_eq!(send("sample 2 1410,1412,-"), "OK");
    assert_eq!(send("sample 1 1400,1402,1398"), "OK");
    assert_eq!(send("sample one 1400"), "ERR index");
    assert_eq!(send("quit"), "OK bye");

    let received: Vec<Sample> = rx.iter().take(2).collect();
    assert_eq!(received.iter().map(|s| s.index).collect::<Vec<_>>(), vec![2, 1]);

    let mut chart = StripChart::new(EngineConfig::default()).expect("valid config");
    chart.resize(100.0, 135.0);
    assert_eq!(chart.ingest(received), 2);
    assert_eq!(chart.latest().map(|s| s.values), Some([Some(1410.0), Some(1412.0), None]));
}
