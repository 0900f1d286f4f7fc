//! Latency pipeline scenarios: CSV records per forwarded frame, clordid
//! taken from the FIX tag-11 value.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use splice_relay::acceptor::Acceptor;
use splice_relay::config::{LatencyConfig, RelayConfig};
use splice_types::{Credentials, Dialect, Profile, TranslateConfig};

const READ_TIMEOUT: Duration = Duration::from_secs(5);
const SOH: u8 = 0x01;

fn start_relay_with_latency(
    log_path: PathBuf,
    profile_for: impl FnOnce(SocketAddr) -> Profile,
) -> (SocketAddr, TcpListener) {
    let downstream = TcpListener::bind("127.0.0.1:0").unwrap();
    let forward = downstream.local_addr().unwrap();
    let acceptor = Acceptor::bind("127.0.0.1:0".parse().unwrap()).unwrap();
    let listen = acceptor.local_addr().unwrap();
    let config = Arc::new(RelayConfig {
        listen,
        forward,
        rx_cpu: 0,
        tx_cpu: 0,
        sleep_cpu: 0,
        latency: Some(LatencyConfig {
            log_path,
            flush_interval: Duration::from_millis(25),
        }),
        debug_level: 0,
    });
    let profile = profile_for(forward);
    thread::spawn(move || acceptor.serve(&profile, &config));
    (listen, downstream)
}

fn fix_order(clordid: &str) -> Vec<u8> {
    let fields = [
        "8=FIX.4.2".to_string(),
        "9=65".to_string(),
        "35=D".to_string(),
        format!("11={clordid}"),
        "54=1".to_string(),
        "38=100".to_string(),
        "55=TEST".to_string(),
        "10=000".to_string(),
    ];
    let mut out = Vec::new();
    for field in &fields {
        out.extend_from_slice(field.as_bytes());
        out.push(SOH);
    }
    out
}

fn read_exactly(stream: &mut TcpStream, want: usize) -> Vec<u8> {
    let mut buf = vec![0u8; want];
    stream.read_exact(&mut buf).unwrap();
    buf
}

fn wait_for_lines(path: &PathBuf, want: usize) -> Vec<String> {
    for _ in 0..100 {
        thread::sleep(Duration::from_millis(25));
        if let Ok(contents) = std::fs::read_to_string(path) {
            let lines: Vec<String> = contents.lines().map(str::to_string).collect();
            if lines.len() >= want {
                return lines;
            }
        }
    }
    panic!("latency log never reached {want} lines");
}

#[test]
fn test_translated_frames_produce_csv_records() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let log_path = tmp.path().to_path_buf();

    let (listen, downstream) = start_relay_with_latency(log_path.clone(), |forward| {
        Profile::Translate(TranslateConfig {
            downstream: forward,
            dialect: Dialect::Ouch5,
            credentials: Credentials {
                username: "USER01".to_string(),
                password: "PASSWORD1234567890".to_string(),
            },
        })
    });

    let mut client = TcpStream::connect(listen).unwrap();
    let (mut gateway, _) = downstream.accept().unwrap();
    gateway.set_read_timeout(Some(READ_TIMEOUT)).unwrap();

    read_exactly(&mut gateway, 51);
    let mut ack = vec![b'A'];
    ack.extend_from_slice(b"ABC123");
    gateway.write_all(&ack).unwrap();

    for i in 1..=3 {
        client.write_all(&fix_order(&format!("CLO{i}"))).unwrap();
        read_exactly(&mut gateway, 49);
        // separate frames: one record per frame
        thread::sleep(Duration::from_millis(10));
    }
    drop(client);

    let lines = wait_for_lines(&log_path, 3);
    assert_eq!(lines.len(), 3);
    for (i, line) in lines.iter().enumerate() {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 5, "line {i} malformed: {line}");
        let recv_end: u64 = fields[0].parse().unwrap();
        let queue_wait: u64 = fields[1].parse().unwrap();
        let send_duration: u64 = fields[2].parse().unwrap();
        let total: u64 = fields[3].parse().unwrap();
        assert!(recv_end > 0);
        assert_eq!(total, queue_wait + send_duration);
        assert_eq!(fields[4], format!("CLO{}", i + 1));
    }
}

#[test]
fn test_raw_profile_also_measures_latency() {
    let tmp = tempfile::NamedTempFile::new().unwrap();
    let log_path = tmp.path().to_path_buf();

    let (listen, downstream) =
        start_relay_with_latency(log_path.clone(), |forward| Profile::Relay {
            downstream: forward,
        });

    let mut client = TcpStream::connect(listen).unwrap();
    let (mut gateway, _) = downstream.accept().unwrap();
    gateway.set_read_timeout(Some(READ_TIMEOUT)).unwrap();

    let order = fix_order("RAW1");
    client.write_all(&order).unwrap();
    read_exactly(&mut gateway, order.len());
    drop(client);

    let lines = wait_for_lines(&log_path, 1);
    let fields: Vec<&str> = lines[0].split(',').collect();
    assert_eq!(fields.len(), 5);
    // raw payload still yields the clordid column from tag 11
    assert_eq!(fields[4], "RAW1");
}
