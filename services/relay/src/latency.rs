//! Latency log writer: drains the log ring to append-only CSV.
//!
//! Runs at default scheduling priority, deliberately off the hot path: the
//! send stage pushes records and never waits; this thread wakes on a fixed
//! cadence, drains whatever accumulated, and flushes.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use splice_ring::Consumer;
use splice_types::{LogRecord, LOG_RING_DEPTH};
use tracing::{error, info};

use crate::config::LatencyConfig;
use crate::session::SessionGate;

/// Spawn the writer for one session's log ring.
pub fn spawn_writer(
    records: Consumer<LogRecord, LOG_RING_DEPTH>,
    config: LatencyConfig,
    gate: Arc<SessionGate>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("splice-log".to_string())
        .spawn(move || write_loop(records, config, gate))
}

fn write_loop(mut records: Consumer<LogRecord, LOG_RING_DEPTH>, config: LatencyConfig, gate: Arc<SessionGate>) {
    let file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
    {
        Ok(file) => file,
        Err(e) => {
            error!(path = %config.log_path.display(), "failed to open latency log: {e}");
            return;
        }
    };
    let mut out = BufWriter::new(file);
    info!(path = %config.log_path.display(), "latency log writer started");

    loop {
        thread::sleep(config.flush_interval);
        // read the state before draining: records pushed before a terminal
        // transition are then guaranteed visible to this drain
        let session_over = gate.state().is_terminal();

        while let Some(record) = records.pop() {
            if let Err(e) = write_record(&mut out, &record) {
                error!("latency log write failed: {e}");
                return;
            }
        }
        if let Err(e) = out.flush() {
            error!("latency log flush failed: {e}");
            return;
        }
        if session_over {
            break;
        }
    }
    info!("latency log writer stopped");
}

/// One CSV line: `recv_end_ns,queue_wait_ns,send_duration_ns,total_ns,clordid`.
fn write_record(out: &mut impl Write, record: &LogRecord) -> io::Result<()> {
    write!(
        out,
        "{},{},{},{},",
        record.recv_end_ns, record.queue_wait_ns, record.send_duration_ns, record.total_ns
    )?;
    out.write_all(record.clordid())?;
    out.write_all(b"\n")
}
