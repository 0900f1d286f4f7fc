//! Send stage: pop frames, optionally translate, write downstream.
//!
//! Owns the downstream socket from creation to close — it is opened on
//! this thread so an accelerated per-thread stack adopts it. Blocks only
//! in the downstream write and, during the handshake, in the blocking read
//! of the acknowledgement.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use splice_codec::{fix, lite, ouch, Translator};
use splice_ring::{Consumer, Producer, SpinWait};
use splice_types::{
    clock, Dialect, Frame, LogRecord, Profile, SessionState, TranslateConfig, FRAME_CAPACITY,
    FRAME_RING_DEPTH, LOG_RING_DEPTH,
};
use tracing::{debug, error, info, warn};
use zerocopy::AsBytes;

use crate::error::RelayError;
use crate::session::SessionGate;

/// Finite bound on the handshake acknowledgement wait; expiry rejects the
/// session.
const ACK_TIMEOUT: Duration = Duration::from_secs(5);

/// Send loop: handshake (translation profile), then pop-translate-write
/// until the ring is drained after the receive stage stops, or the
/// downstream write fails.
pub fn run(
    mut frames: Consumer<Frame, FRAME_RING_DEPTH>,
    profile: Profile,
    gate: Arc<SessionGate>,
    mut log: Option<Producer<LogRecord, LOG_RING_DEPTH>>,
) {
    let mut downstream = match connect(profile.downstream()) {
        Ok(stream) => stream,
        Err(e) => {
            error!("downstream connect failed: {e}");
            gate.transition(SessionState::Rejected);
            gate.transition(SessionState::Closed);
            return;
        }
    };

    let mut translator = match &profile {
        Profile::Relay { .. } => None,
        Profile::Translate(translate) => {
            gate.transition(SessionState::AwaitingAck);
            match login(&mut downstream, translate) {
                Ok(session_id) => {
                    info!(
                        session_id = %String::from_utf8_lossy(&session_id),
                        "gateway login accepted"
                    );
                    Some(Translator::new(translate.dialect))
                }
                Err(e) => {
                    error!("gateway login failed: {e}");
                    gate.transition(SessionState::Rejected);
                    gate.transition(SessionState::Closed);
                    return;
                }
            }
        }
    };

    gate.transition(SessionState::Active);
    debug!("send stage active");

    let mut scratch = Vec::with_capacity(FRAME_CAPACITY);
    let mut wait = SpinWait::new();
    'session: loop {
        let mut frame = match frames.pop() {
            Some(frame) => frame,
            None => {
                if gate.rx_done() {
                    // drain anything published before the done flag flipped
                    while let Some(mut frame) = frames.pop() {
                        if !forward_frame(
                            &mut frame,
                            &mut downstream,
                            &mut translator,
                            &mut scratch,
                            &mut log,
                        ) {
                            break 'session;
                        }
                    }
                    info!("ring drained after client close");
                    break 'session;
                }
                wait.spin();
                continue;
            }
        };
        wait.reset();
        if !forward_frame(
            &mut frame,
            &mut downstream,
            &mut translator,
            &mut scratch,
            &mut log,
        ) {
            break 'session;
        }
    }

    gate.transition(SessionState::Closed);
    debug!("send stage stopped; downstream socket closed");
}

/// Forward one frame. Returns false on downstream write failure, which
/// ends the session.
fn forward_frame(
    frame: &mut Frame,
    downstream: &mut TcpStream,
    translator: &mut Option<Translator>,
    scratch: &mut Vec<u8>,
    log: &mut Option<Producer<LogRecord, LOG_RING_DEPTH>>,
) -> bool {
    frame.send_start_ns = clock::monotonic_ns();
    match translator {
        None => {
            if let Err(e) = downstream.write_all(frame.payload()) {
                error!("downstream write failed: {e}");
                return false;
            }
        }
        Some(translator) => {
            scratch.clear();
            if translator.translate_frame(frame.payload(), scratch) == 0 {
                // frame held no recognised order; nothing to send
                return true;
            }
            if let Err(e) = downstream.write_all(scratch) {
                error!("downstream write failed: {e}");
                return false;
            }
        }
    }
    frame.send_end_ns = clock::monotonic_ns();

    if let Some(records) = log {
        record_latency(frame, records);
    }
    true
}

/// Push one latency record; a full log ring drops it rather than stalling
/// the send path.
fn record_latency(frame: &Frame, records: &mut Producer<LogRecord, LOG_RING_DEPTH>) {
    let clordid = fix::first_clordid(frame.payload()).unwrap_or(b"");
    let record = LogRecord::new(
        frame.recv_end_ns,
        frame.send_start_ns - frame.recv_end_ns,
        frame.send_end_ns - frame.send_start_ns,
        clordid,
    );
    let _ = records.push(record);
}

fn connect(addr: SocketAddr) -> std::io::Result<TcpStream> {
    info!(%addr, "connecting downstream");
    let stream = TcpStream::connect(addr)?;
    if let Err(e) = stream.set_nodelay(true) {
        warn!("failed to set TCP_NODELAY on downstream socket: {e}");
    }
    info!(%addr, "downstream connected");
    Ok(stream)
}

/// Write the login record and blocking-read exactly the positive
/// acknowledgement. Any non-acceptance first byte, short read, or timeout
/// rejects the session.
fn login(
    downstream: &mut TcpStream,
    translate: &TranslateConfig,
) -> Result<[u8; ouch::SESSION_ID_LEN], RelayError> {
    downstream.set_read_timeout(Some(ACK_TIMEOUT))?;

    match translate.dialect {
        Dialect::Ouch5 => {
            let login = ouch::LoginRequest::new(&translate.credentials);
            downstream.write_all(login.as_bytes())?;
        }
        Dialect::Lite => {
            let login = lite::LoginRequest::new(&translate.credentials);
            downstream.write_all(login.as_bytes())?;
        }
    }

    let mut first = [0u8; 1];
    downstream.read_exact(&mut first)?;
    if first[0] != ouch::ACCEPT_TYPE {
        return Err(RelayError::LoginRejected(first[0]));
    }
    let mut session_id = [0u8; ouch::SESSION_ID_LEN];
    downstream.read_exact(&mut session_id)?;

    downstream.set_read_timeout(None)?;
    Ok(session_id)
}
