//! Receive stage: drain the client socket into the frame ring.
//!
//! Protocol-agnostic by contract: bytes go into frames exactly as read,
//! and the payload is never touched between timestamping and push. The
//! stage blocks only in the kernel read; ring congestion is bounded
//! busy-wait, never a sleeping lock.

use std::io::{ErrorKind, Read};
use std::net::TcpStream;
use std::sync::Arc;

use splice_ring::{Producer, SpinWait};
use splice_types::{clock, Frame, FRAME_RING_DEPTH};
use tracing::{debug, error, info};

use crate::session::SessionGate;

/// Receive loop. Owns the accepted client socket: moved in here before the
/// first read so an accelerated per-thread stack adopts it, closed on exit.
pub fn run(
    mut client: TcpStream,
    mut frames: Producer<Frame, FRAME_RING_DEPTH>,
    gate: Arc<SessionGate>,
) {
    if !gate.await_data_flow() {
        info!("session ended before data flow; closing client socket");
        return;
    }
    debug!("receive stage active");

    loop {
        let mut frame = Frame::empty();
        let result = client.read(&mut frame.data);
        frame.recv_end_ns = clock::monotonic_ns();
        match result {
            Ok(0) => {
                info!("client closed connection");
                break;
            }
            Ok(n) => {
                frame.len = n;
                if !push_with_backpressure(&mut frames, frame, &gate) {
                    break;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                error!("client read error: {e}");
                break;
            }
        }
    }

    gate.mark_rx_done();
    debug!("receive stage stopped; client socket closed");
}

/// Busy-retry the push until it lands. Gives up only when the session has
/// already reached a terminal state, meaning the send stage is gone and
/// the ring will never drain.
fn push_with_backpressure(
    frames: &mut Producer<Frame, FRAME_RING_DEPTH>,
    frame: Frame,
    gate: &SessionGate,
) -> bool {
    let mut wait = SpinWait::new();
    let mut frame = frame;
    loop {
        match frames.push(frame) {
            Ok(()) => return true,
            Err(returned) => {
                if gate.state().is_terminal() {
                    debug!("dropping frame: send stage already terminated");
                    return false;
                }
                frame = returned;
                wait.spin();
            }
        }
    }
}
