//! Per-connection session wiring: the state gate shared by both stages and
//! the thread launch performed at accept time.

use std::io;
use std::net::TcpStream;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use splice_ring::{channel, SpinWait};
use splice_types::{Frame, LogRecord, Profile, SessionState, FRAME_RING_DEPTH, LOG_RING_DEPTH};

use crate::config::RelayConfig;
use crate::{affinity, latency, rx, tx};

/// Shared session state between the receive stage, the send stage and the
/// latency writer. The send stage is the only writer of `state`; the
/// receive stage is the only writer of `rx_done`.
pub struct SessionGate {
    state: AtomicU8,
    rx_done: AtomicBool,
}

impl SessionGate {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(SessionState::Connecting as u8),
            rx_done: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        SessionState::from_u8(self.state.load(Ordering::Acquire)).unwrap_or(SessionState::Closed)
    }

    pub fn transition(&self, next: SessionState) {
        self.state.store(next as u8, Ordering::Release);
    }

    /// Busy-wait until the session reaches `Active` (true) or a terminal
    /// state (false). The receive stage parks here so no client byte is
    /// consumed before the downstream acknowledgement.
    pub fn await_data_flow(&self) -> bool {
        let mut wait = SpinWait::new();
        loop {
            let state = self.state();
            if state == SessionState::Active {
                return true;
            }
            if state.is_terminal() {
                return false;
            }
            wait.spin();
        }
    }

    /// Receive stage signals it has stopped reading; the send stage drains
    /// the ring and exits once it observes this with an empty ring.
    pub fn mark_rx_done(&self) {
        self.rx_done.store(true, Ordering::Release);
    }

    #[inline]
    pub fn rx_done(&self) -> bool {
        self.rx_done.load(Ordering::Acquire)
    }
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles of the stage threads of one session. Dropping them detaches the
/// stages; the session ends through socket closure, not joins.
pub struct SessionThreads {
    pub rx: JoinHandle<()>,
    pub tx: JoinHandle<()>,
}

/// Wire up and start one splice: frame ring, state gate, optional latency
/// pipeline, and the pinned RX/TX threads.
///
/// The accepted client socket moves into the RX thread untouched; the
/// downstream socket is created inside the TX thread. The acceptor does no
/// IO on either.
pub fn launch(
    client: TcpStream,
    profile: Profile,
    config: Arc<RelayConfig>,
) -> io::Result<SessionThreads> {
    let (frame_producer, frame_consumer) = channel::<Frame, FRAME_RING_DEPTH>();
    let gate = Arc::new(SessionGate::new());

    let log_producer = match &config.latency {
        Some(latency_config) => {
            let (producer, consumer) = channel::<LogRecord, LOG_RING_DEPTH>();
            latency::spawn_writer(consumer, latency_config.clone(), Arc::clone(&gate))?;
            Some(producer)
        }
        None => None,
    };

    let rx_gate = Arc::clone(&gate);
    let rx_cpu = config.rx_cpu;
    let rx = thread::Builder::new()
        .name("splice-rx".to_string())
        .spawn(move || {
            affinity::pin_current_thread(rx_cpu);
            rx::run(client, frame_producer, rx_gate);
        })
        .map_err(|e| {
            gate.transition(SessionState::Closed);
            e
        })?;

    let tx_cpu = config.tx_cpu;
    let tx_gate = Arc::clone(&gate);
    let tx = thread::Builder::new()
        .name("splice-tx".to_string())
        .spawn(move || {
            affinity::pin_current_thread(tx_cpu);
            tx::run(frame_consumer, profile, tx_gate, log_producer);
        })
        .map_err(|e| {
            // releases the parked receive stage and the latency writer
            gate.transition(SessionState::Closed);
            e
        })?;

    Ok(SessionThreads { rx, tx })
}
