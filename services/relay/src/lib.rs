//! # Splice Relay - Per-Connection Low-Latency Splice Engine
//!
//! ## Purpose
//!
//! Splices one inbound client connection to one outbound downstream
//! connection on a trading order path. Per accepted client the engine runs
//! a two-stage pipeline over a lock-free SPSC ring:
//!
//! ```text
//! client socket → RX stage → ring(256) → TX stage → downstream socket
//!                    ↓                       ↓
//!              recv timestamp        optional translation,
//!                                    latency records → log ring(4096) → CSV
//! ```
//!
//! The ring exists to keep kernel read-side jitter off the send-side
//! critical path: RX blocks only in the client read, TX blocks only in the
//! downstream write, and the hand-off between them is wait-free on the
//! uncontended path with bounded busy-wait under congestion.
//!
//! ## Socket Ownership
//!
//! Each socket is owned by exactly one stage: the accepted client socket
//! moves into the RX thread before its first read, and the downstream
//! socket is created inside the TX thread. Under a kernel-bypass transport
//! with per-thread accelerated stacks this binds each socket to the stack
//! of its owning core; nothing else may touch either descriptor.
//!
//! ## Profiles
//!
//! - `Relay`: byte-identical forwarding, frames delivered in arrival order.
//! - `Translate`: downstream login handshake first, then FIX
//!   `NewOrderSingle` → binary order translation; everything that is not a
//!   recognised order is dropped. The receive stage reads no client byte
//!   until the gateway acknowledges the login.

pub mod acceptor;
pub mod affinity;
pub mod config;
pub mod error;
pub mod latency;
pub mod rx;
pub mod session;
pub mod tx;

pub use acceptor::Acceptor;
pub use config::{LatencyConfig, RelayConfig};
pub use error::{RelayError, Result};
