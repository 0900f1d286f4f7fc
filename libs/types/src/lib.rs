//! # Splice Types - Pure Data Structures
//!
//! ## Purpose
//!
//! This crate contains the data structures shared by every stage of the
//! splice pipeline, with no protocol rules and no transport logic:
//! - `Frame`: one socket read's worth of bytes plus its pipeline timestamps
//! - `LogRecord`: one latency measurement bound for the CSV writer
//! - `SessionState` / `Profile`: the per-connection lifecycle and mode
//! - `clock`: monotonic nanosecond timestamps for the hot path
//!
//! ## Architecture Role
//!
//! ```text
//! splice-types → splice-codec → splice-relay
//!     ↑               ↓              ↓
//! Pure Data      Protocol Rules   Sockets/Threads
//! Frame          FIX parsing      RX/TX stages
//! LogRecord      OUCH records     latency writer
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - Wire-format encoding/decoding (belongs in splice-codec)
//! - Socket management or thread orchestration (belongs in splice-relay)
//! - The SPSC ring itself (belongs in splice-ring)

pub mod clock;
pub mod frame;
pub mod log;
pub mod session;

pub use frame::{Frame, FRAME_CAPACITY, FRAME_RING_DEPTH};
pub use log::{LogRecord, CLORDID_MAX, LOG_RING_DEPTH};
pub use session::{Credentials, Dialect, Profile, SessionState, TranslateConfig};
