//! # Splice Codec - Protocol Rules
//!
//! ## Purpose
//!
//! This crate contains the "rules" layer of the splice engine:
//! - FIX tag-value scanning: field delimiting, tag extraction,
//!   NewOrderSingle recognition
//! - OUCH wire records: packed fixed-layout login, acknowledgement and
//!   new-order structs with explicit big-endian integers
//! - The per-session [`Translator`] that turns FIX frames into OUCH
//!   records under a monotonic order-token sequence
//!
//! ## Architecture Role
//!
//! ```text
//! splice-types → [splice-codec] → splice-relay
//!     ↑                ↓               ↓
//! Pure Data       Protocol Rules    Transport
//! Frame           FIX parsing       RX/TX stages
//! Profile         OUCH encoding     sockets
//! ```
//!
//! ## Design Notes
//!
//! Wire layouts are explicit byte-layout structs via `zerocopy`; nothing
//! relies on in-memory representation beyond the asserted `#[repr(C)]`
//! packing, and every integer crosses the wire big-endian. Malformed or
//! unrecognised FIX input is never an error at this layer: the translator
//! silently skips it, which is the relay's contract (the translator is not
//! a transparent proxy). FIX checksum and body-length are not validated.
//!
//! ## What This Crate Does NOT Contain
//! - Socket management or handshake IO (belongs in splice-relay)
//! - The SPSC hand-off (belongs in splice-ring)

pub mod fix;
pub mod lite;
pub mod ouch;
pub mod translate;

pub use fix::{NewOrderSingle, Side};
pub use translate::Translator;
