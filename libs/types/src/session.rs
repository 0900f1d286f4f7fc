//! Per-connection session lifecycle and profile selection.
//!
//! A session is the lifetime from client accept through mutual disconnect.
//! `Active` is the only state in which the receive stage reads client bytes
//! and the send stage forwards data frames; every other state either
//! precedes data flow or terminates it.

use std::net::SocketAddr;

/// Session lifecycle.
///
/// ```text
/// Connecting → AwaitingAck → Active → Closed
///                   ↓
///               Rejected → Closed
/// ```
///
/// The raw relay profile skips the acknowledgement wait and moves straight
/// from `Connecting` to `Active` once the downstream connect succeeds.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting = 0,
    AwaitingAck = 1,
    Active = 2,
    Rejected = 3,
    Closed = 4,
}

impl SessionState {
    /// Terminal states never transition again.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Rejected | SessionState::Closed)
    }

    /// Inverse of the `as u8` discriminant, for atomic storage.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(SessionState::Connecting),
            1 => Some(SessionState::AwaitingAck),
            2 => Some(SessionState::Active),
            3 => Some(SessionState::Rejected),
            4 => Some(SessionState::Closed),
            _ => None,
        }
    }
}

/// Gateway login credentials for the translation profile.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Which binary order dialect the translation profile speaks downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Canonical layout: 51-byte login with session/sequence request,
    /// 49-byte tokenised new-order record.
    Ouch5,
    /// Lightweight layout kept for test gateways: 17-byte login,
    /// 14-byte order record, single-byte `N` rejection.
    Lite,
}

/// Translation profile parameters.
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    pub downstream: SocketAddr,
    pub dialect: Dialect,
    pub credentials: Credentials,
}

/// Per-connection mode: transparent byte relay, or FIX→OUCH translation
/// behind a login handshake.
#[derive(Debug, Clone)]
pub enum Profile {
    Relay { downstream: SocketAddr },
    Translate(TranslateConfig),
}

impl Profile {
    /// The endpoint the send stage connects to.
    pub fn downstream(&self) -> SocketAddr {
        match self {
            Profile::Relay { downstream } => *downstream,
            Profile::Translate(config) => config.downstream,
        }
    }
}
