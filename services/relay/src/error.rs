//! Relay engine error types.

use thiserror::Error;

/// Engine operation errors. Stage-local failures never cross thread
/// boundaries as errors; they close the stage-owned socket and let the
/// peer stage observe end-of-stream.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Bad configuration at startup (fatal, exit 1)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bind/listen failure at startup (fatal, exit 1)
    #[error("Listener error: {0}")]
    Listener(String),

    /// Gateway answered the login with something other than an acceptance
    #[error("Gateway rejected login (first acknowledgement byte {0:#04x})")]
    LoginRejected(u8),

    /// IO errors from socket and file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, RelayError>;
