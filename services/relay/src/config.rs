//! Engine configuration.
//!
//! Set once at startup from argv and read-only thereafter; every stage
//! thread holds it behind an `Arc`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{RelayError, Result};

/// Static engine configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Endpoint the acceptor listens on.
    pub listen: SocketAddr,
    /// Downstream gateway endpoint the send stage connects to.
    pub forward: SocketAddr,
    /// Core the receive stage pins to.
    pub rx_cpu: usize,
    /// Core the send stage pins to.
    pub tx_cpu: usize,
    /// Core the sleeper thread holds out of the scheduler pool.
    pub sleep_cpu: usize,
    /// Latency pipeline, when enabled.
    pub latency: Option<LatencyConfig>,
    /// Debug verbosity from the CLI; 2 enables per-frame diagnostics.
    pub debug_level: u8,
}

/// Latency measurement configuration.
#[derive(Debug, Clone)]
pub struct LatencyConfig {
    /// Append-only CSV output path.
    pub log_path: PathBuf,
    /// Writer wake-up cadence.
    pub flush_interval: Duration,
}

impl RelayConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(latency) = &self.latency {
            if latency.flush_interval < Duration::from_millis(1) {
                return Err(RelayError::Config(
                    "latency flush interval must be at least 1 ms".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> RelayConfig {
        RelayConfig {
            listen: "127.0.0.1:5000".parse().unwrap(),
            forward: "127.0.0.1:6000".parse().unwrap(),
            rx_cpu: 1,
            tx_cpu: 2,
            sleep_cpu: 3,
            latency: None,
            debug_level: 0,
        }
    }

    #[test]
    fn test_validate_accepts_no_latency() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_flush_interval() {
        let mut config = base_config();
        config.latency = Some(LatencyConfig {
            log_path: "latency.csv".into(),
            flush_interval: Duration::ZERO,
        });
        assert!(config.validate().is_err());
    }
}
