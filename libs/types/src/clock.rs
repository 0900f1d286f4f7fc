//! Monotonic nanosecond timestamps for pipeline latency measurement.
//!
//! All pipeline timestamps share a single process-wide `Instant` epoch, so
//! differences between any two of them are meaningful. The epoch itself is
//! unspecified; these values are never wall-clock time.

use std::sync::OnceLock;
use std::time::Instant;

static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Nanoseconds elapsed since the process-wide epoch.
///
/// The first call fixes the epoch; every later call is a single monotonic
/// clock read with no syscall-visible side effects.
#[inline]
pub fn monotonic_ns() -> u64 {
    EPOCH.get_or_init(Instant::now).elapsed().as_nanos() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic() {
        let a = monotonic_ns();
        let b = monotonic_ns();
        assert!(b >= a);
    }

    #[test]
    fn test_advances() {
        let a = monotonic_ns();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = monotonic_ns();
        assert!(b - a >= 1_000_000);
    }
}
