//! Latency log records carried from the send stage to the CSV writer.

/// Maximum client order id length preserved in a log record.
pub const CLORDID_MAX: usize = 31;

/// Depth of the TX→writer log ring. Overflow drops records; the hot path
/// never blocks on logging.
pub const LOG_RING_DEPTH: usize = 4096;

/// One latency measurement for one forwarded frame.
///
/// Written as a CSV line
/// `recv_end_ns,queue_wait_ns,send_duration_ns,total_ns,clordid`.
#[derive(Clone, Copy)]
pub struct LogRecord {
    pub recv_end_ns: u64,
    pub queue_wait_ns: u64,
    pub send_duration_ns: u64,
    pub total_ns: u64,
    clordid: [u8; CLORDID_MAX],
    clordid_len: u8,
}

impl LogRecord {
    pub fn new(
        recv_end_ns: u64,
        queue_wait_ns: u64,
        send_duration_ns: u64,
        clordid: &[u8],
    ) -> Self {
        let mut buf = [0u8; CLORDID_MAX];
        let len = clordid.len().min(CLORDID_MAX);
        buf[..len].copy_from_slice(&clordid[..len]);
        Self {
            recv_end_ns,
            queue_wait_ns,
            send_duration_ns,
            total_ns: queue_wait_ns + send_duration_ns,
            clordid: buf,
            clordid_len: len as u8,
        }
    }

    /// The client order id bytes, truncated to [`CLORDID_MAX`].
    #[inline]
    pub fn clordid(&self) -> &[u8] {
        &self.clordid[..self.clordid_len as usize]
    }
}
