//! Aggregate state shared by the transfer tasks of a coordinator.

/// Cumulative counters for one coordinator instance. Never reset between batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateState {
    /// Sum of bytes written by successful transfers.
    pub total_bytes_transferred: u64,
    pub transfers_succeeded: u64,
    pub transfers_failed: u64,
}

impl AggregateState {
    pub(crate) fn record_success(&mut self, bytes: u64) {
        self.total_bytes_transferred = self.total_bytes_transferred.saturating_add(bytes);
        self.transfers_succeeded += 1;
    }

    pub(crate) fn record_failure(&mut self) {
        self.transfers_failed += 1;
    }
}
