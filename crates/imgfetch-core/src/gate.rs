//! Transfer gate: counting admission control for in-flight transfers.
//!
//! Wraps a tokio semaphore. Each holder owns a [`GatePermit`]; dropping it
//! returns the permit, so release happens on every exit path of a task.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::{Semaphore, SemaphorePermit};

use crate::error::TransferError;

/// Normalized concurrency limit for the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateLimit {
    /// One transfer at a time. Configured limits of 0 and 1 land here.
    Serial,
    /// Up to `n` transfers at a time, `n > 1`.
    Concurrent(usize),
}

impl GateLimit {
    /// Maps a configured `max_concurrent_transfers` to a limit; values ≤ 1 serialize.
    pub fn from_config(max_concurrent: usize) -> Self {
        if max_concurrent > 1 {
            GateLimit::Concurrent(max_concurrent)
        } else {
            GateLimit::Serial
        }
    }

    /// Number of permits the gate starts with (always ≥ 1).
    pub fn permits(self) -> usize {
        match self {
            GateLimit::Serial => 1,
            GateLimit::Concurrent(n) => n,
        }
    }
}

/// Point-in-time counters for a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateStats {
    /// Permits currently held.
    pub in_use: usize,
    /// Highest `in_use` seen since the gate was created.
    pub peak: usize,
    /// Permits granted since creation.
    pub granted: u64,
    /// Permits returned since creation.
    pub released: u64,
}

/// Admission gate bounding concurrent transfers to `limit.permits()`.
#[derive(Debug)]
pub struct TransferGate {
    limit: GateLimit,
    semaphore: Semaphore,
    in_use: AtomicUsize,
    peak: AtomicUsize,
    granted: AtomicU64,
    released: AtomicU64,
}

impl TransferGate {
    pub fn new(limit: GateLimit) -> Self {
        Self {
            limit,
            semaphore: Semaphore::new(limit.permits()),
            in_use: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            granted: AtomicU64::new(0),
            released: AtomicU64::new(0),
        }
    }

    /// Gate for a configured `max_concurrent_transfers` value.
    pub fn from_config(max_concurrent: usize) -> Self {
        Self::new(GateLimit::from_config(max_concurrent))
    }

    pub fn limit(&self) -> GateLimit {
        self.limit
    }

    /// Waits until a permit is free and takes it. The permit is returned when
    /// the guard is dropped. Waiting has no timeout.
    pub async fn acquire(&self) -> Result<GatePermit<'_>, TransferError> {
        let permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| TransferError::GateClosed)?;
        let now = self.in_use.fetch_add(1, Ordering::AcqRel) + 1;
        self.peak.fetch_max(now, Ordering::AcqRel);
        self.granted.fetch_add(1, Ordering::Relaxed);
        Ok(GatePermit {
            gate: self,
            _permit: permit,
        })
    }

    pub fn stats(&self) -> GateStats {
        GateStats {
            in_use: self.in_use.load(Ordering::Acquire),
            peak: self.peak.load(Ordering::Acquire),
            granted: self.granted.load(Ordering::Relaxed),
            released: self.released.load(Ordering::Relaxed),
        }
    }
}

/// A held gate permit. Counters are updated before the semaphore permit is
/// returned, so `in_use` never reads above the limit.
#[derive(Debug)]
pub struct GatePermit<'a> {
    gate: &'a TransferGate,
    _permit: SemaphorePermit<'a>,
}

impl Drop for GatePermit<'_> {
    fn drop(&mut self) {
        self.gate.in_use.fetch_sub(1, Ordering::AcqRel);
        self.gate.released.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn limit_degrades_to_serial() {
        assert_eq!(GateLimit::from_config(0), GateLimit::Serial);
        assert_eq!(GateLimit::from_config(1), GateLimit::Serial);
        assert_eq!(GateLimit::from_config(2), GateLimit::Concurrent(2));
        assert_eq!(GateLimit::from_config(0).permits(), 1);
        assert_eq!(GateLimit::from_config(16).permits(), 16);
    }

    #[tokio::test]
    async fn permit_released_on_drop() {
        let gate = TransferGate::from_config(2);
        {
            let _a = gate.acquire().await.unwrap();
            let _b = gate.acquire().await.unwrap();
            assert_eq!(gate.stats().in_use, 2);
        }
        let stats = gate.stats();
        assert_eq!(stats.in_use, 0);
        assert_eq!(stats.peak, 2);
        assert_eq!(stats.granted, 2);
        assert_eq!(stats.released, 2);
    }

    #[tokio::test]
    async fn zero_limit_still_admits_one() {
        let gate = TransferGate::from_config(0);
        let first = gate.acquire().await.unwrap();
        let blocked = tokio::time::timeout(Duration::from_millis(50), gate.acquire()).await;
        assert!(blocked.is_err(), "second acquire must wait while one permit is held");
        drop(first);
        let second = tokio::time::timeout(Duration::from_millis(500), gate.acquire()).await;
        assert!(second.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn holders_never_exceed_limit() {
        let gate = Arc::new(TransferGate::from_config(3));
        let mut set = tokio::task::JoinSet::new();
        for _ in 0..24 {
            let gate = Arc::clone(&gate);
            set.spawn(async move {
                let _permit = gate.acquire().await.unwrap();
                assert!(gate.stats().in_use <= 3);
                tokio::time::sleep(Duration::from_millis(5)).await;
            });
        }
        while let Some(res) = set.join_next().await {
            res.unwrap();
        }
        let stats = gate.stats();
        assert!(stats.peak <= 3);
        assert_eq!(stats.granted, 24);
        assert_eq!(stats.released, 24);
        assert_eq!(stats.in_use, 0);
    }
}
