//! Batch coordinator.
//!
//! Runs one task per URL on the tokio runtime. Each task takes a permit from
//! the shared [`TransferGate`], runs the blocking [`Transfer`] on the blocking
//! pool, adds its bytes to the shared [`AggregateState`] under the state lock,
//! and drops its permit. `fetch_batch` returns only after every task has
//! finished. Per-URL failures never fail the batch; only layout errors do,
//! and those are reported before any task is spawned.
//!
//! The aggregate counter belongs to the coordinator instance and keeps
//! growing across batches.

mod outcome;
mod state;
mod task;

pub use outcome::{BatchReport, FetchRequest, TransferOutcome, UrlOutcome};
pub use state::AggregateState;

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::config::{FetchConfig, LockScope};
use crate::error::{ConfigError, TransferError};
use crate::gate::{GateLimit, GateStats, TransferGate};
use crate::layout::Layout;
use crate::transfer::{CurlTransfer, Transfer};

use task::TaskContext;

pub struct BatchCoordinator {
    layout: Layout,
    ctx: TaskContext,
}

impl BatchCoordinator {
    pub fn new(
        layout: Layout,
        limit: GateLimit,
        lock_scope: LockScope,
        transfer: Arc<dyn Transfer>,
    ) -> Self {
        let ctx = TaskContext {
            input_dir: layout.input_dir().to_path_buf(),
            gate: Arc::new(TransferGate::new(limit)),
            state: Arc::new(Mutex::new(AggregateState::default())),
            transfer,
            lock_scope,
        };
        Self { layout, ctx }
    }

    /// Coordinator with the curl transfer primitive configured from `cfg`.
    pub fn from_config(cfg: &FetchConfig) -> Result<Self, ConfigError> {
        let transfer = Arc::new(CurlTransfer::new(cfg.curl_or_default()));
        Self::with_transfer(cfg, transfer)
    }

    pub fn with_transfer(
        cfg: &FetchConfig,
        transfer: Arc<dyn Transfer>,
    ) -> Result<Self, ConfigError> {
        let layout = Layout::from_config(cfg)?;
        let limit = GateLimit::from_config(cfg.max_concurrent_transfers);
        Ok(Self::new(layout, limit, cfg.lock_scope, transfer))
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn gate_limit(&self) -> GateLimit {
        self.ctx.gate.limit()
    }

    pub fn lock_scope(&self) -> LockScope {
        self.ctx.lock_scope
    }

    pub fn gate_stats(&self) -> GateStats {
        self.ctx.gate.stats()
    }

    /// Snapshot of the cumulative counters.
    pub async fn state(&self) -> AggregateState {
        *self.ctx.state.lock().await
    }

    /// Total bytes written by successful transfers over this coordinator's lifetime.
    pub async fn total_bytes(&self) -> u64 {
        self.state().await.total_bytes_transferred
    }

    /// Fetches one URL into the input directory. Failures are returned in the
    /// outcome (and logged when `keep_log`), never raised. The input directory
    /// is not created here.
    pub async fn fetch_one(&self, url: &str, keep_log: bool) -> TransferOutcome {
        self.ctx.fetch(url, keep_log).await
    }

    /// Fetches every URL concurrently, bounded by the gate, and waits for all of them.
    ///
    /// An empty list is a no-op: nothing is created, spawned, or counted.
    /// Otherwise the input and output directories are created first.
    pub async fn fetch_batch<I, S>(&self, urls: I, keep_log: bool) -> Result<BatchReport, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let urls: Vec<String> = urls.into_iter().map(Into::into).collect();
        if urls.is_empty() {
            return Ok(BatchReport::default());
        }
        self.layout.ensure_all()?;

        let start = Instant::now();
        let mut join_set = tokio::task::JoinSet::new();
        for (index, url) in urls.iter().enumerate() {
            let ctx = self.ctx.clone();
            let url = url.clone();
            join_set.spawn(async move {
                let outcome = ctx.fetch(&url, keep_log).await;
                (index, outcome)
            });
        }

        let mut slots: Vec<Option<TransferOutcome>> = urls.iter().map(|_| None).collect();
        while let Some(res) = join_set.join_next().await {
            match res {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                Err(e) => tracing::error!("fetch task join: {}", e),
            }
        }
        let elapsed = start.elapsed();

        let outcomes = self.settle(urls, slots).await;
        let report = BatchReport { outcomes, elapsed };

        if keep_log {
            tracing::info!(
                count = report.count(),
                failed = report.failed(),
                bytes = report.bytes(),
                "{} items in {} seconds",
                report.count(),
                elapsed.as_secs_f64()
            );
        }
        Ok(report)
    }

    /// Pairs URLs with their outcomes. A task that never reported (it
    /// panicked outside the transfer) counts as a failed transfer.
    async fn settle(
        &self,
        urls: Vec<String>,
        slots: Vec<Option<TransferOutcome>>,
    ) -> Vec<UrlOutcome> {
        let mut outcomes = Vec::with_capacity(urls.len());
        for (url, slot) in urls.into_iter().zip(slots) {
            let outcome = match slot {
                Some(outcome) => outcome,
                None => {
                    self.ctx.state.lock().await.record_failure();
                    TransferOutcome::Failed(TransferError::Task("task did not complete".into()))
                }
            };
            outcomes.push(UrlOutcome { url, outcome });
        }
        outcomes
    }
}
