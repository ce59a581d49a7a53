//! Body of one transfer task: gate, transfer, accounting, log.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::outcome::{FetchRequest, TransferOutcome};
use super::state::AggregateState;
use crate::config::LockScope;
use crate::error::TransferError;
use crate::gate::TransferGate;
use crate::transfer::Transfer;

/// Everything a task needs; cloned into each spawned task.
#[derive(Clone)]
pub(super) struct TaskContext {
    pub(super) input_dir: PathBuf,
    pub(super) gate: Arc<TransferGate>,
    pub(super) state: Arc<Mutex<AggregateState>>,
    pub(super) transfer: Arc<dyn Transfer>,
    pub(super) lock_scope: LockScope,
}

impl TaskContext {
    /// Runs one URL to completion. Never fails; the error is in the outcome.
    pub(super) async fn fetch(&self, url: &str, keep_log: bool) -> TransferOutcome {
        match self.try_fetch(url, keep_log).await {
            Ok(bytes) => TransferOutcome::Succeeded { bytes },
            Err(e) => {
                if keep_log {
                    tracing::warn!(url, error = %e, "download failed");
                } else {
                    tracing::debug!(url, error = %e, "download failed");
                }
                self.state.lock().await.record_failure();
                TransferOutcome::Failed(e)
            }
        }
    }

    async fn try_fetch(&self, url: &str, keep_log: bool) -> Result<u64, TransferError> {
        let request = FetchRequest::new(url, &self.input_dir)?;
        // Held until the end of this function, on every path.
        let _permit = self.gate.acquire().await?;

        match self.lock_scope {
            LockScope::Transfer => {
                let mut state = self.state.lock().await;
                let bytes = self.run_transfer(&request).await?;
                state.record_success(bytes);
                log_downloaded(request.dest(), bytes, keep_log);
                Ok(bytes)
            }
            LockScope::Accounting => {
                let bytes = self.run_transfer(&request).await?;
                let mut state = self.state.lock().await;
                state.record_success(bytes);
                log_downloaded(request.dest(), bytes, keep_log);
                Ok(bytes)
            }
        }
    }

    async fn run_transfer(&self, request: &FetchRequest) -> Result<u64, TransferError> {
        let transfer = Arc::clone(&self.transfer);
        let url = request.url().to_string();
        let dest = request.dest().to_path_buf();
        tokio::task::spawn_blocking(move || transfer.transfer(&url, &dest))
            .await
            .map_err(|e| TransferError::Task(e.to_string()))?
    }
}

fn log_downloaded(path: &Path, bytes: u64, keep_log: bool) {
    if keep_log {
        tracing::info!(
            path = %path.display(),
            bytes,
            "{} downloaded, {} bytes",
            path.display(),
            bytes
        );
    }
}
