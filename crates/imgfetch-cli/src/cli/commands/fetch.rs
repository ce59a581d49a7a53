//! `imgfetch fetch <urls...>` – run one batch through the coordinator.

use anyhow::{Context, Result};
use imgfetch_core::config::{FetchConfig, LockScope};
use imgfetch_core::coordinator::BatchCoordinator;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct FetchArgs {
    pub urls: Vec<String>,
    pub from_file: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub home: Option<PathBuf>,
    pub keep_log: bool,
    pub serialize_transfers: bool,
}

pub async fn run_fetch(cfg: FetchConfig, args: FetchArgs) -> Result<()> {
    let cfg = apply_overrides(cfg, &args);
    let mut urls = args.urls;
    if let Some(path) = &args.from_file {
        urls.extend(read_url_file(path)?);
    }
    if urls.is_empty() {
        println!("No URLs given.");
        return Ok(());
    }

    let coordinator = BatchCoordinator::from_config(&cfg)?;
    tracing::debug!(
        limit = ?coordinator.gate_limit(),
        lock_scope = ?coordinator.lock_scope(),
        "starting batch of {}",
        urls.len()
    );
    let report = coordinator.fetch_batch(urls, args.keep_log).await?;

    for (url, err) in report.failures() {
        eprintln!("  failed: {url}: {err}");
    }
    println!(
        "Fetched {}/{} images ({} bytes) in {:.2}s into {}",
        report.succeeded(),
        report.count(),
        report.bytes(),
        report.elapsed.as_secs_f64(),
        coordinator.layout().input_dir().display()
    );
    Ok(())
}

pub(crate) fn apply_overrides(mut cfg: FetchConfig, args: &FetchArgs) -> FetchConfig {
    if let Some(jobs) = args.jobs {
        cfg.max_concurrent_transfers = jobs;
    }
    if let Some(home) = &args.home {
        cfg.home_dir = home.clone();
    }
    if args.serialize_transfers {
        cfg.lock_scope = LockScope::Transfer;
    }
    cfg
}

fn read_url_file(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read URL list: {}", path.display()))?;
    Ok(parse_url_list(&text))
}

/// One URL per line; blank lines and `#` comments are skipped.
pub(crate) fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}
