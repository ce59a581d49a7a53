//! `imgfetch config` – print the config path and effective values.

use anyhow::Result;
use imgfetch_core::config::{self, FetchConfig};
use imgfetch_core::gate::GateLimit;
use std::path::Path;

pub fn run_config(cfg: &FetchConfig, explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    if GateLimit::from_config(cfg.max_concurrent_transfers) == GateLimit::Serial {
        println!("# max_concurrent_transfers <= 1: transfers run one at a time");
    }
    Ok(())
}
