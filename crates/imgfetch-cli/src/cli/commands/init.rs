//! `imgfetch init` – create the directory layout.

use anyhow::Result;
use imgfetch_core::config::FetchConfig;
use imgfetch_core::layout::Layout;
use std::path::PathBuf;

pub fn run_init(mut cfg: FetchConfig, home: Option<PathBuf>) -> Result<()> {
    if let Some(home) = home {
        cfg.home_dir = home;
    }
    let layout = Layout::from_config(&cfg)?;
    layout.ensure_all()?;
    println!("Input directory:  {}", layout.input_dir().display());
    println!("Output directory: {}", layout.output_dir().display());
    Ok(())
}
