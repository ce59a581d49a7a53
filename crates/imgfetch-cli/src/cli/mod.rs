//! CLI for the imgfetch batch image fetcher.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use imgfetch_core::config::{self, FetchConfig};
use std::path::PathBuf;

use commands::{run_config, run_fetch, run_init, FetchArgs};

/// Top-level CLI for imgfetch.
#[derive(Debug, Parser)]
#[command(name = "imgfetch")]
#[command(about = "imgfetch: bounded concurrent batch image fetcher", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/imgfetch/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a batch of images into the input directory.
    Fetch {
        /// Image URLs (http, https, file).
        urls: Vec<String>,
        /// Read more URLs from a file, one per line (`#` comments and blank lines skipped).
        #[arg(long, value_name = "PATH")]
        from_file: Option<PathBuf>,
        /// Maximum concurrent transfers (0 or 1 = one at a time). Overrides config.
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,
        /// Home directory holding the input/output directories. Overrides config.
        #[arg(long, value_name = "DIR")]
        home: Option<PathBuf>,
        /// Do not log per-image and per-batch lines.
        #[arg(long)]
        quiet: bool,
        /// Hold the state lock across each transfer (transfers run one at a time).
        #[arg(long)]
        serialize_transfers: bool,
    },

    /// Create the input and output directories.
    Init {
        /// Home directory. Overrides config.
        #[arg(long, value_name = "DIR")]
        home: Option<PathBuf>,
    },

    /// Show the config file path and effective configuration.
    Config,
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                urls,
                from_file,
                jobs,
                home,
                quiet,
                serialize_transfers,
            } => {
                let args = FetchArgs {
                    urls,
                    from_file,
                    jobs,
                    home,
                    keep_log: !quiet,
                    serialize_transfers,
                };
                run_fetch(cfg, args).await?;
            }
            CliCommand::Init { home } => run_init(cfg, home)?,
            CliCommand::Config => run_config(&cfg, cli.config.as_deref())?,
        }

        Ok(())
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<FetchConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

#[cfg(test)]
mod tests;
