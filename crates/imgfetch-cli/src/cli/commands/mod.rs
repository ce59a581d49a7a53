//! CLI command handlers. Each command is in its own file.

mod config;
mod fetch;
mod init;

pub use config::run_config;
pub use fetch::{run_fetch, FetchArgs};
pub use init::run_init;
