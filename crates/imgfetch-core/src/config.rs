use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How much of a transfer task runs under the coordinator's state lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockScope {
    /// Lock only the counter update and its log line; the gate limit governs concurrency.
    #[default]
    Accounting,
    /// Hold the lock across the transfer and the counter update. Transfers run one at a time.
    Transfer,
}

/// libcurl options for the transfer primitive (optional `[curl]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurlConfig {
    /// Follow HTTP redirects.
    pub follow_redirects: bool,
    /// Maximum number of redirects followed when `follow_redirects` is set.
    pub max_redirections: u32,
    /// Optional User-Agent header (None = libcurl default).
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Optional receive buffer size in bytes (None = libcurl default).
    #[serde(default)]
    pub buffer_size: Option<usize>,
}

impl Default for CurlConfig {
    fn default() -> Self {
        Self {
            follow_redirects: true,
            max_redirections: 10,
            user_agent: None,
            buffer_size: None,
        }
    }
}

/// Global configuration loaded from `~/.config/imgfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Parent directory of the input and output directories.
    pub home_dir: PathBuf,
    /// Subdirectory of `home_dir` receiving downloaded images.
    pub input_dir: String,
    /// Subdirectory of `home_dir` for processed images (created, not populated here).
    pub output_dir: String,
    /// Maximum concurrent transfers. 0 and 1 both mean one transfer at a time.
    pub max_concurrent_transfers: usize,
    /// Scope of the aggregate-state lock; defaults to `accounting`.
    #[serde(default)]
    pub lock_scope: LockScope,
    /// Optional curl options; if missing, built-in defaults are used.
    #[serde(default)]
    pub curl: Option<CurlConfig>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            home_dir: PathBuf::from("./data"),
            input_dir: "incoming".to_string(),
            output_dir: "outgoing".to_string(),
            max_concurrent_transfers: 0,
            lock_scope: LockScope::default(),
            curl: None,
        }
    }
}

impl FetchConfig {
    /// Curl options with defaults applied.
    pub fn curl_or_default(&self) -> CurlConfig {
        self.curl.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path. The file must exist.
pub fn load_from(path: &Path) -> Result<FetchConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: FetchConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    Ok(cfg)
}
