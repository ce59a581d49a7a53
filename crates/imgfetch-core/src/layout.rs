//! Directory layout under the configured home directory.
//!
//! `<home>/<input_dir>` receives downloaded images; `<home>/<output_dir>` is
//! reserved for processed images. Both are created idempotently.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::FetchConfig;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    home_dir: PathBuf,
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl Layout {
    /// Builds the layout from config. Subdirectory names must be single relative components.
    pub fn from_config(cfg: &FetchConfig) -> Result<Self, ConfigError> {
        Self::new(&cfg.home_dir, &cfg.input_dir, &cfg.output_dir)
    }

    pub fn new(home_dir: &Path, input: &str, output: &str) -> Result<Self, ConfigError> {
        for name in [input, output] {
            check_subdir_name(name)?;
        }
        Ok(Self {
            home_dir: home_dir.to_path_buf(),
            input_dir: home_dir.join(input),
            output_dir: home_dir.join(output),
        })
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Creates the input directory if absent.
    pub fn ensure_input(&self) -> Result<(), ConfigError> {
        ensure_dir(&self.input_dir)
    }

    /// Creates both directories if absent.
    pub fn ensure_all(&self) -> Result<(), ConfigError> {
        ensure_dir(&self.input_dir)?;
        ensure_dir(&self.output_dir)
    }
}

fn check_subdir_name(name: &str) -> Result<(), ConfigError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(std::path::Component::Normal(_)), None) => Ok(()),
        _ => Err(ConfigError::Invalid(format!(
            "subdirectory name must be a single relative path component: {:?}",
            name
        ))),
    }
}

fn ensure_dir(path: &Path) -> Result<(), ConfigError> {
    if path.exists() && !path.is_dir() {
        return Err(ConfigError::NotADirectory(path.to_path_buf()));
    }
    fs::create_dir_all(path).map_err(|source| ConfigError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "directory ready");
    Ok(())
}
