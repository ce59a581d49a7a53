//! Error types for the fetch pipeline.
//!
//! `TransferError` is per-URL and never escapes a batch; `ConfigError` is
//! fatal and returned before any transfer task is spawned.

use std::path::PathBuf;

/// Failure of a single URL's transfer. Recovered at the task boundary.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// The URL could not be parsed.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// The URL has no path segment usable as a local filename.
    #[error("no filename in URL path: {0}")]
    NoFilename(String),
    /// Curl reported an error (unreachable host, bad scheme, aborted write, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Local write, flush, or rename failed.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
    /// The transfer gate was closed before a permit was granted.
    #[error("transfer gate closed")]
    GateClosed,
    /// The task running the transfer panicked or was cancelled by the runtime.
    #[error("transfer task failed: {0}")]
    Task(String),
}

/// Configuration or layout failure. Fatal to batch startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} exists but is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(TransferError::Http(404).to_string(), "HTTP 404");
        assert_eq!(
            TransferError::NoFilename("https://example.com/".into()).to_string(),
            "no filename in URL path: https://example.com/"
        );
        let e = ConfigError::NotADirectory(PathBuf::from("/tmp/x"));
        assert_eq!(e.to_string(), "/tmp/x exists but is not a directory");
    }

    #[test]
    fn storage_error_keeps_source() {
        use std::error::Error;
        let e: TransferError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert!(e.source().is_some());
        assert_eq!(e.to_string(), "storage: disk full");
    }
}
