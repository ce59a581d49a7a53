//! URL modeling and destination derivation.
//!
//! An image's local name is the last segment of its URL path, sanitized for
//! Linux filesystems. URLs that yield no usable name fail their own transfer
//! and never the batch.

mod path;
mod sanitize;

pub use path::last_path_segment;
pub use sanitize::sanitize_filename_for_linux;

use crate::error::TransferError;
use std::path::{Path, PathBuf};

/// Derives the local filename for `url`.
///
/// # Examples
///
/// - `derive_filename("https://example.com/img/cat.png")` → `Ok("cat.png")`
/// - `derive_filename("https://example.com/img/")` → `Err(NoFilename)`
pub fn derive_filename(url: &str) -> Result<String, TransferError> {
    let raw = last_path_segment(url)?;
    let sanitized = sanitize_filename_for_linux(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        return Err(TransferError::NoFilename(url.to_string()));
    }
    Ok(sanitized)
}

/// Destination path for `url` inside `dir`.
pub fn destination_in(dir: &Path, url: &str) -> Result<PathBuf, TransferError> {
    Ok(dir.join(derive_filename(url)?))
}
