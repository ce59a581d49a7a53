//! Filename extraction from URL path.

use crate::error::TransferError;

/// Returns the last segment of the URL path (query and fragment excluded).
///
/// The segment may need sanitizing before use. A path ending in `/` (or an
/// empty path) has no last segment and yields `NoFilename`.
pub fn last_path_segment(url: &str) -> Result<String, TransferError> {
    let parsed = url::Url::parse(url).map_err(|e| TransferError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    let segment = parsed.path().rsplit('/').next().unwrap_or("");
    if segment.is_empty() || segment == "." || segment == ".." {
        return Err(TransferError::NoFilename(url.to_string()));
    }
    Ok(segment.to_string())
}
