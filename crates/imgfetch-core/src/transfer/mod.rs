//! Byte-transfer primitive: copy a URL to a local path and report bytes written.
//!
//! The coordinator only sees the [`Transfer`] trait. [`CurlTransfer`] is the
//! production implementation; tests plug in their own.

mod easy;
mod part;

pub use easy::CurlTransfer;
pub use part::{is_part_name, PartFile};

use std::path::Path;

use crate::error::TransferError;

/// Copies the resource at `url` to `dest` and returns the number of bytes written.
///
/// Implementations block the calling thread; the coordinator runs them on the
/// blocking pool.
pub trait Transfer: Send + Sync + 'static {
    fn transfer(&self, url: &str, dest: &Path) -> Result<u64, TransferError>;
}
