//! libcurl transfer: single GET (or file:// read) streamed into a `.part` file.

use std::path::Path;

use super::part::PartFile;
use super::Transfer;
use crate::config::CurlConfig;
use crate::error::TransferError;

/// Production [`Transfer`] on a curl Easy handle. One handle per call.
#[derive(Debug, Clone, Default)]
pub struct CurlTransfer {
    opts: CurlConfig,
}

impl CurlTransfer {
    pub fn new(opts: CurlConfig) -> Self {
        Self { opts }
    }

    fn configure(&self, easy: &mut curl::easy::Easy, url: &str) -> Result<(), curl::Error> {
        easy.url(url)?;
        easy.follow_location(self.opts.follow_redirects)?;
        if self.opts.follow_redirects {
            easy.max_redirections(self.opts.max_redirections)?;
        }
        if let Some(ua) = &self.opts.user_agent {
            easy.useragent(ua)?;
        }
        if let Some(sz) = self.opts.buffer_size {
            easy.buffer_size(sz)?;
        }
        Ok(())
    }
}

impl Transfer for CurlTransfer {
    fn transfer(&self, url: &str, dest: &Path) -> Result<u64, TransferError> {
        let mut easy = curl::easy::Easy::new();
        self.configure(&mut easy, url)?;

        let mut part = PartFile::create(dest)?;
        let mut write_err: Option<std::io::Error> = None;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match part.write_chunk(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };
        if let Some(e) = write_err {
            return Err(TransferError::Storage(e));
        }
        performed?;

        // file:// and other non-HTTP schemes report 0.
        let code = easy.response_code()?;
        if code != 0 && !(200..300).contains(&code) {
            return Err(TransferError::Http(code));
        }

        let bytes = part.finalize(dest)?;
        tracing::trace!(url, bytes, "curl transfer complete");
        Ok(bytes)
    }
}
