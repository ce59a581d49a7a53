//! Temp file for an in-progress transfer, persisted over the destination on success.
//!
//! Every transfer gets its own uniquely named temp file in the destination's
//! directory, so concurrent transfers to the same destination never share
//! one. The temp name does not grow with the destination name.

use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::TransferError;

/// Prefix and suffix of temp file names: `.imgfetch-XXXXXX.part`.
pub const PART_PREFIX: &str = ".imgfetch-";
pub const PART_SUFFIX: &str = ".part";

/// Buffered writer over a unique temp file next to the destination. The temp
/// file is removed on drop unless [`PartFile::finalize`] succeeded.
pub struct PartFile {
    writer: BufWriter<NamedTempFile>,
    written: u64,
}

impl PartFile {
    /// Creates a fresh temp file in the directory of `final_path`.
    pub fn create(final_path: &Path) -> Result<Self, TransferError> {
        let dir = match final_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let temp = tempfile::Builder::new()
            .prefix(PART_PREFIX)
            .suffix(PART_SUFFIX)
            .tempfile_in(dir)?;
        Ok(Self {
            writer: BufWriter::new(temp),
            written: 0,
        })
    }

    pub fn write_chunk(&mut self, data: &[u8]) -> std::io::Result<()> {
        self.writer.write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn temp_path(&self) -> &Path {
        self.writer.get_ref().path()
    }

    /// Flushes, syncs and atomically renames the temp file over `final_path`
    /// (replacing any existing file). Returns bytes written.
    pub fn finalize(self, final_path: &Path) -> Result<u64, TransferError> {
        let written = self.written;
        let temp = self.writer.into_inner().map_err(|e| e.into_error())?;
        temp.as_file().sync_all()?;
        temp.persist(final_path).map_err(|e| e.error)?;
        Ok(written)
    }
}

/// True if `name` looks like one of our temp files.
pub fn is_part_name(name: &str) -> bool {
    name.starts_with(PART_PREFIX) && name.ends_with(PART_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leftover_parts(dir: &Path) -> usize {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| is_part_name(&e.file_name().to_string_lossy()))
            .count()
    }

    #[test]
    fn finalize_renames_and_counts() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("img.bin");
        let mut part = PartFile::create(&dest).unwrap();
        part.write_chunk(b"hello ").unwrap();
        part.write_chunk(b"world").unwrap();
        assert_eq!(part.written(), 11);
        assert!(part.temp_path().exists());
        assert_eq!(part.temp_path().parent(), Some(dir.path()));
        let n = part.finalize(&dest).unwrap();
        assert_eq!(n, 11);
        assert_eq!(leftover_parts(dir.path()), 0);
        assert_eq!(std::fs::read(&dest).unwrap(), b"hello world");
    }

    #[test]
    fn dropped_part_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("img.bin");
        {
            let mut part = PartFile::create(&dest).unwrap();
            part.write_chunk(b"partial").unwrap();
        }
        assert_eq!(leftover_parts(dir.path()), 0);
        assert!(!dest.exists());
    }

    #[test]
    fn same_destination_gets_separate_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("pic.png");
        let mut first = PartFile::create(&dest).unwrap();
        let mut second = PartFile::create(&dest).unwrap();
        assert_ne!(first.temp_path(), second.temp_path());

        first.write_chunk(&[b'A'; 64]).unwrap();
        second.write_chunk(&[b'B'; 32]).unwrap();
        assert_eq!(first.finalize(&dest).unwrap(), 64);
        assert_eq!(std::fs::read(&dest).unwrap(), vec![b'A'; 64]);
        // Last one to finish wins, intact.
        assert_eq!(second.finalize(&dest).unwrap(), 32);
        assert_eq!(std::fs::read(&dest).unwrap(), vec![b'B'; 32]);
        assert_eq!(leftover_parts(dir.path()), 0);
    }

    #[test]
    fn max_length_destination_name_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let name = format!("{}.png", "x".repeat(251));
        assert_eq!(name.len(), 255);
        let dest = dir.path().join(&name);
        let mut part = PartFile::create(&dest).unwrap();
        part.write_chunk(b"img").unwrap();
        assert_eq!(part.finalize(&dest).unwrap(), 3);
        assert!(dest.is_file());
    }
}
