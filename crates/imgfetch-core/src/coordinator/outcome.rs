//! Per-URL results and the batch summary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::TransferError;
use crate::url_model;

/// One URL and where it will be written. Built once per task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    url: String,
    dest: PathBuf,
}

impl FetchRequest {
    /// Derives the destination for `url` inside `input_dir`.
    pub fn new(url: &str, input_dir: &Path) -> Result<Self, TransferError> {
        Ok(Self {
            url: url.to_string(),
            dest: url_model::destination_in(input_dir, url)?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }
}

/// Result of one transfer task.
#[derive(Debug)]
pub enum TransferOutcome {
    Succeeded { bytes: u64 },
    Failed(TransferError),
}

impl TransferOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TransferOutcome::Succeeded { .. })
    }

    /// Bytes contributed to the aggregate counter (0 on failure).
    pub fn bytes(&self) -> u64 {
        match self {
            TransferOutcome::Succeeded { bytes } => *bytes,
            TransferOutcome::Failed(_) => 0,
        }
    }

    pub fn error(&self) -> Option<&TransferError> {
        match self {
            TransferOutcome::Succeeded { .. } => None,
            TransferOutcome::Failed(e) => Some(e),
        }
    }
}

#[derive(Debug)]
pub struct UrlOutcome {
    pub url: String,
    pub outcome: TransferOutcome,
}

/// Summary of one `fetch_batch` call. Outcomes are in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<UrlOutcome>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn count(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.count() - self.succeeded()
    }

    /// Bytes written by this batch alone.
    pub fn bytes(&self) -> u64 {
        self.outcomes.iter().map(|o| o.outcome.bytes()).sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &TransferError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.outcome.error().map(|e| (o.url.as_str(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_derives_destination() {
        let req = FetchRequest::new("https://h/a/b.png", Path::new("/in")).unwrap();
        assert_eq!(req.url(), "https://h/a/b.png");
        assert_eq!(req.dest(), Path::new("/in/b.png"));
    }

    #[test]
    fn report_counts() {
        let report = BatchReport {
            outcomes: vec![
                UrlOutcome {
                    url: "a".into(),
                    outcome: TransferOutcome::Succeeded { bytes: 200 },
                },
                UrlOutcome {
                    url: "b".into(),
                    outcome: TransferOutcome::Failed(TransferError::Http(500)),
                },
                UrlOutcome {
                    url: "c".into(),
                    outcome: TransferOutcome::Succeeded { bytes: 300 },
                },
            ],
            elapsed: Duration::from_millis(5),
        };
        assert_eq!(report.count(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.bytes(), 500);
        let failures: Vec<_> = report.failures().map(|(u, _)| u).collect();
        assert_eq!(failures, vec!["b"]);
    }
}
