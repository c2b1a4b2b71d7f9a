use std::time::Duration;
use thiserror::Error;

pub mod backend;
pub mod config_file;
pub mod extract;
pub mod paginate;
pub mod resolve;
#[cfg(feature = "test-util")]
pub mod testing;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend, PdfDocument};
pub use extract::{extract_pages, extract_pages_blocking};
pub use paginate::paginate;
pub use resolve::{ContentKind, Resolver, classify};

/// Result of processing one document or content value: the ordered page
/// texts, or the single error that prevented producing any.
pub type Outcome = Result<Vec<String>, ProcessError>;

/// Size bounds and timeouts applied while producing pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Pages beyond this count are silently dropped.
    pub max_pages: usize,
    /// Extracted page text longer than this (in characters) is truncated.
    pub max_page_chars: usize,
    /// Target size of a synthetic raw-text page, in characters.
    pub raw_page_chars: usize,
    /// Inputs shorter than this are rejected before the parser sees them.
    pub min_pdf_bytes: usize,
    /// Timeout for URL-mode downloads.
    pub fetch_timeout: Duration,
    /// URL-mode downloads larger than this are abandoned.
    pub max_download_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_pages: 300,
            max_page_chars: 100_000,
            raw_page_chars: 5_000,
            min_pdf_bytes: 100,
            fetch_timeout: Duration::from_secs(30),
            max_download_bytes: 100 * 1024 * 1024,
        }
    }
}

/// Errors that replace the page sequence of an [`Outcome`].
///
/// The `Display` text of each variant is what callers see in the response
/// body, so the wording is part of the wire contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("PDF data too small to be valid")]
    TooSmall,
    #[error("Cannot open PDF document: {0}")]
    Open(String),
    #[error("Failed to download from URL: status code {0}")]
    DownloadStatus(u16),
    #[error("Error downloading from URL: {0}")]
    Download(String),
    #[error("Invalid or empty content")]
    InvalidContent,
    /// A failure outside the documented paths (a panicked or cancelled
    /// extraction task). Transports report it as a general failure.
    #[error("{0}")]
    Internal(String),
}

impl ProcessError {
    pub fn is_internal(&self) -> bool {
        matches!(self, ProcessError::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_match_wire_contract() {
        assert_eq!(
            ProcessError::TooSmall.to_string(),
            "PDF data too small to be valid"
        );
        assert_eq!(
            ProcessError::Open("no objects found".into()).to_string(),
            "Cannot open PDF document: no objects found"
        );
        assert_eq!(
            ProcessError::DownloadStatus(404).to_string(),
            "Failed to download from URL: status code 404"
        );
        assert_eq!(
            ProcessError::Download("connection refused".into()).to_string(),
            "Error downloading from URL: connection refused"
        );
        assert_eq!(
            ProcessError::InvalidContent.to_string(),
            "Invalid or empty content"
        );
    }

    #[test]
    fn only_internal_is_internal() {
        assert!(ProcessError::Internal("boom".into()).is_internal());
        assert!(!ProcessError::TooSmall.is_internal());
        assert!(!ProcessError::Download("x".into()).is_internal());
    }

    #[test]
    fn default_limits() {
        let limits = Limits::default();
        assert_eq!(limits.max_pages, 300);
        assert_eq!(limits.max_page_chars, 100_000);
        assert_eq!(limits.raw_page_chars, 5_000);
        assert_eq!(limits.min_pdf_bytes, 100);
        assert_eq!(limits.fetch_timeout, Duration::from_secs(30));
        assert_eq!(limits.max_download_bytes, 100 * 1024 * 1024);
    }
}
