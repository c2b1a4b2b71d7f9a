use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
}

impl BackendError {
    /// The underlying library's message, without the variant prefix.
    pub fn reason(&self) -> &str {
        match self {
            BackendError::OpenError(r) | BackendError::ExtractionError(r) => r,
        }
    }
}

/// Trait for PDF parsing backends.
///
/// Implementors open a document from an in-memory buffer and hand back a
/// [`PdfDocument`] whose pages can be read one at a time; the page cap,
/// truncation and per-page error isolation live in
/// [`crate::extract::extract_pages`].
pub trait PdfBackend: Send + Sync {
    fn open<'a>(&self, bytes: &'a [u8]) -> Result<Box<dyn PdfDocument + 'a>, BackendError>;
}

/// An opened document.
pub trait PdfDocument {
    /// Total number of pages in the document.
    fn page_count(&self) -> Result<usize, BackendError>;

    /// Plain text of the page at `index` (0-based).
    fn page_text(&self, index: usize) -> Result<String, BackendError>;
}
