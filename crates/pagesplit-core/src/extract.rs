//! Page-by-page text extraction from PDF bytes.
//!
//! Opening the document is the only fatal step. After that every page
//! yields exactly one entry in the output: its text, or a placeholder
//! naming the page and the failure, so one unreadable page never costs the
//! rest of the document.

use std::sync::Arc;

use crate::backend::{BackendError, PdfBackend, PdfDocument};
use crate::{Limits, Outcome, ProcessError};

const TRUNCATION_MARKER: &str = "... [content truncated]";

/// Extract the text of each page of `bytes`, in document order.
///
/// At most `limits.max_pages` pages are read; the rest are dropped without
/// error.
pub fn extract_pages(backend: &dyn PdfBackend, bytes: &[u8], limits: &Limits) -> Outcome {
    if bytes.len() < limits.min_pdf_bytes {
        return Err(ProcessError::TooSmall);
    }

    let document = backend.open(bytes).map_err(|e| {
        tracing::error!(error = %e, "failed to open PDF");
        ProcessError::Open(e.reason().to_string())
    })?;

    let total = document.page_count().map_err(|e| {
        tracing::error!(error = %e, "failed to count PDF pages");
        ProcessError::Open(e.reason().to_string())
    })?;
    let cap = total.min(limits.max_pages);
    tracing::info!(total, cap, "opened PDF");

    let pages = (0..cap)
        .map(|index| {
            let result = read_page(document.as_ref(), index, limits.max_page_chars);
            page_or_placeholder(index, result)
        })
        .collect();

    Ok(pages)
}

/// Run [`extract_pages`] on the blocking pool. Parsing backends are
/// synchronous and can take a while on large documents.
pub async fn extract_pages_blocking(
    backend: Arc<dyn PdfBackend>,
    bytes: Vec<u8>,
    limits: Limits,
) -> Outcome {
    tokio::task::spawn_blocking(move || extract_pages(backend.as_ref(), &bytes, &limits))
        .await
        .map_err(|e| ProcessError::Internal(format!("Extraction task failed: {}", e)))?
}

fn read_page(
    document: &dyn PdfDocument,
    index: usize,
    max_chars: usize,
) -> Result<String, BackendError> {
    let text = document.page_text(index)?;
    let text = truncate_chars(text, max_chars);
    tracing::debug!(page = index + 1, len = text.len(), "extracted page text");
    Ok(text)
}

fn page_or_placeholder(index: usize, result: Result<String, BackendError>) -> String {
    match result {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(page = index + 1, error = %e, "page extraction failed");
            format!("[Error extracting page {}: {}]", index + 1, e.reason())
        }
    }
}

/// Keep the first `max_chars` characters of `text`, marking the cut.
fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((cut, _)) = text.char_indices().nth(max_chars) {
        text.truncate(cut);
        text.push_str(TRUNCATION_MARKER);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory backend: `pages[i]` is what page `i` returns.
    struct ScriptedBackend {
        open_error: Option<String>,
        pages: Vec<Result<String, String>>,
    }

    impl ScriptedBackend {
        fn with_pages(pages: Vec<Result<String, String>>) -> Self {
            Self {
                open_error: None,
                pages,
            }
        }
    }

    struct ScriptedDocument {
        pages: Vec<Result<String, String>>,
    }

    impl PdfBackend for ScriptedBackend {
        fn open<'a>(&self, _bytes: &'a [u8]) -> Result<Box<dyn PdfDocument + 'a>, BackendError> {
            if let Some(ref reason) = self.open_error {
                return Err(BackendError::OpenError(reason.clone()));
            }
            Ok(Box::new(ScriptedDocument {
                pages: self.pages.clone(),
            }))
        }
    }

    impl PdfDocument for ScriptedDocument {
        fn page_count(&self) -> Result<usize, BackendError> {
            Ok(self.pages.len())
        }

        fn page_text(&self, index: usize) -> Result<String, BackendError> {
            self.pages[index]
                .clone()
                .map_err(BackendError::ExtractionError)
        }
    }

    fn pdf_bytes() -> Vec<u8> {
        vec![b'%'; 128]
    }

    #[test]
    fn too_small_input_is_rejected_before_opening() {
        let backend = ScriptedBackend {
            open_error: Some("should not be reached".into()),
            pages: vec![],
        };
        for len in [0, 1, 50, 99] {
            let result = extract_pages(&backend, &vec![0u8; len], &Limits::default());
            assert_eq!(result, Err(ProcessError::TooSmall));
        }
    }

    #[test]
    fn exactly_min_size_is_accepted() {
        let backend = ScriptedBackend::with_pages(vec![Ok("only".into())]);
        let result = extract_pages(&backend, &[0u8; 100], &Limits::default());
        assert_eq!(result, Ok(vec!["only".to_string()]));
    }

    #[test]
    fn open_failure_is_fatal() {
        let backend = ScriptedBackend {
            open_error: Some("no objects found".into()),
            pages: vec![],
        };
        let result = extract_pages(&backend, &pdf_bytes(), &Limits::default());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Cannot open PDF document: no objects found"
        );
    }

    #[test]
    fn pages_returned_in_document_order() {
        let backend = ScriptedBackend::with_pages(vec![
            Ok("first".into()),
            Ok("second".into()),
            Ok("third".into()),
        ]);
        let pages = extract_pages(&backend, &pdf_bytes(), &Limits::default()).unwrap();
        assert_eq!(pages, vec!["first", "second", "third"]);
    }

    #[test]
    fn page_count_capped_at_max_pages() {
        let script = (0..350).map(|i| Ok(format!("page {i}"))).collect();
        let backend = ScriptedBackend::with_pages(script);
        let pages = extract_pages(&backend, &pdf_bytes(), &Limits::default()).unwrap();
        assert_eq!(pages.len(), 300);
        assert_eq!(pages[0], "page 0");
        assert_eq!(pages[299], "page 299");
    }

    #[test]
    fn failing_page_becomes_placeholder() {
        let backend = ScriptedBackend::with_pages(vec![
            Ok("one".into()),
            Err("bad content stream".into()),
            Ok("three".into()),
        ]);
        let pages = extract_pages(&backend, &pdf_bytes(), &Limits::default()).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0], "one");
        assert_eq!(pages[1], "[Error extracting page 2: bad content stream]");
        assert_eq!(pages[2], "three");
    }

    #[test]
    fn every_page_failing_is_still_success() {
        let script = (0..4).map(|_| Err("broken".to_string())).collect();
        let backend = ScriptedBackend::with_pages(script);
        let pages = extract_pages(&backend, &pdf_bytes(), &Limits::default()).unwrap();
        assert_eq!(pages.len(), 4);
        assert!(pages[3].starts_with("[Error extracting page 4:"));
    }

    #[test]
    fn long_page_is_truncated_with_marker() {
        let long = "x".repeat(100_050);
        let backend = ScriptedBackend::with_pages(vec![Ok(long), Ok("short".into())]);
        let pages = extract_pages(&backend, &pdf_bytes(), &Limits::default()).unwrap();
        assert_eq!(pages[0].len(), 100_000 + TRUNCATION_MARKER.len());
        assert!(pages[0].ends_with(TRUNCATION_MARKER));
        assert_eq!(pages[1], "short");
    }

    #[test]
    fn page_at_exact_limit_is_verbatim() {
        let exact = "y".repeat(100_000);
        let backend = ScriptedBackend::with_pages(vec![Ok(exact.clone())]);
        let pages = extract_pages(&backend, &pdf_bytes(), &Limits::default()).unwrap();
        assert_eq!(pages[0], exact);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "é".repeat(12);
        let truncated = truncate_chars(text, 10);
        assert_eq!(truncated, format!("{}{}", "é".repeat(10), TRUNCATION_MARKER));
    }

    #[tokio::test]
    async fn blocking_wrapper_returns_pages() {
        let backend: Arc<dyn PdfBackend> =
            Arc::new(ScriptedBackend::with_pages(vec![Ok("a".into())]));
        let result = extract_pages_blocking(backend, pdf_bytes(), Limits::default()).await;
        assert_eq!(result, Ok(vec!["a".to_string()]));
    }
}
