use mupdf::{Document, TextPageFlags};

use pagesplit_core::{BackendError, PdfBackend, PdfDocument};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island — it isolates the mupdf dependency
/// (which is AGPL-3.0) so that the core and the HTTP layer do not
/// transitively depend on it.
#[derive(Debug, Default, Clone, Copy)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for MupdfBackend {
    fn open<'a>(&self, bytes: &'a [u8]) -> Result<Box<dyn PdfDocument + 'a>, BackendError> {
        let document = Document::from_bytes(bytes, "application/pdf")
            .map_err(|e| BackendError::OpenError(e.to_string()))?;
        Ok(Box::new(MupdfDocument { document }))
    }
}

struct MupdfDocument {
    document: Document,
}

impl PdfDocument for MupdfDocument {
    fn page_count(&self) -> Result<usize, BackendError> {
        let count = self
            .document
            .page_count()
            .map_err(|e| BackendError::OpenError(e.to_string()))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn page_text(&self, index: usize) -> Result<String, BackendError> {
        let page_no = i32::try_from(index).map_err(|_| {
            BackendError::ExtractionError(format!("page index {index} out of range"))
        })?;
        let page = self
            .document
            .load_page(page_no)
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

        // One output line per text line, blocks in reading order
        // (what MuPDF's plain-text device emits)
        let mut page_text = String::new();
        for block in text_page.blocks() {
            for line in block.lines() {
                let line_text: String = line
                    .chars()
                    .map(|c| c.char().unwrap_or('\u{FFFD}'))
                    .collect();
                page_text.push_str(&line_text);
                page_text.push('\n');
            }
        }
        Ok(page_text)
    }
}
