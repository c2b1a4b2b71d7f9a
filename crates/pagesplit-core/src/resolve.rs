//! Turn an opaque content value into pages.
//!
//! Content arriving from an indexing pipeline carries no type tag. It is
//! classified by [`classify`] in a fixed order (URL, then base64, then raw
//! text) and dispatched to the fetcher, the PDF extractor or the paginator.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::backend::PdfBackend;
use crate::extract::extract_pages_blocking;
use crate::paginate::paginate;
use crate::{Limits, Outcome, ProcessError};

/// What a content value turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentKind<'a> {
    Url(&'a str),
    Base64Binary(Vec<u8>),
    RawText(&'a str),
}

/// Classify a content value. First match wins:
///
/// 1. starts with `http` (covers `https`): a URL;
/// 2. decodes as strict base64 (RFC 4648 standard alphabet, canonical
///    padding required, no whitespace): binary document bytes;
/// 3. anything else: raw text.
///
/// Returns `None` for the empty string.
pub fn classify(content: &str) -> Option<ContentKind<'_>> {
    if content.is_empty() {
        return None;
    }
    if content.starts_with("http") {
        return Some(ContentKind::Url(content));
    }
    match STANDARD.decode(content) {
        Ok(bytes) => Some(ContentKind::Base64Binary(bytes)),
        Err(_) => Some(ContentKind::RawText(content)),
    }
}

/// Resolves content values to pages, holding the pieces each path needs.
#[derive(Clone)]
pub struct Resolver {
    backend: Arc<dyn PdfBackend>,
    client: reqwest::Client,
    limits: Limits,
}

impl Resolver {
    pub fn new(backend: Arc<dyn PdfBackend>, limits: Limits) -> Self {
        Self {
            backend,
            client: reqwest::Client::new(),
            limits,
        }
    }

    /// Resolve one content value to its pages.
    pub async fn resolve(&self, content: &str) -> Outcome {
        tracing::info!(len = content.len(), "processing content");

        match classify(content) {
            None => Err(ProcessError::InvalidContent),
            Some(ContentKind::Url(url)) => {
                tracing::info!(url, "content is a URL");
                let bytes = self.fetch(url).await?;
                self.extract(bytes).await
            }
            Some(ContentKind::Base64Binary(bytes)) => {
                tracing::info!(bytes = bytes.len(), "decoded base64 content");
                self.extract(bytes).await
            }
            Some(ContentKind::RawText(text)) => {
                tracing::info!("content is not base64 or a URL, treating as raw text");
                let mut pages = paginate(text, self.limits.raw_page_chars);
                if pages.len() > self.limits.max_pages {
                    tracing::warn!(
                        pages = pages.len(),
                        max = self.limits.max_pages,
                        "raw text exceeds page cap, truncating"
                    );
                    pages.truncate(self.limits.max_pages);
                }
                Ok(pages)
            }
        }
    }

    /// Extract pages from document bytes already in hand.
    pub async fn extract(&self, bytes: Vec<u8>) -> Outcome {
        extract_pages_blocking(Arc::clone(&self.backend), bytes, self.limits.clone()).await
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ProcessError> {
        let mut response = self
            .client
            .get(url)
            .timeout(self.limits.fetch_timeout)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url, error = %e, "download failed");
                ProcessError::Download(e.to_string())
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::warn!(url, status = status.as_u16(), "download returned non-200");
            return Err(ProcessError::DownloadStatus(status.as_u16()));
        }

        let max = self.limits.max_download_bytes;
        if response.content_length().is_some_and(|len| len > max as u64) {
            tracing::warn!(url, max, "download too large");
            return Err(too_large(max));
        }

        // Content-Length may be absent or wrong; count as the chunks arrive.
        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            tracing::error!(url, error = %e, "failed to read download body");
            ProcessError::Download(e.to_string())
        })? {
            if bytes.len() + chunk.len() > max {
                tracing::warn!(url, max, "download too large");
                return Err(too_large(max));
            }
            bytes.extend_from_slice(&chunk);
        }
        tracing::info!(url, bytes = bytes.len(), "downloaded document");
        Ok(bytes)
    }
}

fn too_large(max: usize) -> ProcessError {
    ProcessError::Download(format!("response body exceeds {max} bytes"))
}
