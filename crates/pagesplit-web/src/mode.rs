use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;

/// Which protocol the caller speaks, decided once per request from its
/// declared content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// `application/json`: an indexing-pipeline batch of records.
    Pipeline,
    /// Anything else: the body is the PDF itself.
    Direct,
}

impl RequestMode {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if content_type.contains("application/json") {
            RequestMode::Pipeline
        } else {
            RequestMode::Direct
        }
    }
}
