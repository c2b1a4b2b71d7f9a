use serde::Serialize;
use serde_json::Value;

use crate::envelope::UNKNOWN_RECORD_ID;

// ── Pipeline mode (indexing skill contract) ──────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PipelineResponse {
    pub values: Vec<RecordJson>,
}

/// One response record. Exactly one of `data` and `errors` is present.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordJson {
    pub record_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PagesJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PagesJson {
    pub pages: Vec<String>,
}

impl RecordJson {
    pub fn pages(record_id: String, pages: Vec<String>) -> Self {
        Self {
            record_id,
            data: Some(PagesJson { pages }),
            errors: None,
        }
    }

    pub fn error(record_id: String, message: String) -> Self {
        Self {
            record_id,
            data: None,
            errors: Some(vec![message]),
        }
    }
}

/// Record id of a request record; [`UNKNOWN_RECORD_ID`] when absent.
/// Non-string ids are echoed as their JSON text.
pub fn record_id(record: &Value) -> String {
    match record.get("recordId") {
        None | Some(Value::Null) => UNKNOWN_RECORD_ID.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Whether a JSON value counts as "nothing": null, false, zero, or an
/// empty string, array or object.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

// ── Direct mode ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct DirectResponse {
    pub pages: Vec<PageJson>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageJson {
    pub page_number: usize,
    pub content: String,
}

impl From<Vec<String>> for DirectResponse {
    fn from(pages: Vec<String>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .enumerate()
                .map(|(i, content)| PageJson {
                    page_number: i + 1,
                    content,
                })
                .collect(),
        }
    }
}
