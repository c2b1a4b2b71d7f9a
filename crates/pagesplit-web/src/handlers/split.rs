use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::Response;
use pagesplit_core::ProcessError;
use serde_json::Value;
use thiserror::Error;

use crate::envelope;
use crate::mode::RequestMode;
use crate::models::{self, RecordJson};
use crate::state::AppState;

/// Why a single pipeline record produced no pages.
#[derive(Error, Debug)]
enum RecordError {
    #[error("No data field in request")]
    MissingData,
    #[error("No content provided in request")]
    MissingContent,
    #[error(transparent)]
    Process(#[from] ProcessError),
}

pub async fn split_pdf(State(state): State<Arc<AppState>>, request: Request) -> Response {
    tracing::info!("received request to split PDF");
    for (name, value) in request.headers() {
        tracing::debug!(header = %name, value = ?value, "request header");
    }

    let mode = RequestMode::from_headers(request.headers());
    let body = match axum::body::to_bytes(request.into_body(), state.body_limit).await {
        Ok(body) => body,
        Err(e) => return envelope::general_failure(format!("Failed to read request body: {}", e)),
    };

    match mode {
        RequestMode::Pipeline => pipeline(&state, &body).await,
        RequestMode::Direct => direct(&state, body).await,
    }
}

async fn pipeline(state: &AppState, body: &[u8]) -> Response {
    let request: Value = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "invalid JSON in request");
            return envelope::pipeline_error(StatusCode::BAD_REQUEST, "Invalid JSON in request");
        }
    };

    let Some(values) = request
        .get("values")
        .and_then(Value::as_array)
        .filter(|values| !values.is_empty())
    else {
        return envelope::pipeline_error(
            StatusCode::BAD_REQUEST,
            "Invalid request format: missing 'values' array",
        );
    };
    tracing::info!(records = values.len(), "pipeline request received");

    let mut records = Vec::with_capacity(values.len());
    for value in values {
        let record_id = models::record_id(value);
        let record = match process_record(state, value).await {
            Ok(pages) => envelope::pipeline_record(record_id, Ok(pages)),
            Err(RecordError::Process(e)) if e.is_internal() => {
                return envelope::general_failure(e);
            }
            Err(RecordError::Process(e)) => envelope::pipeline_record(record_id, Err(e)),
            Err(e) => {
                tracing::warn!(record_id = %record_id, error = %e, "rejecting record");
                RecordJson::error(record_id, e.to_string())
            }
        };
        records.push(record);
    }

    tracing::info!("created pipeline response");
    envelope::pipeline_response(StatusCode::OK, records)
}

async fn process_record(state: &AppState, record: &Value) -> Result<Vec<String>, RecordError> {
    let data = record.get("data").ok_or(RecordError::MissingData)?;
    let content = data
        .get("content")
        .filter(|content| !models::is_blank(content))
        .ok_or(RecordError::MissingContent)?;
    let content = content.as_str().ok_or(ProcessError::InvalidContent)?;
    Ok(state.resolver.resolve(content).await?)
}

async fn direct(state: &AppState, body: Bytes) -> Response {
    tracing::info!(bytes = body.len(), "received direct PDF");
    if body.is_empty() {
        return envelope::direct_empty_body();
    }
    envelope::direct_response(state.resolver.extract(body.to_vec()).await)
}
