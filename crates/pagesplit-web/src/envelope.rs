//! Response envelopes for the two request modes.
//!
//! Both modes serialize the same [`Outcome`]; pipeline callers parse the
//! `values[]` shape structurally, so every pipeline-mode failure, including
//! ones that never reached the core, goes out in that shape.

use std::any::Any;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pagesplit_core::Outcome;

use crate::models::{DirectResponse, PipelineResponse, RecordJson};

/// Record id used when a failure cannot be tied to a request record.
pub const UNKNOWN_RECORD_ID: &str = "0";

/// Pipeline-mode record for one processed content value.
pub fn pipeline_record(record_id: String, outcome: Outcome) -> RecordJson {
    match outcome {
        Ok(pages) => RecordJson::pages(record_id, pages),
        Err(e) => {
            tracing::error!(record_id = %record_id, error = %e, "record failed");
            RecordJson::error(record_id, e.to_string())
        }
    }
}

/// Pipeline-mode response carrying one entry per request record.
pub fn pipeline_response(status: StatusCode, records: Vec<RecordJson>) -> Response {
    (status, Json(PipelineResponse { values: records })).into_response()
}

/// Pipeline-mode response for a request that was rejected as a whole.
pub fn pipeline_error(status: StatusCode, message: impl Into<String>) -> Response {
    let message = message.into();
    tracing::error!(status = status.as_u16(), error = %message, "rejecting pipeline request");
    pipeline_response(
        status,
        vec![RecordJson::error(UNKNOWN_RECORD_ID.to_string(), message)],
    )
}

/// Catch-all for unexpected failures in either mode.
pub fn general_failure(reason: impl std::fmt::Display) -> Response {
    pipeline_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("General function error: {}", reason),
    )
}

/// Direct-mode response: 1-indexed page list, or a plain-text error.
pub fn direct_response(outcome: Outcome) -> Response {
    match outcome {
        Ok(pages) => Json(DirectResponse::from(pages)).into_response(),
        Err(e) if e.is_internal() => general_failure(e),
        Err(e) => {
            tracing::error!(error = %e, "direct extraction failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", e)).into_response()
        }
    }
}

/// Direct-mode response for a request without a body.
pub fn direct_empty_body() -> Response {
    (
        StatusCode::BAD_REQUEST,
        "No PDF data received in request body.",
    )
        .into_response()
}

/// Response for a handler that panicked; installed as the catch-panic
/// layer's handler.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let reason = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic"
    };
    general_failure(reason)
}
