use std::sync::Arc;

use axum::Router;
use axum::routing::post;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub mod envelope;
pub mod handlers;
pub mod mode;
pub mod models;
pub mod state;

use state::AppState;

/// Path of the split endpoint, as routed by the function host.
pub const SPLIT_PDF_PATH: &str = "/api/split_pdf";

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(SPLIT_PDF_PATH, post(handlers::split::split_pdf))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(envelope::panic_response))
        .with_state(state)
}
