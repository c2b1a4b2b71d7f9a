use std::sync::Arc;

use pagesplit_core::{Resolver, config_file};
use pagesplit_pdf_mupdf::MupdfBackend;
use pagesplit_web::state::AppState;
use tracing_subscriber::EnvFilter;

/// Port variables, highest precedence first. The function host hands a
/// custom handler its port through the first one.
const PORT_VARS: &[&str] = &["FUNCTIONS_CUSTOMHANDLER_PORT", "PAGESPLIT_PORT"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config_file::load_config();
    let limits = config.limits();
    let mut server = config.server();
    if let Some(port) = port_from_env() {
        server.port = port;
    }

    let state = Arc::new(AppState {
        resolver: Resolver::new(Arc::new(MupdfBackend::new()), limits),
        body_limit: server.body_limit_bytes,
    });
    let app = pagesplit_web::router(state);

    let listener = tokio::net::TcpListener::bind((server.bind.as_str(), server.port)).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        path = pagesplit_web::SPLIT_PDF_PATH,
        "listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn port_from_env() -> Option<u16> {
    PORT_VARS.iter().find_map(|var| {
        let value = std::env::var(var).ok()?;
        match value.trim().parse() {
            Ok(port) => Some(port),
            Err(_) => {
                tracing::warn!(var, value = %value, "ignoring invalid port");
                None
            }
        }
    })
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutting down");
    }
}
