use pagesplit_core::Resolver;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub resolver: Resolver,
    /// Largest request body accepted, in bytes.
    pub body_limit: usize,
}
