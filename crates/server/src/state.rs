use std::sync::Arc;

use movieinfo_metadata::resolver::MovieResolver;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<MovieResolver>,
}

impl AppState {
    pub fn new(resolver: MovieResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}
