use std::sync::Arc;

use crate::llm_client::ReviewModel;

/// Shared application state injected into all route handlers via Axum
/// extractors. Deliberately minimal: requests and results are ephemeral, so
/// there is no pool, cache, or store here — only the model backend.
#[derive(Clone)]
pub struct AppState {
    /// The review backend. Production: `LlmClient`. Tests: stubs.
    pub model: Arc<dyn ReviewModel>,
}
