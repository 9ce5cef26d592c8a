use std::sync::Arc;

use crate::llm_client::CompletionProvider;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. `LlmClient` in production, a scripted fake in tests.
    pub llm: Arc<dyn CompletionProvider>,
}
