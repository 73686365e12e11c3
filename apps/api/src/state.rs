use std::sync::Arc;

use crate::llm_client::TextGenerator;
use crate::render::Renderer;
use crate::wizard::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Cover letter backend. Default: GeminiClient.
    pub generator: Arc<dyn TextGenerator>,
    /// Page config and embedded fonts for both PDFs.
    pub renderer: Renderer,
}
