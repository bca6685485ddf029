use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ChatBackend;
use crate::notion::NotionClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model backend behind a trait object so the generation pipeline can be
    /// driven by a scripted fake in tests.
    pub llm: Arc<dyn ChatBackend>,
    pub notion: NotionClient,
    pub config: Config,
}
