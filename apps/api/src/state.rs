use std::sync::Arc;

use crate::config::Config;
use crate::screening::extraction::TextExtractor;
use crate::screening::suggestions::Suggester;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    /// Pluggable PDF text extractor. Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
    /// Pluggable suggester. Default: RuleBasedSuggester; LLM via ENABLE_LLM_SUGGESTIONS.
    pub suggester: Arc<dyn Suggester>,
}
