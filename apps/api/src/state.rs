use std::sync::Arc;

use crate::config::Config;
use crate::criteria::store::CriteriaStore;
use crate::llm_client::CompletionProvider;
use crate::scoring::scorer::ResumeScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. `LlmClient` in production, swapped for a scripted provider in tests.
    pub llm: Arc<dyn CompletionProvider>,
    /// Criteria extracted per session. In-memory only; lost on restart.
    pub criteria: CriteriaStore,
    pub scorer: ResumeScorer,
    pub config: Config,
}

impl AppState {
    pub fn new(llm: Arc<dyn CompletionProvider>, config: Config) -> Self {
        let scorer = ResumeScorer::new(
            Arc::clone(&llm),
            config.llm_timeout,
            config.scoring_concurrency,
        )
        .with_extraction_timeout(config.extraction_timeout);
        Self {
            llm,
            criteria: CriteriaStore::bounded(config.max_sessions),
            scorer,
            config,
        }
    }
}
