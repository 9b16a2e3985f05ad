//! Shared application state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use clausewatch_analyze::SentimentScorer;
use clausewatch_cache::MemoryCache;
use clausewatch_core::ClauseWatchConfig;
use clausewatch_ingest::FsDocumentLoader;
use clausewatch_llm::{create_backend, LLMConfig, LLMStatus, LlmBackend, LlmOrchestrator};
use clausewatch_runtime::ComplianceCoordinator;
use tracing::info;

/// Everything a handler needs. Built once at startup, read-only afterwards.
pub struct AppState {
    pub config: ClauseWatchConfig,
    pub llm_status: LLMStatus,
    pub cache: Arc<MemoryCache>,
    pub coordinator: ComplianceCoordinator,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Load the LLM config from the data directory and pick a backend.
    pub fn new(config: ClauseWatchConfig) -> Self {
        let llm_config = LLMConfig::load(&config.data_paths.llm_config_file);
        let backend = create_backend(&llm_config);
        Self::with_backend(config, llm_config.to_status(), backend)
    }

    pub fn with_backend(
        config: ClauseWatchConfig,
        llm_status: LLMStatus,
        backend: Arc<dyn LlmBackend>,
    ) -> Self {
        let cache = Arc::new(MemoryCache::new(config.cache_capacity));
        let orchestrator = LlmOrchestrator::new(backend, config.pipeline.llm_timeout);

        let coordinator = ComplianceCoordinator::new(
            Arc::new(FsDocumentLoader),
            Arc::new(SentimentScorer::default()),
            cache.clone(),
            Arc::new(orchestrator),
            config.pipeline.clone(),
        );

        info!(
            "Pipeline ready: llm={}, cache capacity={}, chunk budget={}",
            coordinator.llm().backend_name(),
            config.cache_capacity,
            config.pipeline.max_tokens_per_chunk
        );

        Self {
            config,
            llm_status,
            cache,
            coordinator,
            started_at: Utc::now(),
        }
    }
}
