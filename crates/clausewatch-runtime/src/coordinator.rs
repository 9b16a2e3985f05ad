//! Compliance coordinator — runs one analysis request end to end.
//!
//! Stages: load → rules + sentiment → score → summarize (cache-aside) →
//! recommend → assemble. Only the load stage can fail the request; cache
//! and LLM problems degrade to a miss and to fallback text respectively.

use std::sync::Arc;
use std::time::{Duration, Instant};

use clausewatch_analyze::{RuleEngine, ScoringPolicy, SentimentScorer};
use clausewatch_cache::{prompt_key, CachePayload, GenerationCache};
use clausewatch_core::{
    ComplianceReport, Document, Error, PipelineSettings, ReportStatus, Result, RiskLevel,
    TokenEstimate,
};
use clausewatch_ingest::{Chunker, DocumentLoader};
use clausewatch_llm::{recommendation_prompt, summary_prompt, LlmOrchestrator};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::types::{AnalysisInput, AnalysisRequest};

pub struct ComplianceCoordinator {
    loader: Arc<dyn DocumentLoader>,
    rules: RuleEngine,
    sentiment: Arc<SentimentScorer>,
    scoring: ScoringPolicy,
    cache: Arc<dyn GenerationCache>,
    llm: Arc<LlmOrchestrator>,
    chunker: Chunker,
    settings: PipelineSettings,
}

impl ComplianceCoordinator {
    pub fn new(
        loader: Arc<dyn DocumentLoader>,
        sentiment: Arc<SentimentScorer>,
        cache: Arc<dyn GenerationCache>,
        llm: Arc<LlmOrchestrator>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            loader,
            rules: RuleEngine::new(),
            sentiment,
            scoring: ScoringPolicy::default(),
            cache,
            llm,
            chunker: Chunker::new(settings.max_tokens_per_chunk),
            settings,
        }
    }

    pub fn with_scoring_policy(mut self, policy: ScoringPolicy) -> Self {
        self.scoring = policy;
        self
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn llm(&self) -> &LlmOrchestrator {
        &self.llm
    }

    /// Run one request. Errors are load/input failures only.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<ComplianceReport> {
        let request_id = Uuid::new_v4();
        let span = info_span!("analysis", %request_id);
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: AnalysisRequest) -> Result<ComplianceReport> {
        let started = Instant::now();
        let budget = request.timeout.unwrap_or(self.settings.llm_timeout);
        // A budget too large to represent as an instant means no deadline.
        let deadline = started.checked_add(budget);

        let document = self.load(request.input).await?;
        let text = document.text();

        let check = self.rules.scan(text, &request.rules);
        let sentiment = self.sentiment.score(text);
        let score = self.scoring.score(&check.findings, &sentiment);
        let risk_level = RiskLevel::from_score(score);
        debug!(
            findings = check.findings.len(),
            polarity = sentiment.polarity,
            score,
            "Analysis complete"
        );

        let prompt = summary_prompt(&self.summary_excerpt(text));
        let summary = self.summarize(&prompt, deadline).await;

        let rec_prompt = recommendation_prompt(&summary, &check.findings, &sentiment);
        let recommendations = self.llm.generate(&rec_prompt, remaining(deadline)).await.text;

        let tokens = TokenEstimate::from_texts(&prompt, &summary);

        info!(
            findings = check.findings.len(),
            score,
            risk = ?risk_level,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Compliance report ready"
        );

        Ok(ComplianceReport {
            status: ReportStatus::Ok,
            summary,
            sentiment,
            findings: check.findings,
            score,
            recommendations,
            tokens,
            risk_level,
        })
    }

    async fn load(&self, input: AnalysisInput) -> Result<Document> {
        let document = match input {
            AnalysisInput::Text(text) => Document::new(&text, None),
            AnalysisInput::File(path) => {
                let text = self.loader.read(&path).await?;
                debug!("Loaded {} chars from {}", text.len(), path.display());
                Document::new(&text, Some(path))
            }
        };

        if document.is_blank() {
            return Err(Error::InvalidInput("document_text must not be empty".into()));
        }
        Ok(document)
    }

    /// First chunk when it is long enough, otherwise the leading characters.
    fn summary_excerpt(&self, text: &str) -> String {
        let chunks = self.chunker.chunk(text);
        match chunks.first().map(|c| c.trim()) {
            Some(first) if first.chars().count() >= self.settings.min_chunk_length => {
                first.to_string()
            }
            _ => text.chars().take(self.settings.summary_excerpt_chars).collect(),
        }
    }

    /// Cache-aside summary generation. Only remote output is stored.
    async fn summarize(&self, prompt: &str, deadline: Option<Instant>) -> String {
        let key = prompt_key(prompt);

        match self.cache.get(&key).await {
            Ok(Some(payload)) if !payload.summary.trim().is_empty() => {
                debug!(cache = self.cache.name(), "Summary cache hit");
                return payload.summary;
            }
            Ok(_) => debug!(cache = self.cache.name(), "Summary cache miss"),
            Err(e) => warn!(cache = self.cache.name(), "Cache read failed, treating as miss: {}", e),
        }

        let generation = self.llm.generate(prompt, remaining(deadline)).await;
        if generation.is_remote() {
            let payload = CachePayload::new(generation.text.clone());
            if let Err(e) = self.cache.set(&key, payload, self.settings.cache_ttl).await {
                warn!(cache = self.cache.name(), "Cache write failed: {}", e);
            }
        }
        generation.text
    }
}

fn remaining(deadline: Option<Instant>) -> Duration {
    deadline.map_or(Duration::MAX, |at| at.saturating_duration_since(Instant::now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clausewatch_cache::MemoryCache;
    use clausewatch_ingest::FsDocumentLoader;
    use clausewatch_llm::OfflineLlm;

    fn coordinator(settings: PipelineSettings) -> ComplianceCoordinator {
        let llm = LlmOrchestrator::new(Arc::new(OfflineLlm), settings.llm_timeout);
        ComplianceCoordinator::new(
            Arc::new(FsDocumentLoader),
            Arc::new(SentimentScorer::default()),
            Arc::new(MemoryCache::new(16)),
            Arc::new(llm),
            settings,
        )
    }

    #[test]
    fn test_excerpt_uses_first_chunk_when_long_enough() {
        let settings = PipelineSettings {
            max_tokens_per_chunk: 12,
            ..PipelineSettings::default()
        };
        let first = "The supplier shall deliver all goods within thirty days of the order.";
        let text = format!("{first}\n\nSecond paragraph with more words in it.");
        assert_eq!(coordinator(settings).summary_excerpt(&text), first);
    }

    #[test]
    fn test_excerpt_falls_back_to_leading_chars() {
        let settings = PipelineSettings {
            max_tokens_per_chunk: 1,
            summary_excerpt_chars: 20,
            ..PipelineSettings::default()
        };
        let text = "Short.\n\nA much longer second paragraph follows here.";
        assert_eq!(coordinator(settings).summary_excerpt(text), "Short.\n\nA much longe");
    }

    #[test]
    fn test_remaining_saturates() {
        let past = Instant::now() - Duration::from_millis(5);
        assert_eq!(remaining(Some(past)), Duration::ZERO);
        assert_eq!(remaining(None), Duration::MAX);
    }

    #[tokio::test]
    async fn test_strict_policy_applies() {
        let report = coordinator(PipelineSettings::default())
            .with_scoring_policy(ScoringPolicy::STRICT)
            .analyze(AnalysisRequest::from_text(
                "The parties met on Tuesday to sign.",
                clausewatch_core::RuleSet::new(["tuesday", "sign"]),
            ))
            .await
            .unwrap();
        assert_eq!(report.score, 60);
        assert_eq!(report.risk_level, RiskLevel::Medium);
    }
}
