//! Remote-first generation with deterministic local fallback.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::backend::LlmBackend;
use crate::error::LlmFailure;
use crate::fallback::FallbackGenerator;

/// Phrases that mean the model answered without reading the prompt.
const NON_ANSWER_PHRASES: &[&str] = &[
    "provide the document",
    "no document was provided",
    "don't have access to the document",
];

/// Where a piece of generated text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationSource {
    Remote,
    Fallback(LlmFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub source: GenerationSource,
}

impl Generation {
    pub fn is_remote(&self) -> bool {
        self.source == GenerationSource::Remote
    }
}

pub struct LlmOrchestrator {
    backend: Arc<dyn LlmBackend>,
    fallback: FallbackGenerator,
    timeout: Duration,
}

impl LlmOrchestrator {
    /// `timeout` caps every remote call regardless of the caller's budget.
    pub fn new(backend: Arc<dyn LlmBackend>, timeout: Duration) -> Self {
        Self {
            backend,
            fallback: FallbackGenerator::new(),
            timeout,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn is_remote_available(&self) -> bool {
        self.backend.is_available()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Never fails: any remote failure yields fallback text instead.
    pub async fn generate(&self, prompt: &str, budget: Duration) -> Generation {
        match self.try_remote(prompt, budget).await {
            Ok(text) => Generation {
                text,
                source: GenerationSource::Remote,
            },
            Err(failure) => {
                match &failure {
                    LlmFailure::NotConfigured => debug!("Using fallback generator (offline)"),
                    other => warn!(backend = self.backend.name(), "LLM generation failed, using fallback: {}", other),
                }
                Generation {
                    text: self.fallback.generate(prompt),
                    source: GenerationSource::Fallback(failure),
                }
            }
        }
    }

    async fn try_remote(&self, prompt: &str, budget: Duration) -> Result<String, LlmFailure> {
        if !self.backend.is_available() {
            return Err(LlmFailure::NotConfigured);
        }

        let limit = budget.min(self.timeout);
        if limit.is_zero() {
            return Err(LlmFailure::Timeout(limit));
        }

        let raw = match tokio::time::timeout(limit, self.backend.generate(prompt)).await {
            Ok(result) => result?,
            Err(_) => return Err(LlmFailure::Timeout(limit)),
        };

        accept_output(&raw)
    }
}

/// Trim remote output and reject empty text or known non-answers.
pub fn accept_output(raw: &str) -> Result<String, LlmFailure> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(LlmFailure::EmptyResponse);
    }

    let lowered = text.to_lowercase().replace('\u{2019}', "'");
    if let Some(phrase) = NON_ANSWER_PHRASES.iter().find(|p| lowered.contains(*p)) {
        return Err(LlmFailure::NonAnswer((*phrase).to_string()));
    }

    Ok(text.to_string())
}
