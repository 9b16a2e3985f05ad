//! Text-generation backends. Selected once at startup from [`LLMConfig`].

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tokio_stream::StreamExt;
use tracing::{debug, info};

use crate::config::LLMConfig;
use crate::error::LlmFailure;
use crate::providers::{stream_llm, SamplingParams, StreamChunk};
use crate::types::{ChatMessage, LLMProvider};

pub const SYSTEM_PROMPT: &str = "You are a compliance and analysis expert.";
pub const DEFAULT_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_MAX_TOKENS: usize = 1024;

/// A text generator that may fail. Failures are values, not panics.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmFailure>;

    fn name(&self) -> &'static str;

    /// Whether a call has any chance of reaching a provider.
    fn is_available(&self) -> bool {
        true
    }
}

/// One configured remote provider. Streams the response and concatenates it.
pub struct RemoteLlm {
    client: Client,
    provider: LLMProvider,
    model: String,
    api_key: String,
    params: SamplingParams,
}

impl RemoteLlm {
    pub fn new(provider: LLMProvider, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            provider,
            model: model.into(),
            api_key: api_key.into(),
            params: SamplingParams {
                temperature: DEFAULT_TEMPERATURE,
                max_tokens: DEFAULT_MAX_TOKENS,
            },
        }
    }

    pub fn provider(&self) -> LLMProvider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmBackend for RemoteLlm {
    async fn generate(&self, prompt: &str) -> Result<String, LlmFailure> {
        let messages = vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)];
        let mut stream = stream_llm(
            &self.client,
            self.provider,
            messages,
            &self.model,
            &self.api_key,
            self.params,
        );

        let mut text = String::new();
        while let Some(chunk) = stream.next().await {
            match chunk {
                StreamChunk::Token(token) => text.push_str(&token),
                StreamChunk::Done { tokens_used } => {
                    debug!(
                        "{} stream finished: {} tokens, {} chars",
                        self.provider,
                        tokens_used,
                        text.len()
                    );
                    break;
                }
                StreamChunk::Error(failure) => return Err(failure),
            }
        }

        Ok(text)
    }

    fn name(&self) -> &'static str {
        match self.provider {
            LLMProvider::OpenAI => "openai",
            LLMProvider::Anthropic => "anthropic",
            LLMProvider::Groq => "groq",
        }
    }
}

/// Used when no provider key is configured. Never touches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineLlm;

#[async_trait]
impl LlmBackend for OfflineLlm {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmFailure> {
        Err(LlmFailure::NotConfigured)
    }

    fn name(&self) -> &'static str {
        "offline"
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Pick the backend for this process.
pub fn create_backend(config: &LLMConfig) -> Arc<dyn LlmBackend> {
    match config.resolve_provider() {
        Some((provider, model, key)) => {
            info!("LLM backend: {} ({})", provider, model);
            Arc::new(RemoteLlm::new(provider, model, key))
        }
        None => {
            info!("No LLM API key configured, using offline fallback generator");
            Arc::new(OfflineLlm)
        }
    }
}
