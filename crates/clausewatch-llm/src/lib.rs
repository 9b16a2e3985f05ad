//! ClauseWatch LLM — summary and recommendation generation.
//!
//! One backend is chosen at startup from [`LLMConfig`]: a remote provider
//! (OpenAI, Anthropic, Groq) when a key is configured, otherwise
//! [`OfflineLlm`]. [`LlmOrchestrator`] bounds each remote call by a deadline
//! and substitutes [`FallbackGenerator`] output on any failure.

pub mod backend;
pub mod config;
pub mod error;
pub mod fallback;
pub mod orchestrator;
pub mod prompts;
pub mod providers;
pub mod types;

pub use backend::{create_backend, LlmBackend, OfflineLlm, RemoteLlm};
pub use config::LLMConfig;
pub use error::LlmFailure;
pub use fallback::FallbackGenerator;
pub use orchestrator::{Generation, GenerationSource, LlmOrchestrator};
pub use prompts::{recommendation_prompt, summary_prompt};
pub use types::{LLMProvider, LLMStatus};
