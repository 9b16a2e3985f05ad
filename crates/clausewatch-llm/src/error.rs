use std::time::Duration;

use thiserror::Error;

/// Why a remote generation produced no usable text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmFailure {
    #[error("No LLM provider configured")]
    NotConfigured,

    #[error("Request failed: {0}")]
    Network(String),

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Empty response")]
    EmptyResponse,

    #[error("Response was a non-answer: {0}")]
    NonAnswer(String),
}
