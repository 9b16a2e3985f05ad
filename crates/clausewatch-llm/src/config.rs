//! LLM configuration loading and provider selection.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{LLMProvider, LLMStatus};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Stored LLM configuration (read from llm-config.json).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    #[serde(default = "default_preferred")]
    pub preferred_provider: String,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub anthropic_api_key: Option<String>,
    #[serde(default)]
    pub groq_api_key: Option<String>,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,
    #[serde(default = "default_groq_model")]
    pub groq_model: String,
    /// Model forced by `CLAUSEWATCH_LLM_MODEL`, applied to whichever provider resolves.
    #[serde(skip)]
    pub model_override: Option<String>,
}

fn default_preferred() -> String {
    "auto".into()
}
fn default_openai_model() -> String {
    DEFAULT_OPENAI_MODEL.into()
}
fn default_anthropic_model() -> String {
    DEFAULT_ANTHROPIC_MODEL.into()
}
fn default_groq_model() -> String {
    DEFAULT_GROQ_MODEL.into()
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            preferred_provider: "auto".into(),
            openai_api_key: None,
            anthropic_api_key: None,
            groq_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.into(),
            anthropic_model: DEFAULT_ANTHROPIC_MODEL.into(),
            groq_model: DEFAULT_GROQ_MODEL.into(),
            model_override: None,
        }
    }
}

/// Trim a raw key and drop an accidental leading `=` (e.g. `KEY==sk-...`).
pub fn sanitize_key(raw: &str) -> Option<String> {
    let key = raw.trim().trim_start_matches('=').trim();
    (!key.is_empty()).then(|| key.to_string())
}

impl LLMConfig {
    /// Load config from file, falling back to env vars and defaults.
    pub fn load(config_path: &Path) -> Self {
        Self::load_with_env(config_path, |key| std::env::var(key).ok())
    }

    /// Like [`LLMConfig::load`] with an explicit env lookup.
    pub fn load_with_env<F>(config_path: &Path, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: LLMConfig = match std::fs::read_to_string(config_path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Ignoring malformed {}: {}", config_path.display(), e);
                LLMConfig::default()
            }),
            Err(_) => LLMConfig::default(),
        };

        // Env vars as fallback for API keys
        if config.openai_api_key.is_none() {
            config.openai_api_key = env("OPENAI_API_KEY").or_else(|| env("OPENAI_APIKEY"));
        }
        if config.anthropic_api_key.is_none() {
            config.anthropic_api_key = env("ANTHROPIC_API_KEY");
        }
        if config.groq_api_key.is_none() {
            config.groq_api_key = env("GROQ_API_KEY");
        }
        config.model_override = env("CLAUSEWATCH_LLM_MODEL")
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        config.openai_api_key = config.openai_api_key.as_deref().and_then(sanitize_key);
        config.anthropic_api_key = config.anthropic_api_key.as_deref().and_then(sanitize_key);
        config.groq_api_key = config.groq_api_key.as_deref().and_then(sanitize_key);

        if let Some(key) = &config.openai_api_key {
            if !key.starts_with("sk-") {
                warn!("OpenAI API key does not start with 'sk-', ignoring it");
                config.openai_api_key = None;
            }
        }

        config
    }

    /// Resolve which provider, model and key to use.
    pub fn resolve_provider(&self) -> Option<(LLMProvider, String, String)> {
        let resolved = if self.preferred_provider != "auto" {
            match self.preferred_provider.as_str() {
                "openai" => self
                    .openai_api_key
                    .as_ref()
                    .map(|k| (LLMProvider::OpenAI, self.openai_model.clone(), k.clone())),
                "anthropic" => self
                    .anthropic_api_key
                    .as_ref()
                    .map(|k| (LLMProvider::Anthropic, self.anthropic_model.clone(), k.clone())),
                "groq" => self
                    .groq_api_key
                    .as_ref()
                    .map(|k| (LLMProvider::Groq, self.groq_model.clone(), k.clone())),
                other => {
                    warn!("Unknown preferred provider '{}'", other);
                    None
                }
            }
        } else if let Some(k) = &self.anthropic_api_key {
            // Auto mode: Anthropic > Groq > OpenAI
            Some((LLMProvider::Anthropic, self.anthropic_model.clone(), k.clone()))
        } else if let Some(k) = &self.groq_api_key {
            Some((LLMProvider::Groq, self.groq_model.clone(), k.clone()))
        } else {
            self.openai_api_key
                .as_ref()
                .map(|k| (LLMProvider::OpenAI, self.openai_model.clone(), k.clone()))
        };

        resolved.map(|(provider, model, key)| {
            let model = self.model_override.clone().unwrap_or(model);
            (provider, model, key)
        })
    }

    /// Build the public status view (no API keys exposed).
    pub fn to_status(&self) -> LLMStatus {
        let resolved = self.resolve_provider();
        LLMStatus {
            llm_available: resolved.is_some(),
            llm_provider: resolved.as_ref().map(|(p, _, _)| p.to_string()),
            llm_model: resolved.map(|(_, m, _)| m),
            preferred_provider: self.preferred_provider.clone(),
        }
    }
}
