//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Paths to ClauseWatch data locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Temporary storage for uploaded documents (`data/uploads/`).
    pub uploads: PathBuf,
    /// LLM configuration (`data/llm-config.json`).
    pub llm_config_file: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            uploads: root.join("uploads"),
            llm_config_file: root.join("llm-config.json"),
            root,
        };
        std::fs::create_dir_all(&paths.uploads)?;
        Ok(paths)
    }
}

/// Knobs read by the pipeline coordinator on every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Token budget per chunk handed to summarization.
    pub max_tokens_per_chunk: usize,
    /// First chunks shorter than this (trimmed chars) are not used as the summary excerpt.
    pub min_chunk_length: usize,
    /// Excerpt width used when chunking yields nothing usable.
    pub summary_excerpt_chars: usize,
    /// Upper bound on the time spent waiting for the remote LLM per request.
    pub llm_timeout: Duration,
    /// TTL applied to cached summaries. `None` keeps them for the process lifetime.
    pub cache_ttl: Option<Duration>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_tokens_per_chunk: 500,
            min_chunk_length: 50,
            summary_excerpt_chars: 2000,
            llm_timeout: Duration::from_secs(30),
            cache_ttl: None,
        }
    }
}

/// Top-level ClauseWatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseWatchConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    /// Maximum number of cached generations kept in memory.
    pub cache_capacity: usize,
    pub pipeline: PipelineSettings,
}

impl ClauseWatchConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let defaults = PipelineSettings::default();

        let port = env_parse("PORT").unwrap_or(8000);
        let cache_capacity = env_parse("CLAUSEWATCH_CACHE_CAPACITY").unwrap_or(1000);

        let pipeline = PipelineSettings {
            max_tokens_per_chunk: env_parse("CLAUSEWATCH_MAX_TOKENS_PER_CHUNK")
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.max_tokens_per_chunk),
            min_chunk_length: env_parse("CLAUSEWATCH_MIN_CHUNK_LENGTH")
                .unwrap_or(defaults.min_chunk_length),
            summary_excerpt_chars: defaults.summary_excerpt_chars,
            llm_timeout: env_parse("CLAUSEWATCH_LLM_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.llm_timeout),
            cache_ttl: parse_ttl(std::env::var("CLAUSEWATCH_CACHE_TTL_SECS").ok().as_deref()),
        };

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self {
            port,
            data_paths,
            cache_capacity,
            pipeline,
        })
    }
}

/// `None`, blank or `0` mean "never expires".
pub fn parse_ttl(raw: Option<&str>) -> Option<Duration> {
    let secs: u64 = raw?.trim().parse().ok()?;
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ttl() {
        assert_eq!(parse_ttl(None), None);
        assert_eq!(parse_ttl(Some("")), None);
        assert_eq!(parse_ttl(Some("0")), None);
        assert_eq!(parse_ttl(Some("abc")), None);
        assert_eq!(parse_ttl(Some("86400")), Some(Duration::from_secs(86400)));
    }

    #[test]
    fn test_data_paths_created() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::new(dir.path().join("data")).unwrap();
        assert!(paths.uploads.is_dir());
        assert_eq!(paths.llm_config_file.file_name().unwrap(), "llm-config.json");
    }

    #[test]
    fn test_default_settings() {
        let settings = PipelineSettings::default();
        assert_eq!(settings.max_tokens_per_chunk, 500);
        assert_eq!(settings.summary_excerpt_chars, 2000);
        assert!(settings.cache_ttl.is_none());
    }
}
