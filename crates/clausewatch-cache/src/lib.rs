//! ClauseWatch Cache — generation cache seam and in-process implementation.
//!
//! Callers derive a key from the prompt with [`prompt_key`], look it up, and
//! store the generated text on a miss. Any backend may fail; callers treat a
//! failed read as a miss.

pub mod key;
pub mod memory;

pub use key::{prompt_key, CACHE_PREFIX};
pub use memory::MemoryCache;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Value stored per prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePayload {
    pub summary: String,
}

impl CachePayload {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

/// Key-value store fronting LLM generations.
#[async_trait]
pub trait GenerationCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<CachePayload>, CacheError>;

    /// `ttl = None` keeps the entry until evicted.
    async fn set(
        &self,
        key: &str,
        payload: CachePayload,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError>;

    fn name(&self) -> &'static str;
}
