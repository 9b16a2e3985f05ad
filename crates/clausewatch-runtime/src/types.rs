//! Request types accepted by the coordinator.

use std::path::PathBuf;
use std::time::Duration;

use clausewatch_core::RuleSet;

/// Where the document text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisInput {
    Text(String),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub input: AnalysisInput,
    pub rules: RuleSet,
    /// Deadline for all LLM work in this request. `None` uses the configured LLM timeout.
    pub timeout: Option<Duration>,
}

impl AnalysisRequest {
    pub fn from_text(text: impl Into<String>, rules: RuleSet) -> Self {
        Self {
            input: AnalysisInput::Text(text.into()),
            rules,
            timeout: None,
        }
    }

    pub fn from_file(path: impl Into<PathBuf>, rules: RuleSet) -> Self {
        Self {
            input: AnalysisInput::File(path.into()),
            rules,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
