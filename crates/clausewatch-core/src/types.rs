//! Report data model shared by every pipeline stage.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A loaded document ready for analysis. Text is trimmed on construction.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
    source_path: Option<PathBuf>,
}

impl Document {
    pub fn new(text: &str, source_path: Option<PathBuf>) -> Self {
        Self {
            text: text.trim().to_string(),
            source_path,
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(text, None)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Caller-supplied rules for one analysis request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub forbidden_keywords: Vec<String>,
}

impl RuleSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            forbidden_keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a comma separated keyword list, dropping blank entries.
    pub fn from_comma_list(raw: &str) -> Self {
        Self::new(
            raw.split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty()),
        )
    }
}

/// A single forbidden keyword found in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "match")]
    pub matched: String,
}

impl Finding {
    pub fn new(matched: impl Into<String>) -> Self {
        Self {
            matched: matched.into(),
        }
    }
}

/// Three-way sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "Positive"),
            SentimentLabel::Negative => write!(f, "Negative"),
            SentimentLabel::Neutral => write!(f, "Neutral"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Signed strength in [-1.0, 1.0].
    pub polarity: f64,
    pub sentiment: SentimentLabel,
}

impl Sentiment {
    pub fn neutral() -> Self {
        Self {
            polarity: 0.0,
            sentiment: SentimentLabel::Neutral,
        }
    }
}

/// Whitespace word counts of the summary prompt and the generated summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEstimate {
    pub input: usize,
    pub output: usize,
    pub total: usize,
}

impl TokenEstimate {
    pub fn from_texts(prompt: &str, completion: &str) -> Self {
        let input = prompt.split_whitespace().count();
        let output = completion.split_whitespace().count();
        Self {
            input,
            output,
            total: input + output,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const LOW_THRESHOLD: u8 = 80;
    pub const MEDIUM_THRESHOLD: u8 = 50;

    pub fn from_score(score: u8) -> Self {
        if score >= Self::LOW_THRESHOLD {
            RiskLevel::Low
        } else if score >= Self::MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Ok,
}

/// Final structured result of one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    #[serde(default)]
    pub status: ReportStatus,
    pub summary: String,
    pub sentiment: Sentiment,
    pub findings: Vec<Finding>,
    /// Always within [0, 100].
    pub score: u8,
    pub recommendations: String,
    pub tokens: TokenEstimate,
    pub risk_level: RiskLevel,
}
