//! Sentiment scoring: pluggable polarity source plus fixed label thresholds.

use std::sync::Arc;

use clausewatch_core::{Sentiment, SentimentLabel};

use crate::lexicon::LexiconAnalyzer;

/// Polarity strictly above this is Positive.
pub const POSITIVE_THRESHOLD: f64 = 0.3;
/// Polarity strictly below this is Negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.3;

/// External polarity capability: text in, signed float out.
pub trait PolarityAnalyzer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

pub fn label_for(polarity: f64) -> SentimentLabel {
    if polarity > POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if polarity < NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

pub struct SentimentScorer {
    analyzer: Arc<dyn PolarityAnalyzer>,
}

impl SentimentScorer {
    pub fn new(analyzer: Arc<dyn PolarityAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Blank text never reaches the analyzer.
    pub fn score(&self, text: &str) -> Sentiment {
        if text.trim().is_empty() {
            return Sentiment::neutral();
        }

        let raw = self.analyzer.polarity(text);
        let polarity = if raw.is_finite() {
            raw.clamp(-1.0, 1.0)
        } else {
            tracing::warn!("Polarity analyzer returned {}, treating as neutral", raw);
            0.0
        };

        Sentiment {
            polarity,
            sentiment: label_for(polarity),
        }
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(Arc::new(LexiconAnalyzer::new()))
    }
}
