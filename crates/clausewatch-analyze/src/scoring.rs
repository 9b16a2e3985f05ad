//! Compliance score: 100 minus finding and sentiment penalties, clamped to [0, 100].

use clausewatch_core::{Finding, Sentiment, SentimentLabel};

/// Named weight sets. Whatever the weights, more findings never raise the
/// score, Negative never scores above Neutral and Positive never below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringPolicy {
    pub base: u32,
    pub finding_penalty: u32,
    pub negative_penalty: u32,
    pub positive_bonus: u32,
}

impl ScoringPolicy {
    /// Default policy: 10 per finding, 20 for Negative, +5 for Positive.
    pub const STANDARD: ScoringPolicy = ScoringPolicy {
        base: 100,
        finding_penalty: 10,
        negative_penalty: 20,
        positive_bonus: 5,
    };

    /// Heavier per-finding weight, lighter sentiment weight, no bonus.
    pub const STRICT: ScoringPolicy = ScoringPolicy {
        base: 100,
        finding_penalty: 20,
        negative_penalty: 10,
        positive_bonus: 0,
    };

    pub fn score(&self, findings: &[Finding], sentiment: &Sentiment) -> u8 {
        let deductions = i64::from(self.finding_penalty).saturating_mul(findings.len() as i64);
        let adjustment = match sentiment.sentiment {
            SentimentLabel::Negative => -i64::from(self.negative_penalty),
            SentimentLabel::Positive => i64::from(self.positive_bonus),
            SentimentLabel::Neutral => 0,
        };

        let raw = i64::from(self.base)
            .saturating_sub(deductions)
            .saturating_add(adjustment);

        raw.clamp(0, 100) as u8
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Score under [`ScoringPolicy::STANDARD`].
pub fn compute_score(findings: &[Finding], sentiment: &Sentiment) -> u8 {
    ScoringPolicy::STANDARD.score(findings, sentiment)
}
