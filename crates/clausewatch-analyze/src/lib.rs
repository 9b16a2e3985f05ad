//! ClauseWatch Analyze — deterministic, network-free document analysis.
//!
//! Keyword rules, sentiment polarity and the 0–100 compliance score. Nothing
//! in this crate performs I/O.

pub mod lexicon;
pub mod rules;
pub mod scoring;
pub mod sentiment;

pub use lexicon::LexiconAnalyzer;
pub use rules::{scan, RuleCheck, RuleEngine};
pub use scoring::{compute_score, ScoringPolicy};
pub use sentiment::{label_for, PolarityAnalyzer, SentimentScorer};
