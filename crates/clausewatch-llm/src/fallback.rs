//! Deterministic local generator used whenever the remote backend fails.
//!
//! Pure string work: no I/O, no panics, never an empty result.

use crate::prompts::{classify, parse_sections, PromptKind};

pub const SUMMARY_SENTENCES: usize = 3;
pub const SUMMARY_WIDTH: usize = 500;
pub const GENERIC_EXCERPT_WIDTH: usize = 220;
pub const RECOMMENDATION_COUNT: usize = 3;

const EMPTY_SUMMARY: &str = "No readable content supplied for summarization.";
const REGISTER_ITEM: &str =
    "Ensure the summarized commitments are documented in the compliance register.";
const ESCALATE_ITEM: &str =
    "Escalate the document for manual review due to negative sentiment cues.";
const AUDIT_ITEM: &str = "Schedule a follow-up audit to confirm all open items are resolved.";
const FILLER_ITEM: &str =
    "Reconfirm document retention, access controls, and stakeholder approvals.";

#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGenerator;

impl FallbackGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, prompt: &str) -> String {
        match classify(prompt) {
            PromptKind::Summary(excerpt) => self.summarize(excerpt),
            PromptKind::Recommendation => self.recommend(prompt),
            PromptKind::Other => self.generic(prompt),
        }
    }

    /// First few sentences of the excerpt, shortened on a word boundary.
    pub fn summarize(&self, excerpt: &str) -> String {
        let cleaned = collapse_whitespace(excerpt);
        if cleaned.is_empty() {
            return EMPTY_SUMMARY.to_string();
        }

        let lead = split_sentences(&cleaned)
            .into_iter()
            .take(SUMMARY_SENTENCES)
            .collect::<Vec<_>>()
            .join(" ");
        shorten(&lead, SUMMARY_WIDTH)
    }

    /// Exactly three numbered lines built from the prompt's sections.
    pub fn recommend(&self, prompt: &str) -> String {
        let sections = parse_sections(prompt);
        let mut items: Vec<String> = sections
            .findings
            .iter()
            .take(RECOMMENDATION_COUNT)
            .map(|m| format!("Review occurrences of '{m}' and align the language with approved policies."))
            .collect();

        if !sections.summary.trim().is_empty() {
            items.push(REGISTER_ITEM.to_string());
        }

        let sentiment = sections.sentiment.to_lowercase();
        if sentiment.contains("negative") {
            items.push(ESCALATE_ITEM.to_string());
        } else if !sentiment.contains("positive") {
            items.push(AUDIT_ITEM.to_string());
        }

        while items.len() < RECOMMENDATION_COUNT {
            items.push(FILLER_ITEM.to_string());
        }

        items
            .iter()
            .take(RECOMMENDATION_COUNT)
            .enumerate()
            .map(|(idx, item)| format!("{}. {}", idx + 1, item))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn generic(&self, prompt: &str) -> String {
        format!(
            "Offline language model fallback active. Limited summary available based on local heuristics:\n{}",
            shorten(&collapse_whitespace(prompt), GENERIC_EXCERPT_WIDTH)
        )
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split single-spaced text after `.`, `!` or `?` followed by a space.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?') && text[i + 1..].starts_with(' ') {
            sentences.push(&text[start..=i]);
            start = i + 2;
        }
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

/// Fit `text` into `width` chars, dropping whole words and appending `...`.
/// A single word longer than the width is cut mid-word.
fn shorten(text: &str, width: usize) -> String {
    const PLACEHOLDER: &str = "...";
    if text.chars().count() <= width {
        return text.to_string();
    }

    let budget = width.saturating_sub(PLACEHOLDER.len());
    let mut out = String::new();
    let mut used = 0;
    for word in text.split(' ') {
        let extra = word.chars().count() + usize::from(!out.is_empty());
        if used + extra > budget {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
        used += extra;
    }

    if out.is_empty() {
        out = text.chars().take(budget).collect();
    }
    out.push_str(PLACEHOLDER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::{recommendation_prompt, summary_prompt};
    use clausewatch_core::{Finding, Sentiment, SentimentLabel};

    fn numbered_lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    fn assert_three_numbered(text: &str) {
        let lines = numbered_lines(text);
        assert_eq!(lines.len(), 3, "got: {text}");
        for (i, line) in lines.iter().enumerate() {
            assert!(line.starts_with(&format!("{}. ", i + 1)), "line {i}: {line}");
        }
    }

    fn sentiment(label: SentimentLabel) -> Sentiment {
        Sentiment {
            polarity: 0.0,
            sentiment: label,
        }
    }

    #[test]
    fn test_summary_from_hello_world() {
        let out = FallbackGenerator.generate("Summarize:\nHello world.");
        assert_eq!(out, "Hello world.");
    }

    #[test]
    fn test_summary_takes_first_three_sentences() {
        let out = FallbackGenerator.summarize("One.  Two!\n\nThree? Four. Five.");
        assert_eq!(out, "One. Two! Three?");
    }

    #[test]
    fn test_summary_of_blank_excerpt() {
        assert_eq!(FallbackGenerator.generate("Summarize:\n   "), EMPTY_SUMMARY);
    }

    #[test]
    fn test_summary_is_width_bounded() {
        let long = "word ".repeat(400);
        let out = FallbackGenerator.summarize(&long);
        assert!(out.chars().count() <= SUMMARY_WIDTH);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_recommendations_one_per_finding() {
        let findings = vec![Finding::new("secret"), Finding::new("bribe")];
        let prompt = recommendation_prompt("A summary.", &findings, &sentiment(SentimentLabel::Neutral));
        let out = FallbackGenerator.generate(&prompt);
        assert_three_numbered(&out);
        let lines = numbered_lines(&out);
        assert!(lines[0].contains("'secret'"));
        assert!(lines[1].contains("'bribe'"));
        assert!(lines[2].contains("compliance register"));
    }

    #[test]
    fn test_recommendations_capped_at_three() {
        let findings: Vec<Finding> = ["a", "b", "c", "d", "e"].into_iter().map(Finding::new).collect();
        let prompt = recommendation_prompt("s", &findings, &sentiment(SentimentLabel::Negative));
        let out = FallbackGenerator.generate(&prompt);
        assert_three_numbered(&out);
        assert!(!out.contains("'d'"));
    }

    #[test]
    fn test_recommendations_topped_up_with_filler() {
        let prompt = recommendation_prompt("", &[], &sentiment(SentimentLabel::Positive));
        let out = FallbackGenerator.generate(&prompt);
        assert_three_numbered(&out);
        assert!(numbered_lines(&out).iter().all(|l| l.contains("Reconfirm")));
    }

    #[test]
    fn test_negative_sentiment_escalates() {
        let prompt = recommendation_prompt("s", &[], &sentiment(SentimentLabel::Negative));
        let out = FallbackGenerator.generate(&prompt);
        assert_three_numbered(&out);
        assert!(out.contains("Escalate"));
    }

    #[test]
    fn test_free_form_recommendation_prompt() {
        let out = FallbackGenerator.generate("Please provide 3 compliance recommendations.");
        assert_three_numbered(&out);
    }

    #[test]
    fn test_generic_prompt_includes_excerpt() {
        let out = FallbackGenerator.generate("What does   this\ncontract say?");
        assert!(out.starts_with("Offline language model fallback active."));
        assert!(out.ends_with("What does this contract say?"));
    }

    #[test]
    fn test_shorten_long_single_word() {
        let word = "x".repeat(30);
        assert_eq!(shorten(&word, 10), "xxxxxxx...");
    }

    #[test]
    fn test_summary_prompt_builder_is_recognized() {
        let out = FallbackGenerator.generate(&summary_prompt("First. Second."));
        assert_eq!(out, "First. Second.");
    }
}
