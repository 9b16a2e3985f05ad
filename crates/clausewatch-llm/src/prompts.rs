//! Prompt builders and the matching parser used by the fallback generator.

use clausewatch_core::{Finding, Sentiment};

pub const SUMMARY_PREFIX: &str = "Summarize:";
pub const RECOMMENDATION_INSTRUCTION: &str =
    "Provide 3 compliance recommendations as a numbered list.";
/// Lowercase marker identifying a recommendation prompt.
const RECOMMENDATION_MARKER: &str = "provide 3 compliance recommendations";
/// Findings block when nothing matched. Keywords are always emitted as `- ` items.
pub const NO_FINDINGS: &str = "(no findings)";

pub fn summary_prompt(excerpt: &str) -> String {
    format!("{SUMMARY_PREFIX}\n{excerpt}")
}

pub fn recommendation_prompt(summary: &str, findings: &[Finding], sentiment: &Sentiment) -> String {
    let findings_block = if findings.is_empty() {
        NO_FINDINGS.to_string()
    } else {
        findings
            .iter()
            .map(|f| format!("- {}", f.matched))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Summary:\n{}\n\nFindings:\n{}\n\nSentiment:\n{} (polarity {:.2})\n\n{}",
        summary.trim(),
        findings_block,
        sentiment.sentiment,
        sentiment.polarity,
        RECOMMENDATION_INSTRUCTION
    )
}

/// Shape of a prompt as far as the fallback generator is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind<'a> {
    /// Text following the `Summarize:` prefix.
    Summary(&'a str),
    Recommendation,
    Other,
}

pub fn classify(prompt: &str) -> PromptKind<'_> {
    let trimmed = prompt.trim();
    let prefix_len = SUMMARY_PREFIX.len();
    if trimmed
        .get(..prefix_len)
        .is_some_and(|p| p.eq_ignore_ascii_case(SUMMARY_PREFIX))
    {
        return PromptKind::Summary(trimmed[prefix_len..].trim());
    }
    if trimmed.to_lowercase().contains(RECOMMENDATION_MARKER) {
        return PromptKind::Recommendation;
    }
    PromptKind::Other
}

/// Sections recovered from a recommendation prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptSections {
    pub summary: String,
    pub findings: Vec<String>,
    pub sentiment: String,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Summary,
    Findings,
    Sentiment,
}

/// Recover Summary/Findings/Sentiment from a prompt built by [`recommendation_prompt`].
/// Headers may carry inline content (`Summary: text`). Parsing stops at the instruction
/// line following the Sentiment section.
pub fn parse_sections(prompt: &str) -> PromptSections {
    let mut summary: Vec<&str> = Vec::new();
    let mut findings = Vec::new();
    let mut sentiment: Vec<&str> = Vec::new();
    let mut current: Option<Section> = None;

    for raw_line in prompt.lines() {
        let line = raw_line.trim();
        if current == Some(Section::Sentiment) && line == RECOMMENDATION_INSTRUCTION {
            break;
        }

        let (section, rest) = if let Some(rest) = line.strip_prefix("Summary:") {
            (Some(Section::Summary), rest.trim())
        } else if let Some(rest) = line.strip_prefix("Findings:") {
            (Some(Section::Findings), rest.trim())
        } else if let Some(rest) = line.strip_prefix("Sentiment:") {
            (Some(Section::Sentiment), rest.trim())
        } else {
            (None, line)
        };
        if section.is_some() {
            current = section;
        }
        if rest.is_empty() {
            continue;
        }

        match current {
            Some(Section::Summary) => summary.push(rest),
            Some(Section::Findings) => match rest.strip_prefix("- ") {
                Some(item) if !item.trim().is_empty() => findings.push(item.trim().to_string()),
                Some(_) => {}
                None if rest == NO_FINDINGS => {}
                None => findings.push(rest.to_string()),
            },
            Some(Section::Sentiment) => sentiment.push(rest),
            None => {}
        }
    }

    PromptSections {
        summary: summary.join("\n"),
        findings,
        sentiment: sentiment.join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clausewatch_core::SentimentLabel;

    #[test]
    fn test_summary_prompt_shape() {
        assert_eq!(summary_prompt("Hello world."), "Summarize:\nHello world.");
        assert_eq!(
            classify(&summary_prompt("Hello world.")),
            PromptKind::Summary("Hello world.")
        );
        assert_eq!(classify("  summarize: lower"), PromptKind::Summary("lower"));
    }

    #[test]
    fn test_classify_recommendation_and_other() {
        let prompt = recommendation_prompt("s", &[], &Sentiment::neutral());
        assert_eq!(classify(&prompt), PromptKind::Recommendation);
        assert_eq!(classify("What is this?"), PromptKind::Other);
        assert_eq!(classify("Sum"), PromptKind::Other);
    }

    #[test]
    fn test_parse_round_trips_builder_output() {
        let sentiment = Sentiment {
            polarity: -0.45,
            sentiment: SentimentLabel::Negative,
        };
        let findings = vec![Finding::new("secret"), Finding::new("merger")];
        let prompt = recommendation_prompt("The deal is private.\nSecond line.", &findings, &sentiment);

        let sections = parse_sections(&prompt);
        assert_eq!(sections.summary, "The deal is private.\nSecond line.");
        assert_eq!(sections.findings, vec!["secret", "merger"]);
        assert_eq!(sections.sentiment, "Negative (polarity -0.45)");
    }

    #[test]
    fn test_parse_empty_findings_and_inline_headers() {
        let sections =
            parse_sections("Summary: short\nFindings: (no findings)\nSentiment: Positive\n");
        assert_eq!(sections.summary, "short");
        assert!(sections.findings.is_empty());
        assert_eq!(sections.sentiment, "Positive");

        let prompt = recommendation_prompt("short", &[], &Sentiment::neutral());
        assert!(parse_sections(&prompt).findings.is_empty());
    }

    #[test]
    fn test_keyword_named_none_is_kept() {
        let findings = vec![Finding::new("none"), Finding::new("(no findings)")];
        let prompt = recommendation_prompt("s", &findings, &Sentiment::neutral());
        assert_eq!(parse_sections(&prompt).findings, vec!["none", "(no findings)"]);
    }

    #[test]
    fn test_summary_line_resembling_instruction_keeps_findings() {
        let summary = "Provide 3 compliance recommendations to the board by Friday.\n\
                       Provide 3 compliance recommendations as a numbered list.";
        let prompt = recommendation_prompt(summary, &[Finding::new("secret")], &Sentiment::neutral());

        let sections = parse_sections(&prompt);
        assert_eq!(sections.summary, summary);
        assert_eq!(sections.findings, vec!["secret"]);
        assert!(sections.sentiment.starts_with("Neutral"));
    }
}
