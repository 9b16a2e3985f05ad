//! Forbidden-keyword rule engine.

use clausewatch_core::{Finding, RuleSet};
use serde::Serialize;
use tracing::debug;

/// Outcome of one scan pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleCheck {
    pub failed: bool,
    pub findings: Vec<Finding>,
}

/// Case-insensitive substring scan. One finding per matching keyword, in
/// keyword order; duplicates in the input produce duplicate findings.
/// Blank keywords are skipped.
pub fn scan<S: AsRef<str>>(text: &str, keywords: &[S]) -> RuleCheck {
    let lowered = text.to_lowercase();

    let findings: Vec<Finding> = keywords
        .iter()
        .map(AsRef::as_ref)
        .filter(|kw| !kw.trim().is_empty())
        .filter(|kw| lowered.contains(&kw.to_lowercase()))
        .map(Finding::new)
        .collect();

    RuleCheck {
        failed: !findings.is_empty(),
        findings,
    }
}

/// Stateless engine handle so the coordinator can hold it like the other stages.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn scan(&self, text: &str, rules: &RuleSet) -> RuleCheck {
        let check = scan(text, &rules.forbidden_keywords);
        debug!(
            "Rule scan: {} keywords, {} findings",
            rules.forbidden_keywords.len(),
            check.findings.len()
        );
        check
    }
}
