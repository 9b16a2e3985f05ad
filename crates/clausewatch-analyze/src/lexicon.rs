//! Built-in lexicon polarity analyzer.
//!
//! Averages per-word polarity over the words found in the lexicon. A negator
//! flips and damps the next scored word within a short window, an intensifier
//! scales the word right after it.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::sentiment::PolarityAnalyzer;

/// How many tokens a negator stays active for.
const NEGATION_WINDOW: usize = 3;
/// Multiplier applied to a negated word.
const NEGATION_FACTOR: f64 = -0.5;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").unwrap());

static LEXICON: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        // positive
        ("good", 0.7),
        ("great", 0.8),
        ("excellent", 1.0),
        ("best", 1.0),
        ("wonderful", 1.0),
        ("happy", 0.8),
        ("pleased", 0.5),
        ("satisfied", 0.5),
        ("satisfactory", 0.5),
        ("beneficial", 0.6),
        ("benefit", 0.5),
        ("benefits", 0.5),
        ("fair", 0.7),
        ("compliant", 0.4),
        ("secure", 0.4),
        ("safe", 0.5),
        ("success", 0.75),
        ("successful", 0.75),
        ("successfully", 0.75),
        ("approved", 0.4),
        ("effective", 0.6),
        ("reliable", 0.5),
        ("transparent", 0.3),
        ("helpful", 0.5),
        ("protected", 0.3),
        ("nice", 0.6),
        ("strong", 0.43),
        ("improved", 0.3),
        ("positive", 0.23),
        ("valuable", 0.6),
        ("trusted", 0.5),
        ("clear", 0.1),
        ("love", 0.5),
        // negative
        ("bad", -0.7),
        ("poor", -0.4),
        ("terrible", -1.0),
        ("awful", -1.0),
        ("worst", -1.0),
        ("horrible", -1.0),
        ("illegal", -0.5),
        ("unlawful", -0.5),
        ("breach", -0.6),
        ("breaches", -0.6),
        ("violation", -0.6),
        ("violations", -0.6),
        ("violate", -0.6),
        ("penalty", -0.4),
        ("penalties", -0.4),
        ("fraud", -0.8),
        ("fraudulent", -0.8),
        ("risky", -0.5),
        ("liable", -0.3),
        ("failure", -0.5),
        ("failed", -0.5),
        ("fail", -0.5),
        ("negligent", -0.6),
        ("negligence", -0.6),
        ("dispute", -0.4),
        ("damage", -0.4),
        ("damages", -0.4),
        ("loss", -0.4),
        ("losses", -0.4),
        ("harmful", -0.7),
        ("dangerous", -0.6),
        ("unfair", -0.6),
        ("wrong", -0.5),
        ("problem", -0.3),
        ("problems", -0.3),
        ("angry", -0.6),
        ("sad", -0.5),
        ("hate", -0.8),
        ("unsafe", -0.5),
        ("secret", -0.4),
        ("unacceptable", -0.7),
        ("misleading", -0.6),
    ]
    .into_iter()
    .collect()
});

static INTENSIFIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("very", 1.3),
        ("extremely", 1.5),
        ("highly", 1.3),
        ("really", 1.2),
        ("quite", 1.1),
        ("absolutely", 1.5),
        ("totally", 1.3),
        ("slightly", 0.6),
        ("somewhat", 0.7),
    ]
    .into_iter()
    .collect()
});

fn is_negator(word: &str) -> bool {
    matches!(
        word,
        "not" | "no" | "never" | "none" | "nothing" | "neither" | "nor" | "without"
    ) || word.ends_with("n't")
}

/// Lexicon-based polarity, in [-1.0, 1.0].
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconAnalyzer;

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl PolarityAnalyzer for LexiconAnalyzer {
    fn polarity(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();

        let mut total = 0.0;
        let mut scored = 0usize;
        let mut negation_left = 0usize;
        let mut intensity = 1.0;

        for word in WORD_RE.find_iter(&lowered).map(|m| m.as_str()) {
            if is_negator(word) {
                negation_left = NEGATION_WINDOW;
                continue;
            }

            if let Some(factor) = INTENSIFIERS.get(word) {
                intensity *= factor;
                continue;
            }

            match LEXICON.get(word) {
                Some(base) => {
                    let mut value = base * intensity;
                    if negation_left > 0 {
                        value *= NEGATION_FACTOR;
                        negation_left = 0;
                    }
                    total += value.clamp(-1.0, 1.0);
                    scored += 1;
                }
                None => {
                    negation_left = negation_left.saturating_sub(1);
                }
            }
            intensity = 1.0;
        }

        if scored == 0 {
            return 0.0;
        }

        (total / scored as f64).clamp(-1.0, 1.0)
    }
}
