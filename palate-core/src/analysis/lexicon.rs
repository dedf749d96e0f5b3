//! Local lexicon-based sentiment scoring
//!
//! A score is the mean AFINN-style valence (-5..=5) per token, so long and
//! short texts land on the same scale. A negator ("not", "never", "didn't")
//! flips the sign of the next scored word within a three-token window. The
//! lexicon is a curated subset focused on restaurant feedback.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Polarity scorer over a text blob; higher is more positive
pub trait SentimentScorer: Send + Sync {
    /// Must be total, independent of text length and return 0 for empty input
    fn score(&self, text: &str) -> f64;
}

#[allow(clippy::expect_used)]
static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z]+(?:['’][a-z]+)*").expect("word pattern is valid"));

/// Lowercased word tokens; apostrophes inside words are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lower)
        .map(|m| m.as_str().replace('’', "'"))
        .collect()
}

const NEGATORS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "hardly", "barely", "neither", "nor", "without",
    "isn't", "wasn't", "aren't", "weren't", "don't", "doesn't", "didn't", "can't", "couldn't",
    "won't", "wouldn't", "shouldn't", "ain't",
];

const NEGATION_WINDOW: usize = 3;

static AFINN: Lazy<HashMap<&'static str, i32>> = Lazy::new(|| {
    [
        // strongly positive
        ("outstanding", 5),
        ("superb", 5),
        ("perfect", 4),
        ("perfection", 4),
        ("amazing", 4),
        ("awesome", 4),
        ("fantastic", 4),
        ("wonderful", 4),
        ("incredible", 4),
        ("exceptional", 4),
        ("heavenly", 4),
        ("love", 3),
        ("loved", 3),
        ("loves", 3),
        ("excellent", 3),
        ("delicious", 3),
        ("great", 3),
        ("good", 3),
        ("tasty", 3),
        ("yummy", 3),
        ("happy", 3),
        ("delightful", 3),
        ("beautiful", 3),
        ("best", 3),
        ("impressed", 3),
        ("enjoyed", 2),
        ("enjoy", 2),
        ("like", 2),
        ("liked", 2),
        ("nice", 3),
        ("fresh", 1),
        ("flavorful", 2),
        ("flavourful", 2),
        ("tender", 2),
        ("juicy", 2),
        ("crispy", 1),
        ("friendly", 2),
        ("recommend", 2),
        ("recommended", 2),
        ("satisfied", 2),
        ("pleasant", 3),
        ("fine", 2),
        ("fast", 1),
        ("generous", 2),
        ("warm", 1),
        ("thanks", 2),
        ("thank", 2),
        ("pleased", 3),
        ("favorite", 2),
        ("favourite", 2),
        ("better", 2),
        ("ok", 1),
        ("okay", 1),
        // negative
        ("bad", -3),
        ("worse", -3),
        ("worst", -3),
        ("terrible", -3),
        ("awful", -3),
        ("horrible", -3),
        ("disgusting", -3),
        ("gross", -2),
        ("nasty", -3),
        ("hate", -3),
        ("hated", -3),
        ("dislike", -2),
        ("disliked", -2),
        ("disappointed", -2),
        ("disappointing", -2),
        ("disappointment", -2),
        ("poor", -2),
        ("bland", -2),
        ("tasteless", -2),
        ("soggy", -2),
        ("greasy", -2),
        ("stale", -2),
        ("burnt", -2),
        ("burned", -2),
        ("undercooked", -2),
        ("overcooked", -2),
        ("raw", -1),
        ("cold", -1),
        ("dry", -1),
        ("tough", -1),
        ("chewy", -1),
        ("salty", -1),
        ("oily", -1),
        ("slow", -2),
        ("late", -1),
        ("rude", -2),
        ("dirty", -2),
        ("sick", -2),
        ("angry", -3),
        ("annoyed", -2),
        ("frustrated", -2),
        ("frustrating", -2),
        ("unacceptable", -3),
        ("inedible", -3),
        ("rotten", -3),
        ("mediocre", -1),
        ("overpriced", -2),
        ("expensive", -1),
        ("small", -1),
        ("wrong", -2),
        ("mess", -2),
        ("complain", -2),
        ("complaint", -2),
        ("problem", -2),
        ("sad", -2),
        ("unhappy", -2),
        ("wasted", -2),
        ("waste", -1),
    ]
    .into_iter()
    .collect()
});

/// Default [`SentimentScorer`] using the bundled lexicon
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn valence(word: &str) -> Option<i32> {
        AFINN.get(word).copied()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let mut total = 0i32;
        let mut negation_left = 0usize;

        for token in &tokens {
            if NEGATORS.contains(&token.as_str()) {
                negation_left = NEGATION_WINDOW;
                continue;
            }

            if let Some(valence) = Self::valence(token) {
                total += if negation_left > 0 { -valence } else { valence };
                negation_left = 0;
            } else {
                negation_left = negation_left.saturating_sub(1);
            }
        }

        f64::from(total) / tokens.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::SentimentLabel;

    #[test]
    fn test_empty_text_scores_zero() {
        assert_eq!(LexiconScorer.score(""), 0.0);
        assert_eq!(LexiconScorer.score("   "), 0.0);
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn test_averages_valences_per_token() {
        assert_close(LexiconScorer.score("Delicious and amazing!"), 7.0 / 3.0);
        assert_close(LexiconScorer.score("Terrible, bland soup"), -5.0 / 3.0);
        assert_close(LexiconScorer.score("The table was by the window"), 0.0);
        assert_close(
            LexiconScorer.score("The pasta was good and the service was fine"),
            5.0 / 9.0,
        );
    }

    #[test]
    fn test_score_does_not_grow_with_text_length() {
        let one = LexiconScorer.score("fine");
        let many = LexiconScorer.score(&vec!["fine"; 10].join(" "));
        assert_close(one, many);
        assert_eq!(
            SentimentLabel::from_score(LexiconScorer.score(&vec!["It was fine"; 10].join(" "))),
            SentimentLabel::Neutral
        );
    }

    #[test]
    fn test_negation_flips_next_scored_word() {
        assert_close(LexiconScorer.score("not good"), -1.5);
        assert_close(LexiconScorer.score("The fries weren't soggy"), 0.5);
        assert_close(LexiconScorer.score("didn't really enjoy it"), -0.5);
        // negation does not reach past its window
        assert_close(LexiconScorer.score("not at all in any way good"), 3.0 / 7.0);
    }

    #[test]
    fn test_tokenize_handles_case_and_apostrophes() {
        assert_eq!(
            tokenize("DIDN’T like the Pad-Thai"),
            vec!["didn't", "like", "the", "pad", "thai"]
        );
    }
}
