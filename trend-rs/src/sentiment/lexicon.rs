//! Lexicon-based text polarity scoring

use std::collections::HashMap;

/// Scores the polarity of a piece of text
pub trait PolarityScorer: Send + Sync {
    /// Total polarity divided by the number of tokens (0 for empty text)
    fn comparative(&self, text: &str) -> f64;
}

// AFINN-style word valences in [-5, 5]
const WORDS: &[(&str, i32)] = &[
    ("abandon", -2), ("accept", 1), ("amazing", 4), ("anger", -3), ("angry", -3),
    ("annoying", -2), ("anxious", -2), ("awesome", 4), ("awful", -3), ("bad", -3),
    ("bankrupt", -3), ("beautiful", 3), ("benefit", 2), ("best", 3), ("better", 2),
    ("blocked", -1), ("boom", 2), ("boring", -3), ("breakthrough", 3), ("brilliant", 4),
    ("broke", -1), ("broken", -1), ("bubble", -2), ("buy", 1), ("calm", 2),
    ("catastrophe", -3), ("celebrate", 3), ("chaos", -2), ("cheat", -3), ("cheer", 2),
    ("collapse", -2), ("confident", 2), ("confusion", -2), ("crash", -2), ("crisis", -3),
    ("cool", 1), ("crap", -3), ("damage", -3), ("danger", -2), ("dead", -3),
    ("decline", -1), ("destroy", -3), ("disappointed", -2), ("disaster", -2), ("doubt", -1),
    ("dump", -1), ("easy", 1), ("excellent", 3), ("excited", 3), ("exciting", 3),
    ("fail", -2), ("failed", -2), ("failure", -2), ("fake", -3), ("fantastic", 4),
    ("fear", -2), ("fine", 2), ("fraud", -4), ("free", 1), ("fun", 4),
    ("gain", 2), ("gains", 2), ("glad", 3), ("good", 3), ("great", 3),
    ("greed", -3), ("grow", 1), ("growth", 2), ("hack", -1), ("hacked", -1),
    ("happy", 3), ("hate", -3), ("help", 2), ("hope", 2), ("hopeful", 2),
    ("horrible", -3), ("huge", 1), ("improve", 2), ("improved", 2), ("innovative", 2),
    ("interesting", 2), ("joy", 3), ("kill", -3), ("like", 2), ("lose", -3),
    ("loss", -3), ("losses", -3), ("lost", -3), ("love", 3), ("lucky", 3),
    ("mess", -2), ("nice", 3), ("optimistic", 2), ("panic", -3), ("pessimistic", -2),
    ("poor", -2), ("positive", 2), ("profit", 2), ("profitable", 2), ("promising", 3),
    ("protect", 1), ("rich", 2), ("risk", -2), ("risky", -2), ("sad", -2),
    ("safe", 1), ("scam", -2), ("scared", -2), ("sell", -1), ("solid", 2),
    ("steal", -2), ("stolen", -2), ("strong", 2), ("stupid", -2), ("success", 2),
    ("successful", 3), ("support", 2), ("terrible", -3), ("threat", -2), ("trust", 1),
    ("ugly", -3), ("uncertain", -1), ("upset", -2), ("useless", -2), ("warning", -3),
    ("weak", -2), ("win", 4), ("winning", 4), ("worried", -3), ("worry", -3),
    ("worse", -3), ("worst", -3), ("worthless", -2), ("wow", 4), ("wrong", -2),
    // market slang
    ("bullish", 2), ("bearish", -2), ("moon", 2), ("mooning", 3), ("pump", 1),
    ("rally", 2), ("rekt", -3), ("rugpull", -4), ("fud", -2), ("hodl", 1),
    ("adoption", 2), ("ath", 2), ("selloff", -2), ("liquidated", -3), ("dip", -1),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "dont", "don't", "isnt", "isn't", "cant", "can't", "wont",
    "won't", "without", "nobody", "nothing",
];

/// AFINN-style scorer: sum of word valences over token count, with a
/// preceding negator flipping a word's sign.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    words: HashMap<&'static str, i32>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            words: WORDS.iter().copied().collect(),
        }
    }

    /// Add or override entries
    pub fn with_words(mut self, extra: &[(&'static str, i32)]) -> Self {
        self.words.extend(extra.iter().copied());
        self
    }

    /// Sum of valences and the token count
    pub fn score(&self, text: &str) -> (i32, usize) {
        let tokens = tokenize(text);
        let mut total = 0;
        for (i, token) in tokens.iter().enumerate() {
            let Some(&valence) = self.words.get(token.as_str()) else {
                continue;
            };
            let negated = i > 0 && NEGATORS.contains(&tokens[i - 1].as_str());
            total += if negated { -valence } else { valence };
        }
        (total, tokens.len())
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for LexiconScorer {
    fn comparative(&self, text: &str) -> f64 {
        match self.score(text) {
            (_, 0) => 0.0,
            (total, count) => total as f64 / count as f64,
        }
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparative_normalizes_by_length() {
        let scorer = LexiconScorer::new();
        // "great" = 3 over 4 tokens
        assert_eq!(scorer.comparative("Bitcoin looks great today"), 0.75);
        assert_eq!(scorer.comparative("Total scam, lost everything"), -5.0 / 4.0);
    }

    #[test]
    fn test_negation_flips_valence() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.score("this is not good"), (-3, 4));
        assert_eq!(scorer.score("don't panic"), (3, 2));
    }

    #[test]
    fn test_empty_and_neutral_text() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.comparative(""), 0.0);
        assert_eq!(scorer.comparative("!!! ..."), 0.0);
        assert_eq!(scorer.comparative("the block height is 800000"), 0.0);
    }

    #[test]
    fn test_extra_words_override() {
        let scorer = LexiconScorer::new().with_words(&[("halving", 2)]);
        assert_eq!(scorer.score("halving soon"), (2, 2));
    }
}
