//! Filler words that never name a brand or a model.
//!
//! Both the local tokenizer and the LLM system prompt read from
//! [`STOPWORDS`], so the two paths agree on what counts as noise.

use std::collections::HashSet;
use std::sync::LazyLock;

use tracing::trace;

/// Lowercase stop words, in the order they are listed to the LLM.
pub const STOPWORDS: &[&str] = &[
    "with", "options", "option", "like", "such", "as", "enter", "a", "query", "the", "is", "has",
    "to", "be", "delivered", "soon", "please", "need", "want", "find", "search", "looking", "for",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Case-insensitive membership test.
pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word.to_lowercase().as_str())
}

/// Split `text` on whitespace and keep the tokens that are not stop words.
///
/// Tokens keep their original casing.
pub fn meaningful_words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .filter(|word| {
            let keep = !is_stopword(word);
            if !keep {
                trace!(word, "Dropping stop word");
            }
            keep
        })
        .collect()
}

/// First two meaningful words as `(brand, model)`, empty when missing.
pub fn brand_and_model(text: &str) -> (String, String) {
    let words = meaningful_words(text);
    let brand = words.first().copied().unwrap_or_default().to_string();
    let model = words.get(1).copied().unwrap_or_default().to_string();
    (brand, model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopwords_match_any_case() {
        assert!(is_stopword("with"));
        assert!(is_stopword("With"));
        assert!(is_stopword("WITH"));
        assert!(!is_stopword("Agilent"));
    }

    #[test]
    fn set_has_every_listed_word() {
        assert_eq!(STOPWORD_SET.len(), STOPWORDS.len());
    }

    #[test]
    fn brand_and_model_skip_fillers() {
        assert_eq!(
            brand_and_model("please find the Keysight N5172B"),
            ("Keysight".to_string(), "N5172B".to_string())
        );
    }

    #[test]
    fn brand_and_model_default_to_empty() {
        assert_eq!(brand_and_model("with the"), (String::new(), String::new()));
        assert_eq!(
            brand_and_model("looking for Anritsu"),
            ("Anritsu".to_string(), String::new())
        );
    }
}
