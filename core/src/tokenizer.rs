use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

lazy_static! {
    static ref TERM_RE: Regex = Regex::new(r"\b[a-z0-9]+\b").expect("valid regex");
    static ref WORD_RE: Regex = Regex::new(r"\w+").expect("valid regex");
}

/// Tokenize a document body into its distinct terms.
///
/// Text is lowercased and every whole word made only of `[a-z0-9]` becomes a term. Punctuation
/// separates words; a word containing `_` or a non-ASCII letter yields no term at all. Each
/// term appears once no matter how often it occurs in the text.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    let lowered = text.to_lowercase();
    TERM_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Split a query into lowercase word tokens, keeping order and repeats.
pub fn query_tokens(query: &str) -> Vec<String> {
    let lowered = query.trim().to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}
