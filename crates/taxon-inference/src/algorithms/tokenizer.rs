//! Keyword tokenizer for facility text fields.
//!
//! `"ARNETT_SWD_WT1"` → `["arnett", "swd", "wt"]`,
//! `"productionWell"` → `["production", "well"]`.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use taxon_core::config::defaults::DEFAULT_ABBREVIATIONS;

/// Anything outside ASCII letters and digits separates words, including
/// accented letters.
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());

/// Splits free text into lowercase keywords.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Two-character tokens that are kept.
    abbreviations: HashSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_ABBREVIATIONS)
    }
}

impl Tokenizer {
    pub fn new<S: AsRef<str>>(abbreviations: &[S]) -> Self {
        Self {
            abbreviations: abbreviations
                .iter()
                .map(|a| a.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Tokenize `text`, dropping stop words, numbers, single characters and
    /// two-character fragments outside the abbreviation list.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        split_separators(text)
            .into_iter()
            .flat_map(split_word_boundaries)
            .map(str::to_ascii_lowercase)
            .filter(|w| self.keep(w))
            .collect()
    }

    fn keep(&self, word: &str) -> bool {
        if word.len() <= 1 || is_stop_word(word) {
            return false;
        }
        if word.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        word.len() != 2 || self.abbreviations.contains(word)
    }
}

fn split_separators(text: &str) -> Vec<&str> {
    SEPARATORS.split(text).filter(|s| !s.is_empty()).collect()
}

/// Split an alphanumeric run at camel-case transitions, before the last
/// capital of an acronym (`HTTPServer` → `HTTP`, `Server`), and between
/// letters and digits.
fn split_word_boundaries(chunk: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = chunk.char_indices().collect();
    let mut parts = Vec::new();
    let mut start = 0;

    for i in 1..chars.len() {
        let (idx, cur) = chars[i];
        let prev = chars[i - 1].1;
        let next = chars.get(i + 1).map(|&(_, c)| c);

        let boundary = (prev.is_ascii_lowercase() && cur.is_ascii_uppercase())
            || (prev.is_ascii_uppercase()
                && cur.is_ascii_uppercase()
                && next.is_some_and(|n| n.is_ascii_lowercase()))
            || (prev.is_ascii_alphabetic() && cur.is_ascii_digit())
            || (prev.is_ascii_digit() && cur.is_ascii_alphabetic());

        if boundary {
            parts.push(&chunk[start..idx]);
            start = idx;
        }
    }
    if start < chunk.len() {
        parts.push(&chunk[start..]);
    }
    parts
}

fn is_stop_word(word: &str) -> bool {
    matches!(
        word,
        "the"
            | "a"
            | "an"
            | "and"
            | "or"
            | "but"
            | "in"
            | "on"
            | "at"
            | "to"
            | "for"
            | "of"
            | "with"
            | "by"
            | "from"
            | "as"
            | "is"
            | "was"
            | "are"
            | "were"
            | "been"
            | "be"
            | "have"
            | "has"
            | "had"
            | "do"
            | "does"
            | "did"
            | "will"
            | "would"
            | "should"
            | "could"
            | "may"
            | "might"
            | "must"
            | "can"
            | "this"
            | "that"
            | "these"
            | "those"
            | "i"
            | "you"
            | "he"
            | "she"
            | "it"
            | "we"
            | "they"
            | "not"
            | "no"
            | "yes"
            | "n"
            | "na"
            | "nan"
            | "none"
    )
}
