//! Lexical keyword extraction.
//!
//! # Responsibility
//! - Derive keyword sets by tokenizing docket text on word-character runs.
//!
//! # Invariants
//! - Output tokens are lowercase and deduplicated.
//! - The minimum token length is configuration, not a constant.

use crate::extract::{docket_text, KeywordExtractor};
use crate::model::docket::Docket;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Canonical mode: keep every word token.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 1;
/// Alternate mode dropping short stop-word-like tokens ("on", "the", "of").
pub const SHORT_TOKEN_CUTOFF_LEN: usize = 4;

static WORD_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("valid word-run regex"));

/// Deterministic tokenizing extractor over `"{title} {summary}"`.
///
/// Lowercases the text, splits it into word-character runs and keeps runs
/// of at least `min_token_len` characters.
#[derive(Debug, Clone)]
pub struct LexicalExtractor {
    min_token_len: usize,
}

impl LexicalExtractor {
    /// Creates an extractor keeping tokens of at least `min_token_len` chars.
    ///
    /// A zero value is treated as 1; every token already has one character.
    pub fn new(min_token_len: usize) -> Self {
        Self {
            min_token_len: min_token_len.max(1),
        }
    }

    /// Effective minimum token length.
    pub fn min_token_len(&self) -> usize {
        self.min_token_len
    }

    fn tokenize(&self, text: &str) -> BTreeSet<String> {
        let lowered = text.to_lowercase();
        WORD_RUN_RE
            .find_iter(&lowered)
            .map(|token| token.as_str().to_string())
            .filter(|token| token.chars().count() >= self.min_token_len)
            .collect()
    }
}

impl Default for LexicalExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TOKEN_LEN)
    }
}

impl KeywordExtractor for LexicalExtractor {
    fn extract(&self, dockets: &mut [Docket]) {
        for docket in dockets.iter_mut() {
            docket.keywords = self.tokenize(&docket_text(docket));
        }
    }
}
