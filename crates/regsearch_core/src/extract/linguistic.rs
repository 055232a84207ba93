//! Linguistic keyword extraction.
//!
//! # Responsibility
//! - Derive multi-word keyword phrases from docket text using a heuristic
//!   language pipeline: noun-phrase chunks and named-entity spans.
//!
//! # Invariants
//! - Output phrases are lowercase and deduplicated.
//! - Shared pipeline resources (stop-word set, token patterns) are built
//!   once per process and reused across calls.

use crate::extract::{docket_text, KeywordExtractor};
use crate::model::docket::Docket;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};

// Function words that terminate a candidate noun phrase.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his",
    "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "more", "most", "my",
    "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "out",
    "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
];

static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9][A-Za-z0-9'-]*").expect("valid token regex"));

static SEGMENT_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?;:\n\r()\[\]]+").expect("valid segment split regex"));

/// Heuristic noun-phrase/entity extractor over `"{title} {summary}"`.
///
/// The pipeline splits text into sentence-like segments, then collects two
/// families of lowercase phrases per segment:
///
/// - noun-phrase chunks: maximal token runs not interrupted by a function
///   word (stop word);
/// - named-entity spans: runs of capitalized tokens, skipping a lone
///   capitalized token at segment start (ordinary sentence capitalization).
///
/// Stable for fixed input; no model files are loaded.
#[derive(Debug, Clone, Default)]
pub struct LinguisticExtractor;

impl LinguisticExtractor {
    pub fn new() -> Self {
        Self
    }

    fn phrases(&self, text: &str) -> BTreeSet<String> {
        let mut phrases = BTreeSet::new();
        for segment in SEGMENT_SPLIT_RE.split(text) {
            let tokens: Vec<&str> = TOKEN_RE
                .find_iter(segment)
                .map(|token| token.as_str())
                .collect();
            if tokens.is_empty() {
                continue;
            }
            collect_noun_phrase_chunks(&tokens, &mut phrases);
            collect_entity_spans(&tokens, &mut phrases);
        }
        phrases
    }
}

impl KeywordExtractor for LinguisticExtractor {
    fn extract(&self, dockets: &mut [Docket]) {
        for docket in dockets.iter_mut() {
            docket.keywords = self.phrases(&docket_text(docket));
        }
    }
}

fn collect_noun_phrase_chunks(tokens: &[&str], phrases: &mut BTreeSet<String>) {
    let mut chunk: Vec<String> = Vec::new();
    for token in tokens {
        let lowered = token.to_lowercase();
        if STOP_WORD_SET.contains(lowered.as_str()) {
            flush_chunk(&mut chunk, phrases);
        } else {
            chunk.push(lowered);
        }
    }
    flush_chunk(&mut chunk, phrases);
}

fn collect_entity_spans(tokens: &[&str], phrases: &mut BTreeSet<String>) {
    let mut run_start: Option<usize> = None;
    for (index, token) in tokens.iter().enumerate() {
        if is_capitalized(token) {
            run_start.get_or_insert(index);
            continue;
        }
        if let Some(start) = run_start.take() {
            push_entity_run(tokens, start, index, phrases);
        }
    }
    if let Some(start) = run_start {
        push_entity_run(tokens, start, tokens.len(), phrases);
    }
}

fn push_entity_run(tokens: &[&str], start: usize, end: usize, phrases: &mut BTreeSet<String>) {
    // A lone capitalized token opening a segment is ordinary sentence
    // capitalization, not an entity.
    if end - start == 1 && start == 0 {
        return;
    }
    let span = tokens[start..end].join(" ").to_lowercase();
    phrases.insert(span);
}

fn is_capitalized(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|first| first.is_uppercase())
}

fn flush_chunk(chunk: &mut Vec<String>, phrases: &mut BTreeSet<String>) {
    if chunk.is_empty() {
        return;
    }
    phrases.insert(chunk.join(" "));
    chunk.clear();
}
