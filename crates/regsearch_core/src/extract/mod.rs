//! Keyword extraction capability and variant selection.
//!
//! # Responsibility
//! - Define the single-method extraction capability implemented by variants.
//! - Resolve the configured variant from its stable string id.
//!
//! # Invariants
//! - Extraction mutates only the `keywords` field, replacing it in full.
//! - Extraction never persists; storage writes are the caller's job.
//! - Running extraction twice on unmutated dockets yields equal sets.

use crate::model::docket::Docket;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod lexical;
pub mod linguistic;

pub use lexical::LexicalExtractor;
pub use linguistic::LinguisticExtractor;

/// Single-method capability for deriving a docket's keyword set.
///
/// Implementations read `"{title} {summary}"`, rebuild the keyword set
/// from scratch and assign it; title and summary are never touched.
pub trait KeywordExtractor {
    fn extract(&self, dockets: &mut [Docket]);
}

/// Stable string id for the lexical variant.
pub const EXTRACTOR_KIND_LEXICAL: &str = "lexical";
/// Stable string id for the linguistic variant.
pub const EXTRACTOR_KIND_LINGUISTIC: &str = "linguistic";

/// Extraction variant selected by startup configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorKind {
    /// Word-run tokenizer with a configurable minimum token length.
    Lexical,
    /// Heuristic noun-phrase and entity-span pipeline.
    Linguistic,
}

impl ExtractorKind {
    /// Stable string id used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lexical => EXTRACTOR_KIND_LEXICAL,
            Self::Linguistic => EXTRACTOR_KIND_LINGUISTIC,
        }
    }
}

/// Extractor selection parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractorKindError {
    EmptyKind,
    UnsupportedKind(String),
}

impl Display for ExtractorKindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyKind => write!(f, "extractor kind value must not be empty"),
            Self::UnsupportedKind(value) => {
                write!(f, "extractor kind is unsupported: {value}")
            }
        }
    }
}

impl Error for ExtractorKindError {}

/// Parses one extractor kind from its configuration string value.
pub fn parse_extractor_kind(value: &str) -> Result<ExtractorKind, ExtractorKindError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(ExtractorKindError::EmptyKind);
    }

    match normalized {
        EXTRACTOR_KIND_LEXICAL => Ok(ExtractorKind::Lexical),
        EXTRACTOR_KIND_LINGUISTIC => Ok(ExtractorKind::Linguistic),
        other => Err(ExtractorKindError::UnsupportedKind(other.to_string())),
    }
}

/// Builds the configured extractor variant with default settings.
pub fn build_extractor(kind: ExtractorKind) -> Box<dyn KeywordExtractor> {
    match kind {
        ExtractorKind::Lexical => Box::new(LexicalExtractor::default()),
        ExtractorKind::Linguistic => Box::new(LinguisticExtractor::new()),
    }
}

/// Concatenated extraction input for one docket.
pub(crate) fn docket_text(docket: &Docket) -> String {
    format!("{} {}", docket.title, docket.summary)
}
