//! Docket domain model.
//!
//! # Responsibility
//! - Define the canonical regulation docket record.
//!
//! # Invariants
//! - `docket_id` is assigned by the external batch source and never reused.
//! - `keywords` holds lowercase text only; it is derived state, replaced in
//!   full by extraction passes, never merged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stable identifier for a regulation docket.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Identity is assigned by the upstream batch source, not by storage.
pub type DocketId = i64;

/// Canonical domain record for one regulation docket.
///
/// `keywords` uses a `BTreeSet` so the set semantics of the index and the
/// deterministic ordering of the query surface come from one shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Docket {
    /// Stable external ID used for upserts, lookups and search results.
    pub docket_id: DocketId,
    /// Docket title text.
    pub title: String,
    /// Free-text summary of the regulation.
    pub summary: String,
    /// Derived lowercase keyword set. Empty until an extraction pass runs.
    #[serde(default)]
    pub keywords: BTreeSet<String>,
}

impl Docket {
    /// Creates a docket with content fields and an empty keyword set.
    pub fn new(docket_id: DocketId, title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            docket_id,
            title: title.into(),
            summary: summary.into(),
            keywords: BTreeSet::new(),
        }
    }

    /// Creates a docket with an explicit keyword set.
    pub fn with_keywords(
        docket_id: DocketId,
        title: impl Into<String>,
        summary: impl Into<String>,
        keywords: BTreeSet<String>,
    ) -> Self {
        Self {
            docket_id,
            title: title.into(),
            summary: summary.into(),
            keywords,
        }
    }
}
