//! Substring keyword search over the docket store.
//!
//! # Responsibility
//! - Answer "which dockets hold a keyword containing this term" queries.
//!
//! # Invariants
//! - Matching is case-insensitive literal substring containment; no
//!   tokenization, stemming, fuzzy matching or ranking.
//! - A docket appears at most once per result, ordered by `docket_id ASC`.
//! - Benign inputs (empty corpus, unmatched term) yield empty results,
//!   never errors.

use crate::model::docket::Docket;
use crate::repo::docket_repo::{DocketRepository, RepoResult};

/// Returns every docket with at least one keyword containing `term`.
///
/// Accepts any term, including the empty string and terms shorter than a
/// UI would allow; minimum-length policy belongs to the boundary layer.
/// An empty term is a substring of every keyword, so it returns each
/// docket that currently holds at least one keyword.
pub fn search_dockets<R: DocketRepository>(repo: &R, term: &str) -> RepoResult<Vec<Docket>> {
    repo.search_by_keyword(term)
}
