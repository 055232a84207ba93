//! Keyword registry and docket<->keyword association SQL.
//!
//! # Responsibility
//! - Own get-or-create semantics for unique keyword texts.
//! - Own clear-then-add replacement of a docket's association set.
//! - Provide the literal-substring LIKE pattern used by keyword search.
//!
//! # Invariants
//! - Keyword texts are trimmed and lowercased before persistence.
//! - A (docket, keyword) pair is inserted at most once per replacement.
//! - Keyword rows are never deleted; orphaned entries are retained.

use crate::model::docket::DocketId;
use crate::repo::docket_repo::RepoResult;
use rusqlite::{params, Connection};
use std::collections::BTreeSet;

/// Normalizes one keyword value.
///
/// Returns `None` for values that are empty after trimming.
pub fn normalize_keyword(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Normalizes and deduplicates a keyword set.
pub fn normalize_keywords(keywords: &BTreeSet<String>) -> BTreeSet<String> {
    keywords
        .iter()
        .filter_map(|text| normalize_keyword(text))
        .collect()
}

/// Replaces the full association set for one docket.
///
/// Clears existing pairs, then get-or-creates each keyword text and links
/// it. Runs inside the caller's transaction; this function does not commit.
pub(crate) fn replace_docket_keywords(
    conn: &Connection,
    docket_id: DocketId,
    keywords: &BTreeSet<String>,
) -> RepoResult<()> {
    conn.execute(
        "DELETE FROM docket_keywords WHERE docket_id = ?1;",
        params![docket_id],
    )?;

    for text in keywords {
        conn.execute(
            "INSERT OR IGNORE INTO keywords (text) VALUES (?1);",
            params![text.as_str()],
        )?;
        conn.execute(
            "INSERT INTO docket_keywords (docket_id, keyword_id)
             SELECT ?1, id
             FROM keywords
             WHERE text = ?2;",
            params![docket_id, text.as_str()],
        )?;
    }

    Ok(())
}

/// Loads the keyword set currently associated with one docket.
pub(crate) fn keywords_for_docket(
    conn: &Connection,
    docket_id: DocketId,
) -> RepoResult<BTreeSet<String>> {
    let mut stmt = conn.prepare(
        "SELECT k.text
         FROM docket_keywords dk
         INNER JOIN keywords k ON k.id = dk.keyword_id
         WHERE dk.docket_id = ?1;",
    )?;
    let mut rows = stmt.query(params![docket_id])?;
    let mut keywords = BTreeSet::new();
    while let Some(row) = rows.next()? {
        let text: String = row.get(0)?;
        keywords.insert(text);
    }
    Ok(keywords)
}

/// Lists every keyword text known by the registry, sorted ascending.
///
/// Includes orphaned keywords no docket references anymore.
pub(crate) fn list_keyword_texts(conn: &Connection) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT text FROM keywords ORDER BY text ASC;")?;
    let mut rows = stmt.query([])?;
    let mut texts = Vec::new();
    while let Some(row) = rows.next()? {
        let text: String = row.get(0)?;
        texts.push(text);
    }
    Ok(texts)
}

/// Builds a `LIKE` pattern matching `term` as a literal substring.
///
/// `%`, `_` and the escape character itself are escaped so user input
/// cannot act as a wildcard; callers pass the result with `ESCAPE '\'`.
pub(crate) fn like_substring_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
