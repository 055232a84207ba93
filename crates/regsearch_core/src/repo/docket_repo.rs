//! Docket store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide get/list/create/update/search APIs over docket storage.
//! - Keep keyword association writes atomic with their docket write.
//!
//! # Invariants
//! - Every mutating operation commits in one transaction.
//! - A supplied keyword set replaces the full association set, never merges.
//! - Keyword texts are normalized to lowercase before persistence.
//! - List and search results are ordered by `docket_id ASC`.

use crate::db::DbError;
use crate::model::docket::{Docket, DocketId};
use crate::repo::keyword_index;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DOCKET_SELECT_SQL: &str = "SELECT docket_id, title, summary FROM dockets";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for docket persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(DocketId),
    /// Create was attempted for an id that already exists.
    Conflict(DocketId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "docket not found: {id}"),
            Self::Conflict(id) => write!(f, "docket already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted docket data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table is missing: {table}")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column is missing: {table}.{column}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing dockets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocketListQuery {
    /// Maximum rows to return. `None` returns the full corpus.
    pub limit: Option<u32>,
    /// Number of rows to skip.
    pub offset: u32,
}

/// Partial-update request for one docket.
///
/// Each supplied field overwrites the stored attribute. A supplied
/// `keywords` set replaces the full association set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocketUpdate {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub keywords: Option<BTreeSet<String>>,
}

impl DocketUpdate {
    /// Builds a content-only update (keywords untouched).
    pub fn content(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            summary: Some(summary.into()),
            keywords: None,
        }
    }

    /// Builds a keywords-only update (title/summary untouched).
    pub fn keywords(keywords: BTreeSet<String>) -> Self {
        Self {
            title: None,
            summary: None,
            keywords: Some(keywords),
        }
    }
}

/// Repository interface for docket store operations.
pub trait DocketRepository {
    /// Gets one docket by id.
    fn get(&self, docket_id: DocketId) -> RepoResult<Option<Docket>>;
    /// Lists dockets ordered by `docket_id ASC` with pagination.
    fn list(&self, query: &DocketListQuery) -> RepoResult<Vec<Docket>>;
    /// Creates one docket; fails with [`RepoError::Conflict`] when the id exists.
    fn create(&mut self, docket: &Docket) -> RepoResult<()>;
    /// Applies a partial update; fails with [`RepoError::NotFound`] when absent.
    fn update(&mut self, docket_id: DocketId, update: &DocketUpdate) -> RepoResult<Docket>;
    /// Returns dockets holding at least one keyword containing `term` as a
    /// case-insensitive literal substring, deduplicated by id.
    fn search_by_keyword(&self, term: &str) -> RepoResult<Vec<Docket>>;
    /// Returns every registry keyword text, sorted, orphans included.
    fn list_keywords(&self) -> RepoResult<Vec<String>>;
}

/// SQLite-backed docket repository.
#[derive(Debug)]
pub struct SqliteDocketRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteDocketRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl DocketRepository for SqliteDocketRepository<'_> {
    fn get(&self, docket_id: DocketId) -> RepoResult<Option<Docket>> {
        load_docket(self.conn, docket_id)
    }

    fn list(&self, query: &DocketListQuery) -> RepoResult<Vec<Docket>> {
        let mut sql = format!("{DOCKET_SELECT_SQL} ORDER BY docket_id ASC");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut dockets = Vec::new();
        while let Some(row) = rows.next()? {
            let docket = parse_docket_row(self.conn, row)?;
            dockets.push(docket);
        }
        Ok(dockets)
    }

    fn create(&mut self, docket: &Docket) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let inserted = tx.execute(
            "INSERT INTO dockets (docket_id, title, summary) VALUES (?1, ?2, ?3);",
            params![docket.docket_id, docket.title, docket.summary],
        );
        match inserted {
            Ok(_) => {}
            Err(err) if is_constraint_violation(&err) => {
                return Err(RepoError::Conflict(docket.docket_id));
            }
            Err(err) => return Err(err.into()),
        }

        if !docket.keywords.is_empty() {
            let normalized = keyword_index::normalize_keywords(&docket.keywords);
            keyword_index::replace_docket_keywords(&tx, docket.docket_id, &normalized)?;
        }

        tx.commit()?;
        Ok(())
    }

    fn update(&mut self, docket_id: DocketId, update: &DocketUpdate) -> RepoResult<Docket> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !docket_exists_in_tx(&tx, docket_id)? {
            return Err(RepoError::NotFound(docket_id));
        }

        if let Some(title) = update.title.as_deref() {
            tx.execute(
                "UPDATE dockets SET title = ?2 WHERE docket_id = ?1;",
                params![docket_id, title],
            )?;
        }
        if let Some(summary) = update.summary.as_deref() {
            tx.execute(
                "UPDATE dockets SET summary = ?2 WHERE docket_id = ?1;",
                params![docket_id, summary],
            )?;
        }
        if let Some(keywords) = update.keywords.as_ref() {
            let normalized = keyword_index::normalize_keywords(keywords);
            keyword_index::replace_docket_keywords(&tx, docket_id, &normalized)?;
        }

        let updated = load_docket(&tx, docket_id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("docket {docket_id} missing in update read-back"))
        })?;
        tx.commit()?;
        Ok(updated)
    }

    fn search_by_keyword(&self, term: &str) -> RepoResult<Vec<Docket>> {
        // Keyword texts are stored lowercase, so lowercasing the term makes
        // the LIKE comparison case-insensitive beyond ASCII as well.
        let pattern = keyword_index::like_substring_pattern(&term.to_lowercase());
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT d.docket_id, d.title, d.summary
             FROM dockets d
             INNER JOIN docket_keywords dk ON dk.docket_id = d.docket_id
             INNER JOIN keywords k ON k.id = dk.keyword_id
             WHERE k.text LIKE ?1 ESCAPE '\\'
             ORDER BY d.docket_id ASC;",
        )?;
        let mut rows = stmt.query(params![pattern])?;
        let mut dockets = Vec::new();
        while let Some(row) = rows.next()? {
            let docket = parse_docket_row(self.conn, row)?;
            dockets.push(docket);
        }
        Ok(dockets)
    }

    fn list_keywords(&self) -> RepoResult<Vec<String>> {
        keyword_index::list_keyword_texts(self.conn)
    }
}

fn parse_docket_row(conn: &Connection, row: &Row<'_>) -> RepoResult<Docket> {
    let docket_id: DocketId = row.get("docket_id")?;
    let title: String = row.get("title")?;
    let summary: String = row.get("summary")?;
    let keywords = keyword_index::keywords_for_docket(conn, docket_id)?;
    Ok(Docket::with_keywords(docket_id, title, summary, keywords))
}

fn load_docket(conn: &Connection, docket_id: DocketId) -> RepoResult<Option<Docket>> {
    let mut stmt = conn.prepare(&format!("{DOCKET_SELECT_SQL} WHERE docket_id = ?1;"))?;
    let mut rows = stmt.query(params![docket_id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_docket_row(conn, row)?));
    }
    Ok(None)
}

fn docket_exists_in_tx(tx: &Transaction<'_>, docket_id: DocketId) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM dockets WHERE docket_id = ?1);",
        params![docket_id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    for table in ["dockets", "keywords", "docket_keywords"] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    for column in ["docket_id", "title", "summary"] {
        if !table_has_column(conn, "dockets", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "dockets",
                column,
            });
        }
    }

    for column in ["id", "text"] {
        if !table_has_column(conn, "keywords", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "keywords",
                column,
            });
        }
    }

    for column in ["docket_id", "keyword_id"] {
        if !table_has_column(conn, "docket_keywords", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "docket_keywords",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
