//! Docket query-surface service.
//!
//! # Responsibility
//! - Provide the get/list/create/update/search surface consumed by
//!   boundary layers (CLI viewer, API adapters).
//! - Validate caller-supplied keyword input before delegation.
//!
//! # Invariants
//! - Explicitly supplied keyword sets must not contain blank values.
//! - List results are ordered by `docket_id ASC`.

use crate::model::docket::{Docket, DocketId};
use crate::repo::docket_repo::{
    DocketListQuery, DocketRepository, DocketUpdate, RepoError, RepoResult,
};
use crate::search::keyword::search_dockets;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for docket use-cases.
#[derive(Debug)]
pub enum DocketServiceError {
    /// Keyword input contains blank values.
    InvalidKeyword(String),
    /// Target docket does not exist.
    DocketNotFound(DocketId),
    /// A docket with this id already exists.
    DocketExists(DocketId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for DocketServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKeyword(value) => write!(f, "invalid keyword: `{value}`"),
            Self::DocketNotFound(docket_id) => write!(f, "docket not found: {docket_id}"),
            Self::DocketExists(docket_id) => write!(f, "docket already exists: {docket_id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent docket state: {details}"),
        }
    }
}

impl Error for DocketServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for DocketServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(docket_id) => Self::DocketNotFound(docket_id),
            RepoError::Conflict(docket_id) => Self::DocketExists(docket_id),
            other => Self::Repo(other),
        }
    }
}

/// Docket service facade over repository implementations.
pub struct DocketService<R: DocketRepository> {
    repo: R,
}

impl<R: DocketRepository> DocketService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Gets one docket by stable id.
    pub fn get(&self, docket_id: DocketId) -> RepoResult<Option<Docket>> {
        self.repo.get(docket_id)
    }

    /// Lists dockets with pagination.
    pub fn list(&self, limit: Option<u32>, offset: u32) -> RepoResult<Vec<Docket>> {
        self.repo.list(&DocketListQuery { limit, offset })
    }

    /// Lists the full corpus.
    pub fn list_all(&self) -> RepoResult<Vec<Docket>> {
        self.repo.list(&DocketListQuery::default())
    }

    /// Creates one docket and returns the persisted record.
    pub fn create(&mut self, docket: Docket) -> Result<Docket, DocketServiceError> {
        reject_blank_keywords(docket.keywords.iter())?;
        self.repo.create(&docket)?;
        self.repo
            .get(docket.docket_id)?
            .ok_or(DocketServiceError::InconsistentState(
                "created docket not found in read-back",
            ))
    }

    /// Applies a partial update and returns the persisted record.
    pub fn update(
        &mut self,
        docket_id: DocketId,
        update: DocketUpdate,
    ) -> Result<Docket, DocketServiceError> {
        if let Some(keywords) = update.keywords.as_ref() {
            reject_blank_keywords(keywords.iter())?;
        }
        Ok(self.repo.update(docket_id, &update)?)
    }

    /// Searches dockets by keyword substring.
    pub fn search(&self, term: &str) -> RepoResult<Vec<Docket>> {
        search_dockets(&self.repo, term)
    }

    /// Lists every registry keyword, orphans included.
    pub fn list_keywords(&self) -> RepoResult<Vec<String>> {
        self.repo.list_keywords()
    }
}

fn reject_blank_keywords<'a>(
    mut keywords: impl Iterator<Item = &'a String>,
) -> Result<(), DocketServiceError> {
    match keywords.find(|keyword| keyword.trim().is_empty()) {
        Some(blank) => Err(DocketServiceError::InvalidKeyword(blank.clone())),
        None => Ok(()),
    }
}
