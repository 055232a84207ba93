//! Batch ingestion pipeline.
//!
//! # Responsibility
//! - Load docket records from an external JSON batch source.
//! - Upsert record content into the store, keyed by `docket_id`.
//! - Re-run keyword extraction over the whole corpus afterwards.
//!
//! # Invariants
//! - An unreadable source is non-fatal: logged, zero records processed.
//! - A malformed record aborts the batch; prior upserts stay committed.
//! - The content phase never touches keywords; the extraction phase
//!   always recomputes the entire corpus, not just changed records.

use crate::extract::KeywordExtractor;
use crate::model::docket::{Docket, DocketId};
use crate::repo::docket_repo::{DocketListQuery, DocketRepository, DocketUpdate, RepoError};
use log::{error, info};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// One record of the external batch source.
///
/// Unknown fields in the source are ignored; a keywords field is never
/// read from it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocketRecord {
    pub docket_id: DocketId,
    pub title: String,
    pub summary: String,
}

/// Ingestion-layer error for batch parsing and persistence.
#[derive(Debug)]
pub enum IngestError {
    /// The source document is not a JSON array.
    MalformedSource(String),
    /// A record in the array is missing a field or has the wrong shape.
    MalformedRecord { index: usize, message: String },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedSource(message) => {
                write!(f, "malformed ingestion source: {message}")
            }
            Self::MalformedRecord { index, message } => {
                write!(f, "malformed record at index {index}: {message}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for IngestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for IngestError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Two-phase batch ingestion pipeline: content sync, then global
/// re-extraction.
pub struct IngestPipeline<R: DocketRepository> {
    repo: R,
    extractor: Box<dyn KeywordExtractor>,
}

impl<R: DocketRepository> IngestPipeline<R> {
    /// Creates a pipeline over the store with the configured extractor.
    pub fn new(repo: R, extractor: Box<dyn KeywordExtractor>) -> Self {
        Self { repo, extractor }
    }

    /// Ingests a JSON batch file and re-extracts the whole corpus.
    ///
    /// Returns the number of records upserted. An unreadable source is
    /// reported through logging and yields `Ok(0)`.
    pub fn ingest_path(&mut self, path: impl AsRef<Path>) -> Result<usize, IngestError> {
        let path = path.as_ref();
        info!(
            "event=ingest module=ingest status=start source={}",
            path.display()
        );

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                error!(
                    "event=ingest module=ingest status=error error_code=source_unavailable source={} error={err}",
                    path.display()
                );
                return Ok(0);
            }
        };

        let items: Vec<serde_json::Value> = serde_json::from_str(&raw)
            .map_err(|err| IngestError::MalformedSource(err.to_string()))?;

        let count = self.apply_items(&items)?;
        let reextracted = self.reextract_all()?;
        info!(
            "event=ingest module=ingest status=ok source={} records={count} reextracted={reextracted}",
            path.display()
        );
        Ok(count)
    }

    /// Upserts already-decoded records. Keywords are left untouched; no
    /// extraction pass runs.
    pub fn ingest_records(&mut self, records: &[DocketRecord]) -> Result<usize, IngestError> {
        for record in records {
            self.upsert_record(record)?;
        }
        Ok(records.len())
    }

    /// Re-runs the configured extractor over every stored docket and
    /// persists the derived keyword sets.
    ///
    /// Returns the number of dockets re-extracted.
    pub fn reextract_all(&mut self) -> Result<usize, IngestError> {
        let mut dockets = self.repo.list(&DocketListQuery::default())?;
        self.extractor.extract(&mut dockets);

        let total = dockets.len();
        for docket in dockets {
            self.repo
                .update(docket.docket_id, &DocketUpdate::keywords(docket.keywords))?;
        }
        info!("event=extract module=ingest status=ok dockets={total}");
        Ok(total)
    }

    // Records are decoded one at a time so a malformed entry aborts the
    // remainder while prior upserts stay committed.
    fn apply_items(&mut self, items: &[serde_json::Value]) -> Result<usize, IngestError> {
        let mut count = 0;
        for (index, item) in items.iter().enumerate() {
            let record: DocketRecord = serde_json::from_value(item.clone())
                .map_err(|err| IngestError::MalformedRecord {
                    index,
                    message: err.to_string(),
                })?;
            self.upsert_record(&record)?;
            count += 1;
        }
        Ok(count)
    }

    fn upsert_record(&mut self, record: &DocketRecord) -> Result<(), IngestError> {
        match self.repo.get(record.docket_id)? {
            Some(_) => {
                self.repo.update(
                    record.docket_id,
                    &DocketUpdate::content(record.title.as_str(), record.summary.as_str()),
                )?;
            }
            None => {
                let docket =
                    Docket::new(record.docket_id, record.title.as_str(), record.summary.as_str());
                self.repo.create(&docket)?;
            }
        }
        Ok(())
    }
}
