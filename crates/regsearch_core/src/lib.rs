//! Core domain logic for the regulation docket search backend.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod extract;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use extract::{
    build_extractor, parse_extractor_kind, ExtractorKind, ExtractorKindError, KeywordExtractor,
    LexicalExtractor, LinguisticExtractor,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::docket::{Docket, DocketId};
pub use repo::docket_repo::{
    DocketListQuery, DocketRepository, DocketUpdate, RepoError, RepoResult,
    SqliteDocketRepository,
};
pub use search::keyword::search_dockets;
pub use service::docket_service::{DocketService, DocketServiceError};
pub use service::ingest_service::{DocketRecord, IngestError, IngestPipeline};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
