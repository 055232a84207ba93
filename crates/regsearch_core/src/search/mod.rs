//! Keyword search entry points.
//!
//! # Responsibility
//! - Expose substring query APIs over the store's keyword index.
//! - Keep search result shaping inside core.

pub mod keyword;
