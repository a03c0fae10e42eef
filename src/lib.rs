//! docstore - a minimal JSON document store
//!
//! Collections are whole JSON files in a data directory. A separate index
//! table maps field values to document ids and is maintained only by
//! explicit calls. A query filter scans one collection for a single
//! field comparison.

pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod document;
pub mod index;
pub mod observability;
pub mod query;
pub mod storage;

pub use config::Config;
pub use database::Database;
pub use document::Document;
pub use index::IndexTable;
pub use query::{Operator, Predicate, QueryFilter};
pub use storage::{CollectionStore, Mutation, StoreError, StoreResult};
