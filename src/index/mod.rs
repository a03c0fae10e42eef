//! Index Table subsystem for docstore
//!
//! A persisted, caller-maintained map from (collection, field, value) to a
//! document id.
//!
//! # Design Principles
//!
//! - Explicit: entries exist only because `add_index` wrote them
//! - Decoupled: the collection store never reads or repairs the table
//! - One entry per value: a later `add_index` for the same value replaces
//!   the earlier id
//!
//! # Staleness
//!
//! Deleting or updating a document leaves its entries in place. A lookup
//! may return an id that no longer exists, or whose document no longer
//! holds the indexed value. Callers that need consistency must re-index
//! after every mutation.

mod key;
mod table;

pub use key::IndexKey;
pub use table::{FieldIndex, IndexData, IndexTable, DEFAULT_INDEX_FILE};
