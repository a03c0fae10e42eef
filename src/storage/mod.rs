//! Document storage subsystem for docstore
//!
//! The collection store holds the canonical persistent state of all
//! documents: one JSON array file per collection.
//!
//! # Design Principles
//!
//! - Whole-container reads and writes (no partial or append updates)
//! - Read, mutate in memory, write back, under a per-collection lock
//! - Collections are created lazily by the first add
//! - Not-found is a value; I/O failure and malformed content are errors
//! - No transactions across documents or collections

mod collection;
mod container;
mod errors;
mod locks;

pub use collection::{CollectionStore, Mutation, COLLECTION_EXTENSION};
pub use container::JsonContainer;
pub use errors::{Severity, StoreError, StoreResult};
pub use locks::CollectionLocks;
