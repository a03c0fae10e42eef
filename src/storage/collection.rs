//! Collection Store
//!
//! One JSON array file per collection under the data directory. Every
//! operation reads the whole file, works on it in memory and, if it
//! mutated anything, writes the whole file back.
//!
//! # Semantics
//!
//! - Insertion order is the only order; updates do not move documents
//! - Ids are not checked for uniqueness: a repeated id is appended as a
//!   second entry, and every id lookup acts on the first match
//! - Only `add_document` creates a collection; the file is never removed,
//!   even after its last document is deleted
//! - Missing collections and ids are reported as values, never as errors

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{info, warn};

use super::container::JsonContainer;
use super::errors::{StoreError, StoreResult};
use super::locks::CollectionLocks;
use crate::document::Document;
use crate::observability::Action;

/// File extension of collection containers
pub const COLLECTION_EXTENSION: &str = "json";

/// Outcome of an update or delete
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// The first document with the id was changed
    Applied,
    /// The collection or the id does not exist
    NotFound,
}

impl Mutation {
    pub fn is_applied(self) -> bool {
        self == Mutation::Applied
    }
}

/// Named collections of documents persisted as whole files
#[derive(Debug)]
pub struct CollectionStore {
    data_dir: PathBuf,
    pretty: bool,
    reserved: Vec<String>,
    locks: CollectionLocks,
}

impl CollectionStore {
    /// Opens a store rooted at `data_dir`, creating the directory if needed.
    ///
    /// Containers are pretty-printed by default.
    pub fn open(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).map_err(|e| StoreError::io(&data_dir, e))?;

        Ok(Self {
            data_dir,
            pretty: true,
            reserved: Vec::new(),
            locks: CollectionLocks::new(),
        })
    }

    /// Chooses pretty (two-space) or compact container output
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Forbids a collection name, e.g. the stem of a file that shares the
    /// data directory.
    pub fn with_reserved_name(mut self, name: impl Into<String>) -> Self {
        self.reserved.push(name.into());
        self
    }

    /// Root directory of all containers
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the container backing `collection`
    pub fn collection_path(&self, collection: &str) -> StoreResult<PathBuf> {
        self.validate_name(collection)?;
        Ok(self
            .data_dir
            .join(format!("{}.{}", collection, COLLECTION_EXTENSION)))
    }

    /// Whether `collection` has been created.
    ///
    /// An existing collection may hold no documents.
    pub fn collection_exists(&self, collection: &str) -> StoreResult<bool> {
        let container = self.container(collection)?;
        let lock = self.locks.lock_for(collection);
        let _guard = lock.lock();

        Ok(self.load(&container)?.is_some())
    }

    /// Appends `{id, ...data}` to `collection`, creating it if absent.
    ///
    /// No uniqueness check is made against existing ids.
    pub fn add_document(
        &self,
        collection: &str,
        id: &str,
        data: Map<String, Value>,
    ) -> StoreResult<()> {
        let container = self.container(collection)?;
        let lock = self.locks.lock_for(collection);
        let _guard = lock.lock();

        let mut documents = self.load_or_create(&container, collection)?;
        documents.push(Document::new(id, data));
        container.save(&documents)?;

        info!(
            action = %Action::Add,
            collection,
            id,
            "Document added to the collection"
        );
        Ok(())
    }

    /// Returns the first document whose id matches, in insertion order.
    pub fn get_document(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let container = self.container(collection)?;
        let lock = self.locks.lock_for(collection);
        let _guard = lock.lock();

        let Some(documents) = self.load_existing(&container, collection)? else {
            return Ok(None);
        };

        match documents.into_iter().find(|doc| doc.id() == id) {
            Some(doc) => {
                info!(action = %Action::Retrieval, collection, id, "Document found");
                Ok(Some(doc))
            }
            None => {
                warn!(action = %Action::Error, collection, id, "Document not found");
                Ok(None)
            }
        }
    }

    /// Merges `updates` into the first document whose id matches.
    ///
    /// Fields in `updates` overwrite, all others are kept, and the document
    /// keeps its position.
    pub fn update_document(
        &self,
        collection: &str,
        id: &str,
        updates: Map<String, Value>,
    ) -> StoreResult<Mutation> {
        let container = self.container(collection)?;
        let lock = self.locks.lock_for(collection);
        let _guard = lock.lock();

        let Some(mut documents) = self.load_existing(&container, collection)? else {
            return Ok(Mutation::NotFound);
        };

        let Some(doc) = documents.iter_mut().find(|doc| doc.id() == id) else {
            warn!(action = %Action::Error, collection, id, "Document not found");
            return Ok(Mutation::NotFound);
        };

        doc.merge(updates);
        container.save(&documents)?;

        info!(action = %Action::Update, collection, id, "Document updated");
        Ok(Mutation::Applied)
    }

    /// Physically removes the first document whose id matches.
    pub fn delete_document(&self, collection: &str, id: &str) -> StoreResult<Mutation> {
        let container = self.container(collection)?;
        let lock = self.locks.lock_for(collection);
        let _guard = lock.lock();

        let Some(mut documents) = self.load_existing(&container, collection)? else {
            return Ok(Mutation::NotFound);
        };

        let Some(position) = documents.iter().position(|doc| doc.id() == id) else {
            warn!(action = %Action::Error, collection, id, "Document not found");
            return Ok(Mutation::NotFound);
        };

        documents.remove(position);
        container.save(&documents)?;

        info!(action = %Action::Delete, collection, id, "Document deleted");
        Ok(Mutation::Applied)
    }

    /// Returns every document in insertion order.
    ///
    /// A missing collection yields an empty vector, the same as an existing
    /// empty one. Use [`collection_exists`](Self::collection_exists) to tell
    /// them apart.
    pub fn get_collection(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let container = self.container(collection)?;
        let lock = self.locks.lock_for(collection);
        let _guard = lock.lock();

        let Some(documents) = self.load_existing(&container, collection)? else {
            return Ok(Vec::new());
        };

        info!(
            action = %Action::Retrieval,
            collection,
            count = documents.len(),
            "All documents retrieved"
        );
        Ok(documents)
    }

    fn container(&self, collection: &str) -> StoreResult<JsonContainer> {
        Ok(JsonContainer::new(
            self.collection_path(collection)?,
            self.pretty,
        ))
    }

    fn load(&self, container: &JsonContainer) -> StoreResult<Option<Vec<Document>>> {
        container.load()
    }

    /// Loads a collection that must already exist; logs when it does not.
    fn load_existing(
        &self,
        container: &JsonContainer,
        collection: &str,
    ) -> StoreResult<Option<Vec<Document>>> {
        let documents = self.load(container)?;
        if documents.is_none() {
            warn!(action = %Action::Error, collection, "Collection not found");
        }
        Ok(documents)
    }

    /// The only path that brings a collection into existence.
    fn load_or_create(
        &self,
        container: &JsonContainer,
        collection: &str,
    ) -> StoreResult<Vec<Document>> {
        match self.load(container)? {
            Some(documents) => Ok(documents),
            None => {
                info!(action = %Action::Creation, collection, "Collection created");
                Ok(Vec::new())
            }
        }
    }

    fn validate_name(&self, name: &str) -> StoreResult<()> {
        if name.is_empty() {
            return Err(StoreError::invalid_name(name, "name is empty"));
        }
        if name.starts_with('.') {
            return Err(StoreError::invalid_name(name, "name starts with a dot"));
        }
        if name.contains(['/', '\\']) {
            return Err(StoreError::invalid_name(name, "name contains a path separator"));
        }
        if name.contains('\0') {
            return Err(StoreError::invalid_name(name, "name contains a NUL byte"));
        }
        if self.reserved.iter().any(|reserved| reserved == name) {
            return Err(StoreError::invalid_name(name, "name is reserved"));
        }
        Ok(())
    }
}
