//! Opens the three core components over one data directory
//!
//! The collection store is created once and shared: the query filter reads
//! through the same instance, so it takes the same per-collection locks.

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::index::IndexTable;
use crate::query::QueryFilter;
use crate::storage::{CollectionStore, StoreResult};

/// Store, index table and query filter wired to one data directory
#[derive(Debug, Clone)]
pub struct Database {
    store: Arc<CollectionStore>,
    index: Arc<IndexTable>,
    query: QueryFilter,
}

impl Database {
    /// Opens (and creates if needed) the data directory and index file
    pub fn open(config: &Config) -> StoreResult<Self> {
        let store = CollectionStore::open(&config.data_dir)?
            .with_pretty(config.pretty)
            .with_reserved_name(config.index_stem());
        let store = Arc::new(store);
        let index = Arc::new(IndexTable::open_file(config.index_path(), config.pretty)?);
        let query = QueryFilter::new(Arc::clone(&store));

        info!(
            data_dir = %config.data_dir.display(),
            index = %index.path().display(),
            "Database opened"
        );

        Ok(Self { store, index, query })
    }

    pub fn store(&self) -> &Arc<CollectionStore> {
        &self.store
    }

    pub fn index(&self) -> &Arc<IndexTable> {
        &self.index
    }

    pub fn query(&self) -> &QueryFilter {
        &self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_layout() {
        let dir = TempDir::new().unwrap();
        let config = Config::with_data_dir(dir.path().join("data"));
        let db = Database::open(&config).unwrap();

        assert!(dir.path().join("data").is_dir());
        assert!(dir.path().join("data/index.json").is_file());
        assert_eq!(db.store().data_dir(), dir.path().join("data").as_path());
    }

    #[test]
    fn test_index_stem_is_not_a_collection() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(&Config::with_data_dir(dir.path())).unwrap();

        let err = db.store().add_document("index", "1", Map::new()).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_query_reads_shared_store() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(&Config::with_data_dir(dir.path())).unwrap();

        let mut data = Map::new();
        data.insert("hp".to_string(), json!(100));
        db.store().add_document("cars", "1", data).unwrap();

        let found = db.query().filter("cars", "hp", "==", &json!(100)).unwrap();
        assert_eq!(found.len(), 1);
    }
}
