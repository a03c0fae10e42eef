//! Index Table
//!
//! A manually maintained lookup `collection -> field -> value -> id`,
//! persisted as one nested JSON object.
//!
//! The table is not derived from the collection store and is never updated
//! by it. After a document is updated or deleted, entries that pointed at
//! it keep returning the old id until the caller overwrites them.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::key::IndexKey;
use crate::observability::Action;
use crate::storage::{JsonContainer, StoreError, StoreResult};

/// Default file name of the index container inside the data directory
pub const DEFAULT_INDEX_FILE: &str = "index.json";

/// `field -> value key -> document id`
pub type FieldIndex = BTreeMap<String, BTreeMap<String, String>>;

/// `collection -> field -> value key -> document id`
pub type IndexData = BTreeMap<String, FieldIndex>;

/// Value-to-id lookup table, decoupled from the collection store
#[derive(Debug)]
pub struct IndexTable {
    container: JsonContainer,
    lock: Mutex<()>,
}

impl IndexTable {
    /// Opens `<data_dir>/index.json`, creating an empty table if absent.
    pub fn open(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_file(data_dir.as_ref().join(DEFAULT_INDEX_FILE), true)
    }

    /// Opens the table stored at `path`, creating it as `{}` if absent.
    pub fn open_file(path: impl Into<PathBuf>, pretty: bool) -> StoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let table = Self {
            container: JsonContainer::new(path, pretty),
            lock: Mutex::new(()),
        };

        {
            let _guard = table.lock.lock();
            // Validates an existing file as well as creating a missing one.
            if table.container.load::<IndexData>()?.is_none() {
                table.container.save(&IndexData::new())?;
            }
        }

        Ok(table)
    }

    /// Path of the index container
    pub fn path(&self) -> &Path {
        self.container.path()
    }

    /// Records that `value` of `field` in `collection` maps to `id`.
    ///
    /// An existing entry for the same collection, field and value is
    /// replaced: two documents sharing a value cannot both be indexed.
    pub fn add_index(
        &self,
        collection: &str,
        field: &str,
        id: &str,
        value: &Value,
    ) -> StoreResult<()> {
        let key = IndexKey::from_json(value);
        let _guard = self.lock.lock();

        let mut data = self.load()?;
        let previous = data
            .entry(collection.to_string())
            .or_default()
            .entry(field.to_string())
            .or_default()
            .insert(key.as_str().to_string(), id.to_string());
        self.container.save(&data)?;

        if let Some(previous) = previous.filter(|previous| previous != id) {
            warn!(
                action = %Action::Index,
                collection,
                field,
                value = %key,
                previous = previous.as_str(),
                id,
                "Index entry overwritten"
            );
        }
        info!(action = %Action::Index, collection, field, value = %key, id, "Index entry added");
        Ok(())
    }

    /// Returns the id registered for `value`, if any.
    pub fn query_index(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Option<String>> {
        let key = IndexKey::from_json(value);
        let _guard = self.lock.lock();

        let id = self
            .load()?
            .get(collection)
            .and_then(|fields| fields.get(field))
            .and_then(|values| values.get(key.as_str()))
            .cloned();

        match &id {
            Some(id) => debug!(action = %Action::Index, collection, field, value = %key, id = id.as_str(), "Index hit"),
            None => debug!(action = %Action::Index, collection, field, value = %key, "Index miss"),
        }
        Ok(id)
    }

    /// Returns a copy of every entry registered for `collection`.
    pub fn collection_entries(&self, collection: &str) -> StoreResult<FieldIndex> {
        let _guard = self.lock.lock();
        Ok(self.load()?.remove(collection).unwrap_or_default())
    }

    /// A table file removed behind our back reads as empty and is
    /// recreated by the next write.
    fn load(&self) -> StoreResult<IndexData> {
        match self.container.load()? {
            Some(data) => Ok(data),
            None => {
                warn!(
                    action = %Action::Error,
                    path = %self.container.path().display(),
                    "Index file missing, treating as empty"
                );
                Ok(IndexData::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn open_table() -> (TempDir, IndexTable) {
        let dir = TempDir::new().unwrap();
        let table = IndexTable::open(dir.path()).unwrap();
        (dir, table)
    }

    #[test]
    fn test_open_creates_empty_object() {
        let (dir, _table) = open_table();
        let text = fs::read_to_string(dir.path().join(DEFAULT_INDEX_FILE)).unwrap();
        assert_eq!(text.trim(), "{}");
    }

    #[test]
    fn test_add_then_query() {
        let (_dir, table) = open_table();
        table.add_index("cars", "hp", "1", &json!(100)).unwrap();

        assert_eq!(
            table.query_index("cars", "hp", &json!(100)).unwrap(),
            Some("1".to_string())
        );
    }

    #[test]
    fn test_unknown_combinations_are_none() {
        let (_dir, table) = open_table();
        table.add_index("cars", "hp", "1", &json!(100)).unwrap();

        assert!(table.query_index("boats", "hp", &json!(100)).unwrap().is_none());
        assert!(table.query_index("cars", "color", &json!(100)).unwrap().is_none());
        assert!(table.query_index("cars", "hp", &json!(101)).unwrap().is_none());
    }

    #[test]
    fn test_same_value_last_write_wins() {
        let (_dir, table) = open_table();
        table.add_index("cars", "hp", "1", &json!(100)).unwrap();
        table.add_index("cars", "hp", "2", &json!(100)).unwrap();

        assert_eq!(
            table.query_index("cars", "hp", &json!(100)).unwrap(),
            Some("2".to_string())
        );
    }

    #[test]
    fn test_persisted_shape_is_nested_object() {
        let (dir, table) = open_table();
        table.add_index("cars", "hp", "1", &json!(100)).unwrap();
        table.add_index("cars", "brand", "1", &json!("Citroën")).unwrap();

        let text = fs::read_to_string(dir.path().join(DEFAULT_INDEX_FILE)).unwrap();
        let on_disk: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            on_disk,
            json!({"cars": {"brand": {"Citroën": "1"}, "hp": {"100": "1"}}})
        );
    }

    #[test]
    fn test_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let table = IndexTable::open(dir.path()).unwrap();
            table.add_index("cars", "hp", "1", &json!(100)).unwrap();
        }
        let table = IndexTable::open(dir.path()).unwrap();
        assert_eq!(
            table.query_index("cars", "hp", &json!(100)).unwrap(),
            Some("1".to_string())
        );
    }

    #[test]
    fn test_corrupt_index_fails_open() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DEFAULT_INDEX_FILE), r#"{"cars": []}"#).unwrap();

        let err = IndexTable::open(dir.path()).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_deleted_file_reads_empty_and_is_recreated() {
        let (dir, table) = open_table();
        table.add_index("cars", "hp", "1", &json!(100)).unwrap();
        fs::remove_file(dir.path().join(DEFAULT_INDEX_FILE)).unwrap();

        assert!(table.query_index("cars", "hp", &json!(100)).unwrap().is_none());
        table.add_index("cars", "hp", "2", &json!(50)).unwrap();
        assert!(dir.path().join(DEFAULT_INDEX_FILE).exists());
    }

    #[test]
    fn test_collection_entries() {
        let (_dir, table) = open_table();
        table.add_index("cars", "hp", "1", &json!(100)).unwrap();
        table.add_index("cars", "hp", "2", &json!(50)).unwrap();
        table.add_index("boats", "hp", "3", &json!(50)).unwrap();

        let entries = table.collection_entries("cars").unwrap();
        assert_eq!(entries["hp"].len(), 2);
        assert!(table.collection_entries("planes").unwrap().is_empty());
    }
}
