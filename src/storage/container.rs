//! Whole-file JSON containers
//!
//! Every collection and the index table persist as one UTF-8 JSON file.
//! A read loads the entire file; a write replaces the entire file.
//!
//! Writes go to `<file>.tmp` first and are renamed over the target, so a
//! reader never sees a half-written container.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::{StoreError, StoreResult};

/// A JSON file that is always read and written whole
#[derive(Debug, Clone)]
pub struct JsonContainer {
    path: PathBuf,
    pretty: bool,
}

impl JsonContainer {
    /// Creates a handle; nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            path: path.into(),
            pretty,
        }
    }

    /// Path of the container file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and decodes the container.
    ///
    /// Returns `Ok(None)` when the file does not exist. Any other read
    /// failure, invalid UTF-8 or a JSON shape that does not decode as `T`
    /// is an error.
    pub fn load<T: DeserializeOwned>(&self) -> StoreResult<Option<T>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::corrupted(&self.path, e))
    }

    /// Encodes `value` and replaces the container with it.
    pub fn save<T: Serialize + ?Sized>(&self, value: &T) -> StoreResult<()> {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        }
        .map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, &encoded).map_err(|e| StoreError::io(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}
