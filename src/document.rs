//! Document type for docstore
//!
//! A document is a JSON object that always carries a string `id` field.
//! Field values may be any JSON value; there is no schema.
//!
//! Field order is kept as inserted: `id` first, then the caller's fields.
//! Updates overwrite in place and keep the original position of each key.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Name of the identifier field every document carries.
pub const ID_FIELD: &str = "id";

/// Reasons a JSON value cannot be read as a document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The value was not a JSON object
    #[error("document must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// The object had no `id` field
    #[error("document is missing the 'id' field")]
    MissingId,

    /// The `id` field was present but not a string
    #[error("document 'id' must be a string, found {0}")]
    NonStringId(&'static str),
}

/// A stored document.
///
/// The `id` field is fixed at construction and cannot be changed through
/// [`Document::merge`].
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    /// Builds `{id, ...data}`.
    ///
    /// An `id` key inside `data` is dropped; the explicit `id` wins.
    pub fn new(id: impl Into<String>, data: Map<String, Value>) -> Self {
        let mut fields = Map::with_capacity(data.len() + 1);
        fields.insert(ID_FIELD.to_string(), Value::String(id.into()));
        for (key, value) in data {
            if key != ID_FIELD {
                fields.insert(key, value);
            }
        }
        Self { fields }
    }

    /// The document identifier
    pub fn id(&self) -> &str {
        self.fields
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Returns a field value, `id` included
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// All fields in stored order
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Number of fields, `id` included
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false: a document holds at least its `id`
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Shallow merge: every field of `updates` overwrites the stored one,
    /// fields absent from `updates` are kept. `id` is never replaced.
    pub fn merge(&mut self, updates: Map<String, Value>) {
        for (key, value) in updates {
            if key != ID_FIELD {
                self.fields.insert(key, value);
            }
        }
    }

    /// Converts into a plain JSON object
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl TryFrom<Value> for Document {
    type Error = DocumentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let fields = match value {
            Value::Object(fields) => fields,
            other => return Err(DocumentError::NotAnObject(kind_of(&other))),
        };

        match fields.get(ID_FIELD) {
            Some(Value::String(_)) => Ok(Self { fields }),
            Some(other) => Err(DocumentError::NonStringId(kind_of(other))),
            None => Err(DocumentError::MissingId),
        }
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        doc.into_value()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Document::try_from(value).map_err(de::Error::custom)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.fields).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// JSON type name used in error messages
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
