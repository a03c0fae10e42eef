//! Index keys
//!
//! The index container is a JSON object, so every indexed value is stored
//! under a string key. Values that print the same share a slot: the number
//! `100` and the string `"100"` map to the same key.

use std::fmt;

use serde_json::{Number, Value};

/// Largest integer an f64 holds exactly
const MAX_EXACT_F64_INT: f64 = 9_007_199_254_740_992.0;

/// String form of an indexed field value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexKey(String);

impl IndexKey {
    /// Create a key from a JSON value
    ///
    /// - strings key as themselves
    /// - numbers key as their shortest decimal form (`100.0` keys as `100`)
    /// - booleans and null key as `true`, `false`, `null`
    /// - arrays and objects key as their compact JSON text
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => IndexKey(s.clone()),
            Value::Number(n) => IndexKey(number_key(n)),
            Value::Bool(b) => IndexKey(b.to_string()),
            Value::Null => IndexKey("null".to_string()),
            Value::Array(_) | Value::Object(_) => IndexKey(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&Value> for IndexKey {
    fn from(value: &Value) -> Self {
        IndexKey::from_json(value)
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn number_key(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_F64_INT => (f as i64).to_string(),
        _ => n.to_string(),
    }
}
