//! Single-field predicates
//!
//! Comparison rules:
//! - numbers compare numerically (`50` equals `50.0`)
//! - strings compare lexicographically by byte
//! - `>` and `<` are false for any other pairing, including mixed types,
//!   booleans, null, arrays and objects
//! - `==` is structural equality for non-numbers; mixed types are unequal
//! - a missing field never matches

use std::cmp::Ordering;

use serde_json::{Number, Value};

use super::operator::Operator;
use crate::document::Document;

/// `document[field] <op> value`
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: String,
    pub op: Operator,
    pub value: Value,
}

impl Predicate {
    pub fn new(field: impl Into<String>, op: Operator, value: Value) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    pub fn gt(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, Operator::GreaterThan, value)
    }

    pub fn lt(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, Operator::LessThan, value)
    }

    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, Operator::Equal, value)
    }

    /// Checks the predicate against one document
    pub fn matches(&self, document: &Document) -> bool {
        let Some(actual) = document.get(&self.field) else {
            return false;
        };

        match self.op {
            Operator::GreaterThan => compare(actual, &self.value) == Some(Ordering::Greater),
            Operator::LessThan => compare(actual, &self.value) == Some(Ordering::Less),
            Operator::Equal => equals(actual, &self.value),
        }
    }
}

/// Ordering between two values, or `None` when they are not comparable
fn compare(actual: &Value, bound: &Value) -> Option<Ordering> {
    match (actual, bound) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn compare_numbers(a: &Number, b: &Number) -> Option<Ordering> {
    if let (Some(ai), Some(bi)) = (a.as_i64(), b.as_i64()) {
        return Some(ai.cmp(&bi));
    }
    if let (Some(au), Some(bu)) = (a.as_u64(), b.as_u64()) {
        return Some(au.cmp(&bu));
    }
    a.as_f64()?.partial_cmp(&b.as_f64()?)
}

fn equals(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b) == Some(Ordering::Equal),
        _ => actual == expected,
    }
}
