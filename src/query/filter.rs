//! Query Filter
//!
//! Loads a whole collection and keeps the documents that satisfy one
//! predicate, in their stored order.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use super::operator::Operator;
use super::predicate::Predicate;
use crate::document::Document;
use crate::observability::Action;
use crate::storage::{CollectionStore, StoreResult};

/// Predicate evaluation over one collection
#[derive(Debug, Clone)]
pub struct QueryFilter {
    store: Arc<CollectionStore>,
}

impl QueryFilter {
    pub fn new(store: Arc<CollectionStore>) -> Self {
        Self { store }
    }

    /// Returns the documents of `collection` where `field <operator> value`.
    ///
    /// An unsupported operator matches nothing and is not an error. The
    /// collection is still read, so a broken container is reported either
    /// way.
    pub fn filter(
        &self,
        collection: &str,
        field: &str,
        operator: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>> {
        let documents = self.store.get_collection(collection)?;

        let Some(op) = Operator::parse(operator) else {
            warn!(
                action = %Action::Query,
                collection,
                field,
                operator,
                "Unsupported operator, no documents match"
            );
            return Ok(Vec::new());
        };

        Ok(Self::retain(collection, documents, &Predicate::new(field, op, value.clone())))
    }

    /// Typed form of [`filter`](Self::filter)
    pub fn apply(&self, collection: &str, predicate: &Predicate) -> StoreResult<Vec<Document>> {
        let documents = self.store.get_collection(collection)?;
        Ok(Self::retain(collection, documents, predicate))
    }

    fn retain(collection: &str, documents: Vec<Document>, predicate: &Predicate) -> Vec<Document> {
        let scanned = documents.len();
        let matched: Vec<Document> = documents
            .into_iter()
            .filter(|doc| predicate.matches(doc))
            .collect();

        info!(
            action = %Action::Query,
            collection,
            field = predicate.field.as_str(),
            operator = %predicate.op,
            scanned,
            matched = matched.len(),
            "Filter evaluated"
        );
        matched
    }
}
