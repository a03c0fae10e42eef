//! API Handler for docstore
//!
//! Turns requests into core calls and core results into responses:
//!
//! - not-found core results become 404
//! - missing input becomes 400
//! - storage failures become 500 and are logged
//!
//! The handler holds no lock of its own; the store serialises work per
//! collection and the index table serialises its own file.

use std::sync::Arc;

use http::StatusCode;
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::database::Database;
use crate::document::Document;
use crate::index::{IndexKey, IndexTable};
use crate::observability::Action;
use crate::query::QueryFilter;
use crate::storage::{CollectionStore, Mutation};

use super::errors::{ApiError, ApiResult};
use super::request::{
    AddIndexRequest, CollectionRequest, CreateRequest, DocumentRequest, QueryIndexRequest,
    Request, UpdateRequest, WhereRequest,
};
use super::response::Response;

/// Dispatches requests to the store, index table and query filter
#[derive(Debug, Clone)]
pub struct ApiHandler {
    store: Arc<CollectionStore>,
    index: Arc<IndexTable>,
    query: QueryFilter,
}

impl ApiHandler {
    pub fn new(database: &Database) -> Self {
        Self {
            store: Arc::clone(database.store()),
            index: Arc::clone(database.index()),
            query: database.query().clone(),
        }
    }

    /// Handle a raw JSON request string
    pub fn handle_json(&self, json_request: &str) -> Response {
        match Request::parse(json_request) {
            Ok(request) => self.handle(request),
            Err(e) => self.fail("parse", e),
        }
    }

    /// Handle a request envelope that is already decoded
    pub fn handle_value(&self, envelope: Value) -> Response {
        match Request::from_value(envelope) {
            Ok(request) => self.handle(request),
            Err(e) => self.fail("parse", e),
        }
    }

    /// Handle a parsed request
    pub fn handle(&self, request: Request) -> Response {
        let op = request.op();
        let result = match request {
            Request::Create(r) => self.handle_create(r),
            Request::Read(r) => self.handle_read(r),
            Request::ReadAll(r) => self.handle_read_all(r),
            Request::Update(r) => self.handle_update(r),
            Request::Delete(r) => self.handle_delete(r),
            Request::AddIndex(r) => self.handle_add_index(r),
            Request::QueryIndex(r) => self.handle_query_index(r),
            Request::Where(r) => self.handle_where(r),
        };

        match result {
            Ok(response) => response,
            Err(e) => self.fail(op, e),
        }
    }

    fn fail(&self, op: &str, err: ApiError) -> Response {
        if err.is_server_error() {
            error!(action = %Action::Error, op, code = err.code(), error = %err, "Request failed");
        } else {
            debug!(action = %Action::Error, op, code = err.code(), error = %err, "Request rejected");
        }
        Response::error(&err)
    }

    fn handle_create(&self, req: CreateRequest) -> ApiResult<Response> {
        self.store.add_document(&req.collection, &req.id, req.data)?;
        Ok(Response::created(json!({
            "message": "Successfully added",
            "id": req.id,
        })))
    }

    fn handle_read(&self, req: DocumentRequest) -> ApiResult<Response> {
        self.store
            .get_document(&req.collection, &req.id)?
            .map(|doc| Response::ok(doc.into_value()))
            .ok_or_else(|| ApiError::document_not_found(&req.collection, &req.id))
    }

    /// An empty collection is reported the same as a missing one.
    fn handle_read_all(&self, req: CollectionRequest) -> ApiResult<Response> {
        let documents = self.store.get_collection(&req.collection)?;
        if documents.is_empty() {
            return Err(ApiError::collection_empty(&req.collection));
        }
        Ok(Response::ok(to_array(documents)))
    }

    fn handle_update(&self, req: UpdateRequest) -> ApiResult<Response> {
        match self.store.update_document(&req.collection, &req.id, req.data)? {
            Mutation::Applied => Ok(Response::message(
                StatusCode::OK,
                "Document successfully updated",
            )),
            Mutation::NotFound => Err(ApiError::document_not_found(&req.collection, &req.id)),
        }
    }

    fn handle_delete(&self, req: DocumentRequest) -> ApiResult<Response> {
        match self.store.delete_document(&req.collection, &req.id)? {
            Mutation::Applied => Ok(Response::message(
                StatusCode::OK,
                "Document successfully deleted",
            )),
            Mutation::NotFound => Err(ApiError::document_not_found(&req.collection, &req.id)),
        }
    }

    fn handle_add_index(&self, req: AddIndexRequest) -> ApiResult<Response> {
        self.index
            .add_index(&req.collection, &req.field, &req.id, &req.value)?;
        Ok(Response::message(StatusCode::CREATED, "Index entry added"))
    }

    fn handle_query_index(&self, req: QueryIndexRequest) -> ApiResult<Response> {
        match self
            .index
            .query_index(&req.collection, &req.field, &req.value)?
        {
            Some(id) => Ok(Response::ok(json!({ "id": id }))),
            None => Err(ApiError::index_miss(
                &req.collection,
                &req.field,
                IndexKey::from_json(&req.value).as_str(),
            )),
        }
    }

    fn handle_where(&self, req: WhereRequest) -> ApiResult<Response> {
        let documents =
            self.query
                .filter(&req.collection, &req.field, &req.operator, &req.value)?;
        Ok(Response::ok(to_array(documents)))
    }
}

fn to_array(documents: Vec<Document>) -> Value {
    Value::Array(documents.into_iter().map(Document::into_value).collect())
}
