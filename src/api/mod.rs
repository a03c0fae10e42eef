//! API Layer for docstore
//!
//! A transport-neutral adapter over the core. It validates input, calls the
//! store, index table or query filter, and maps the outcome to a status
//! code and JSON body. An HTTP server, a CLI or a test can drive it the
//! same way.
//!
//! # Status Mapping
//!
//! - create: 201, or 400 when `id` or `data` is missing
//! - read / read_all: 200, or 404 when nothing is found
//! - update / delete: 200, or 404 when the collection or id is absent
//! - storage failure: 500

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiResult, MISSING_DATA, MISSING_ID_OR_DATA};
pub use handler::ApiHandler;
pub use request::{
    AddIndexRequest, CollectionRequest, CreateRequest, DocumentRequest, QueryIndexRequest,
    Request, UpdateRequest, WhereRequest,
};
pub use response::Response;
