//! API error types
//!
//! Validation failures are detected here, not in the core. Store errors
//! pass through unchanged and keep their own codes.

use http::StatusCode;
use thiserror::Error;

use crate::storage::StoreError;

/// Body message when a create request lacks `id` or `data`
pub const MISSING_ID_OR_DATA: &str = "Missing 'id' or 'data' in request body";

/// Body message when an update request lacks `data`
pub const MISSING_DATA: &str = "Missing 'data' in request body";

/// Errors surfaced to the transport
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input
    #[error("{0}")]
    InvalidRequest(String),

    /// The `op` tag names no known operation
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// The referenced collection, document or index entry does not exist
    #[error("{0}")]
    NotFound(String),

    /// Storage failure, passed through
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        ApiError::InvalidRequest(reason.into())
    }

    pub fn document_not_found(collection: &str, id: &str) -> Self {
        ApiError::NotFound(format!(
            "Document with ID {} not found in collection {}",
            id, collection
        ))
    }

    pub fn collection_empty(collection: &str) -> Self {
        ApiError::NotFound(format!("No documents found in collection {}", collection))
    }

    pub fn index_miss(collection: &str, field: &str, value: &str) -> Self {
        ApiError::NotFound(format!(
            "No index entry for {}={} in collection {}",
            field, value, collection
        ))
    }

    /// Transport status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownOperation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the string error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "DOCSTORE_INVALID_REQUEST",
            ApiError::UnknownOperation(_) => "DOCSTORE_UNKNOWN_OPERATION",
            ApiError::NotFound(_) => "DOCSTORE_NOT_FOUND",
            ApiError::Store(e) => e.code(),
        }
    }

    /// Server-side failures, as opposed to caller mistakes
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
