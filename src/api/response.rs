//! API response types
//!
//! A response is a status code and a JSON body. Errors carry
//! `{"error": message}`; acknowledgements carry `{"message": ...}`.

use http::StatusCode;
use serde_json::{json, Value};

use super::errors::ApiError;

/// Transport-neutral response
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: StatusCode,
    pub body: Value,
}

impl Response {
    /// 200 with a body
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    /// 201 with a body
    pub fn created(body: Value) -> Self {
        Self {
            status: StatusCode::CREATED,
            body,
        }
    }

    /// `{"message": ...}` with the given status
    pub fn message(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: json!({ "message": message }),
        }
    }

    /// Create an error response
    pub fn error(err: &ApiError) -> Self {
        Self {
            status: err.status_code(),
            body: json!({ "error": err.to_string() }),
        }
    }

    /// Check if this is a success response
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// One-line JSON: `{"status": <code>, "body": ...}`
    pub fn to_json(&self) -> String {
        json!({ "status": self.status.as_u16(), "body": self.body }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_response() {
        let resp = Response::created(json!({"message": "Successfully added", "id": "1"}));
        assert!(resp.is_success());
        let json = resp.to_json();
        assert!(json.contains("\"status\":201"));
        assert!(json.contains("Successfully added"));
    }

    #[test]
    fn test_error_response() {
        let resp = Response::error(&ApiError::document_not_found("cars", "1"));
        assert!(!resp.is_success());
        assert_eq!(resp.status, StatusCode::NOT_FOUND);
        assert_eq!(
            resp.body,
            json!({"error": "Document with ID 1 not found in collection cars"})
        );
    }
}
