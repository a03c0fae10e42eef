//! API request types
//!
//! A request is a JSON object with an `op` tag:
//!
//! | op            | fields                                   |
//! |---------------|------------------------------------------|
//! | `create`      | `collection`, `id`, `data`               |
//! | `read`        | `collection`, `id`                       |
//! | `read_all`    | `collection`                             |
//! | `update`      | `collection`, `id`, `data`               |
//! | `delete`      | `collection`, `id`                       |
//! | `add_index`   | `collection`, `field`, `id`, `value`     |
//! | `query_index` | `collection`, `field`, `value`           |
//! | `where`       | `collection`, `field`, `operator`, `value` |
//!
//! `value` may be any JSON value, `null` included; only its absence is an
//! error.

use serde_json::{Map, Value};

use super::errors::{ApiError, ApiResult, MISSING_DATA, MISSING_ID_OR_DATA};

/// Create request
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRequest {
    pub collection: String,
    pub id: String,
    pub data: Map<String, Value>,
}

/// Read or delete of a single document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRequest {
    pub collection: String,
    pub id: String,
}

/// Read of a whole collection
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionRequest {
    pub collection: String,
}

/// Update request
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub collection: String,
    pub id: String,
    pub data: Map<String, Value>,
}

/// Index registration
#[derive(Debug, Clone, PartialEq)]
pub struct AddIndexRequest {
    pub collection: String,
    pub field: String,
    pub id: String,
    pub value: Value,
}

/// Index lookup
#[derive(Debug, Clone, PartialEq)]
pub struct QueryIndexRequest {
    pub collection: String,
    pub field: String,
    pub value: Value,
}

/// Single-field filter
#[derive(Debug, Clone, PartialEq)]
pub struct WhereRequest {
    pub collection: String,
    pub field: String,
    pub operator: String,
    pub value: Value,
}

/// Unified request envelope
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Create(CreateRequest),
    Read(DocumentRequest),
    ReadAll(CollectionRequest),
    Update(UpdateRequest),
    Delete(DocumentRequest),
    AddIndex(AddIndexRequest),
    QueryIndex(QueryIndexRequest),
    Where(WhereRequest),
}

impl Request {
    /// Parse a request from a JSON string
    pub fn parse(json: &str) -> ApiResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| ApiError::invalid_request(format!("Invalid JSON: {}", e)))?;
        Self::from_value(value)
    }

    /// Parse a request from an already decoded JSON value
    pub fn from_value(value: Value) -> ApiResult<Self> {
        let Value::Object(mut raw) = value else {
            return Err(ApiError::invalid_request("Request must be a JSON object"));
        };

        let op = take_string(&mut raw, "op")
            .ok_or_else(|| ApiError::invalid_request("Missing 'op'"))?;
        let collection = take_string(&mut raw, "collection")
            .ok_or_else(|| ApiError::invalid_request("Missing 'collection'"))?;

        match op.as_str() {
            "create" => {
                let id = take_id(&mut raw);
                let data = take_object(&mut raw, "data");
                match (id, data) {
                    (Some(id), Some(data)) => Ok(Request::Create(CreateRequest {
                        collection,
                        id,
                        data,
                    })),
                    _ => Err(ApiError::invalid_request(MISSING_ID_OR_DATA)),
                }
            }
            "read" => Ok(Request::Read(DocumentRequest {
                collection,
                id: require_id(&mut raw)?,
            })),
            "read_all" => Ok(Request::ReadAll(CollectionRequest { collection })),
            "update" => {
                let id = require_id(&mut raw)?;
                let data = take_object(&mut raw, "data")
                    .ok_or_else(|| ApiError::invalid_request(MISSING_DATA))?;
                Ok(Request::Update(UpdateRequest {
                    collection,
                    id,
                    data,
                }))
            }
            "delete" => Ok(Request::Delete(DocumentRequest {
                collection,
                id: require_id(&mut raw)?,
            })),
            "add_index" => Ok(Request::AddIndex(AddIndexRequest {
                collection,
                field: require_string(&mut raw, "field")?,
                id: require_id(&mut raw)?,
                value: require_value(&mut raw)?,
            })),
            "query_index" => Ok(Request::QueryIndex(QueryIndexRequest {
                collection,
                field: require_string(&mut raw, "field")?,
                value: require_value(&mut raw)?,
            })),
            "where" => Ok(Request::Where(WhereRequest {
                collection,
                field: require_string(&mut raw, "field")?,
                operator: require_string(&mut raw, "operator")?,
                value: require_value(&mut raw)?,
            })),
            other => Err(ApiError::UnknownOperation(other.to_string())),
        }
    }

    /// The `op` tag of this request
    pub fn op(&self) -> &'static str {
        match self {
            Request::Create(_) => "create",
            Request::Read(_) => "read",
            Request::ReadAll(_) => "read_all",
            Request::Update(_) => "update",
            Request::Delete(_) => "delete",
            Request::AddIndex(_) => "add_index",
            Request::QueryIndex(_) => "query_index",
            Request::Where(_) => "where",
        }
    }
}

fn take_string(raw: &mut Map<String, Value>, key: &str) -> Option<String> {
    match raw.remove(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

fn take_id(raw: &mut Map<String, Value>) -> Option<String> {
    take_string(raw, "id")
}

fn take_object(raw: &mut Map<String, Value>, key: &str) -> Option<Map<String, Value>> {
    match raw.remove(key) {
        Some(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn require_string(raw: &mut Map<String, Value>, key: &str) -> ApiResult<String> {
    take_string(raw, key).ok_or_else(|| ApiError::invalid_request(format!("Missing '{}'", key)))
}

fn require_id(raw: &mut Map<String, Value>) -> ApiResult<String> {
    require_string(raw, "id")
}

fn require_value(raw: &mut Map<String, Value>) -> ApiResult<Value> {
    raw.remove("value")
        .ok_or_else(|| ApiError::invalid_request("Missing 'value'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_create() {
        let json = r#"{
            "op": "create",
            "collection": "cars",
            "id": "ID001",
            "data": {"brand": "Citröen", "horsepower": 2}
        }"#;

        match Request::parse(json).unwrap() {
            Request::Create(r) => {
                assert_eq!(r.collection, "cars");
                assert_eq!(r.id, "ID001");
                assert_eq!(r.data.get("horsepower"), Some(&json!(2)));
            }
            other => panic!("Expected Create, got {:?}", other),
        }
    }

    #[test]
    fn test_create_without_id_or_data() {
        for body in [
            json!({"op": "create", "collection": "cars", "data": {"name": "Jane"}}),
            json!({"op": "create", "collection": "cars", "id": "1"}),
            json!({"op": "create", "collection": "cars", "id": "", "data": {}}),
            json!({"op": "create", "collection": "cars", "id": 5, "data": {}}),
            json!({"op": "create", "collection": "cars", "id": "1", "data": [1]}),
        ] {
            let err = Request::from_value(body).unwrap_err();
            assert_eq!(err.to_string(), MISSING_ID_OR_DATA);
        }
    }

    #[test]
    fn test_update_without_data() {
        let err = Request::from_value(json!({"op": "update", "collection": "cars", "id": "1"}))
            .unwrap_err();
        assert_eq!(err.to_string(), MISSING_DATA);
    }

    #[test]
    fn test_parse_where_keeps_null_value() {
        let req = Request::from_value(json!({
            "op": "where", "collection": "cars", "field": "owner", "operator": "==", "value": null
        }))
        .unwrap();

        match req {
            Request::Where(r) => {
                assert_eq!(r.operator, "==");
                assert_eq!(r.value, Value::Null);
            }
            other => panic!("Expected Where, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_where_requires_value() {
        let err = Request::from_value(json!({
            "op": "where", "collection": "cars", "field": "hp", "operator": ">"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("value"));
    }

    #[test]
    fn test_parse_unknown_op() {
        let err = Request::parse(r#"{"op": "drop", "collection": "cars"}"#).unwrap_err();
        assert_eq!(err.code(), "DOCSTORE_UNKNOWN_OPERATION");
    }

    #[test]
    fn test_parse_missing_collection() {
        let err = Request::parse(r#"{"op": "read_all"}"#).unwrap_err();
        assert!(err.to_string().contains("collection"));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(Request::parse("[]").is_err());
        assert!(Request::parse("not json").is_err());
    }

    #[test]
    fn test_op_tags_round_trip() {
        let req = Request::from_value(json!({
            "op": "query_index", "collection": "cars", "field": "hp", "value": 100
        }))
        .unwrap();
        assert_eq!(req.op(), "query_index");
    }
}
