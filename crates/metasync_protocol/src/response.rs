//! Structured error payload returned by the remote engine.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Error body sent with any non-200 status.
///
/// Decoding is lenient in the same way the engine is: missing `code` or
/// `error` fields decode as empty strings. A body that is not a JSON object
/// does not decode at all. See `is_blank` for payloads carrying neither.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code, e.g. `already-exists`.
    #[serde(default)]
    pub code: String,
    /// Human-readable message.
    #[serde(rename = "error", default)]
    pub message: String,
    /// Path into the *request* document locating the failing sub-object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Engine-internal details, typically a SQL execution error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<Value>,
}

impl ErrorResponse {
    /// Creates an error response without path or internal details.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            internal: None,
        }
    }

    /// Sets the request path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the internal details.
    pub fn with_internal(mut self, internal: Value) -> Self {
        self.internal = Some(internal);
        self
    }

    /// Returns true if neither `code` nor `error` was reported.
    pub fn is_blank(&self) -> bool {
        self.code.is_empty() && self.message.is_empty()
    }

    /// Returns the reported path, treating an empty string as absent.
    pub fn request_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }

    /// Decodes `internal` as SQL execution errors.
    ///
    /// An object yields at most one error, an array yields one per element
    /// that has the expected shape. Anything else yields nothing.
    pub fn sql_errors(&self) -> Vec<SqlInternalError> {
        match &self.internal {
            Some(object @ Value::Object(_)) => {
                SqlInternalError::from_value(object).into_iter().collect()
            }
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(SqlInternalError::from_value)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// A SQL execution failure reported in `ErrorResponse::internal`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlInternalError {
    /// The statement that failed, if reported.
    #[serde(default)]
    pub statement: Option<String>,
    /// Whether the statement was prepared.
    #[serde(default, deserialize_with = "null_as_default")]
    pub prepared: bool,
    /// Statement arguments.
    #[serde(default, deserialize_with = "null_as_default")]
    pub arguments: Vec<Value>,
    /// Database error details.
    pub error: SqlErrorDetail,
}

impl SqlInternalError {
    fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

/// Database-level error details.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SqlErrorDetail {
    /// Execution status, e.g. `FatalError`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub exec_status: String,
    /// SQLSTATE code, e.g. `42P01`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status_code: String,
    /// Primary message.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Optional detail line.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional hint line.
    #[serde(default)]
    pub hint: Option<String>,
}

/// Decodes `null` as the type's default, like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_full_payload() {
        let body = br#"{"code":"not-exists","error":"table not found","path":"$.args[1].args"}"#;
        let err: ErrorResponse = serde_json::from_slice(body).unwrap();
        assert_eq!(err.code, "not-exists");
        assert_eq!(err.message, "table not found");
        assert_eq!(err.request_path(), Some("$.args[1].args"));
        assert!(err.internal.is_none());
    }

    #[test]
    fn missing_fields_default() {
        let err: ErrorResponse = serde_json::from_slice(b"{}").unwrap();
        assert_eq!(err, ErrorResponse::default());
        assert_eq!(err.request_path(), None);
        assert!(err.is_blank());
        assert!(!ErrorResponse::new("", "only a message").is_blank());
    }

    #[test]
    fn empty_path_is_absent() {
        let err = ErrorResponse::new("x", "y").with_path("");
        assert_eq!(err.request_path(), None);
    }

    #[test]
    fn non_object_bodies_do_not_decode() {
        assert!(serde_json::from_slice::<ErrorResponse>(b"[1,2]").is_err());
        assert!(serde_json::from_slice::<ErrorResponse>(b"<html>").is_err());
    }

    #[test]
    fn sql_errors_from_object_and_array() {
        let detail = json!({
            "statement": "SELECT 1",
            "prepared": false,
            "arguments": [],
            "error": {
                "exec_status": "FatalError",
                "status_code": "42P01",
                "message": "relation \"users\" does not exist",
                "description": null,
                "hint": "check the schema"
            }
        });
        let single = ErrorResponse::new("postgres-error", "query failed").with_internal(detail.clone());
        let errors = single.sql_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error.status_code, "42P01");
        assert_eq!(errors[0].error.hint.as_deref(), Some("check the schema"));

        let many = ErrorResponse::new("postgres-error", "query failed")
            .with_internal(json!([detail, {"unrelated": true}, detail]));
        assert_eq!(many.sql_errors().len(), 2);

        let other = ErrorResponse::new("x", "y").with_internal(json!("opaque"));
        assert!(other.sql_errors().is_empty());
    }

    #[test]
    fn sql_errors_tolerate_nulls() {
        let internal = json!({
            "statement": null,
            "prepared": null,
            "arguments": null,
            "error": {
                "exec_status": "FatalError",
                "status_code": null,
                "message": "permission denied for table users",
                "description": null,
                "hint": null
            }
        });
        let errors = ErrorResponse::new("postgres-error", "query failed")
            .with_internal(internal)
            .sql_errors();

        assert_eq!(errors.len(), 1);
        assert!(errors[0].arguments.is_empty());
        assert!(!errors[0].prepared);
        assert_eq!(errors[0].error.status_code, "");
        assert_eq!(errors[0].error.message, "permission denied for table users");
    }

    #[test]
    fn sql_errors_from_bare_error_object() {
        let errors = ErrorResponse::new("postgres-error", "query failed")
            .with_internal(json!({"error": {"message": "boom", "exec_status": null}}))
            .sql_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error.exec_status, "");
    }
}
