//! Error types for the metadata client.

use crate::config::Invocation;
use crate::localize::Localization;
use metasync_protocol::ErrorResponse;
use std::fmt;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur during a metadata operation.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network-level failure reported by the `HttpClient`.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
    },

    /// The response body did not decode as a success value or an error payload.
    #[error("failed parsing json: {message}; response from API: {body}")]
    Protocol {
        /// Decoder message.
        message: String,
        /// Raw response body, lossily converted to UTF-8.
        body: String,
    },

    /// The request could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// A well-formed error returned by the remote engine.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl ClientError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a protocol error keeping the raw body.
    pub fn protocol(message: impl fmt::Display, body: &[u8]) -> Self {
        Self::Protocol {
            message: message.to_string(),
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Returns the remote error, if this is one.
    pub fn as_remote(&self) -> Option<&RemoteError> {
        match self {
            ClientError::Remote(remote) => Some(remote),
            _ => None,
        }
    }
}

/// A structured error from the remote engine, with best-effort localization.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteError {
    response: ErrorResponse,
    localization: Option<Localization>,
    invocation: Invocation,
}

impl RemoteError {
    /// Wraps a decoded error payload.
    pub fn new(response: ErrorResponse, invocation: Invocation) -> Self {
        Self {
            response,
            localization: None,
            invocation,
        }
    }

    /// Attaches the outcome of localization.
    pub fn with_localization(mut self, localization: Option<Localization>) -> Self {
        self.localization = localization;
        self
    }

    /// Returns the decoded error payload.
    pub fn response(&self) -> &ErrorResponse {
        &self.response
    }

    /// Returns the engine's error code.
    pub fn code(&self) -> &str {
        &self.response.code
    }

    /// Returns the localization outcome, if any was recorded.
    pub fn localization(&self) -> Option<&Localization> {
        self.localization.as_ref()
    }

    /// Returns the pretty-printed offending object, if one was located.
    pub fn excerpt(&self) -> Option<&str> {
        match &self.localization {
            Some(Localization::Excerpt(text)) => Some(text),
            _ => None,
        }
    }

    /// Returns the invocation mode used for rendering.
    pub fn invocation(&self) -> Invocation {
        self.invocation
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        match self.response.request_path() {
            Some(path) => lines.push(format!(
                "[{}] {} ({})",
                self.response.code, self.response.message, path
            )),
            None => lines.push(format!("[{}] {}", self.response.code, self.response.message)),
        }

        if let Some(localization) = &self.localization {
            lines.push(localization.render(self.invocation));
        }

        for sql in self.response.sql_errors() {
            let detail = sql.error;
            lines.push(format!(
                "[{}] {}: {}",
                detail.status_code, detail.exec_status, detail.message
            ));
            if let Some(description) = detail.description.filter(|d| !d.is_empty()) {
                lines.push(format!("Description: {}", description));
            }
            if let Some(hint) = detail.hint.filter(|h| !h.is_empty()) {
                lines.push(format!("Hint: {}", hint));
            }
        }
        lines
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join(self.invocation.line_separator()))
    }
}

impl std::error::Error for RemoteError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn protocol_error_keeps_body() {
        let err = ClientError::protocol("expected value at line 1 column 1", b"<html>oops</html>");
        let text = err.to_string();
        assert!(text.contains("expected value"));
        assert!(text.contains("<html>oops</html>"));
    }

    #[test]
    fn remote_without_path() {
        let err = RemoteError::new(ErrorResponse::new("not-found", "no such table"), Invocation::Embedded);
        assert_eq!(err.to_string(), "[not-found] no such table");
        assert_eq!(err.excerpt(), None);
        assert_eq!(err.code(), "not-found");
    }

    #[test]
    fn remote_with_excerpt_and_sql_details() {
        let response = ErrorResponse::new("postgres-error", "query failed")
            .with_path("$.args[1].args")
            .with_internal(json!({
                "statement": "SELECT 1",
                "prepared": false,
                "arguments": [],
                "error": {
                    "exec_status": "FatalError",
                    "status_code": "42P01",
                    "message": "relation does not exist",
                    "description": "",
                    "hint": "create it first"
                }
            }));
        let err = RemoteError::new(response, Invocation::Embedded)
            .with_localization(Some(Localization::Excerpt("{}".into())));

        let lines: Vec<String> = err.to_string().split('\n').map(str::to_string).collect();
        assert_eq!(lines[0], "[postgres-error] query failed ($.args[1].args)");
        assert_eq!(lines[1], "offending object:");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "{}");
        assert_eq!(lines[4], "[42P01] FatalError: relation does not exist");
        assert_eq!(lines[5], "Hint: create it first");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn cli_and_embedded_carry_same_content() {
        let response = ErrorResponse::new("invalid", "bad").with_path("$.args[0]");
        let cli = RemoteError::new(response.clone(), Invocation::Cli)
            .with_localization(Some(Localization::Excerpt("[]".into())));
        let embedded = RemoteError::new(response, Invocation::Embedded)
            .with_localization(Some(Localization::Excerpt("[]".into())));

        assert!(cli.to_string().contains("\r\n"));
        assert!(!embedded.to_string().contains('\r'));
        assert_eq!(cli.to_string().replace("\r\n", "\n"), embedded.to_string());
    }

    #[test]
    fn client_error_wraps_remote_transparently() {
        let remote = RemoteError::new(ErrorResponse::new("x", "y"), Invocation::Embedded);
        let err = ClientError::from(remote.clone());
        assert_eq!(err.to_string(), remote.to_string());
        assert_eq!(err.as_remote(), Some(&remote));
    }
}
