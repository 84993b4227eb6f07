//! In-memory remote engine.
//!
//! Implements just enough of the metadata endpoint to exercise the client:
//! `export_metadata`, `clear_metadata`, `reload_metadata`,
//! `replace_metadata` and `bulk`. Bulk requests run in order against a
//! scratch copy and are committed only if every entry succeeds. Error paths
//! are reported against the request document, the way the real engine does.

use metasync_client::{HttpResponse, LoopbackServer, DEFAULT_QUERY_PATH};
use metasync_protocol::{ErrorResponse, BULK_TYPE};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};

/// Status used for structured errors.
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Status used for unknown endpoints.
pub const STATUS_NOT_FOUND: u16 = 404;

/// Metadata document of a freshly cleared engine.
pub fn default_metadata() -> Value {
    json!({ "version": 2, "tables": [] })
}

#[derive(Debug)]
struct EngineState {
    metadata: Value,
    /// Errors to raise for a query type, with paths relative to the query.
    rejections: HashMap<String, ErrorResponse>,
    canned: VecDeque<HttpResponse>,
    offline: bool,
    requests: Vec<Vec<u8>>,
    reloads: u64,
}

/// An in-memory metadata engine.
#[derive(Debug)]
pub struct FakeEngine {
    state: Mutex<EngineState>,
}

impl FakeEngine {
    /// Creates an engine holding `default_metadata()`.
    pub fn new() -> Self {
        Self::with_metadata(default_metadata())
    }

    /// Creates an engine holding `metadata`.
    pub fn with_metadata(metadata: Value) -> Self {
        Self {
            state: Mutex::new(EngineState {
                metadata,
                rejections: HashMap::new(),
                canned: VecDeque::new(),
                offline: false,
                requests: Vec::new(),
                reloads: 0,
            }),
        }
    }

    /// Returns the current metadata document.
    pub fn metadata(&self) -> Value {
        self.state.lock().metadata.clone()
    }

    /// Makes every query of `query_type` fail with `error`.
    ///
    /// The error's path is relative to the failing query (e.g.
    /// `args.tables`); the engine prefixes the query's position in the
    /// request before replying.
    pub fn reject(&self, query_type: impl Into<String>, error: ErrorResponse) {
        self.state.lock().rejections.insert(query_type.into(), error);
    }

    /// Queues a raw response for the next request, bypassing execution.
    pub fn respond_with(&self, response: HttpResponse) {
        self.state.lock().canned.push_back(response);
    }

    /// Simulates the engine being unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().offline = offline;
    }

    /// Returns the raw bodies of all requests received.
    pub fn requests(&self) -> Vec<Vec<u8>> {
        self.state.lock().requests.clone()
    }

    /// Returns the last request received, decoded.
    pub fn last_request(&self) -> Option<Value> {
        let state = self.state.lock();
        state
            .requests
            .last()
            .and_then(|body| serde_json::from_slice(body).ok())
    }

    /// Returns how many `reload_metadata` queries were committed.
    pub fn reload_count(&self) -> u64 {
        self.state.lock().reloads
    }

    fn execute(&self, request: &Value) -> HttpResponse {
        let mut state = self.state.lock();
        let mut scratch = Scratch {
            metadata: state.metadata.clone(),
            reloads: 0,
        };

        let outcome = if request.get("type").and_then(Value::as_str) == Some(BULK_TYPE) {
            match request.get("args") {
                Some(Value::Array(queries)) => {
                    let mut results = Vec::with_capacity(queries.len());
                    let mut failure = None;
                    for (i, query) in queries.iter().enumerate() {
                        match scratch.run(query, &state.rejections) {
                            Ok(result) => results.push(result),
                            Err(error) => {
                                failure = Some(rebase(error, &format!("$.args[{i}]")));
                                break;
                            }
                        }
                    }
                    match failure {
                        Some(error) => Err(error),
                        None => Ok(Value::Array(results)),
                    }
                }
                _ => Err(ErrorResponse::new("parse-failed", "expecting an array of queries")
                    .with_path("$.args")),
            }
        } else {
            scratch
                .run(request, &state.rejections)
                .map_err(|error| rebase(error, "$"))
        };

        match outcome {
            Ok(result) => {
                state.metadata = scratch.metadata;
                state.reloads += scratch.reloads;
                json_response(200, &result)
            }
            Err(error) => json_response(STATUS_BAD_REQUEST, &error),
        }
    }
}

impl Default for FakeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopbackServer for FakeEngine {
    fn handle_post(&self, path: &str, body: &[u8]) -> Result<HttpResponse, String> {
        {
            let mut state = self.state.lock();
            if state.offline {
                return Err("connection refused".into());
            }
            state.requests.push(body.to_vec());
            if let Some(canned) = state.canned.pop_front() {
                return Ok(canned);
            }
        }

        if path != DEFAULT_QUERY_PATH {
            return Ok(json_response(
                STATUS_NOT_FOUND,
                &ErrorResponse::new("not-found", "resource does not exist"),
            ));
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(request) => Ok(self.execute(&request)),
            Err(e) => Ok(json_response(
                STATUS_BAD_REQUEST,
                &ErrorResponse::new("parse-failed", e.to_string()).with_path("$"),
            )),
        }
    }
}

/// Uncommitted engine state for one request.
struct Scratch {
    metadata: Value,
    reloads: u64,
}

impl Scratch {
    fn run(
        &mut self,
        query: &Value,
        rejections: &HashMap<String, ErrorResponse>,
    ) -> Result<Value, ErrorResponse> {
        let query_type = query
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| ErrorResponse::new("parse-failed", "key \"type\" not found"))?;

        if let Some(error) = rejections.get(query_type) {
            return Err(error.clone());
        }

        match query_type {
            "export_metadata" => Ok(self.metadata.clone()),
            "clear_metadata" => {
                self.metadata = default_metadata();
                Ok(success())
            }
            "reload_metadata" => {
                self.reloads += 1;
                Ok(success())
            }
            "replace_metadata" => {
                let args = query.get("args").cloned().unwrap_or(Value::Null);
                if !args.is_object() {
                    return Err(ErrorResponse::new(
                        "parse-failed",
                        "expecting an object for metadata",
                    )
                    .with_path("args"));
                }
                if args.get("tables").is_some_and(|t| !t.is_array()) {
                    return Err(
                        ErrorResponse::new("parse-failed", "expected Array, encountered Object")
                            .with_path("args.tables"),
                    );
                }
                self.metadata = args;
                Ok(success())
            }
            other => Err(ErrorResponse::new(
                "not-supported",
                format!("unknown query type: {other}"),
            )
            .with_path("type")),
        }
    }
}

fn success() -> Value {
    json!({ "message": "success" })
}

/// Prefixes a query-relative error path with the query's position.
fn rebase(mut error: ErrorResponse, prefix: &str) -> ErrorResponse {
    error.path = Some(match error.request_path() {
        Some(relative) => format!("{prefix}.{relative}"),
        None => prefix.to_string(),
    });
    error
}

fn json_response<T: serde::Serialize>(status: u16, body: &T) -> HttpResponse {
    let body = serde_json::to_vec(body).expect("engine responses serialize");
    HttpResponse::new(status, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(engine: &FakeEngine, request: Value) -> HttpResponse {
        engine
            .handle_post(DEFAULT_QUERY_PATH, &serde_json::to_vec(&request).unwrap())
            .unwrap()
    }

    fn body(response: &HttpResponse) -> Value {
        serde_json::from_slice(&response.body).unwrap()
    }

    #[test]
    fn export_and_clear() {
        let engine = FakeEngine::with_metadata(json!({"version": 2, "tables": [{"table": "a"}]}));
        let response = post(&engine, json!({"type": "export_metadata", "args": {}}));
        assert_eq!(response.status, 200);
        assert_eq!(body(&response)["tables"][0]["table"], json!("a"));

        post(&engine, json!({"type": "clear_metadata", "args": {}}));
        assert_eq!(engine.metadata(), default_metadata());
    }

    #[test]
    fn bulk_is_atomic() {
        let engine = FakeEngine::with_metadata(json!({"version": 2, "tables": [{"table": "a"}]}));
        let response = post(
            &engine,
            json!({"type": "bulk", "args": [
                {"type": "clear_metadata", "args": {}},
                {"type": "replace_metadata", "args": {"tables": {}}}
            ]}),
        );
        assert_eq!(response.status, STATUS_BAD_REQUEST);
        assert_eq!(body(&response)["path"], json!("$.args[1].args.tables"));
        assert_eq!(engine.metadata()["tables"][0]["table"], json!("a"));
    }

    #[test]
    fn rejections_are_rebased() {
        let engine = FakeEngine::new();
        engine.reject("reload_metadata", ErrorResponse::new("unexpected", "boom").with_path("args"));

        let single = post(&engine, json!({"type": "reload_metadata", "args": {}}));
        assert_eq!(body(&single)["path"], json!("$.args"));

        let bulk = post(
            &engine,
            json!({"type": "bulk", "args": [
                {"type": "export_metadata", "args": {}},
                {"type": "reload_metadata", "args": {}}
            ]}),
        );
        assert_eq!(body(&bulk)["path"], json!("$.args[1].args"));
        assert_eq!(engine.reload_count(), 0);
    }

    #[test]
    fn unknown_type_and_path() {
        let engine = FakeEngine::new();
        let response = post(&engine, json!({"type": "drop_everything", "args": {}}));
        assert_eq!(body(&response)["code"], json!("not-supported"));
        assert_eq!(body(&response)["path"], json!("$.type"));

        let response = engine.handle_post("/v2/other", b"{}").unwrap();
        assert_eq!(response.status, STATUS_NOT_FOUND);
    }

    #[test]
    fn every_reply_is_json() {
        let engine = FakeEngine::new();
        for request in [
            json!({"type": "export_metadata", "args": {}}),
            json!({"type": "bulk", "args": []}),
            json!({"type": "bulk", "args": {}}),
            json!({"args": {}}),
        ] {
            let response = post(&engine, request);
            assert!(serde_json::from_slice::<Value>(&response.body).is_ok());
        }
    }

    #[test]
    fn canned_and_offline() {
        let engine = FakeEngine::new();
        engine.respond_with(HttpResponse::new(502, "bad gateway"));
        let response = post(&engine, json!({"type": "export_metadata", "args": {}}));
        assert_eq!(response.body, b"bad gateway");

        engine.set_offline(true);
        assert!(engine.handle_post(DEFAULT_QUERY_PATH, b"{}").is_err());
        assert_eq!(engine.requests().len(), 1);
    }
}
