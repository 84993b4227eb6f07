//! Metadata operations.

use crate::classify::{classify, Classified};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, RemoteError};
use crate::http::HttpClient;
use crate::localize::localize;
use metasync_protocol::{BulkQuery, Query, Value};
use serde::Serialize;
use tracing::debug;

/// Client for the remote engine's metadata endpoint.
///
/// Each operation is a single blocking request/response exchange. The client
/// holds no state between calls beyond its configuration.
pub struct MetadataClient<C: HttpClient> {
    config: ClientConfig,
    http: C,
}

impl<C: HttpClient> MetadataClient<C> {
    /// Creates a new client.
    pub fn new(config: ClientConfig, http: C) -> Self {
        Self { config, http }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the underlying HTTP client.
    pub fn http(&self) -> &C {
        &self.http
    }

    /// Exports the full metadata document.
    pub fn export_metadata(&self) -> ClientResult<Value> {
        self.execute(&Query::export_metadata())
    }

    /// Clears all metadata on the engine.
    pub fn reset_metadata(&self) -> ClientResult<()> {
        self.execute(&Query::clear_metadata()).map(drop)
    }

    /// Makes the engine recompute its metadata.
    pub fn reload_metadata(&self) -> ClientResult<()> {
        self.execute(&Query::reload_metadata()).map(drop)
    }

    /// Replaces the engine's metadata with `data`.
    ///
    /// Clear and replace travel as one bulk request, so a failure path
    /// `$.args[1]...` always points into `data`.
    pub fn apply_metadata(&self, data: Value) -> ClientResult<()> {
        let bulk = BulkQuery::new(vec![Query::clear_metadata(), Query::replace_metadata(data)]);
        self.execute(&bulk).map(drop)
    }

    /// Runs caller-supplied queries as one bulk request.
    ///
    /// An empty list is sent as-is; the engine decides what it means.
    pub fn query(&self, queries: Vec<Value>) -> ClientResult<()> {
        self.execute(&BulkQuery::from_values(queries)).map(drop)
    }

    /// Sends `request` and returns the decoded success value.
    ///
    /// On a structured error the bytes that were sent are kept for
    /// localization against the reported path.
    pub fn execute<R: Serialize>(&self, request: &R) -> ClientResult<Value> {
        let sent = serde_json::to_vec(request).map_err(ClientError::Encode)?;

        let response = self
            .http
            .post(&self.config.query_url(), &sent)
            .map_err(|e| {
                debug!(error = %e, "transport failure");
                ClientError::transport(e)
            })?;
        debug!(
            status = response.status,
            "response: {}",
            String::from_utf8_lossy(&response.body)
        );

        match classify(&response).inspect_err(|e| debug!(error = %e, "undecodable response"))? {
            Classified::Success(value) => Ok(value),
            Classified::Failure(error) => {
                let localization = error
                    .request_path()
                    .and_then(|path| localize(&sent, path));
                Err(RemoteError::new(error, self.config.invocation)
                    .with_localization(localization)
                    .into())
            }
        }
    }
}
