//! # metasync client
//!
//! Keeps a local metadata document in sync with a remote engine over its
//! single JSON query endpoint.
//!
//! This crate provides:
//! - `MetadataClient` with the export, reset, reload, apply and query operations
//! - `HttpClient`, the transport boundary, plus a loopback implementation
//! - Response classification into success values or structured errors
//! - Error localization: excerpts of the request object a failure points at
//!
//! ## Architecture
//!
//! Every operation is one request and one response:
//! 1. Build a `Query` or `BulkQuery` and serialize it
//! 2. POST the bytes through the `HttpClient`
//! 3. Classify the response by status code
//! 4. On a structured error carrying a path, decode the bytes that were sent
//!    and attach the addressed sub-object to the error
//!
//! ## Key Invariants
//!
//! - Error paths are resolved against the request, never the response
//! - Localization is best-effort and never replaces the remote error
//! - No retries, no client-side state between calls

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod classify;
mod client;
mod config;
mod error;
mod http;
mod localize;

pub use classify::{classify, Classified};
pub use client::MetadataClient;
pub use config::{ClientConfig, Invocation, DEFAULT_QUERY_PATH};
pub use error::{ClientError, ClientResult, RemoteError};
pub use http::{HttpClient, HttpResponse, LoopbackClient, LoopbackServer, STATUS_OK};
pub use localize::{localize, Localization, EXCERPT_LABEL};

/// Crate version, reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
