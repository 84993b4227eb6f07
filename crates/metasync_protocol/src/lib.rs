//! # metasync protocol
//!
//! Wire types for the metadata query endpoint.
//!
//! This crate provides:
//! - `Query` and `BulkQuery`, the request shapes sent to the remote engine
//! - `ErrorResponse`, the structured error payload returned on failure
//! - `SqlInternalError`, the decoded form of the optional `internal` field
//! - `JsonPath`, a small evaluator for the paths the engine reports
//!
//! This is a pure protocol crate with no I/O operations.
//!
//! ## Path semantics
//!
//! A path carried by an `ErrorResponse` always addresses the *request*
//! document, never the response. For a bulk request `$.args[1].args.tables`
//! names the `tables` field of the second query in the batch.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod path;
mod query;
mod response;

pub use path::{lookup, JsonPath, PathError, PathSegment};
pub use query::{BulkEntry, BulkQuery, Query, QueryError, BULK_TYPE};
pub use response::{ErrorResponse, SqlErrorDetail, SqlInternalError};

/// Re-export of the generic JSON value used for opaque arguments and payloads.
pub use serde_json::Value;
