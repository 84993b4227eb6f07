//! Request shapes sent to the metadata endpoint.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// The `type` of a bulk envelope.
pub const BULK_TYPE: &str = "bulk";

/// Errors raised while assembling a query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The query type was empty.
    #[error("query type must not be empty")]
    EmptyType,
}

/// A single named query: `{ "type": ..., "args": ... }`.
///
/// `args` is opaque to this crate and forwarded as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Operation name recognised by the remote engine.
    #[serde(rename = "type")]
    pub query_type: String,
    /// Operation arguments.
    pub args: Value,
}

impl Query {
    /// Creates a query, rejecting an empty type.
    pub fn new(query_type: impl Into<String>, args: Value) -> Result<Self, QueryError> {
        let query_type = query_type.into();
        if query_type.is_empty() {
            return Err(QueryError::EmptyType);
        }
        Ok(Self { query_type, args })
    }

    /// Creates an argument-less query. The engine expects `"args": {}`.
    fn bare(query_type: &str) -> Self {
        Self {
            query_type: query_type.to_string(),
            args: Value::Object(Map::new()),
        }
    }

    /// `export_metadata`: fetch the full metadata document.
    pub fn export_metadata() -> Self {
        Self::bare("export_metadata")
    }

    /// `clear_metadata`: drop all metadata on the engine.
    pub fn clear_metadata() -> Self {
        Self::bare("clear_metadata")
    }

    /// `reload_metadata`: recompute the engine's metadata cache.
    pub fn reload_metadata() -> Self {
        Self::bare("reload_metadata")
    }

    /// `replace_metadata`: replace the engine's metadata with `data`.
    pub fn replace_metadata(data: Value) -> Self {
        Self {
            query_type: "replace_metadata".to_string(),
            args: data,
        }
    }
}

/// One element of a bulk envelope.
///
/// Callers of the generic query operation may submit queries this crate
/// does not model, so raw JSON values are accepted alongside typed queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BulkEntry {
    /// A typed query.
    Query(Query),
    /// An arbitrary JSON value forwarded unchanged.
    Raw(Value),
}

impl From<Query> for BulkEntry {
    fn from(query: Query) -> Self {
        BulkEntry::Query(query)
    }
}

impl From<Value> for BulkEntry {
    fn from(value: Value) -> Self {
        BulkEntry::Raw(value)
    }
}

/// An ordered batch of queries: `{ "type": "bulk", "args": [...] }`.
///
/// Order is preserved on the wire; the engine executes entries in sequence
/// and failure paths index into this exact list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BulkQuery {
    entries: Vec<BulkEntry>,
}

impl BulkQuery {
    /// Creates a bulk envelope from typed queries.
    pub fn new(queries: Vec<Query>) -> Self {
        Self {
            entries: queries.into_iter().map(BulkEntry::Query).collect(),
        }
    }

    /// Creates a bulk envelope from caller-supplied JSON values.
    pub fn from_values(values: Vec<Value>) -> Self {
        Self {
            entries: values.into_iter().map(BulkEntry::Raw).collect(),
        }
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: impl Into<BulkEntry>) {
        self.entries.push(entry.into());
    }

    /// Returns the entries in wire order.
    pub fn entries(&self) -> &[BulkEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the envelope has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for BulkQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BulkQuery", 2)?;
        state.serialize_field("type", BULK_TYPE)?;
        state.serialize_field("args", &self.entries)?;
        state.end()
    }
}
