//! Test fixtures and client helpers.

use crate::engine::FakeEngine;
use metasync_client::{ClientConfig, Invocation, LoopbackClient, MetadataClient};
use serde_json::{json, Value};

/// A metadata client wired to an in-memory engine.
pub type LoopbackMetadataClient = MetadataClient<LoopbackClient<FakeEngine>>;

/// Endpoint used by loopback clients. Only the path part is routed.
pub const LOOPBACK_ENDPOINT: &str = "http://engine.test";

/// Creates an embedded-mode client talking to `engine`.
pub fn loopback_client(engine: FakeEngine) -> LoopbackMetadataClient {
    MetadataClient::new(ClientConfig::new(LOOPBACK_ENDPOINT), LoopbackClient::new(engine))
}

/// Creates a CLI-mode client talking to `engine`.
pub fn loopback_cli_client(engine: FakeEngine) -> LoopbackMetadataClient {
    MetadataClient::new(
        ClientConfig::new(LOOPBACK_ENDPOINT).with_invocation(Invocation::Cli),
        LoopbackClient::new(engine),
    )
}

/// A small but realistic metadata document.
pub fn sample_metadata() -> Value {
    json!({
        "version": 2,
        "tables": [
            {
                "table": { "schema": "public", "name": "authors" },
                "array_relationships": [
                    {
                        "name": "articles",
                        "using": {
                            "foreign_key_constraint_on": {
                                "column": "author_id",
                                "table": { "schema": "public", "name": "articles" }
                            }
                        }
                    }
                ]
            },
            {
                "table": { "schema": "public", "name": "articles" },
                "select_permissions": [
                    {
                        "role": "user",
                        "permission": { "columns": ["id", "title"], "filter": {} }
                    }
                ]
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_clients_differ_only_in_mode() {
        let embedded = loopback_client(FakeEngine::new());
        let cli = loopback_cli_client(FakeEngine::new());
        assert_eq!(embedded.config().invocation, Invocation::Embedded);
        assert_eq!(cli.config().invocation, Invocation::Cli);
        assert_eq!(embedded.config().query_url(), cli.config().query_url());
    }

    #[test]
    fn sample_has_tables() {
        assert_eq!(sample_metadata()["tables"].as_array().map(Vec::len), Some(2));
    }
}
