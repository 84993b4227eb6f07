//! Configuration for the metadata client.

/// Default path of the query endpoint, relative to the server URL.
pub const DEFAULT_QUERY_PATH: &str = "/v1/query";

/// How the client is being driven.
///
/// Only affects how remote errors are rendered; the protocol is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Invocation {
    /// Driven from the command line; error lines end with `\r\n`.
    Cli,
    /// Embedded in another program; error lines end with `\n`.
    #[default]
    Embedded,
}

impl Invocation {
    /// Returns the line separator used when rendering errors.
    pub fn line_separator(self) -> &'static str {
        match self {
            Invocation::Cli => "\r\n",
            Invocation::Embedded => "\n",
        }
    }
}

/// Configuration for a `MetadataClient`. Read-only once the client is built.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server URL (e.g., "http://localhost:8080").
    pub endpoint: String,
    /// Path of the query endpoint.
    pub query_path: String,
    /// Invocation mode.
    pub invocation: Invocation,
}

impl ClientConfig {
    /// Creates a new configuration for the given server URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            query_path: DEFAULT_QUERY_PATH.to_string(),
            invocation: Invocation::default(),
        }
    }

    /// Sets the query endpoint path.
    pub fn with_query_path(mut self, path: impl Into<String>) -> Self {
        self.query_path = path.into();
        self
    }

    /// Sets the invocation mode.
    pub fn with_invocation(mut self, invocation: Invocation) -> Self {
        self.invocation = invocation;
        self
    }

    /// Returns the full URL of the query endpoint.
    pub fn query_url(&self) -> String {
        let base = self.endpoint.trim_end_matches('/');
        if self.query_path.starts_with('/') {
            format!("{}{}", base, self.query_path)
        } else {
            format!("{}/{}", base, self.query_path)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}
