//! HTTP transport boundary.
//!
//! The actual HTTP client is abstracted via a trait so the metadata client
//! can run over different implementations (reqwest, hyper, ureq, etc.) or
//! over a loopback to an in-process server in tests.

/// HTTP status signalling success.
pub const STATUS_OK: u16 = 200;

/// A full HTTP response: status code and raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Creates a 200 response.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(STATUS_OK, body)
    }

    /// Returns true for status 200.
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// HTTP client abstraction.
///
/// Implement this trait to provide the actual HTTP transport. Connection
/// failures, timeouts and malformed HTTP are reported as `Err`; any response
/// that arrived, whatever its status, is `Ok`.
pub trait HttpClient: Send + Sync {
    /// Sends a POST request with a JSON body and returns the full response.
    fn post(&self, url: &str, body: &[u8]) -> Result<HttpResponse, String>;
}

/// Trait for servers that can handle loopback requests.
pub trait LoopbackServer {
    /// Handles a POST request to `path` and returns the response.
    fn handle_post(&self, path: &str, body: &[u8]) -> Result<HttpResponse, String>;
}

/// A loopback HTTP client that routes requests directly to a server.
///
/// Useful for testing without actual network overhead.
pub struct LoopbackClient<S: LoopbackServer> {
    server: S,
}

impl<S: LoopbackServer + Send + Sync> LoopbackClient<S> {
    /// Creates a new loopback client connected to the given server.
    pub fn new(server: S) -> Self {
        Self { server }
    }

    /// Returns the server behind this client.
    pub fn server(&self) -> &S {
        &self.server
    }
}

impl<S: LoopbackServer + Send + Sync> HttpClient for LoopbackClient<S> {
    fn post(&self, url: &str, body: &[u8]) -> Result<HttpResponse, String> {
        // Strip scheme and authority, keep the path.
        let path = url
            .split_once("://")
            .map(|(_, rest)| rest)
            .and_then(|rest| rest.find('/').map(|i| &rest[i..]))
            .unwrap_or(url);

        self.server.handle_post(path, body)
    }
}
