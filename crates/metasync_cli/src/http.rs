//! Blocking reqwest transport.

use metasync_client::{HttpClient, HttpResponse};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// `HttpClient` backed by a blocking reqwest client.
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Builds a client. Without `timeout` reqwest's default applies.
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl HttpClient for ReqwestClient {
    fn post(&self, url: &str, body: &[u8]) -> Result<HttpResponse, String> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_vec())
            .send()
            .map_err(|e| e.to_string())?;

        let status = response.status().as_u16();
        let body = response.bytes().map_err(|e| e.to_string())?;
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
