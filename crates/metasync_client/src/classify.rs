//! Response classification.

use crate::error::{ClientError, ClientResult};
use crate::http::HttpResponse;
use metasync_protocol::{ErrorResponse, Value};

/// A response sorted by status code and decoded accordingly.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// Status 200: the decoded body, unchanged.
    Success(Value),
    /// Any other status: the decoded error payload.
    Failure(ErrorResponse),
}

/// Classifies a response.
///
/// A body that does not decode as the shape its status calls for is a
/// protocol error carrying the raw body. So is an error body with neither
/// `code` nor `error`, typically a proxy's own reply.
pub fn classify(response: &HttpResponse) -> ClientResult<Classified> {
    if response.is_ok() {
        serde_json::from_slice(&response.body)
            .map(Classified::Success)
            .map_err(|e| ClientError::protocol(e, &response.body))
    } else {
        let error: ErrorResponse = serde_json::from_slice(&response.body)
            .map_err(|e| ClientError::protocol(e, &response.body))?;
        if error.is_blank() {
            return Err(ClientError::protocol(
                format!("status {} without error code or message", response.status),
                &response.body,
            ));
        }
        Ok(Classified::Failure(error))
    }
}
