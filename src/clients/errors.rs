//! Error types for resource client calls.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: a non-2xx response from the server
//! - [`TransportError`]: anything the transport reported (response errors and
//!   network failures)
//! - [`RequestFailure`]: the `{ _status, data }` envelope wrapping a
//!   [`TransportError`]
//! - [`ResourceError`]: unified error type returned by every client call
//!
//! # Example
//!
//! ```rust,ignore
//! use resource_client::{FailureStatus, ResourceError};
//!
//! match client.get("users/1", None, None).await {
//!     Ok(response) => println!("User: {}", response.body()),
//!     Err(ResourceError::Request(failure)) => match &failure.status {
//!         FailureStatus::Code(404) => println!("no such user"),
//!         FailureStatus::Code(code) => println!("server answered {code}"),
//!         FailureStatus::Transport(code) => println!("transport failed: {code}"),
//!     },
//!     Err(other) => println!("request not sent: {other}"),
//! }
//! ```

use std::fmt;

use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::clients::http_response::{HttpResponse, STATUS_FIELD};
use crate::clients::url_source::ResolveError;

/// Error returned when the server answers with a non-2xx status.
///
/// The decoded response is kept so error handlers and callers can inspect
/// the body the server sent.
#[derive(Debug, Error)]
#[error("Request failed with status code {code}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The decoded response.
    pub response: HttpResponse,
}

/// Failure reported by the transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Network, connection, timeout or body error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl TransportError {
    /// Returns the HTTP response, when one was received.
    #[must_use]
    pub const fn response(&self) -> Option<&HttpResponse> {
        match self {
            Self::Response(error) => Some(&error.response),
            Self::Network(_) => None,
        }
    }

    /// Returns the HTTP status code, when a response was received.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Response(error) => Some(error.code),
            Self::Network(error) => error.status().map(|status| status.as_u16()),
        }
    }

    /// Returns a short code naming the kind of failure.
    ///
    /// Response errors map to `ERR_BAD_REQUEST` (4xx) or `ERR_BAD_RESPONSE`
    /// (everything else); network errors map to `ETIMEDOUT`, `ECONNREFUSED`,
    /// `ERR_FR_TOO_MANY_REDIRECTS`, `ERR_BAD_OPTION_VALUE`,
    /// `ERR_BAD_RESPONSE` or `ERR_NETWORK`.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Response(error) if (400..500).contains(&error.code) => "ERR_BAD_REQUEST",
            Self::Response(_) => "ERR_BAD_RESPONSE",
            Self::Network(error) => network_code(error),
        }
    }
}

fn network_code(error: &reqwest::Error) -> &'static str {
    if error.is_timeout() {
        "ETIMEDOUT"
    } else if error.is_connect() {
        "ECONNREFUSED"
    } else if error.is_redirect() {
        "ERR_FR_TOO_MANY_REDIRECTS"
    } else if error.is_builder() {
        "ERR_BAD_OPTION_VALUE"
    } else if error.is_body() || error.is_decode() {
        "ERR_BAD_RESPONSE"
    } else {
        "ERR_NETWORK"
    }
}

/// The `_status` of a failed call: an HTTP status code when the server
/// answered, otherwise a transport error code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FailureStatus {
    /// HTTP status code of the response.
    Code(u16),
    /// Transport error code (see [`TransportError::code`]).
    Transport(String),
}

impl fmt::Display for FailureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Transport(code) => f.write_str(code),
        }
    }
}

/// The normalized error envelope for a failed call.
#[derive(Debug, Error)]
#[error("[{status}] {data}")]
pub struct RequestFailure {
    /// HTTP status code, or transport error code when no response arrived.
    pub status: FailureStatus,
    /// The original transport error.
    #[source]
    pub data: TransportError,
}

impl RequestFailure {
    /// Returns the envelope as JSON: `{"_status": ..., "data": {...}}`.
    ///
    /// `data` carries the error message, the transport code and, when the
    /// server answered, the decoded response body.
    #[must_use]
    pub fn to_envelope(&self) -> Value {
        let mut data = json!({
            "message": self.data.to_string(),
            "code": self.data.code(),
        });
        if let Some(response) = self.data.response() {
            data["response"] = json!({
                "status": response.code,
                "data": response.body,
            });
        }

        let mut envelope = serde_json::Map::new();
        envelope.insert(
            STATUS_FIELD.to_string(),
            serde_json::to_value(&self.status).unwrap_or(Value::Null),
        );
        envelope.insert("data".to_string(), data);
        Value::Object(envelope)
    }
}

impl From<TransportError> for RequestFailure {
    fn from(data: TransportError) -> Self {
        let status = data.status_code().map_or_else(
            || FailureStatus::Transport(data.code().to_string()),
            FailureStatus::Code,
        );
        Self { status, data }
    }
}

/// Unified error type for resource client operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The request was sent and failed; see [`RequestFailure`].
    #[error(transparent)]
    Request(#[from] RequestFailure),

    /// The base-URL resolver failed.
    #[error("Failed to resolve base URL: {0}")]
    BaseUrl(#[from] ResolveError),

    /// The joined request URL is not a valid absolute URL.
    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// Why it failed to parse.
        reason: String,
    },

    /// The underlying HTTP client could not be created.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// An abstract operation was called on a resource that does not provide it.
    #[error("{resource}::{method}(): need to provide method")]
    NotImplemented {
        /// The resource type.
        resource: &'static str,
        /// The missing operation.
        method: &'static str,
    },
}

impl ResourceError {
    /// Returns the `_status` of a failed request.
    #[must_use]
    pub const fn status(&self) -> Option<&FailureStatus> {
        match self {
            Self::Request(failure) => Some(&failure.status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn response_error(code: u16, body: Value) -> TransportError {
        TransportError::Response(HttpResponseError {
            code,
            response: HttpResponse::new(code, HashMap::new(), body),
        })
    }

    #[test]
    fn test_failure_status_uses_response_code() {
        let failure = RequestFailure::from(response_error(404, json!({"error": "missing"})));
        assert_eq!(failure.status, FailureStatus::Code(404));
    }

    #[test]
    fn test_response_error_codes() {
        assert_eq!(response_error(422, Value::Null).code(), "ERR_BAD_REQUEST");
        assert_eq!(response_error(503, Value::Null).code(), "ERR_BAD_RESPONSE");
    }

    #[test]
    fn test_response_accessor() {
        let error = response_error(500, json!("boom"));
        assert_eq!(error.response().map(|r| &r.body), Some(&json!("boom")));
        assert_eq!(error.status_code(), Some(500));
    }

    #[test]
    fn test_failure_display_includes_status() {
        let failure = RequestFailure::from(response_error(418, Value::Null));
        let message = failure.to_string();
        assert!(message.contains("[418]"));
        assert!(message.contains("status code 418"));
    }

    #[test]
    fn test_envelope_shape() {
        let failure = RequestFailure::from(response_error(400, json!({"field": "bad"})));
        let envelope = failure.to_envelope();

        assert_eq!(envelope[STATUS_FIELD], json!(400));
        assert_eq!(envelope["data"]["code"], json!("ERR_BAD_REQUEST"));
        assert_eq!(envelope["data"]["response"]["data"], json!({"field": "bad"}));
    }

    #[test]
    fn test_failure_status_serializes_untagged() {
        assert_eq!(
            serde_json::to_value(FailureStatus::Code(500)).unwrap(),
            json!(500)
        );
        assert_eq!(
            serde_json::to_value(FailureStatus::Transport("ECONNREFUSED".to_string())).unwrap(),
            json!("ECONNREFUSED")
        );
    }

    #[test]
    fn test_resource_error_status() {
        let error = ResourceError::from(RequestFailure::from(response_error(401, Value::Null)));
        assert_eq!(error.status(), Some(&FailureStatus::Code(401)));

        let error = ResourceError::NotImplemented {
            resource: "Users",
            method: "get_all_entities",
        };
        assert!(error.status().is_none());
        assert_eq!(
            error.to_string(),
            "Users::get_all_entities(): need to provide method"
        );
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let failure = RequestFailure::from(response_error(400, Value::Null));
        let _: &dyn std::error::Error = &failure;
        let error = ResourceError::InvalidUrl {
            url: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        let _: &dyn std::error::Error = &error;
    }
}
