//! HTTP verbs and request body encodings.
//!
//! This module provides the [`HttpMethod`] and [`BodyEncoding`] types used by
//! [`ResourceClient`](crate::ResourceClient) when building requests.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// HTTP methods exposed by the resource client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partially updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` when the call's body is sent as query parameters
    /// instead of a request payload.
    #[must_use]
    pub const fn uses_body_as_query(&self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }

    pub(crate) const fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Encoding for request payloads.
///
/// Specifies how the body record is serialized and which `Content-Type`
/// header accompanies it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BodyEncoding {
    /// JSON payload (`application/json`).
    #[default]
    Json,
    /// URL-encoded form payload (`application/x-www-form-urlencoded`).
    ///
    /// The body record is encoded with the active query decode mode.
    Form,
}

impl BodyEncoding {
    /// Returns the MIME type string for this encoding.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Form => "application/x-www-form-urlencoded",
        }
    }
}

impl FromStr for BodyEncoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "json" => Ok(Self::Json),
            "form" => Ok(Self::Form),
            _ => Err(ConfigError::InvalidBodyEncoding { encoding: s }),
        }
    }
}
