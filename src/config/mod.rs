//! Request options for the resource client.
//!
//! This module provides the option record shared by client defaults and
//! per-call overrides.
//!
//! # Overview
//!
//! - [`ResourceOptions`]: headers, URL and query policies, plus pass-through
//!   transport settings
//! - [`QueryParamsDecodeMode`]: how arrays are written into query strings
//! - [`Params`]: a parameter record (ordered JSON object)
//! - [`ParamsSerializer`]: a custom query-string serializer
//!
//! # Merging
//!
//! Options merge shallowly: every field that is set on the override replaces
//! the corresponding default field as a whole. Per-call `headers` therefore
//! replace the default headers rather than extending them.
//!
//! ```rust
//! use resource_client::ResourceOptions;
//!
//! let defaults = ResourceOptions::new()
//!     .header("Accept", "application/json")
//!     .trailing_slash(true);
//! let call = ResourceOptions::new().header("X-Trace", "1");
//!
//! let merged = defaults.merge(&call);
//! assert!(merged.trailing_slash_enabled());
//! assert_eq!(merged.headers_ref().unwrap().len(), 1);
//! ```

mod decode_mode;

pub use decode_mode::QueryParamsDecodeMode;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::clients::BodyEncoding;

/// A parameter record: an insertion-ordered JSON object.
pub type Params = serde_json::Map<String, Value>;

/// A custom query-string serializer.
///
/// Receives the final parameter record and returns the query string without
/// the leading `?`.
pub type ParamsSerializer = Arc<dyn Fn(&Params) -> String + Send + Sync>;

/// Options for resource client calls.
///
/// Used both as the client's defaults and as per-call overrides. Every field
/// is optional so that a per-call record only overrides what it sets.
///
/// # Defaults
///
/// - `trailing_slash`: `false`
/// - `query_params_decode_mode`: [`QueryParamsDecodeMode::Comma`]
/// - `time_offset`: `false`
/// - `body_encoding`: [`BodyEncoding::Json`]
/// - everything else unset
#[derive(Clone, Default)]
pub struct ResourceOptions {
    headers: Option<HashMap<String, String>>,
    trailing_slash: Option<bool>,
    query_params_decode_mode: Option<QueryParamsDecodeMode>,
    time_offset: Option<bool>,
    params_serializer: Option<ParamsSerializer>,
    params: Option<Params>,
    timeout: Option<Duration>,
    body_encoding: Option<BodyEncoding>,
}

// Verify ResourceOptions is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOptions>();
};

impl fmt::Debug for ResourceOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceOptions")
            .field("headers", &self.headers)
            .field("trailing_slash", &self.trailing_slash)
            .field("query_params_decode_mode", &self.query_params_decode_mode)
            .field("time_offset", &self.time_offset)
            .field(
                "params_serializer",
                &self.params_serializer.as_ref().map(|_| "<fn>"),
            )
            .field("params", &self.params)
            .field("timeout", &self.timeout)
            .field("body_encoding", &self.body_encoding)
            .finish()
    }
}

impl ResourceOptions {
    /// Creates an empty option record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets all headers at once.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Appends a trailing slash to every resolved URL when `true`.
    #[must_use]
    pub const fn trailing_slash(mut self, enabled: bool) -> Self {
        self.trailing_slash = Some(enabled);
        self
    }

    /// Sets the query decode mode.
    #[must_use]
    pub const fn query_params_decode_mode(mut self, mode: QueryParamsDecodeMode) -> Self {
        self.query_params_decode_mode = Some(mode);
        self
    }

    /// Adds a `timeoffset` query parameter (local offset from UTC in minutes)
    /// to every call when `true`.
    #[must_use]
    pub const fn time_offset(mut self, enabled: bool) -> Self {
        self.time_offset = Some(enabled);
        self
    }

    /// Replaces the decode-mode based query serializer.
    #[must_use]
    pub fn params_serializer<F>(mut self, serializer: F) -> Self
    where
        F: Fn(&Params) -> String + Send + Sync + 'static,
    {
        self.params_serializer = Some(Arc::new(serializer));
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params
            .get_or_insert_with(Params::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets the transport timeout for the whole request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets how request payloads are encoded.
    #[must_use]
    pub const fn body_encoding(mut self, encoding: BodyEncoding) -> Self {
        self.body_encoding = Some(encoding);
        self
    }

    /// Returns a new record with every field set on `overrides` replacing the
    /// field on `self`.
    #[must_use]
    pub fn merge(&self, overrides: &Self) -> Self {
        Self {
            headers: overrides.headers.clone().or_else(|| self.headers.clone()),
            trailing_slash: overrides.trailing_slash.or(self.trailing_slash),
            query_params_decode_mode: overrides
                .query_params_decode_mode
                .or(self.query_params_decode_mode),
            time_offset: overrides.time_offset.or(self.time_offset),
            params_serializer: overrides
                .params_serializer
                .clone()
                .or_else(|| self.params_serializer.clone()),
            params: overrides.params.clone().or_else(|| self.params.clone()),
            timeout: overrides.timeout.or(self.timeout),
            body_encoding: overrides.body_encoding.or(self.body_encoding),
        }
    }

    /// Returns the configured headers, if any.
    #[must_use]
    pub const fn headers_ref(&self) -> Option<&HashMap<String, String>> {
        self.headers.as_ref()
    }

    /// Returns whether a trailing slash is appended to resolved URLs.
    #[must_use]
    pub fn trailing_slash_enabled(&self) -> bool {
        self.trailing_slash.unwrap_or(false)
    }

    /// Returns the effective query decode mode.
    #[must_use]
    pub fn decode_mode(&self) -> QueryParamsDecodeMode {
        self.query_params_decode_mode.unwrap_or_default()
    }

    /// Returns whether the `timeoffset` parameter is injected.
    #[must_use]
    pub fn time_offset_enabled(&self) -> bool {
        self.time_offset.unwrap_or(false)
    }

    /// Returns the custom query serializer, if any.
    #[must_use]
    pub const fn params_serializer_ref(&self) -> Option<&ParamsSerializer> {
        self.params_serializer.as_ref()
    }

    /// Returns the configured query parameters, if any.
    #[must_use]
    pub const fn params_ref(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    /// Returns the transport timeout, if any.
    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the effective body encoding.
    #[must_use]
    pub fn body_encoding_or_default(&self) -> BodyEncoding {
        self.body_encoding.unwrap_or_default()
    }

    pub(crate) fn extend_headers<I, K, V>(&mut self, headers: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let target = self.headers.get_or_insert_with(HashMap::new);
        for (key, value) in headers {
            target.insert(key.into(), value.into());
        }
    }

    pub(crate) fn clear_headers(&mut self) {
        self.headers = None;
    }

    /// Drops the client-only settings, leaving what the transport needs.
    pub(crate) fn into_transport(self) -> TransportOptions {
        let Self {
            headers,
            trailing_slash: _,
            query_params_decode_mode: _,
            time_offset: _,
            params_serializer,
            params,
            timeout,
            body_encoding,
        } = self;

        TransportOptions {
            headers: headers.unwrap_or_default(),
            params_serializer,
            params: params.unwrap_or_default(),
            timeout,
            body_encoding: body_encoding.unwrap_or_default(),
        }
    }
}

/// The pass-through part of a merged option record.
pub(crate) struct TransportOptions {
    pub headers: HashMap<String, String>,
    pub params_serializer: Option<ParamsSerializer>,
    pub params: Params,
    pub timeout: Option<Duration>,
    pub body_encoding: BodyEncoding,
}
