//! The resource client.
//!
//! This module provides [`ResourceClient`], a thin wrapper over
//! [`reqwest::Client`] that normalizes how requests are built and how
//! responses and errors come back.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::clients::error_handlers::{ErrorContext, ErrorHandlerId, ErrorHandlers};
use crate::clients::errors::{HttpResponseError, RequestFailure, ResourceError, TransportError};
use crate::clients::http_request::{BodyEncoding, HttpMethod};
use crate::clients::http_response::{HttpResponse, ResourceResponse};
use crate::clients::path::{append_query, join_request_url, resolve_destination};
use crate::clients::query::{encode_query, local_time_offset_minutes, TIME_OFFSET_PARAM};
use crate::clients::url_source::{ResolveError, UrlSource};
use crate::config::{Params, QueryParamsDecodeMode, ResourceOptions};
use crate::resource::EntityResource;

/// Client for a REST resource.
///
/// Every call:
/// 1. merges the per-call [`ResourceOptions`] over the client defaults
/// 2. for GET and DELETE, merges the body fields into the query parameters
/// 3. resolves the base URL (awaiting the resolver if there is one) and joins
///    the path onto it, collapsing duplicate slashes
/// 4. adds `timeoffset` when enabled and encodes the query string
/// 5. sends the request and annotates object bodies with `_status`
///
/// Failures go through the registered error handlers and come back as
/// [`ResourceError::Request`].
///
/// # Thread Safety
///
/// `ResourceClient` is `Send + Sync`. Calls take `&self`; changing defaults
/// takes `&mut self`.
///
/// # Example
///
/// ```rust,ignore
/// use resource_client::{ResourceClient, ResourceOptions};
/// use serde_json::json;
///
/// let mut client = ResourceClient::new("https://api.example.com/v1")?;
/// client.set_headers([("Authorization", "Bearer token")]);
///
/// // GET /v1/users?active=true
/// let users = client.get("users", Some(&json!({"active": true})), None).await?;
///
/// // POST /v1/users/ with a JSON body
/// let options = ResourceOptions::new().trailing_slash(true);
/// let created = client
///     .post("users", Some(&json!({"name": "Ada"})), Some(&options))
///     .await?;
/// assert_eq!(created.get("_status"), Some(&json!(201)));
/// ```
#[derive(Debug)]
pub struct ResourceClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Where the base URL comes from.
    url_source: UrlSource,
    /// Options every call starts from.
    default_options: ResourceOptions,
    error_handlers: ErrorHandlers,
}

// Verify ResourceClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceClient>();
};

/// A request ready to hand to the transport.
#[derive(Debug)]
struct PreparedRequest {
    method: HttpMethod,
    url: reqwest::Url,
    headers: HashMap<String, String>,
    body: Option<String>,
    timeout: Option<Duration>,
}

impl ResourceClient {
    /// Creates a client with default options.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ClientBuild`] if the underlying HTTP client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(url_source: impl Into<UrlSource>) -> Result<Self, ResourceError> {
        Self::builder(url_source).build()
    }

    /// Creates a builder for a client rooted at `url_source`.
    #[must_use]
    pub fn builder(url_source: impl Into<UrlSource>) -> ResourceClientBuilder {
        ResourceClientBuilder::new(url_source.into())
    }

    /// Returns the default options.
    #[must_use]
    pub const fn default_options(&self) -> &ResourceOptions {
        &self.default_options
    }

    /// Returns the base-URL source.
    #[must_use]
    pub const fn url_source(&self) -> &UrlSource {
        &self.url_source
    }

    /// Resolves the current base URL.
    ///
    /// # Errors
    ///
    /// Returns the resolver's error when the source is asynchronous.
    pub async fn base_url(&self) -> Result<String, ResolveError> {
        self.url_source.resolve().await
    }

    /// Sends a GET request; `body` fields become query parameters.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn get(
        &self,
        path: &str,
        body: Option<&Value>,
        options: Option<&ResourceOptions>,
    ) -> Result<ResourceResponse, ResourceError> {
        self.request(HttpMethod::Get, path, body, options).await
    }

    /// Sends a POST request with `body` as the payload.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn post(
        &self,
        path: &str,
        body: Option<&Value>,
        options: Option<&ResourceOptions>,
    ) -> Result<ResourceResponse, ResourceError> {
        self.request(HttpMethod::Post, path, body, options).await
    }

    /// Sends a PUT request with `body` as the payload.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn put(
        &self,
        path: &str,
        body: Option<&Value>,
        options: Option<&ResourceOptions>,
    ) -> Result<ResourceResponse, ResourceError> {
        self.request(HttpMethod::Put, path, body, options).await
    }

    /// Sends a PATCH request with `body` as the payload.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn patch(
        &self,
        path: &str,
        body: Option<&Value>,
        options: Option<&ResourceOptions>,
    ) -> Result<ResourceResponse, ResourceError> {
        self.request(HttpMethod::Patch, path, body, options).await
    }

    /// Sends a DELETE request; `body` fields become query parameters.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn delete(
        &self,
        path: &str,
        body: Option<&Value>,
        options: Option<&ResourceOptions>,
    ) -> Result<ResourceResponse, ResourceError> {
        self.request(HttpMethod::Delete, path, body, options).await
    }

    /// Sends a request with any supported method.
    ///
    /// Neither `body` nor `options` is modified.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::BaseUrl`] if the base-URL resolver fails
    /// - [`ResourceError::InvalidUrl`] if the joined URL does not parse
    /// - [`ResourceError::Request`] if the transport fails or the server
    ///   answers with a non-2xx status
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
        options: Option<&ResourceOptions>,
    ) -> Result<ResourceResponse, ResourceError> {
        let request = self.prepare(method, path, body, options).await?;

        tracing::debug!("Sending {} request to {}", request.method, request.url);

        match self.execute(request).await {
            Ok(response) => Ok(ResourceResponse::from(response)),
            Err(error) => Err(self.fail(error)),
        }
    }

    /// Merges `headers` into the default headers.
    ///
    /// The headers are sent with every later call until
    /// [`clear_headers`](Self::clear_headers) is called or a call supplies its
    /// own `headers`.
    pub fn set_headers<I, K, V>(&mut self, headers: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.default_options.extend_headers(headers);
    }

    /// Removes all default headers.
    pub fn clear_headers(&mut self) {
        self.default_options.clear_headers();
    }

    /// Replaces the base-URL source.
    pub fn set_base_path(&mut self, url_source: impl Into<UrlSource>) {
        self.url_source = url_source.into();
        tracing::debug!("Resource client base URL source set to {:?}", self.url_source);
    }

    /// Joins `path_parts` onto `base_path` with `/`, collapsing duplicate
    /// slashes.
    ///
    /// ```rust
    /// use resource_client::ResourceClient;
    ///
    /// let url = ResourceClient::resolve_destination(&["users", "42", "roles"], "http://api//v1");
    /// assert_eq!(url, "http://api/v1/users/42/roles");
    /// ```
    #[must_use]
    pub fn resolve_destination<P: Display>(path_parts: &[P], base_path: &str) -> String {
        resolve_destination(path_parts, base_path)
    }

    /// Encodes `params` with the decode mode in effect for `options`.
    #[must_use]
    pub fn get_query_string(&self, params: &Params, options: Option<&ResourceOptions>) -> String {
        let mode = options.map_or_else(
            || self.default_options.decode_mode(),
            |o| self.default_options.merge(o).decode_mode(),
        );
        encode_query(params, mode)
    }

    /// Registers a handler called with every failed request.
    pub fn add_error_handler<F>(&mut self, handler: F) -> ErrorHandlerId
    where
        F: Fn(&ErrorContext<'_>) + Send + Sync + 'static,
    {
        self.error_handlers.add(Arc::new(handler))
    }

    /// Unregisters a handler. Returns `false` if it was not registered.
    pub fn remove_error_handler(&mut self, id: ErrorHandlerId) -> bool {
        self.error_handlers.remove(id)
    }

    /// Unregisters every handler.
    pub fn clear_error_handlers(&mut self) {
        self.error_handlers.clear();
    }

    /// Returns the number of registered error handlers.
    #[must_use]
    pub fn error_handler_count(&self) -> usize {
        self.error_handlers.len()
    }

    async fn prepare(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
        options: Option<&ResourceOptions>,
    ) -> Result<PreparedRequest, ResourceError> {
        let config = options.map_or_else(
            || self.default_options.clone(),
            |o| self.default_options.merge(o),
        );
        let trailing_slash = config.trailing_slash_enabled();
        let mode = config.decode_mode();
        let time_offset = config.time_offset_enabled();
        let mut transport = config.into_transport();

        let payload = if method.uses_body_as_query() {
            match body {
                Some(Value::Object(fields)) => transport
                    .params
                    .extend(fields.iter().map(|(k, v)| (k.clone(), v.clone()))),
                Some(Value::Null) | None => {}
                Some(other) => {
                    tracing::debug!("Ignoring non-object {} body: {}", method, other);
                }
            }
            None
        } else {
            body.map(|value| encode_body(value, transport.body_encoding, mode))
        };

        if time_offset {
            transport.params.insert(
                TIME_OFFSET_PARAM.to_string(),
                Value::from(local_time_offset_minutes()),
            );
        }

        let query = transport.params_serializer.as_ref().map_or_else(
            || encode_query(&transport.params, mode),
            |serialize| serialize(&transport.params),
        );

        if payload.is_some()
            && !transport
                .headers
                .keys()
                .any(|key| key.eq_ignore_ascii_case("content-type"))
        {
            transport.headers.insert(
                "Content-Type".to_string(),
                transport.body_encoding.as_content_type().to_string(),
            );
        }

        let base_url = self.url_source.resolve().await?;
        let url = append_query(join_request_url(&base_url, path, trailing_slash), &query);
        let url = reqwest::Url::parse(&url).map_err(|e| ResourceError::InvalidUrl {
            url,
            reason: e.to_string(),
        })?;

        Ok(PreparedRequest {
            method,
            url,
            headers: transport.headers,
            body: payload,
            timeout: transport.timeout,
        })
    }

    async fn execute(&self, request: PreparedRequest) -> Result<HttpResponse, TransportError> {
        let mut req_builder = self
            .client
            .request(request.method.as_reqwest(), request.url);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(timeout) = request.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = HttpResponse::collect_headers(res.headers());
        let body_text = res.text().await?;
        let response = HttpResponse::new(code, headers, HttpResponse::decode_body(&body_text));

        if response.is_ok() {
            Ok(response)
        } else {
            Err(HttpResponseError { code, response }.into())
        }
    }

    fn fail(&self, error: TransportError) -> ResourceError {
        self.error_handlers.notify(&error);
        let failure = RequestFailure::from(error);
        tracing::warn!(
            "Resource request failed with status {}: {}",
            failure.status,
            failure.data
        );
        ResourceError::Request(failure)
    }
}

impl EntityResource for ResourceClient {
    fn client(&self) -> &ResourceClient {
        self
    }
}

fn encode_body(body: &Value, encoding: BodyEncoding, mode: QueryParamsDecodeMode) -> String {
    match (encoding, body) {
        (BodyEncoding::Form, Value::Object(fields)) => encode_query(fields, mode),
        (BodyEncoding::Form, Value::String(text)) => text.clone(),
        _ => body.to_string(),
    }
}

/// Builder for [`ResourceClient`].
///
/// # Example
///
/// ```rust
/// use resource_client::{QueryParamsDecodeMode, ResourceClient, ResourceOptions};
///
/// let client = ResourceClient::builder("https://api.example.com")
///     .default_options(
///         ResourceOptions::new()
///             .header("Accept", "application/json")
///             .query_params_decode_mode(QueryParamsDecodeMode::Brackets),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     client.default_options().decode_mode(),
///     QueryParamsDecodeMode::Brackets
/// );
/// ```
#[derive(Debug)]
pub struct ResourceClientBuilder {
    url_source: UrlSource,
    default_options: ResourceOptions,
    http_client: Option<reqwest::Client>,
}

impl ResourceClientBuilder {
    fn new(url_source: UrlSource) -> Self {
        Self {
            url_source,
            default_options: ResourceOptions::default(),
            http_client: None,
        }
    }

    /// Sets the options every call starts from.
    #[must_use]
    pub fn default_options(mut self, options: ResourceOptions) -> Self {
        self.default_options = options;
        self
    }

    /// Uses a pre-configured reqwest client (proxies, pools, TLS roots).
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ClientBuild`] if no client was supplied and
    /// the default one cannot be created.
    pub fn build(self) -> Result<ResourceClient, ResourceError> {
        let client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .use_rustls_tls()
                .build()
                .map_err(ResourceError::ClientBuild)?,
        };

        Ok(ResourceClient {
            client,
            url_source: self.url_source,
            default_options: self.default_options,
            error_handlers: ErrorHandlers::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base: &str) -> ResourceClient {
        ResourceClient::new(base).unwrap()
    }

    #[tokio::test]
    async fn test_prepare_joins_url_and_collapses_slashes() {
        let client = client("http://api.test//v1/");
        let request = client
            .prepare(HttpMethod::Get, "/users//42", None, None)
            .await
            .unwrap();
        assert_eq!(request.url.as_str(), "http://api.test/v1/users/42");
    }

    #[tokio::test]
    async fn test_prepare_get_merges_body_into_params() {
        let client = client("http://api.test");
        let body = json!({"page": 2, "q": "rust"});
        let options = ResourceOptions::new().param("q", "old").param("limit", 10);

        let request = client
            .prepare(HttpMethod::Get, "items", Some(&body), Some(&options))
            .await
            .unwrap();

        assert_eq!(request.url.query(), Some("q=rust&limit=10&page=2"));
        assert!(request.body.is_none());
        assert_eq!(body, json!({"page": 2, "q": "rust"}));
        assert_eq!(options.params_ref().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_prepare_post_keeps_body_as_payload() {
        let client = client("http://api.test");
        let body = json!({"name": "Ada"});

        let request = client
            .prepare(HttpMethod::Post, "users", Some(&body), None)
            .await
            .unwrap();

        assert_eq!(request.url.query(), None);
        assert_eq!(request.body.as_deref(), Some(r#"{"name":"Ada"}"#));
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_prepare_form_body_uses_decode_mode() {
        let client = client("http://api.test");
        let body = json!({"tags": ["a", "b"], "name": "x y"});
        let options = ResourceOptions::new()
            .body_encoding(BodyEncoding::Form)
            .query_params_decode_mode(QueryParamsDecodeMode::Repeat);

        let request = client
            .prepare(HttpMethod::Put, "things", Some(&body), Some(&options))
            .await
            .unwrap();

        assert_eq!(request.body.as_deref(), Some("tags=a&tags=b&name=x%20y"));
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/x-www-form-urlencoded")
        );
    }

    #[tokio::test]
    async fn test_prepare_keeps_explicit_content_type() {
        let client = client("http://api.test");
        let options = ResourceOptions::new().header("content-type", "application/vnd.api+json");

        let request = client
            .prepare(HttpMethod::Patch, "x", Some(&json!({})), Some(&options))
            .await
            .unwrap();

        assert_eq!(request.headers.len(), 1);
        assert_eq!(
            request.headers.get("content-type").map(String::as_str),
            Some("application/vnd.api+json")
        );
    }

    #[tokio::test]
    async fn test_prepare_trailing_slash() {
        let client = client("http://api.test");
        let options = ResourceOptions::new().trailing_slash(true);
        let request = client
            .prepare(HttpMethod::Delete, "items/3", None, Some(&options))
            .await
            .unwrap();
        assert_eq!(request.url.as_str(), "http://api.test/items/3/");
    }

    #[tokio::test]
    async fn test_prepare_time_offset() {
        let client = client("http://api.test");
        let options = ResourceOptions::new().time_offset(true);
        let request = client
            .prepare(HttpMethod::Post, "items", None, Some(&options))
            .await
            .unwrap();
        let expected = format!("timeoffset={}", local_time_offset_minutes());
        assert_eq!(request.url.query(), Some(expected.as_str()));
    }

    #[tokio::test]
    async fn test_prepare_custom_serializer_wins() {
        let client = client("http://api.test");
        let options = ResourceOptions::new()
            .param("a", 1)
            .params_serializer(|params| format!("count={}", params.len()));
        let request = client
            .prepare(HttpMethod::Get, "items", Some(&json!({"b": 2})), Some(&options))
            .await
            .unwrap();
        assert_eq!(request.url.query(), Some("count=2"));
    }

    #[tokio::test]
    async fn test_prepare_rejects_relative_base() {
        let client = client("not a url");
        let result = client.prepare(HttpMethod::Get, "items", None, None).await;
        assert!(matches!(result, Err(ResourceError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_prepare_ignores_non_object_query_body() {
        let client = client("http://api.test");
        let request = client
            .prepare(HttpMethod::Get, "items", Some(&json!([1, 2])), None)
            .await
            .unwrap();
        assert_eq!(request.url.query(), None);
    }

    #[test]
    fn test_set_and_clear_headers() {
        let mut client = client("http://api.test");
        client.set_headers([("Authorization", "Bearer a")]);
        client.set_headers([("X-Tenant", "t1")]);

        let headers = client.default_options().headers_ref().unwrap();
        assert_eq!(headers.len(), 2);

        client.clear_headers();
        assert!(client.default_options().headers_ref().is_none());
    }

    #[tokio::test]
    async fn test_set_base_path_replaces_source() {
        let mut client = client("http://old.test");
        client.set_base_path("http://new.test");
        assert_eq!(client.base_url().await.unwrap(), "http://new.test");
    }

    #[test]
    fn test_get_query_string_uses_override_mode() {
        let client = client("http://api.test");
        let params = json!({"ids": [1, 2]});
        let params = params.as_object().unwrap();

        assert_eq!(client.get_query_string(params, None), "ids=1,2");
        let options = ResourceOptions::new().query_params_decode_mode(QueryParamsDecodeMode::Indices);
        assert_eq!(
            client.get_query_string(params, Some(&options)),
            "ids[0]=1&ids[1]=2"
        );
    }

    #[test]
    fn test_error_handler_registration() {
        let mut client = client("http://api.test");
        let id = client.add_error_handler(|_| {});
        assert_eq!(client.error_handler_count(), 1);
        assert!(client.remove_error_handler(id));
        client.add_error_handler(|_| {});
        client.clear_error_handlers();
        assert_eq!(client.error_handler_count(), 0);
    }

    #[test]
    fn test_encode_body_variants() {
        let mode = QueryParamsDecodeMode::Comma;
        assert_eq!(encode_body(&json!([1]), BodyEncoding::Json, mode), "[1]");
        assert_eq!(encode_body(&json!("a=b"), BodyEncoding::Form, mode), "a=b");
        assert_eq!(
            encode_body(&json!({"a": [1, 2]}), BodyEncoding::Form, mode),
            "a=1,2"
        );
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResourceClient>();
    }
}
