//! HTTP response types.
//!
//! [`HttpResponse`] is the decoded transport response; [`ResourceResponse`]
//! is what successful resource calls return, with the status code attached to
//! object bodies under [`STATUS_FIELD`].

use std::collections::HashMap;

use serde_json::Value;

/// Field added to object bodies (and used by error envelopes) for the status.
pub const STATUS_FIELD: &str = "_status";

/// A decoded HTTP response.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded body: JSON when it parses, a string otherwise, `null` when
    /// empty.
    pub body: Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Value) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Decodes a raw body: JSON when it parses, otherwise the text itself.
    #[must_use]
    pub fn decode_body(text: &str) -> Value {
        if text.is_empty() {
            return Value::Null;
        }
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
    }

    pub(crate) fn collect_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

/// The result of a successful resource call.
///
/// When the decoded body is a JSON object it carries an extra `_status` field
/// holding the HTTP status code. Any other body (array, string, number,
/// `null`) is returned unchanged.
///
/// # Example
///
/// ```rust
/// use resource_client::clients::{HttpResponse, ResourceResponse};
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let response = ResourceResponse::from(HttpResponse::new(
///     201,
///     HashMap::new(),
///     json!({"id": 1}),
/// ));
///
/// assert_eq!(response.body(), &json!({"id": 1, "_status": 201}));
/// assert_eq!(response.status(), 201);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceResponse {
    status: u16,
    headers: HashMap<String, Vec<String>>,
    body: Value,
}

impl ResourceResponse {
    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the response headers.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, Vec<String>> {
        &self.headers
    }

    /// Returns the (annotated) body.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }

    /// Consumes the response and returns the (annotated) body.
    #[must_use]
    pub fn into_body(self) -> Value {
        self.body
    }

    /// Looks up a top-level field of an object body.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }
}

impl From<HttpResponse> for ResourceResponse {
    fn from(response: HttpResponse) -> Self {
        let HttpResponse {
            code,
            headers,
            mut body,
        } = response;

        if let Value::Object(map) = &mut body {
            map.insert(STATUS_FIELD.to_string(), Value::from(code));
        }

        Self {
            status: code,
            headers,
            body,
        }
    }
}
