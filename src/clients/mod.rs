//! The resource client and its building blocks.
//!
//! # Overview
//!
//! - [`ResourceClient`]: the async client exposing `get`, `post`, `put`,
//!   `patch` and `delete`
//! - [`UrlSource`] / [`UrlResolver`]: literal or asynchronously resolved base
//!   URLs
//! - [`ResourceResponse`]: decoded body annotated with `_status`
//! - [`ResourceError`] / [`RequestFailure`]: the `{ _status, data }` error
//!   envelope
//! - [`ErrorContext`]: what registered error handlers receive
//! - [`encode_query`], [`resolve_destination`], [`collapse_slashes`]: the pure
//!   helpers used to build URLs
//!
//! # Example
//!
//! ```rust,ignore
//! use resource_client::clients::{ResourceClient, UrlSource, ResolveError};
//!
//! let client = ResourceClient::new(UrlSource::resolver(|| async {
//!     Ok::<_, ResolveError>(discover_api_root().await)
//! }))?;
//!
//! let orders = client.get("orders", None, None).await?;
//! ```
//!
//! # Failure Behavior
//!
//! The client never retries. Network errors and non-2xx responses are passed
//! to every registered error handler and then returned as
//! [`ResourceError::Request`], whose `status` is the HTTP status code when the
//! server answered and a transport code (e.g. `ECONNREFUSED`) otherwise.

mod error_handlers;
mod errors;
mod http_request;
mod http_response;
mod path;
mod query;
mod resource_client;
mod url_source;

pub use error_handlers::{ErrorContext, ErrorHandler, ErrorHandlerId};
pub use errors::{FailureStatus, HttpResponseError, RequestFailure, ResourceError, TransportError};
pub use http_request::{BodyEncoding, HttpMethod};
pub use http_response::{HttpResponse, ResourceResponse, STATUS_FIELD};
pub use path::{collapse_slashes, resolve_destination};
pub use query::{encode_query, local_time_offset_minutes, TIME_OFFSET_PARAM};
pub use resource_client::{ResourceClient, ResourceClientBuilder};
pub use url_source::{ResolveError, UrlResolver, UrlSource};
