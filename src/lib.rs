//! # Resource Client
//!
//! A thin convenience layer over [`reqwest`] for talking to REST resources.
//!
//! ## Overview
//!
//! The crate does not implement networking, retries or caching; it normalizes
//! how requests are described and how results come back:
//!
//! - Paths are joined onto a base URL (literal or resolved asynchronously per
//!   call) with duplicate slashes collapsed
//! - Query parameters are encoded according to a [`QueryParamsDecodeMode`]
//! - Default headers are merged with per-call options
//! - An optional `timeoffset` parameter carries the local timezone offset
//! - Object responses are annotated with their `_status`
//! - Failures come back as a `{ _status, data }` envelope after being passed to
//!   registered error handlers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use resource_client::{ResourceClient, ResourceOptions, QueryParamsDecodeMode};
//! use serde_json::json;
//!
//! let mut client = ResourceClient::builder("https://api.example.com/v2")
//!     .default_options(
//!         ResourceOptions::new()
//!             .query_params_decode_mode(QueryParamsDecodeMode::Brackets)
//!             .time_offset(true),
//!     )
//!     .build()?;
//!
//! client.set_headers([("Authorization", "Bearer <token>")]);
//!
//! // GET /v2/orders?status[]=open&status[]=held&timeoffset=120
//! let orders = client
//!     .get("orders", Some(&json!({"status": ["open", "held"]})), None)
//!     .await?;
//! println!("{} -> {}", orders.status(), orders.body());
//! ```
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use resource_client::{FailureStatus, ResourceError};
//!
//! client.add_error_handler(|ctx| {
//!     if ctx.parsed_body.map(|r| r.code) == Some(401) {
//!         tracing::warn!("session expired");
//!     }
//! });
//!
//! if let Err(ResourceError::Request(failure)) = client.delete("orders/9", None, None).await {
//!     assert_eq!(failure.status, FailureStatus::Code(404));
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: defaults live on each client instance
//! - **Inputs are never mutated**: bodies and options are taken by reference
//! - **Thread-safe**: all types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod resource;

// Re-export public types at crate root for convenience
pub use clients::{
    BodyEncoding, ErrorContext, ErrorHandlerId, FailureStatus, HttpMethod, HttpResponse,
    RequestFailure, ResolveError, ResourceClient, ResourceClientBuilder, ResourceError,
    ResourceResponse, TransportError, UrlResolver, UrlSource,
};
pub use config::{Params, ParamsSerializer, QueryParamsDecodeMode, ResourceOptions};
pub use error::ConfigError;
pub use resource::EntityResource;
