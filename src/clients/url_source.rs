//! Base-URL sources.
//!
//! A [`ResourceClient`](crate::ResourceClient) resolves its base URL before
//! every call. The source is either a literal string or a [`UrlResolver`]
//! that is awaited each time, which allows the base URL to come from service
//! discovery, a config endpoint, or anything else asynchronous.
//!
//! # Example
//!
//! ```rust
//! use resource_client::clients::{ResolveError, UrlSource};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let literal = UrlSource::from("https://api.example.com");
//! assert_eq!(literal.resolve().await.unwrap(), "https://api.example.com");
//!
//! let dynamic = UrlSource::resolver(|| async {
//!     Ok::<_, ResolveError>("https://eu.api.example.com".to_string())
//! });
//! assert_eq!(dynamic.resolve().await.unwrap(), "https://eu.api.example.com");
//! # }
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Error returned by a [`UrlResolver`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ResolveError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl ResolveError {
    /// Creates an error with a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error with a message and an underlying cause.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Asynchronously produces a base URL.
///
/// Implemented for every `Fn() -> impl Future<Output = Result<String, ResolveError>>`
/// closure, so most callers never implement it by hand.
#[async_trait]
pub trait UrlResolver: Send + Sync {
    /// Resolves the base URL.
    async fn resolve(&self) -> Result<String, ResolveError>;
}

#[async_trait]
impl<F, Fut> UrlResolver for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, ResolveError>> + Send,
{
    async fn resolve(&self) -> Result<String, ResolveError> {
        (self)().await
    }
}

/// Where the base URL comes from.
#[derive(Clone)]
pub enum UrlSource {
    /// A fixed base URL.
    Static(String),
    /// A resolver awaited before every call.
    Resolver(Arc<dyn UrlResolver>),
}

impl UrlSource {
    /// Wraps a resolver.
    #[must_use]
    pub fn resolver<R: UrlResolver + 'static>(resolver: R) -> Self {
        Self::Resolver(Arc::new(resolver))
    }

    /// Returns the base URL, awaiting the resolver when there is one.
    ///
    /// # Errors
    ///
    /// Returns the resolver's [`ResolveError`].
    pub async fn resolve(&self) -> Result<String, ResolveError> {
        match self {
            Self::Static(url) => Ok(url.clone()),
            Self::Resolver(resolver) => resolver.resolve().await,
        }
    }
}

impl fmt::Debug for UrlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(url) => f.debug_tuple("Static").field(url).finish(),
            Self::Resolver(_) => f.debug_tuple("Resolver").field(&"<resolver>").finish(),
        }
    }
}

impl From<&str> for UrlSource {
    fn from(url: &str) -> Self {
        Self::Static(url.to_string())
    }
}

impl From<String> for UrlSource {
    fn from(url: String) -> Self {
        Self::Static(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingResolver {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl UrlResolver for CountingResolver {
        async fn resolve(&self) -> Result<String, ResolveError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("http://host-{n}"))
        }
    }

    #[tokio::test]
    async fn test_static_source_resolves_to_itself() {
        let source = UrlSource::from("http://localhost:8080");
        assert_eq!(source.resolve().await.unwrap(), "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_resolver_is_awaited_on_every_call() {
        let source = UrlSource::resolver(CountingResolver {
            calls: AtomicUsize::new(0),
        });
        assert_eq!(source.resolve().await.unwrap(), "http://host-0");
        assert_eq!(source.resolve().await.unwrap(), "http://host-1");
    }

    #[tokio::test]
    async fn test_closure_resolver() {
        let source =
            UrlSource::resolver(|| async { Ok::<_, ResolveError>("http://closure".to_string()) });
        assert_eq!(source.resolve().await.unwrap(), "http://closure");
    }

    #[tokio::test]
    async fn test_resolver_error_propagates() {
        let source = UrlSource::resolver(|| async {
            Err::<String, _>(ResolveError::with_source(
                "discovery unavailable",
                std::io::Error::new(std::io::ErrorKind::Other, "timeout"),
            ))
        });
        let error = source.resolve().await.unwrap_err();
        assert_eq!(error.to_string(), "discovery unavailable");
        assert!(StdError::source(&error).is_some());
    }

    #[test]
    fn test_debug_output() {
        let source = UrlSource::resolver(|| async { Ok::<_, ResolveError>(String::new()) });
        assert_eq!(format!("{source:?}"), "Resolver(\"<resolver>\")");
        assert_eq!(
            format!("{:?}", UrlSource::from("http://a")),
            "Static(\"http://a\")"
        );
    }
}
