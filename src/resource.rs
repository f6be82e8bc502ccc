//! Entity resources built on top of [`ResourceClient`].
//!
//! A concrete API resource wraps a client and knows how to list its
//! entities. [`EntityResource::get_all_entities`] has no meaningful default:
//! unless a resource overrides it, calling it fails with
//! [`ResourceError::NotImplemented`].
//!
//! # Example
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use resource_client::{EntityResource, ResourceClient, ResourceError, ResourceResponse};
//!
//! struct Users {
//!     client: ResourceClient,
//! }
//!
//! #[async_trait]
//! impl EntityResource for Users {
//!     fn client(&self) -> &ResourceClient {
//!         &self.client
//!     }
//!
//!     async fn get_all_entities(&self) -> Result<ResourceResponse, ResourceError> {
//!         self.client.get("users", None, None).await
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::clients::{ResourceClient, ResourceError, ResourceResponse};

/// A logical API endpoint exposing CRUD-style verbs through a client.
#[async_trait]
pub trait EntityResource: Send + Sync {
    /// Returns the client used for requests.
    fn client(&self) -> &ResourceClient;

    /// Fetches every entity of this resource.
    ///
    /// # Errors
    ///
    /// The default implementation always returns
    /// [`ResourceError::NotImplemented`].
    async fn get_all_entities(&self) -> Result<ResourceResponse, ResourceError> {
        Err(ResourceError::NotImplemented {
            resource: std::any::type_name::<Self>(),
            method: "get_all_entities",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Reports {
        client: ResourceClient,
    }

    impl EntityResource for Reports {
        fn client(&self) -> &ResourceClient {
            &self.client
        }
    }

    #[tokio::test]
    async fn test_default_get_all_entities_fails() {
        let reports = Reports {
            client: ResourceClient::new("http://api.test").unwrap(),
        };

        let error = reports.get_all_entities().await.unwrap_err();
        assert!(matches!(
            error,
            ResourceError::NotImplemented {
                method: "get_all_entities",
                ..
            }
        ));
        assert!(error.to_string().contains("Reports::get_all_entities()"));
    }

    #[tokio::test]
    async fn test_client_itself_is_abstract() {
        let client = ResourceClient::new("http://api.test").unwrap();
        let error = client.get_all_entities().await.unwrap_err();
        assert!(error.to_string().contains("ResourceClient::get_all_entities()"));
        assert!(std::ptr::eq(client.client(), &client));
    }
}
