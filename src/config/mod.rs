//! Configuration types for the GraphQL fetch client.
//!
//! # Overview
//!
//! - [`FetchConfig`]: settings shared by every request a client issues
//! - [`FetchConfigBuilder`]: a builder for constructing [`FetchConfig`] instances
//! - [`EndpointUrl`]: a validated GraphQL endpoint URL
//! - [`StorageKey`]: the key the access token is read from
//!
//! # Example
//!
//! ```rust
//! use graphql_fetch::{EndpointUrl, FetchConfig};
//!
//! let config = FetchConfig::builder()
//!     .endpoint(EndpointUrl::new("https://api.example.com/graphql").unwrap())
//!     .user_agent_prefix("MyApp/1.0")
//!     .build();
//!
//! assert_eq!(config.credential_key().as_ref(), "access_token");
//! ```

mod newtypes;

pub use newtypes::{EndpointUrl, StorageKey};

/// Configuration for [`HttpClient`](crate::HttpClient) and
/// [`GraphqlClient`](crate::GraphqlClient).
///
/// `FetchConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug, Default)]
pub struct FetchConfig {
    endpoint: Option<EndpointUrl>,
    credential_key: StorageKey,
    user_agent_prefix: Option<String>,
}

impl FetchConfig {
    /// Creates a new builder for constructing a `FetchConfig`.
    #[must_use]
    pub fn builder() -> FetchConfigBuilder {
        FetchConfigBuilder::new()
    }

    /// Returns the default GraphQL endpoint, if configured.
    #[must_use]
    pub const fn endpoint(&self) -> Option<&EndpointUrl> {
        self.endpoint.as_ref()
    }

    /// Returns the key the access token is read from.
    #[must_use]
    pub const fn credential_key(&self) -> &StorageKey {
        &self.credential_key
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FetchConfig>();
};

/// Builder for constructing [`FetchConfig`] instances.
///
/// No field is required.
///
/// # Defaults
///
/// - `endpoint`: `None`
/// - `credential_key`: `access_token`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct FetchConfigBuilder {
    endpoint: Option<EndpointUrl>,
    credential_key: Option<StorageKey>,
    user_agent_prefix: Option<String>,
}

impl FetchConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default endpoint used by [`GraphqlClient::query`](crate::GraphqlClient::query).
    #[must_use]
    pub fn endpoint(mut self, endpoint: EndpointUrl) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the key the access token is read from.
    #[must_use]
    pub fn credential_key(mut self, key: StorageKey) -> Self {
        self.credential_key = Some(key);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`FetchConfig`].
    ///
    /// Every field is either validated on construction or optional, so this
    /// cannot fail.
    #[must_use]
    pub fn build(self) -> FetchConfig {
        FetchConfig {
            endpoint: self.endpoint,
            credential_key: self.credential_key.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
        }
    }
}
