//! GraphQL fetch client.
//!
//! This module provides the [`GraphqlClient`] type, the entry point that sends
//! an authorized request and turns GraphQL error bodies into
//! [`FetchError::Graphql`].

use std::sync::Arc;

use serde_json::Value;

use crate::auth::CredentialProvider;
use crate::clients::graphql::extract_graphql_error;
use crate::clients::{FetchError, FetchResponse, HttpClient, HttpMethod, RequestOptions};
use crate::config::FetchConfig;

/// GraphQL-aware fetch client.
///
/// Every call goes through [`HttpClient::send`], so it carries the current
/// bearer token and the fixed transport headers. The response body is then
/// checked with [`extract_graphql_error`]:
///
/// - an `errors` key or an empty/falsy body fails with [`FetchError::Graphql`]
/// - anything else returns the [`FetchResponse`], body still readable
///
/// The HTTP status is not consulted: a 500 whose body has no `errors` key is
/// returned as a response, a 200 carrying `errors` is a failure.
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use graphql_fetch::{
///     EndpointUrl, FetchConfig, FetchError, GraphqlClient, MemoryCredentialStore,
///     StorageKey, StoredCredential,
/// };
/// use serde_json::json;
///
/// let store = MemoryCredentialStore::new();
/// let config = FetchConfig::builder()
///     .endpoint(EndpointUrl::new("https://api.example.com/graphql")?)
///     .build();
/// let provider = StoredCredential::new(store.clone(), config.credential_key().clone());
/// let client = GraphqlClient::try_new(Arc::new(provider), config)?;
///
/// match client.query("query { me { id } }", Some(json!({}))).await {
///     Ok(response) => println!("{}", response.text()),
///     Err(FetchError::Graphql(e)) => println!("{} ({})", e.message, e.status_code),
///     Err(e) => return Err(e.into()),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http_client: HttpClient,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a client over an existing [`HttpClient`].
    #[must_use]
    pub const fn from_http_client(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// Creates a client with a default reqwest client.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the TLS backend cannot be initialized.
    pub fn try_new(
        credentials: Arc<dyn CredentialProvider>,
        config: FetchConfig,
    ) -> Result<Self, FetchError> {
        Ok(Self::from_http_client(HttpClient::new(credentials, config)?))
    }

    /// Creates a client sharing the connection pool of `client`.
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        credentials: Arc<dyn CredentialProvider>,
        config: FetchConfig,
    ) -> Self {
        Self::from_http_client(HttpClient::with_client(client, credentials, config))
    }

    /// Returns the underlying authorized HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Sends an authorized request and checks the body for GraphQL errors.
    ///
    /// An empty or whitespace-only body is treated as JSON `null`, which is
    /// falsy and therefore an unknown error.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Graphql`] when the body carries `errors` or is falsy
    /// - [`FetchError::InvalidJson`] when the body is not JSON
    /// - [`FetchError::Network`] / [`FetchError::Credential`] from the request itself
    pub async fn fetch(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<FetchResponse, FetchError> {
        let response = self.http_client.send(url, options).await?;
        let response = FetchResponse::from_reqwest(response).await?;
        let status = response.status().as_u16();

        let body = if response.bytes().iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            response
                .json::<Value>()
                .map_err(|source| FetchError::InvalidJson { status, source })?
        };

        if let Some(error) = extract_graphql_error(&body) {
            tracing::debug!(
                "GraphQL response from {} reported an error (status {}): {}",
                url,
                error.status_code,
                error.message
            );
            return Err(error.into());
        }

        Ok(response)
    }

    /// Posts a GraphQL operation to the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingEndpoint`] when the configuration has no
    /// endpoint, otherwise the errors of [`fetch`](Self::fetch).
    pub async fn query(
        &self,
        query: &str,
        variables: Option<Value>,
    ) -> Result<FetchResponse, FetchError> {
        let endpoint = self
            .http_client
            .config()
            .endpoint()
            .ok_or(FetchError::MissingEndpoint)?
            .clone();
        self.query_at(endpoint.as_ref(), query, variables).await
    }

    /// Posts a GraphQL operation to `url`.
    ///
    /// The body is `{"query": ..., "variables": ...}`.
    ///
    /// # Errors
    ///
    /// See [`fetch`](Self::fetch).
    pub async fn query_at(
        &self,
        url: &str,
        query: &str,
        variables: Option<Value>,
    ) -> Result<FetchResponse, FetchError> {
        let body = serde_json::json!({
            "query": query,
            "variables": variables
        });
        let options = RequestOptions::builder(HttpMethod::Post).json(&body).build();
        self.fetch(url, &options).await
    }
}
