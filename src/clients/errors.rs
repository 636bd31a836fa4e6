//! Error types returned by the fetch clients.
//!
//! # Error Handling
//!
//! Every failure a fetch can end in is a [`FetchError`] variant:
//!
//! - [`FetchError::Graphql`]: the server answered, but the body reports
//!   GraphQL errors (or was empty/falsy)
//! - [`FetchError::InvalidJson`]: the body was not JSON
//! - [`FetchError::Network`]: the transport failed
//! - [`FetchError::Credential`]: the credential store could not be read
//! - [`FetchError::MissingEndpoint`]: `query` was called without an endpoint
//!
//! # Example
//!
//! ```rust,ignore
//! use graphql_fetch::FetchError;
//!
//! match client.fetch(url, options).await {
//!     Ok(response) => println!("{}", response.text()),
//!     Err(FetchError::Graphql(e)) => {
//!         println!("GraphQL error {}: {}", e.status_code, e.message);
//!     }
//!     Err(FetchError::InvalidJson { status, .. }) => {
//!         println!("Non-JSON body with status {status}");
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::auth::CredentialError;
use crate::clients::graphql::NormalizedError;

/// Unified error type for fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The response body reported an application-level error.
    #[error(transparent)]
    Graphql(#[from] NormalizedError),

    /// The response body could not be parsed as JSON.
    #[error("Response body with status {status} is not valid JSON: {source}")]
    InvalidJson {
        /// HTTP status of the response.
        status: u16,
        /// The underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The credential provider failed.
    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// A convenience query was issued without an endpoint.
    #[error("No GraphQL endpoint configured. Set one with FetchConfig::builder().endpoint(..) or use query_at.")]
    MissingEndpoint,
}

impl FetchError {
    /// Returns the normalized GraphQL error, if this is one.
    #[must_use]
    pub const fn as_graphql(&self) -> Option<&NormalizedError> {
        match self {
            Self::Graphql(e) => Some(e),
            _ => None,
        }
    }
}
