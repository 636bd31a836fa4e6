//! Credential types for authorized requests.
//!
//! # Overview
//!
//! - [`AccessToken`]: an opaque bearer token with masked debug output
//! - [`CredentialProvider`]: supplies the current token on demand
//! - [`CredentialStore`]: keyed storage an authentication flow writes into
//! - [`MemoryCredentialStore`] / [`FileCredentialStore`]: store implementations
//! - [`StoredCredential`]: a provider that reads one key from a store
//!
//! Clients hold a provider, never a token: the provider is asked on every
//! request, so a token written by a login or refresh flow is used by the very
//! next call, and a removed token turns requests into `Bearer null`.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use graphql_fetch::{FetchConfig, GraphqlClient, MemoryCredentialStore, StorageKey, StoredCredential};
//!
//! let store = MemoryCredentialStore::new();
//! let provider = StoredCredential::new(store.clone(), StorageKey::default());
//! let _client = GraphqlClient::try_new(Arc::new(provider), FetchConfig::default()).unwrap();
//!
//! // Later, after the user logs in:
//! store.set("access_token", "eyJ...").unwrap();
//! ```

mod credential;
mod store;

pub use credential::{AccessToken, CredentialError, CredentialProvider, StoredCredential};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
