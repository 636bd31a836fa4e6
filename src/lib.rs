//! # graphql-fetch
//!
//! Authorized fetch for GraphQL-over-HTTP APIs.
//!
//! ## Overview
//!
//! This crate wraps an HTTP request with two concerns:
//! - Injecting `Authorization: Bearer <token>` from a [`CredentialProvider`]
//!   that is consulted on every call, plus the `Content-Type` and
//!   `Apollo-Require-Preflight` headers GraphQL gateways expect
//! - Inspecting the response body and turning GraphQL `errors` (which arrive
//!   with HTTP 200) into a typed [`FetchError::Graphql`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use graphql_fetch::{
//!     FetchConfig, FetchError, GraphqlClient, HttpMethod, MemoryCredentialStore,
//!     RequestOptions, StorageKey, StoredCredential,
//! };
//!
//! let store = MemoryCredentialStore::new();
//! store.set("access_token", "eyJ...")?;
//!
//! let provider = StoredCredential::new(store, StorageKey::default());
//! let client = GraphqlClient::try_new(Arc::new(provider), FetchConfig::default())?;
//!
//! let options = RequestOptions::builder(HttpMethod::Post)
//!     .body(r#"{"query":"{ me { id } }"}"#)
//!     .build();
//!
//! match client.fetch("https://api.example.com/graphql", &options).await {
//!     Ok(response) => println!("{}", response.text()),
//!     Err(FetchError::Graphql(e)) => println!("{} ({})", e.message, e.status_code),
//!     Err(e) => eprintln!("request failed: {e}"),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: credentials come from an injected provider
//! - **No hidden retries**: one request per call, failures are returned as-is
//! - **Errors as values**: GraphQL errors are a `Result` variant, not a panic
//! - **Thread-safe**: all client types are `Send + Sync`

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;

pub use auth::{
    AccessToken, CredentialError, CredentialProvider, CredentialStore, FileCredentialStore,
    MemoryCredentialStore, StoredCredential,
};
pub use config::{EndpointUrl, FetchConfig, FetchConfigBuilder, StorageKey};
pub use error::ConfigError;

pub use clients::{
    extract_graphql_error, merge_headers, FetchError, FetchResponse, GraphqlClient, HttpClient,
    HttpMethod, NormalizedError, RequestOptions, RequestOptionsBuilder,
};
