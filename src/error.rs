//! Error types for client configuration.
//!
//! This module contains the error type returned when building a
//! [`FetchConfig`](crate::FetchConfig) or one of its validated newtypes.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use graphql_fetch::{ConfigError, StorageKey};
//!
//! let result = StorageKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyStorageKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The credential storage key cannot be empty.
    #[error("Credential storage key cannot be empty. Please provide the key under which the access token is stored.")]
    EmptyStorageKey,

    /// Endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Please provide an http(s) URL (e.g., 'https://api.example.com/graphql').")]
    InvalidEndpointUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}
