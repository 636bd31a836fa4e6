//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// The key under which the access token lives in a credential store.
///
/// # Example
///
/// ```rust
/// use graphql_fetch::StorageKey;
///
/// let key = StorageKey::new("access_token").unwrap();
/// assert_eq!(key.as_ref(), "access_token");
/// assert_eq!(StorageKey::default(), key);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Key used when none is configured.
    pub const DEFAULT: &'static str = "access_token";

    /// Creates a new validated storage key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyStorageKey`] if the key is empty or whitespace.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(Self(key))
    }
}

impl Default for StorageKey {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated GraphQL endpoint URL.
///
/// Only `http` and `https` URLs with a non-empty host are accepted.
///
/// # Example
///
/// ```rust
/// use graphql_fetch::EndpointUrl;
///
/// let url = EndpointUrl::new("https://api.example.com/graphql").unwrap();
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "api.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl EndpointUrl {
    /// Creates a new validated endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpointUrl`] if the URL has no `http`/`https`
    /// scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url: String = url.into();
        let url = url.trim().to_string();
        let invalid = || ConfigError::InvalidEndpointUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);
        if host_end == host_start {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for EndpointUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
