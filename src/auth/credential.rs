//! Access tokens and the providers that supply them.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::auth::store::CredentialStore;
use crate::config::StorageKey;

/// Errors raised while reading a credential.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The backing storage could not be read.
    #[error("Failed to read credential store at '{}': {source}", .path.display())]
    Io {
        /// Location of the store.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The backing storage does not hold a JSON object of strings.
    #[error("Credential store at '{}' is malformed: {source}", .path.display())]
    Malformed {
        /// Location of the store.
        path: PathBuf,
        /// The underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// A lock guarding an in-memory store was poisoned by a panicking writer.
    #[error("Credential store lock was poisoned")]
    Poisoned,
}

/// An opaque bearer token.
///
/// # Security
///
/// The `Debug` implementation masks the token so it never ends up in logs.
///
/// ```rust
/// use graphql_fetch::AccessToken;
///
/// let token = AccessToken::new("secret-token");
/// assert_eq!(format!("{token:?}"), "AccessToken(*****)");
/// assert_eq!(token.as_ref(), "secret-token");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(*****)")
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for AccessToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Supplies the current access token on demand.
///
/// Implementations are asked once per request and must not cache on the
/// client's behalf: whatever the authentication flow last wrote is what the
/// next request sends. `Ok(None)` means "unauthenticated".
pub trait CredentialProvider: Send + Sync + fmt::Debug {
    /// Returns the current token, if any.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] if the underlying storage cannot be read.
    fn access_token(&self) -> Result<Option<AccessToken>, CredentialError>;
}

/// A fixed token, useful for service accounts and tests.
impl CredentialProvider for AccessToken {
    fn access_token(&self) -> Result<Option<AccessToken>, CredentialError> {
        Ok(Some(self.clone()))
    }
}

/// No credential at all; every request goes out as `Bearer null`.
impl CredentialProvider for () {
    fn access_token(&self) -> Result<Option<AccessToken>, CredentialError> {
        Ok(None)
    }
}

/// Reads a single key from a [`CredentialStore`] on every call.
///
/// # Example
///
/// ```rust
/// use graphql_fetch::{CredentialProvider, MemoryCredentialStore, StorageKey, StoredCredential};
///
/// let store = MemoryCredentialStore::new();
/// let provider = StoredCredential::new(store.clone(), StorageKey::default());
/// assert!(provider.access_token().unwrap().is_none());
///
/// store.set("access_token", "abc").unwrap();
/// assert_eq!(provider.access_token().unwrap().unwrap().as_ref(), "abc");
/// ```
#[derive(Clone, Debug)]
pub struct StoredCredential<S> {
    store: S,
    key: StorageKey,
}

impl<S: CredentialStore> StoredCredential<S> {
    /// Creates a provider reading `key` from `store`.
    #[must_use]
    pub const fn new(store: S, key: StorageKey) -> Self {
        Self { store, key }
    }

    /// Returns the key this provider reads.
    #[must_use]
    pub const fn key(&self) -> &StorageKey {
        &self.key
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}

impl<S: CredentialStore> CredentialProvider for StoredCredential<S> {
    fn access_token(&self) -> Result<Option<AccessToken>, CredentialError> {
        Ok(self.store.get(self.key.as_ref())?.map(AccessToken::from))
    }
}
