//! Keyed credential storage.
//!
//! A [`CredentialStore`] is the persisted, process-wide state an external
//! authentication flow writes tokens into. This crate only ever reads from it.

use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::auth::CredentialError;

/// Read access to keyed string storage.
pub trait CredentialStore: Send + Sync + fmt::Debug {
    /// Returns the value stored under `key`, or `None` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] if the storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, CredentialError>;
}

impl<S: CredentialStore + ?Sized> CredentialStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, CredentialError> {
        (**self).get(key)
    }
}

/// In-memory store shared between the authentication flow and the clients.
///
/// Clones share the same underlying map.
///
/// # Example
///
/// ```rust
/// use graphql_fetch::{CredentialStore, MemoryCredentialStore};
///
/// let store = MemoryCredentialStore::new();
/// let reader = store.clone();
///
/// store.set("access_token", "abc").unwrap();
/// assert_eq!(reader.get("access_token").unwrap().as_deref(), Some("abc"));
/// ```
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Poisoned`] if a previous writer panicked.
    pub fn set(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), CredentialError> {
        self.entries
            .write()
            .map_err(|_| CredentialError::Poisoned)?
            .insert(key.into(), value.into());
        Ok(())
    }

    /// Removes `key`, returning its previous value.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Poisoned`] if a previous writer panicked.
    pub fn remove(&self, key: &str) -> Result<Option<String>, CredentialError> {
        Ok(self
            .entries
            .write()
            .map_err(|_| CredentialError::Poisoned)?
            .remove(key))
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, CredentialError> {
        Ok(self
            .entries
            .read()
            .map_err(|_| CredentialError::Poisoned)?
            .get(key)
            .cloned())
    }
}

impl fmt::Debug for MemoryCredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self
            .entries
            .read()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default();
        f.debug_struct("MemoryCredentialStore")
            .field("keys", &keys)
            .finish()
    }
}

/// A JSON file of string values, e.g. `{"access_token": "abc"}`.
///
/// The file is read on every lookup so tokens written by another process
/// are picked up immediately. A missing file is an empty store.
///
/// Reads use blocking `std::fs` calls, and [`HttpClient::send`] performs them
/// on the calling task. Keep the file small and on local disk.
///
/// [`HttpClient::send`]: crate::HttpClient::send
#[derive(Clone, Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, CredentialError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CredentialError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(None);
        }

        let mut entries: HashMap<String, String> =
            serde_json::from_str(&contents).map_err(|source| CredentialError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        Ok(entries.remove(key))
    }
}
