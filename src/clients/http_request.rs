//! Request options passed to the fetch clients.
//!
//! This module provides [`RequestOptions`] and its builder. Options are
//! caller input: clients read them and build a merged copy, they never modify
//! them in place.

use std::collections::HashMap;
use std::fmt;

/// HTTP methods supported by the clients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET.
    #[default]
    Get,
    /// HTTP POST, the usual method for GraphQL operations.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP PATCH.
    Patch,
    /// HTTP DELETE.
    Delete,
}

impl HttpMethod {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Options for a single fetch.
///
/// # Example
///
/// ```rust
/// use graphql_fetch::{HttpMethod, RequestOptions};
/// use serde_json::json;
///
/// let options = RequestOptions::builder(HttpMethod::Post)
///     .json(&json!({ "query": "{ me { id } }" }))
///     .header("X-Request-Source", "dashboard")
///     .build();
///
/// assert_eq!(options.method, HttpMethod::Post);
/// assert!(options.headers.is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// The HTTP method.
    pub method: HttpMethod,
    /// Caller headers. `None` is treated as an empty map.
    pub headers: Option<HashMap<String, String>>,
    /// Raw request body.
    pub body: Option<String>,
    /// Query parameters appended to the URL.
    pub query: Option<HashMap<String, String>>,
}

impl RequestOptions {
    /// Creates a new builder for the given method.
    #[must_use]
    pub fn builder(method: HttpMethod) -> RequestOptionsBuilder {
        RequestOptionsBuilder::new(method)
    }

    /// Looks up a caller header, ignoring ASCII case in the name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref().and_then(|headers| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        })
    }
}

/// Builder for constructing [`RequestOptions`] instances.
#[derive(Debug)]
pub struct RequestOptionsBuilder {
    options: RequestOptions,
}

impl RequestOptionsBuilder {
    fn new(method: HttpMethod) -> Self {
        Self {
            options: RequestOptions {
                method,
                ..RequestOptions::default()
            },
        }
    }

    /// Sets the raw request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.options.body = Some(body.into());
        self
    }

    /// Sets the request body to the compact JSON text of `value`.
    #[must_use]
    pub fn json(mut self, value: &serde_json::Value) -> Self {
        self.options.body = Some(value.to_string());
        self
    }

    /// Sets all headers at once.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.options.headers = Some(headers);
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options
            .headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options
            .query
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Builds the [`RequestOptions`].
    #[must_use]
    pub fn build(self) -> RequestOptions {
        self.options
    }
}
