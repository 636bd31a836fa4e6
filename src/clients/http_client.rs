//! Authorized HTTP client.
//!
//! This module provides the [`HttpClient`] type, which issues requests with a
//! bearer token from a [`CredentialProvider`] and the fixed GraphQL transport
//! headers, and [`merge_headers`], the header merge it applies.

use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::{AccessToken, CredentialProvider};
use crate::clients::errors::FetchError;
use crate::clients::http_request::RequestOptions;
use crate::config::FetchConfig;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the authorization header.
pub const AUTHORIZATION: &str = "Authorization";

/// Name of the content type header.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Name of the header Apollo gateways use to force a CORS preflight.
pub const APOLLO_REQUIRE_PREFLIGHT: &str = "Apollo-Require-Preflight";

const USER_AGENT: &str = "User-Agent";

/// Builds the effective headers for a request.
///
/// Rules, in order:
///
/// 1. `defaults` are applied unless the caller sent a header of the same name.
/// 2. Caller headers are copied as-is, except `Content-Type` and
///    `Apollo-Require-Preflight`, which are always replaced.
/// 3. A non-empty caller `Authorization` header is kept verbatim. Otherwise
///    `Authorization: Bearer <token>` is added, with the literal `null` when
///    there is no token. An empty caller value is dropped.
/// 4. `Content-Type: application/json` and `Apollo-Require-Preflight: true`
///    are set.
///
/// Header names are compared ignoring ASCII case. The caller's map is not
/// modified.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use graphql_fetch::{merge_headers, AccessToken};
///
/// let token = AccessToken::new("abc");
/// let headers = merge_headers(None, Some(&token), &HashMap::new());
///
/// assert_eq!(headers["Authorization"], "Bearer abc");
/// assert_eq!(headers["Content-Type"], "application/json");
/// assert_eq!(headers["Apollo-Require-Preflight"], "true");
///
/// let unauthenticated = merge_headers(None, None, &HashMap::new());
/// assert_eq!(unauthenticated["Authorization"], "Bearer null");
/// ```
#[must_use]
pub fn merge_headers(
    caller: Option<&HashMap<String, String>>,
    token: Option<&AccessToken>,
    defaults: &HashMap<String, String>,
) -> HashMap<String, String> {
    let empty = HashMap::new();
    let caller = caller.unwrap_or(&empty);
    let caller_has = |name: &str| caller.keys().any(|key| key.eq_ignore_ascii_case(name));
    let caller_authorized = has_authorization(caller);

    let mut headers: HashMap<String, String> = defaults
        .iter()
        .filter(|(key, _)| !caller_has(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    for (key, value) in caller {
        if key.eq_ignore_ascii_case(CONTENT_TYPE) || key.eq_ignore_ascii_case(APOLLO_REQUIRE_PREFLIGHT)
        {
            tracing::debug!("Overriding caller-supplied {} header value {:?}", key, value);
            continue;
        }
        if key.eq_ignore_ascii_case(AUTHORIZATION) && value.is_empty() {
            continue;
        }
        headers.insert(key.clone(), value.clone());
    }

    if caller_authorized {
        tracing::debug!("Keeping caller-supplied Authorization header");
    } else {
        let token = token.map_or("null", AsRef::as_ref);
        headers.insert(AUTHORIZATION.to_string(), format!("Bearer {token}"));
    }

    headers.insert(CONTENT_TYPE.to_string(), "application/json".to_string());
    headers.insert(APOLLO_REQUIRE_PREFLIGHT.to_string(), "true".to_string());

    headers
}

/// True when `headers` carries an `Authorization` header with a non-empty value.
fn has_authorization(headers: &HashMap<String, String>) -> bool {
    headers
        .iter()
        .any(|(key, value)| key.eq_ignore_ascii_case(AUTHORIZATION) && !value.is_empty())
}

/// HTTP client that authorizes every request it sends.
///
/// The client handles:
/// - Reading the current token from its [`CredentialProvider`] on every call
/// - Merging caller headers with the authorization and transport headers
/// - A default `User-Agent` header
///
/// It does not retry, time out, or inspect the response.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use graphql_fetch::{AccessToken, FetchConfig, HttpClient, HttpMethod, RequestOptions};
///
/// let client = HttpClient::new(Arc::new(AccessToken::new("abc")), FetchConfig::default())?;
///
/// let options = RequestOptions::builder(HttpMethod::Post)
///     .body(r#"{"query":"{ me { id } }"}"#)
///     .build();
///
/// let response = client.send("https://api.example.com/graphql", &options).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    credentials: Arc<dyn CredentialProvider>,
    config: FetchConfig,
    default_headers: HashMap<String, String>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new client with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the TLS backend cannot be initialized.
    pub fn new(
        credentials: Arc<dyn CredentialProvider>,
        config: FetchConfig,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self::with_client(client, credentials, config))
    }

    /// Creates a new client on top of an existing reqwest client.
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        credentials: Arc<dyn CredentialProvider>,
        config: FetchConfig,
    ) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let user_agent = format!("{user_agent_prefix}graphql-fetch v{SDK_VERSION}");

        let mut default_headers = HashMap::new();
        default_headers.insert(USER_AGENT.to_string(), user_agent);

        Self {
            client,
            credentials,
            config,
            default_headers,
        }
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a request with authorization and transport headers merged in.
    ///
    /// The credential provider is asked for the current token exactly once.
    /// The response is returned untouched whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Credential`] if the provider fails and
    /// [`FetchError::Network`] if the transport fails.
    pub async fn send(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<reqwest::Response, FetchError> {
        let token = self.credentials.access_token()?;
        let caller_authorized = options.headers.as_ref().is_some_and(has_authorization);
        if token.is_none() && !caller_authorized {
            tracing::debug!("No access token available, sending unauthenticated request to {}", url);
        }

        let headers = merge_headers(
            options.headers.as_ref(),
            token.as_ref(),
            &self.default_headers,
        );

        let mut builder = self.client.request(options.method.as_reqwest(), url);
        for (key, value) in &headers {
            builder = builder.header(key, value);
        }
        if let Some(query) = &options.query {
            builder = builder.query(query);
        }
        if let Some(body) = &options.body {
            builder = builder.body(body.clone());
        }

        Ok(builder.send().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CredentialError, MemoryCredentialStore, StoredCredential};
    use crate::clients::http_request::HttpMethod;
    use crate::config::StorageKey;

    #[derive(Debug)]
    struct BrokenProvider;

    impl CredentialProvider for BrokenProvider {
        fn access_token(&self) -> Result<Option<AccessToken>, CredentialError> {
            Err(CredentialError::Poisoned)
        }
    }

    fn caller(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_bearer_token_injected_when_caller_has_none() {
        let token = AccessToken::new("tok-123");
        let headers = merge_headers(None, Some(&token), &HashMap::new());
        assert_eq!(headers.get("Authorization"), Some(&"Bearer tok-123".to_string()));
    }

    #[test]
    fn test_missing_token_sends_bearer_null() {
        let headers = merge_headers(Some(&caller(&[])), None, &HashMap::new());
        assert_eq!(headers.get("Authorization"), Some(&"Bearer null".to_string()));
    }

    #[test]
    fn test_caller_authorization_is_kept_verbatim() {
        let token = AccessToken::new("ignored");
        let headers = merge_headers(
            Some(&caller(&[("Authorization", "Basic dXNlcjpwYXNz")])),
            Some(&token),
            &HashMap::new(),
        );
        assert_eq!(
            headers.get("Authorization"),
            Some(&"Basic dXNlcjpwYXNz".to_string())
        );
    }

    #[test]
    fn test_empty_caller_authorization_is_replaced_by_bearer_token() {
        let token = AccessToken::new("tok");
        let headers = merge_headers(
            Some(&caller(&[("Authorization", "")])),
            Some(&token),
            &HashMap::new(),
        );
        assert_eq!(headers.get("Authorization"), Some(&"Bearer tok".to_string()));
        assert_eq!(headers.len(), 3);

        let headers = merge_headers(Some(&caller(&[("authorization", "")])), None, &HashMap::new());
        assert_eq!(headers.get("Authorization"), Some(&"Bearer null".to_string()));
        assert!(headers.get("authorization").is_none());
    }

    #[test]
    fn test_caller_authorization_matched_case_insensitively() {
        let token = AccessToken::new("ignored");
        let headers = merge_headers(
            Some(&caller(&[("authorization", "Bearer mine")])),
            Some(&token),
            &HashMap::new(),
        );
        assert_eq!(headers.get("authorization"), Some(&"Bearer mine".to_string()));
        assert!(headers.get("Authorization").is_none());
    }

    #[test]
    fn test_content_type_and_preflight_always_overridden() {
        let headers = merge_headers(
            Some(&caller(&[
                ("content-type", "text/plain"),
                ("Apollo-Require-Preflight", "false"),
                ("X-Trace", "t-1"),
            ])),
            None,
            &HashMap::new(),
        );

        assert_eq!(headers.get("Content-Type"), Some(&"application/json".to_string()));
        assert_eq!(headers.get("Apollo-Require-Preflight"), Some(&"true".to_string()));
        assert!(headers.get("content-type").is_none());
        assert_eq!(headers.get("X-Trace"), Some(&"t-1".to_string()));
        assert_eq!(headers.len(), 4);
    }

    #[test]
    fn test_defaults_yield_to_caller_headers() {
        let defaults = caller(&[("User-Agent", "default-agent")]);

        let headers = merge_headers(None, None, &defaults);
        assert_eq!(headers.get("User-Agent"), Some(&"default-agent".to_string()));

        let headers = merge_headers(Some(&caller(&[("user-agent", "mine")])), None, &defaults);
        assert_eq!(headers.get("user-agent"), Some(&"mine".to_string()));
        assert!(headers.get("User-Agent").is_none());
    }

    #[test]
    fn test_caller_headers_are_not_mutated() {
        let original = caller(&[("Content-Type", "text/plain")]);
        let snapshot = original.clone();
        let _ = merge_headers(Some(&original), None, &HashMap::new());
        assert_eq!(original, snapshot);
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(Arc::new(()), FetchConfig::default()).unwrap();
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("graphql-fetch v"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = FetchConfig::builder().user_agent_prefix("MyApp/1.0").build();
        let client = HttpClient::new(Arc::new(()), config).unwrap();
        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | graphql-fetch v"));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }

    #[test]
    fn test_credential_failure_stops_request() {
        let client = HttpClient::new(Arc::new(BrokenProvider), FetchConfig::default()).unwrap();
        let options = RequestOptions::builder(HttpMethod::Post).body("{}").build();

        let result = tokio_test::block_on(client.send("http://127.0.0.1:1/graphql", &options));
        assert!(matches!(result, Err(FetchError::Credential(CredentialError::Poisoned))));
    }

    #[test]
    fn test_transport_failure_is_network_error() {
        let store = MemoryCredentialStore::new();
        let provider = StoredCredential::new(store, StorageKey::default());
        let client = HttpClient::new(Arc::new(provider), FetchConfig::default()).unwrap();

        let result = tokio_test::block_on(
            client.send("http://127.0.0.1:1/graphql", &RequestOptions::default()),
        );
        assert!(matches!(result, Err(FetchError::Network(_))));
    }
}
