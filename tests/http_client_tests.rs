//! Integration tests for the authorized HTTP client.
//!
//! These tests verify the effective headers the client sends: the bearer
//! token read from the credential provider, caller `Authorization`
//! pass-through, and the fixed `Content-Type`/`Apollo-Require-Preflight` pair.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use graphql_fetch::{
    AccessToken, CredentialError, CredentialProvider, FetchConfig, FileCredentialStore,
    HttpClient, HttpMethod, MemoryCredentialStore, RequestOptions, StorageKey, StoredCredential,
};
use serde_json::json;
use wiremock::matchers::{body_string, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Counts how often the client asks for a token.
#[derive(Debug, Default)]
struct CountingProvider {
    reads: AtomicUsize,
}

impl CredentialProvider for CountingProvider {
    fn access_token(&self) -> Result<Option<AccessToken>, CredentialError> {
        let n = self.reads.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Some(AccessToken::new(format!("token-{n}"))))
    }
}

fn ok_template() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"data": {}}))
}

// ============================================================================
// Authorization Header Tests
// ============================================================================

#[tokio::test]
async fn test_bearer_token_read_from_store() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Authorization", "Bearer stored-token"))
        .respond_with(ok_template())
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryCredentialStore::new();
    store.set("access_token", "stored-token").unwrap();
    let provider = StoredCredential::new(store, StorageKey::default());
    let client = HttpClient::new(Arc::new(provider), FetchConfig::default()).unwrap();

    let options = RequestOptions::builder(HttpMethod::Post).body("{}").build();
    let response = client.send(&server.uri(), &options).await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_empty_store_sends_bearer_null() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Authorization", "Bearer null"))
        .respond_with(ok_template())
        .expect(1)
        .mount(&server)
        .await;

    let provider = StoredCredential::new(MemoryCredentialStore::new(), StorageKey::default());
    let client = HttpClient::new(Arc::new(provider), FetchConfig::default()).unwrap();

    let options = RequestOptions::builder(HttpMethod::Post).body("{}").build();
    let response = client.send(&server.uri(), &options).await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_caller_authorization_passes_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ok_template())
        .expect(1)
        .mount(&server)
        .await;

    let client =
        HttpClient::new(Arc::new(AccessToken::new("ignored")), FetchConfig::default()).unwrap();

    let options = RequestOptions::builder(HttpMethod::Post)
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .body("{}")
        .build();
    let response = client.send(&server.uri(), &options).await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_empty_caller_authorization_sends_stored_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Authorization", "Bearer stored-token"))
        .respond_with(ok_template())
        .expect(1)
        .mount(&server)
        .await;

    let client =
        HttpClient::new(Arc::new(AccessToken::new("stored-token")), FetchConfig::default())
            .unwrap();

    let options = RequestOptions::builder(HttpMethod::Post)
        .header("Authorization", "")
        .body("{}")
        .build();
    let response = client.send(&server.uri(), &options).await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_token_is_read_fresh_on_every_call() {
    let server = MockServer::start().await;
    Mock::given(header("Authorization", "Bearer first"))
        .respond_with(ok_template())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(header("Authorization", "Bearer second"))
        .respond_with(ok_template())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(header("Authorization", "Bearer null"))
        .respond_with(ok_template())
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryCredentialStore::new();
    let provider = StoredCredential::new(store.clone(), StorageKey::default());
    let client = HttpClient::new(Arc::new(provider), FetchConfig::default()).unwrap();
    let options = RequestOptions::default();

    store.set("access_token", "first").unwrap();
    assert_eq!(client.send(&server.uri(), &options).await.unwrap().status().as_u16(), 200);

    store.set("access_token", "second").unwrap();
    assert_eq!(client.send(&server.uri(), &options).await.unwrap().status().as_u16(), 200);

    store.remove("access_token").unwrap();
    assert_eq!(client.send(&server.uri(), &options).await.unwrap().status().as_u16(), 200);
}

#[tokio::test]
async fn test_provider_consulted_once_per_request() {
    let server = MockServer::start().await;
    Mock::given(header_exists("Authorization"))
        .respond_with(ok_template())
        .mount(&server)
        .await;

    let provider = Arc::new(CountingProvider::default());
    let client = HttpClient::new(provider.clone(), FetchConfig::default()).unwrap();

    for _ in 0..3 {
        client
            .send(&server.uri(), &RequestOptions::default())
            .await
            .unwrap();
    }

    assert_eq!(provider.reads.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_custom_credential_key_and_file_store() {
    let server = MockServer::start().await;
    Mock::given(header("Authorization", "Bearer from-file"))
        .respond_with(ok_template())
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.json");
    std::fs::write(&path, r#"{"jwt":"from-file","access_token":"wrong"}"#).unwrap();

    let config = FetchConfig::builder()
        .credential_key(StorageKey::new("jwt").unwrap())
        .build();
    let provider = StoredCredential::new(
        FileCredentialStore::new(&path),
        config.credential_key().clone(),
    );
    let client = HttpClient::new(Arc::new(provider), config).unwrap();

    let response = client
        .send(&server.uri(), &RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

// ============================================================================
// Transport Header Tests
// ============================================================================

#[tokio::test]
async fn test_content_type_and_preflight_override_caller_values() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("Content-Type", "application/json"))
        .and(header("Apollo-Require-Preflight", "true"))
        .and(header("X-Trace-Id", "trace-1"))
        .respond_with(ok_template())
        .expect(1)
        .mount(&server)
        .await;

    let client =
        HttpClient::new(Arc::new(AccessToken::new("abc")), FetchConfig::default()).unwrap();

    let options = RequestOptions::builder(HttpMethod::Post)
        .header("Content-Type", "text/plain")
        .header("Apollo-Require-Preflight", "false")
        .header("X-Trace-Id", "trace-1")
        .body("{}")
        .build();
    let response = client.send(&server.uri(), &options).await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_method_body_and_query_pass_through() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/graphql"))
        .and(query_param("operationName", "Rename"))
        .and(body_string(r#"{"query":"mutation { rename }"}"#))
        .respond_with(ok_template())
        .expect(1)
        .mount(&server)
        .await;

    let client =
        HttpClient::new(Arc::new(AccessToken::new("abc")), FetchConfig::default()).unwrap();

    let options = RequestOptions::builder(HttpMethod::Put)
        .query_param("operationName", "Rename")
        .body(r#"{"query":"mutation { rename }"}"#)
        .build();
    let response = client
        .send(&format!("{}/graphql", server.uri()), &options)
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_user_agent_prefix_is_sent() {
    let server = MockServer::start().await;
    Mock::given(header_exists("User-Agent"))
        .respond_with(ok_template())
        .expect(1)
        .mount(&server)
        .await;

    let config = FetchConfig::builder().user_agent_prefix("MyApp/1.0").build();
    let client = HttpClient::new(Arc::new(AccessToken::new("abc")), config).unwrap();

    assert!(client.default_headers()["User-Agent"].starts_with("MyApp/1.0 | "));
    client
        .send(&server.uri(), &RequestOptions::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_send_does_not_inspect_error_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"errors": [{"message": "boom"}]})),
        )
        .mount(&server)
        .await;

    let client =
        HttpClient::new(Arc::new(AccessToken::new("abc")), FetchConfig::default()).unwrap();
    let options = RequestOptions::builder(HttpMethod::Post).body("{}").build();

    let response = client.send(&server.uri(), &options).await.unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"][0]["message"], "boom");
}
