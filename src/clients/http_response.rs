//! Buffered responses returned by the fetch clients.
//!
//! A [`FetchResponse`] holds the whole body in memory. Inspecting it for
//! GraphQL errors reads a view of those bytes, so the caller still gets a
//! response whose body has not been consumed.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// A response whose body can be read any number of times.
#[derive(Clone, Debug)]
pub struct FetchResponse {
    url: String,
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl FetchResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        status: StatusCode,
        headers: HeaderMap,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            url: url.into(),
            status,
            headers,
            body: body.into(),
        }
    }

    /// Reads a reqwest response to the end.
    pub(crate) async fn from_reqwest(response: reqwest::Response) -> Result<Self, reqwest::Error> {
        let url = response.url().to_string();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        Ok(Self::new(url, status, headers, body))
    }

    /// Final URL of the response.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value as a string, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Raw body bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserializes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the parse failure if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Consumes the response, returning the body bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }
}
