//! HTTP client types for authorized GraphQL requests.
//!
//! # Overview
//!
//! - [`HttpClient`]: sends requests with the bearer token and transport headers
//! - [`merge_headers`]: the header merge `HttpClient` applies
//! - [`RequestOptions`]: method, headers, body and query of one request
//! - [`FetchResponse`]: a buffered response whose body can be re-read
//! - [`FetchError`]: every way a fetch can fail
//! - [`graphql::GraphqlClient`]: the entry point that also checks GraphQL error bodies
//!
//! # Headers
//!
//! Every request carries:
//!
//! - `Authorization`: the caller's value if given, otherwise `Bearer <token>`
//!   (`Bearer null` when no token is stored)
//! - `Content-Type: application/json`, always
//! - `Apollo-Require-Preflight: true`, always
//!
//! # Retry Behavior
//!
//! None. Requests are sent once and transport failures are returned as
//! [`FetchError::Network`]; retry policy belongs to the caller.

mod errors;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;

pub use errors::FetchError;
pub use http_client::{
    merge_headers, HttpClient, APOLLO_REQUIRE_PREFLIGHT, AUTHORIZATION, CONTENT_TYPE, SDK_VERSION,
};
pub use http_request::{HttpMethod, RequestOptions, RequestOptionsBuilder};
pub use http_response::FetchResponse;

pub use graphql::{extract_graphql_error, GraphqlClient, NormalizedError};
