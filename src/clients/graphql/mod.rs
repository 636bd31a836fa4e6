//! GraphQL response handling.
//!
//! GraphQL servers answer application errors with HTTP 200 and an `errors`
//! array in the body. This module surfaces those as typed failures.
//!
//! # Overview
//!
//! - [`GraphqlClient`]: sends authorized requests and fails on GraphQL error bodies
//! - [`extract_graphql_error`]: the body inspection on its own
//! - [`NormalizedError`]: `{ message, status_code }` built from the error records
//!
//! # Response Structure
//!
//! ```json
//! { "data": { ... }, "errors": [{ "message": "...", "extensions": { "code": "403" } }] }
//! ```
//!
//! # Example
//!
//! ```rust
//! use graphql_fetch::extract_graphql_error;
//! use serde_json::json;
//!
//! let body = json!({"errors": [{"message": "a"}, {"message": "b"}]});
//! let error = extract_graphql_error(&body).unwrap();
//! assert_eq!(error.message, "ab");
//! assert_eq!(error.status_code, 500);
//! ```

mod client;
mod errors;

pub use client::GraphqlClient;
pub use errors::{
    extract_graphql_error, NormalizedError, DEFAULT_STATUS_CODE, UNKNOWN_ERROR_MESSAGE,
};
