//! GraphQL error extraction.
//!
//! GraphQL servers report application errors inside a 200-status body:
//!
//! ```json
//! { "data": null, "errors": [{ "message": "bad input", "extensions": { "code": "400" } }] }
//! ```
//!
//! [`extract_graphql_error`] turns such a body into a [`NormalizedError`].
//!
//! # Rules
//!
//! - A falsy body (`null`, `false`, `0`, `""`) is an unknown error with status 500.
//! - A body object with an `errors` key is an error. Its message is every
//!   record's `message` joined with no separator, or the JSON text of the
//!   `errors` value when that join is empty or impossible. Its status is the
//!   first record's `extensions.code` read as a base-10 integer, or 500.
//! - Anything else is not an error.

use serde_json::Value;
use thiserror::Error;

/// Message used when the body is empty or falsy.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Status used when no usable code is present.
pub const DEFAULT_STATUS_CODE: i64 = 500;

/// An application error reported in a GraphQL response body.
///
/// # Example
///
/// ```rust
/// use graphql_fetch::NormalizedError;
///
/// let error = NormalizedError::new("bad input", 400);
/// assert_eq!(error.to_string(), "bad input");
/// assert_eq!(error.status_code, 400);
/// assert!(error.code.is_none());
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct NormalizedError {
    /// Concatenated error messages.
    pub message: String,
    /// Status derived from the first record's `extensions.code`.
    pub status_code: i64,
    /// The raw `extensions.code` of the first record, when present.
    pub code: Option<String>,
}

impl NormalizedError {
    /// Creates an error without a raw code.
    #[must_use]
    pub fn new(message: impl Into<String>, status_code: i64) -> Self {
        Self {
            message: message.into(),
            status_code,
            code: None,
        }
    }

    /// The error reported for an empty or falsy body.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_ERROR_MESSAGE, DEFAULT_STATUS_CODE)
    }
}

/// Inspects a parsed response body for GraphQL errors.
///
/// Returns `None` when the body reports no error. The body is only read.
///
/// # Example
///
/// ```rust
/// use graphql_fetch::{extract_graphql_error, NormalizedError};
/// use serde_json::json;
///
/// let body = json!({"errors": [{"message": "bad input", "extensions": {"code": "400"}}]});
/// let error = extract_graphql_error(&body).unwrap();
/// assert_eq!(error.message, "bad input");
/// assert_eq!(error.status_code, 400);
///
/// assert!(extract_graphql_error(&json!({"data": {"ok": true}})).is_none());
/// assert_eq!(extract_graphql_error(&json!(null)), Some(NormalizedError::unknown()));
/// ```
#[must_use]
pub fn extract_graphql_error(body: &Value) -> Option<NormalizedError> {
    if is_falsy(body) {
        return Some(NormalizedError::unknown());
    }

    let errors = body.as_object()?.get("errors")?;

    let message = joined_messages(errors)
        .filter(|joined| !joined.is_empty())
        .unwrap_or_else(|| errors.to_string());

    let code = first_error_code(errors);
    let status_code = code.as_deref().map_or(DEFAULT_STATUS_CODE, |raw| {
        parse_leading_int(raw).unwrap_or_else(|| {
            tracing::warn!(
                "GraphQL error code {:?} is not numeric, using status {}",
                raw,
                DEFAULT_STATUS_CODE
            );
            DEFAULT_STATUS_CODE
        })
    });

    Some(NormalizedError {
        message,
        status_code,
        code,
    })
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Joins each record's `message`. `None` when `errors` is not an array.
fn joined_messages(errors: &Value) -> Option<String> {
    let records = errors.as_array()?;
    Some(
        records
            .iter()
            .map(|record| match record.get("message") {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            })
            .collect(),
    )
}

/// Reads `errors[0].extensions.code`, ignoring falsy codes (`""`, `0`, `null`).
fn first_error_code(errors: &Value) -> Option<String> {
    let code = errors
        .as_array()?
        .first()?
        .get("extensions")?
        .get("code")?;
    if is_falsy(code) {
        return None;
    }

    match code {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Lenient base-10 parse: leading whitespace, optional sign, then as many
/// digits as are present. `None` when no digit follows or on overflow.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let sign_len = usize::from(trimmed.starts_with(['+', '-']));
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    trimmed[..sign_len + digits_len].parse().ok()
}
