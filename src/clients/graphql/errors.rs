//! GraphQL query error types.
//!
//! A query can fail in three distinguishable ways:
//!
//! - [`QueryError::NotAuthenticated`]: the client holds no token; nothing was sent
//! - [`QueryError::Transport`]: the HTTP exchange failed (network, non-2xx, unreadable body)
//! - [`QueryError::Graphql`]: the server answered but reported `errors`
//!
//! Transport failures may be worth retrying (see
//! [`QueryError::is_retryable`]); GraphQL errors and usage errors are not.
//!
//! # Example
//!
//! ```rust,ignore
//! use school_graphql::QueryError;
//!
//! match client.query("{ user { id login } }", None).await {
//!     Ok(data) => println!("{}", serde_json::Value::Object(data)),
//!     Err(QueryError::Graphql(errors)) => {
//!         for message in errors.messages() {
//!             eprintln!("GraphQL error: {message}");
//!         }
//!     }
//!     Err(e) if e.is_retryable() => eprintln!("Transient failure: {e}"),
//!     Err(e) => eprintln!("Query failed: {e}"),
//! }
//! ```

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::clients::HttpError;

/// One entry of a GraphQL `errors` array.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ResponseError {
    /// Human-readable message.
    pub message: String,
    /// Response path the error applies to, if reported.
    #[serde(default)]
    pub path: Option<Vec<serde_json::Value>>,
    /// Server-specific details (e.g., error codes), if reported.
    #[serde(default)]
    pub extensions: Option<serde_json::Value>,
}

impl ResponseError {
    /// Creates an entry carrying only a message.
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            extensions: None,
        }
    }

    /// Parses an `errors` entry, falling back to its JSON text when it has
    /// no string `message`.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(message) => Self::from_message(message.clone()),
            _ => serde_json::from_value(value.clone())
                .unwrap_or_else(|_| Self::from_message(value.to_string())),
        }
    }
}

/// The `errors` reported by a GraphQL response.
///
/// Any `data` that accompanied the errors is kept for diagnostics only and
/// must not be treated as a result.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphqlErrors {
    errors: Vec<ResponseError>,
    partial_data: Option<serde_json::Value>,
}

impl GraphqlErrors {
    /// Creates a new error list.
    #[must_use]
    pub const fn new(errors: Vec<ResponseError>, partial_data: Option<serde_json::Value>) -> Self {
        Self {
            errors,
            partial_data,
        }
    }

    /// Returns the individual errors in response order.
    #[must_use]
    pub fn errors(&self) -> &[ResponseError] {
        &self.errors
    }

    /// Returns every error message in response order.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    /// Returns the untrusted `data` that accompanied the errors, if any.
    #[must_use]
    pub const fn partial_data(&self) -> Option<&serde_json::Value> {
        self.partial_data.as_ref()
    }
}

impl fmt::Display for GraphqlErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

/// Error type for GraphQL query execution.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The client holds no token; the request was not sent.
    #[error("Not authenticated: sign in or provide a token before running queries")]
    NotAuthenticated,

    /// The query text was empty.
    #[error("Query text cannot be empty")]
    EmptyQuery,

    /// The HTTP exchange failed.
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The server reported GraphQL errors.
    #[error("GraphQL errors: {0}")]
    Graphql(GraphqlErrors),

    /// The request could not be encoded as JSON.
    #[error("Could not encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// `data` could not be decoded into the requested type.
    #[error("Could not decode response data: {0}")]
    Decode(#[source] serde_json::Error),
}

impl QueryError {
    /// Returns `true` if repeating the same query might succeed.
    ///
    /// Only transport failures can be transient.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_retryable())
    }
}

// Verify QueryError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<QueryError>();
};
