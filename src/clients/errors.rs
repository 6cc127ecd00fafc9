//! HTTP-level error types.
//!
//! These errors describe failures of the transport itself: the server
//! answered with a non-2xx status, answered with a body that is not JSON,
//! or could not be reached at all.
//!
//! # Example
//!
//! ```rust,ignore
//! use school_graphql::clients::HttpError;
//!
//! match client.post(&url, authorization, None).await {
//!     Ok(response) => println!("Body: {}", response.body),
//!     Err(HttpError::Response(e)) => println!("Status {}: {}", e.code, e.message),
//!     Err(HttpError::InvalidBody(e)) => println!("Unreadable body: {}", e),
//!     Err(HttpError::InvalidHeader(e)) => println!("Bad header: {}", e),
//!     Err(HttpError::Network(e)) => println!("Network error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Error returned when a request receives a non-successful response.
///
/// # Example
///
/// ```rust
/// use school_graphql::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 401,
///     message: r#"{"error":"invalid credentials"}"#.to_string(),
///     error_reference: None,
/// };
///
/// assert!(error.to_string().contains("401"));
/// ```
#[derive(Debug, Error)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Error details extracted from the response body.
    pub message: String,
    /// Reference ID for error reporting (from the `X-Request-Id` header).
    pub error_reference: Option<String>,
}

/// Error returned when a successful response carries a body that cannot be
/// interpreted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid response body (HTTP {code}): {reason}")]
pub struct InvalidResponseBodyError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Why the body was rejected.
    pub reason: String,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// A 2xx response whose body could not be parsed.
    #[error(transparent)]
    InvalidBody(#[from] InvalidResponseBodyError),

    /// A header value could not be encoded.
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::InvalidBody(e) => Some(e.code),
            Self::InvalidHeader(_) => None,
            Self::Network(e) => e.status().map(|s| s.as_u16()),
        }
    }

    /// Returns `true` if repeating the same request might succeed.
    ///
    /// Network failures, 429 and 5xx responses are considered transient.
    /// The client never acts on this itself.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Response(e) => e.code == 429 || e.code >= 500,
            Self::InvalidBody(_) | Self::InvalidHeader(_) => false,
            Self::Network(_) => true,
        }
    }
}
