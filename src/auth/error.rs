//! Authentication error types.
//!
//! # Error Types
//!
//! - [`AuthError::MissingCredentials`]: username or password was empty
//! - [`AuthError::Rejected`]: the sign-in endpoint answered with a non-200 status
//! - [`AuthError::Transport`]: the sign-in endpoint could not be reached or answered unreadably
//! - [`AuthError::MissingToken`]: the response carried no usable token
//! - [`AuthError::InvalidTokenFormat`]: a token could not be decoded as a JWT
//!
//! None of these are retried; new credentials are needed to proceed.
//!
//! # Example
//!
//! ```rust
//! use school_graphql::AuthError;
//!
//! let error = AuthError::Rejected {
//!     status: 401,
//!     message: "Unauthorized".to_string(),
//! };
//! assert!(error.to_string().contains("401"));
//! ```

use crate::clients::HttpError;
use crate::error::ConfigError;
use thiserror::Error;

/// Errors that can occur while obtaining or inspecting a session token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password was missing.
    #[error("Cannot sign in: {0}")]
    MissingCredentials(#[from] ConfigError),

    /// The sign-in endpoint rejected the credentials.
    #[error("Sign-in rejected with status {status}: {message}. Check the username and password.")]
    Rejected {
        /// HTTP status code returned by the sign-in endpoint.
        status: u16,
        /// Error details from the response body.
        message: String,
    },

    /// The sign-in request failed before a usable response arrived.
    #[error("Sign-in request failed: {0}")]
    Transport(#[source] HttpError),

    /// The sign-in response did not contain a token.
    #[error("Sign-in response did not contain a token (expected a JSON string or one of: token, access_token, jwt)")]
    MissingToken,

    /// The token is not a decodable JWT.
    #[error("Token is not a valid JWT: {reason}")]
    InvalidTokenFormat {
        /// Why decoding failed.
        reason: String,
    },
}

impl From<HttpError> for AuthError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Response(e) => Self::Rejected {
                status: e.code,
                message: e.message,
            },
            other => Self::Transport(other),
        }
    }
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};
