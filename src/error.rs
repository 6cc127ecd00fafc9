//! Error types for client configuration.
//!
//! This module contains the error type returned by configuration builders and
//! validated newtype constructors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use school_graphql::{ConfigError, Username};
//!
//! let result = Username::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyUsername)));
//! ```

use thiserror::Error;

/// Errors that can occur while building client configuration or credentials.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Username cannot be empty.
    #[error("Username cannot be empty. Please provide a login or email address.")]
    EmptyUsername,

    /// Password cannot be empty.
    #[error("Password cannot be empty. Please provide the account password.")]
    EmptyPassword,

    /// Bearer token cannot be empty.
    #[error("Token cannot be empty. Sign in again or provide a stored token.")]
    EmptyToken,

    /// Bearer token contains characters that cannot be sent in a header.
    #[error("Invalid token: {reason}")]
    InvalidToken {
        /// Why the token was rejected.
        reason: String,
    },

    /// Endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Expected an absolute http(s) URL (e.g., 'https://example.com/api/graphql').")]
    InvalidEndpointUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// An environment variable held a value that could not be used.
    #[error("Invalid value for environment variable '{name}': {reason}")]
    InvalidEnvVar {
        /// The variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
