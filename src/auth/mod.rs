//! Authentication: tokens, sign-in and credential discovery.
//!
//! # Overview
//!
//! - [`Token`]: an opaque bearer token with masked debug output
//! - [`sign_in`]: exchanges a username/password for a [`Token`]
//! - [`extract_token`]: finds the token in a sign-in response body
//! - [`TokenClaims`]: unverified JWT claims (user id, expiry)
//! - [`credentials`]: environment and token file lookup, token persistence
//! - [`AuthError`]: authentication failures
//!
//! # Example
//!
//! ```rust
//! use school_graphql::auth::extract_token;
//! use serde_json::json;
//!
//! // Bare string responses are accepted as-is
//! let token = extract_token(&json!("eyJ.payload.sig")).unwrap();
//! assert_eq!(token.as_ref(), "eyJ.payload.sig");
//!
//! // Objects are searched by key priority: token > access_token > jwt
//! let token = extract_token(&json!({"jwt": "second", "token": "first"})).unwrap();
//! assert_eq!(token.as_ref(), "first");
//! ```

mod claims;
pub mod credentials;
mod error;
mod sign_in;
mod token;

pub use claims::TokenClaims;
pub use credentials::{Credential, CredentialError};
pub use error::AuthError;
pub use sign_in::sign_in;
pub use token::{extract_token, Token, TOKEN_KEYS};
