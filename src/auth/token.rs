//! Bearer token type and sign-in response parsing.
//!
//! The sign-in endpoint answers either with a bare JSON string or with an
//! object carrying the token under one of [`TOKEN_KEYS`]. The keys are
//! checked in order and the first non-empty string wins.

use std::fmt;

use crate::auth::claims::TokenClaims;
use crate::auth::AuthError;
use crate::error::ConfigError;

/// Keys that may carry the token in an object response, in priority order.
pub const TOKEN_KEYS: [&str; 3] = ["token", "access_token", "jwt"];

/// An opaque bearer token.
///
/// Surrounding whitespace is trimmed on construction. The `Debug`
/// implementation masks the value.
///
/// # Example
///
/// ```rust
/// use school_graphql::Token;
///
/// let token = Token::new("eyJhbGciOi.payload.sig").unwrap();
/// assert_eq!(token.as_ref(), "eyJhbGciOi.payload.sig");
/// assert_eq!(format!("{:?}", token), "Token(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Creates a new validated token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if the token is blank, or
    /// [`ConfigError::InvalidToken`] if it contains whitespace, control or
    /// non-ASCII characters.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        if !token.chars().all(|c| c.is_ascii_graphic()) {
            return Err(ConfigError::InvalidToken {
                reason: "tokens may only contain visible ASCII characters".to_string(),
            });
        }
        Ok(Self(token.to_string()))
    }

    /// Decodes the unverified JWT claims carried by this token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidTokenFormat`] if the token is not a JWT.
    pub fn claims(&self) -> Result<TokenClaims, AuthError> {
        TokenClaims::decode(self)
    }

    /// Returns `true` if the token is a JWT whose `exp` claim has passed.
    ///
    /// Opaque tokens and JWTs without `exp` are never considered expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.claims().is_ok_and(|claims| claims.is_expired())
    }

    /// Returns a short, log-safe preview of the token.
    #[must_use]
    pub fn preview(&self) -> String {
        let head: String = self.0.chars().take(12).collect();
        format!("{head}...")
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(*****)")
    }
}

/// Extracts the token from a sign-in response body.
///
/// Accepts a bare JSON string, or an object holding a non-empty string
/// under one of [`TOKEN_KEYS`] (checked in order). Anything else,
/// including an object with no recognised key, is rejected.
///
/// # Errors
///
/// Returns [`AuthError::MissingToken`] if no usable token is present.
///
/// # Example
///
/// ```rust
/// use school_graphql::auth::extract_token;
/// use serde_json::json;
///
/// let token = extract_token(&json!({"jwt": "j", "access_token": "a"})).unwrap();
/// assert_eq!(token.as_ref(), "a");
/// ```
pub fn extract_token(body: &serde_json::Value) -> Result<Token, AuthError> {
    let token = match body {
        serde_json::Value::String(token) => Token::new(token.as_str()).ok(),
        // An unusable value under a higher-priority key falls through to the next key.
        serde_json::Value::Object(map) => TOKEN_KEYS.iter().find_map(|key| {
            map.get(*key)
                .and_then(serde_json::Value::as_str)
                .and_then(|value| Token::new(value).ok())
        }),
        _ => None,
    };

    token.ok_or(AuthError::MissingToken)
}

// Verify Token is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Token>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_rejects_blank() {
        assert!(matches!(Token::new(""), Err(ConfigError::EmptyToken)));
        assert!(matches!(Token::new(" \n"), Err(ConfigError::EmptyToken)));
    }

    #[test]
    fn test_token_rejects_inner_whitespace() {
        assert!(matches!(
            Token::new("abc def"),
            Err(ConfigError::InvalidToken { .. })
        ));
    }

    #[test]
    fn test_token_is_trimmed() {
        assert_eq!(Token::new("  abc\n").unwrap().as_ref(), "abc");
    }

    #[test]
    fn test_token_masks_value_in_debug() {
        let token = Token::new("secret-token").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_preview_truncates() {
        let token = Token::new("abcdefghijklmnopqrstuvwxyz").unwrap();
        assert_eq!(token.preview(), "abcdefghijkl...");
    }

    #[test]
    fn test_opaque_token_is_not_expired() {
        assert!(!Token::new("opaque").unwrap().is_expired());
    }

    #[test]
    fn test_extract_each_key() {
        for key in TOKEN_KEYS {
            let body = json!({ key: "X" });
            assert_eq!(extract_token(&body).unwrap().as_ref(), "X", "key {key}");
        }
    }

    #[test]
    fn test_extract_respects_priority() {
        let body = json!({"jwt": "c", "access_token": "b", "token": "a"});
        assert_eq!(extract_token(&body).unwrap().as_ref(), "a");

        let body = json!({"jwt": "c", "access_token": "b"});
        assert_eq!(extract_token(&body).unwrap().as_ref(), "b");
    }

    #[test]
    fn test_extract_skips_empty_and_non_string_values() {
        let body = json!({"token": "", "access_token": 17, "jwt": "c"});
        assert_eq!(extract_token(&body).unwrap().as_ref(), "c");
    }

    #[test]
    fn test_extract_falls_through_invalid_token_value() {
        let body = json!({"token": "a b", "access_token": "good"});
        assert_eq!(extract_token(&body).unwrap().as_ref(), "good");

        let body = json!({"token": "caf\u{e9}", "jwt": "j"});
        assert_eq!(extract_token(&body).unwrap().as_ref(), "j");
    }

    #[test]
    fn test_extract_bare_string() {
        assert_eq!(extract_token(&json!("X")).unwrap().as_ref(), "X");
    }

    #[test]
    fn test_extract_rejects_unrecognised_object() {
        let body = json!({"session": "abc", "user": 1});
        assert!(matches!(extract_token(&body), Err(AuthError::MissingToken)));
    }

    #[test]
    fn test_extract_rejects_other_shapes() {
        assert!(matches!(
            extract_token(&serde_json::Value::Null),
            Err(AuthError::MissingToken)
        ));
        assert!(matches!(
            extract_token(&json!(["a"])),
            Err(AuthError::MissingToken)
        ));
        assert!(matches!(
            extract_token(&json!("")),
            Err(AuthError::MissingToken)
        ));
    }
}
