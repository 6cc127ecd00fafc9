//! Unverified JWT claims.
//!
//! Session tokens issued by the sign-in endpoint are JWTs. The client never
//! holds the signing key, so the payload is read without signature
//! verification. The claims are informational only (who the token belongs
//! to and when it lapses) and are never used for authorization decisions.
//!
//! # Claims
//!
//! - `sub`: Subject, the user ID (preferred)
//! - `id`: Fallback user ID used by some issuers
//! - `exp`: Expiration timestamp
//! - `iat`: Issued at timestamp

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;

use crate::auth::{AuthError, Token};

/// Claims read from a session token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID).
    #[serde(default)]
    pub sub: Option<String>,

    /// Alternative user ID claim.
    #[serde(default)]
    pub id: Option<serde_json::Value>,

    /// Expiration timestamp (Unix timestamp).
    #[serde(default)]
    pub exp: Option<i64>,

    /// Issued at timestamp (Unix timestamp).
    #[serde(default)]
    pub iat: Option<i64>,
}

impl TokenClaims {
    /// Decodes the payload of `token` without verifying its signature.
    ///
    /// Time-based claims are not validated here; use
    /// [`is_expired`](Self::is_expired).
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidTokenFormat`] if the token is not a
    /// three-part JWT with a JSON payload.
    pub fn decode(token: &Token) -> Result<Self, AuthError> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let key = DecodingKey::from_secret(&[]);
        decode::<Self>(token.as_ref(), &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidTokenFormat {
                reason: e.to_string(),
            })
    }

    /// Returns the user ID, preferring `sub` over `id`.
    #[must_use]
    pub fn user_id(&self) -> Option<String> {
        self.sub
            .clone()
            .filter(|sub| !sub.is_empty())
            .or_else(|| match &self.id {
                Some(serde_json::Value::String(id)) if !id.is_empty() => Some(id.clone()),
                Some(serde_json::Value::Number(id)) => Some(id.to_string()),
                _ => None,
            })
    }

    /// Returns the expiration time, if the token declares one.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp
            .and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0))
    }

    /// Returns the issue time, if the token declares one.
    #[must_use]
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat
            .and_then(|iat| DateTime::<Utc>::from_timestamp(iat, 0))
    }

    /// Returns `true` if the `exp` claim is in the past.
    ///
    /// Tokens without `exp` never expire.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at().is_some_and(|expires| Utc::now() > expires)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims<'a> {
        #[serde(skip_serializing_if = "Option::is_none")]
        sub: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        exp: Option<i64>,
        iat: i64,
    }

    fn issue(claims: &TestClaims<'_>) -> Token {
        let jwt = encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(b"server-side-secret"),
        )
        .unwrap();
        Token::new(jwt).unwrap()
    }

    #[test]
    fn test_decode_reads_claims_without_key() {
        let now = Utc::now().timestamp();
        let token = issue(&TestClaims {
            sub: Some("4242"),
            id: None,
            exp: Some(now + 3600),
            iat: now,
        });

        let claims = token.claims().unwrap();
        assert_eq!(claims.user_id().as_deref(), Some("4242"));
        assert_eq!(claims.exp, Some(now + 3600));
        assert!(!claims.is_expired());
        assert!(!token.is_expired());
    }

    #[test]
    fn test_expired_token_detected() {
        let now = Utc::now().timestamp();
        let token = issue(&TestClaims {
            sub: Some("1"),
            id: None,
            exp: Some(now - 60),
            iat: now - 3600,
        });

        assert!(token.claims().unwrap().is_expired());
        assert!(token.is_expired());
    }

    #[test]
    fn test_user_id_falls_back_to_id_claim() {
        let token = issue(&TestClaims {
            sub: None,
            id: Some(77),
            exp: None,
            iat: 0,
        });

        let claims = token.claims().unwrap();
        assert_eq!(claims.user_id().as_deref(), Some("77"));
        assert!(claims.expires_at().is_none());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_opaque_token_is_invalid_format() {
        let token = Token::new("not-a-jwt").unwrap();
        assert!(matches!(
            TokenClaims::decode(&token),
            Err(AuthError::InvalidTokenFormat { .. })
        ));
    }
}
