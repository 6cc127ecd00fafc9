//! HTTP client shared by the sign-in and GraphQL calls.
//!
//! This module provides the [`HttpClient`] type, a thin wrapper around
//! `reqwest` that applies default headers, attaches the authorization scheme
//! for each call and turns responses into [`HttpResponse`] values or
//! [`HttpError`]s.

use std::collections::HashMap;

use base64::Engine;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};

use crate::auth::Token;
use crate::clients::errors::{HttpError, HttpResponseError, InvalidResponseBodyError};
use crate::clients::http_response::HttpResponse;
use crate::config::{ClientConfig, EndpointUrl, Password, Username};

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Authorization scheme attached to a single request.
#[derive(Clone, Copy, Debug)]
pub enum Authorization<'a> {
    /// HTTP Basic framing of `username:password`.
    Basic(&'a Username, &'a Password),
    /// Bearer token.
    Bearer(&'a Token),
}

impl Authorization<'_> {
    /// Returns the `Authorization` header value for this scheme.
    #[must_use]
    pub fn header_value(&self) -> String {
        match self {
            Self::Basic(username, password) => {
                let pair = format!("{}:{}", username.as_ref(), password.as_ref());
                let encoded = base64::engine::general_purpose::STANDARD.encode(pair);
                format!("Basic {encoded}")
            }
            Self::Bearer(token) => format!("Bearer {}", token.as_ref()),
        }
    }
}

/// HTTP client for the sign-in and GraphQL endpoints.
///
/// Every request is a JSON `POST`; no retries are performed.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Value sent as `User-Agent`.
    user_agent: String,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &ClientConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}school-graphql v{SDK_VERSION} | Rust {rust_version}");

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            user_agent,
        })
    }

    /// Returns the `User-Agent` value sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Sends a JSON `POST` to `url`.
    ///
    /// `body` may be `None`, in which case the request has an empty body but
    /// still declares `Content-Type: application/json`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - the authorization value is not a valid header (`InvalidHeader`)
    /// - a network error occurs (`Network`)
    /// - a non-2xx response is received (`Response`)
    /// - a 2xx response has a non-JSON body (`InvalidBody`)
    pub async fn post(
        &self,
        url: &EndpointUrl,
        authorization: Authorization<'_>,
        body: Option<&serde_json::Value>,
    ) -> Result<HttpResponse, HttpError> {
        let mut auth_value = HeaderValue::from_str(&authorization.header_value())?;
        auth_value.set_sensitive(true);

        let mut req_builder = self
            .client
            .post(url.as_ref())
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, auth_value);

        if let Some(body) = body {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;
        tracing::debug!(url = %url, status = code, bytes = body_text.len(), "POST completed");

        let body = Self::parse_body(code, &body_text)?;
        let response = HttpResponse::new(code, headers, body);

        if response.is_ok() {
            return Ok(response);
        }

        Err(HttpError::Response(HttpResponseError {
            code,
            message: Self::serialize_error(&response),
            error_reference: response.request_id().map(String::from),
        }))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Parses a response body as JSON.
    ///
    /// Non-JSON text is an error on 2xx responses and is kept verbatim as a
    /// string value otherwise.
    fn parse_body(code: u16, body_text: &str) -> Result<serde_json::Value, HttpError> {
        if body_text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }

        match serde_json::from_str(body_text) {
            Ok(body) => Ok(body),
            Err(e) if (200..=299).contains(&code) => Err(InvalidResponseBodyError {
                code,
                reason: e.to_string(),
            }
            .into()),
            Err(_) => Ok(serde_json::Value::String(body_text.to_string())),
        }
    }

    /// Extracts a readable error message from an error response.
    fn serialize_error(response: &HttpResponse) -> String {
        match &response.body {
            serde_json::Value::Object(map) => {
                let mut error_body = serde_json::Map::new();
                for key in ["errors", "error", "error_description", "message"] {
                    if let Some(value) = map.get(key) {
                        error_body.insert(key.to_string(), value.clone());
                    }
                }
                if error_body.is_empty() {
                    response.body.to_string()
                } else {
                    serde_json::Value::Object(error_body).to_string()
                }
            }
            serde_json::Value::String(text) => text.trim().to_string(),
            serde_json::Value::Null => reqwest::StatusCode::from_u16(response.code)
                .ok()
                .and_then(|status| status.canonical_reason())
                .unwrap_or("no response body")
                .to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_basic_authorization_header_value() {
        let username = Username::new("user").unwrap();
        let password = Password::new("pass").unwrap();
        let auth = Authorization::Basic(&username, &password);

        assert_eq!(auth.header_value(), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_bearer_authorization_header_value() {
        let token = Token::new("abc.def.ghi").unwrap();
        assert_eq!(
            Authorization::Bearer(&token).header_value(),
            "Bearer abc.def.ghi"
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&ClientConfig::default()).unwrap();
        assert!(client.user_agent().contains("school-graphql v"));
        assert!(client.user_agent().contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = ClientConfig::builder()
            .user_agent_prefix("audit-report/1.0")
            .build();
        let client = HttpClient::new(&config).unwrap();

        assert!(client.user_agent().starts_with("audit-report/1.0 | "));
    }

    #[test]
    fn test_parse_body_empty_is_null() {
        assert_eq!(
            HttpClient::parse_body(200, "  ").unwrap(),
            serde_json::Value::Null
        );
    }

    #[test]
    fn test_parse_body_rejects_non_json_success() {
        let result = HttpClient::parse_body(200, "<html>oops</html>");
        assert!(matches!(result, Err(HttpError::InvalidBody(e)) if e.code == 200));
    }

    #[test]
    fn test_parse_body_keeps_raw_text_on_error_status() {
        let body = HttpClient::parse_body(502, "Bad Gateway").unwrap();
        assert_eq!(body, json!("Bad Gateway"));
    }

    #[test]
    fn test_serialize_error_picks_known_keys() {
        let response = HttpResponse::new(
            403,
            HashMap::new(),
            json!({"error": "forbidden", "trace": "ignored"}),
        );
        assert_eq!(
            HttpClient::serialize_error(&response),
            r#"{"error":"forbidden"}"#
        );
    }

    #[test]
    fn test_serialize_error_uses_status_reason_for_empty_body() {
        let response = HttpResponse::new(401, HashMap::new(), serde_json::Value::Null);
        assert_eq!(HttpClient::serialize_error(&response), "Unauthorized");
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
