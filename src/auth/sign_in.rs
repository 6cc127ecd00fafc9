//! Username/password sign-in.
//!
//! Exchanges a username and password for a bearer token:
//!
//! 1. The pair is framed as HTTP Basic credentials.
//! 2. An empty-bodied JSON `POST` is sent to the configured sign-in URL.
//! 3. A `200` response body is searched for the token (see
//!    [`extract_token`](crate::auth::extract_token)).
//!
//! Any other status, transport failure or tokenless body is an
//! [`AuthError`]. Nothing is retried.

use crate::auth::{extract_token, AuthError, Token};
use crate::clients::{Authorization, HttpClient};
use crate::config::{ClientConfig, Password, Username};

/// Exchanges a username and password for a bearer token.
///
/// # Errors
///
/// - [`AuthError::Rejected`] if the endpoint answers with anything but `200`
/// - [`AuthError::Transport`] if the request fails or the body is not JSON
/// - [`AuthError::MissingToken`] if the body carries no usable token
///
/// # Example
///
/// ```rust,ignore
/// use school_graphql::auth::sign_in;
///
/// let token = sign_in(&http_client, &config, &username, &password).await?;
/// ```
pub async fn sign_in(
    http_client: &HttpClient,
    config: &ClientConfig,
    username: &Username,
    password: &Password,
) -> Result<Token, AuthError> {
    tracing::debug!(url = %config.auth_url(), username = username.as_ref(), "Signing in");

    let response = http_client
        .post(
            config.auth_url(),
            Authorization::Basic(username, password),
            None,
        )
        .await?;

    if response.code != 200 {
        return Err(AuthError::Rejected {
            status: response.code,
            message: format!("expected status 200, got {}", response.code),
        });
    }

    let token = extract_token(&response.body)?;
    tracing::debug!(token = %token.preview(), "Sign-in succeeded");
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointUrl;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> ClientConfig {
        ClientConfig::builder()
            .auth_url(EndpointUrl::new(format!("{}/api/auth/signin", server.uri())).unwrap())
            .build()
    }

    fn credentials() -> (Username, Password) {
        (Username::new("user").unwrap(), Password::new("pass").unwrap())
    }

    #[tokio::test]
    async fn test_sign_in_sends_basic_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/signin"))
            .and(header("authorization", "Basic dXNlcjpwYXNz"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "X"})))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let http_client = HttpClient::new(&config).unwrap();
        let (username, password) = credentials();

        let token = sign_in(&http_client, &config, &username, &password)
            .await
            .unwrap();
        assert_eq!(token.as_ref(), "X");
    }

    #[tokio::test]
    async fn test_sign_in_sends_username_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/signin"))
            .and(header("authorization", "Basic IGFsaWNlIDpwdw=="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "X"})))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let http_client = HttpClient::new(&config).unwrap();
        let username = Username::new(" alice ").unwrap();
        let password = Password::new("pw").unwrap();

        let token = sign_in(&http_client, &config, &username, &password)
            .await
            .unwrap();
        assert_eq!(token.as_ref(), "X");
    }

    #[tokio::test]
    async fn test_sign_in_rejects_non_200_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/signin"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"token": "X"})))
            .mount(&server)
            .await;

        let config = config_for(&server);
        let http_client = HttpClient::new(&config).unwrap();
        let (username, password) = credentials();

        let result = sign_in(&http_client, &config, &username, &password).await;
        assert!(matches!(result, Err(AuthError::Rejected { status: 201, .. })));
    }

    #[tokio::test]
    async fn test_sign_in_non_json_body_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/signin"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let config = config_for(&server);
        let http_client = HttpClient::new(&config).unwrap();
        let (username, password) = credentials();

        let result = sign_in(&http_client, &config, &username, &password).await;
        assert!(matches!(result, Err(AuthError::Transport(_))));
    }
}
