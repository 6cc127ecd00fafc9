//! GraphQL client implementation.
//!
//! This module provides the [`GraphqlClient`] type, which owns the session
//! token and executes GraphQL documents against the configured endpoint.

use serde::de::DeserializeOwned;

use crate::auth::{sign_in, AuthError, Credential, Token};
use crate::clients::graphql::{
    GraphqlErrors, GraphqlRequest, QueryError, ResponseError, Variables,
};
use crate::clients::{Authorization, HttpClient, HttpError, InvalidResponseBodyError};
use crate::config::{ClientConfig, Password, Username};

/// Message recorded when a response carries an empty or null `errors` entry.
pub const UNSPECIFIED_ERROR: &str = "response reported errors without details";

/// Authentication state of a [`GraphqlClient`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientState {
    /// No token is held; queries fail with [`QueryError::NotAuthenticated`].
    Unauthenticated,
    /// A token is held and attached to every query.
    Authenticated,
}

/// GraphQL API client.
///
/// A client starts [`Unauthenticated`](ClientState::Unauthenticated).
/// A successful [`authenticate`](Self::authenticate) stores a token, after
/// which any number of queries may run. A failed `authenticate` drops
/// whatever token was held before. Tokens are never refreshed; an expired
/// token surfaces as a failing query.
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`. Queries take `&self`; only
/// `authenticate` needs exclusive access.
///
/// # Example
///
/// ```rust,ignore
/// use school_graphql::{ClientConfig, GraphqlClient};
/// use serde_json::json;
///
/// let mut client = GraphqlClient::new(ClientConfig::default())?;
/// client.authenticate("student", "secret").await?;
///
/// let data = client.query("{ user { id login } }", None).await?;
/// println!("{}", data["user"]);
///
/// let mut variables = serde_json::Map::new();
/// variables.insert("login".to_string(), json!("student"));
/// let data = client
///     .query(
///         "query($login: String!) { user(where: {login: {_eq: $login}}) { id } }",
///         Some(variables),
///     )
///     .await?;
/// ```
#[derive(Debug)]
pub struct GraphqlClient {
    http_client: HttpClient,
    config: ClientConfig,
    token: Option<Token>,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates an unauthenticated client.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP transport cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, HttpError> {
        Ok(Self {
            http_client: HttpClient::new(&config)?,
            config,
            token: None,
        })
    }

    /// Creates a client that is already authenticated with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP transport cannot be built.
    pub fn with_token(config: ClientConfig, token: Token) -> Result<Self, HttpError> {
        let mut client = Self::new(config)?;
        client.token = Some(token);
        Ok(client)
    }

    /// Creates a client from a resolved [`Credential`].
    ///
    /// A [`Credential::Token`] is used directly; a [`Credential::Basic`]
    /// signs in first.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the transport cannot be built or sign-in
    /// fails.
    pub async fn from_credential(
        config: ClientConfig,
        credential: Credential,
    ) -> Result<Self, AuthError> {
        match credential {
            Credential::Token(token) => Ok(Self::with_token(config, token)?),
            Credential::Basic { username, password } => {
                let mut client = Self::new(config)?;
                client.establish_session(&username, &password).await?;
                Ok(client)
            }
        }
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the current authentication state.
    #[must_use]
    pub const fn state(&self) -> ClientState {
        if self.token.is_some() {
            ClientState::Authenticated
        } else {
            ClientState::Unauthenticated
        }
    }

    /// Returns `true` if a token is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Returns the held token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Signs in with a username and password and stores the issued token.
    ///
    /// Any previously held token is discarded first, so on failure the
    /// client is left unauthenticated.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingCredentials`] if either value is empty; nothing is sent
    /// - [`AuthError::Rejected`] if the sign-in endpoint answers with anything but `200`
    /// - [`AuthError::Transport`] if the endpoint is unreachable or answers unreadably
    /// - [`AuthError::MissingToken`] if the response carries no usable token
    pub async fn authenticate(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<Token, AuthError> {
        self.token = None;
        let username = Username::new(username)?;
        let password = Password::new(password)?;
        self.establish_session(&username, &password).await
    }

    async fn establish_session(
        &mut self,
        username: &Username,
        password: &Password,
    ) -> Result<Token, AuthError> {
        self.token = None;
        match sign_in(&self.http_client, &self.config, username, password).await {
            Ok(token) => {
                self.token = Some(token.clone());
                Ok(token)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Authentication failed; client is unauthenticated");
                Err(e)
            }
        }
    }

    /// Executes a GraphQL query and returns its `data` object.
    ///
    /// Variables are sent alongside the query, never spliced into it. A
    /// response without `data` (or with `data: null`) yields an empty map.
    ///
    /// # Errors
    ///
    /// - [`QueryError::NotAuthenticated`] if no token is held; nothing is sent
    /// - [`QueryError::EmptyQuery`] if `query` is blank
    /// - [`QueryError::Transport`] for network failures, non-2xx statuses and
    ///   bodies that are not a JSON object
    /// - [`QueryError::Graphql`] if the response has an `errors` key, even when
    ///   `data` is also present or the list is empty
    pub async fn query(
        &self,
        query: &str,
        variables: Option<Variables>,
    ) -> Result<serde_json::Map<String, serde_json::Value>, QueryError> {
        let mut request = GraphqlRequest::new(query);
        if let Some(variables) = variables {
            request = request.variables(variables);
        }
        self.execute(&request).await
    }

    /// Executes a prepared [`GraphqlRequest`].
    ///
    /// # Errors
    ///
    /// Same as [`query`](Self::query).
    pub async fn execute(
        &self,
        request: &GraphqlRequest,
    ) -> Result<serde_json::Map<String, serde_json::Value>, QueryError> {
        let token = self.token.as_ref().ok_or(QueryError::NotAuthenticated)?;
        if request.query().trim().is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        let body = serde_json::to_value(request).map_err(QueryError::Encode)?;

        tracing::debug!(
            url = %self.config.api_url(),
            variables = request.variables_ref().map_or(0, serde_json::Map::len),
            "Executing GraphQL query"
        );

        let response = self
            .http_client
            .post(self.config.api_url(), Authorization::Bearer(token), Some(&body))
            .await?;

        Self::interpret_response(response.code, response.body)
    }

    /// Executes a request and decodes its `data` object into `T`.
    ///
    /// # Errors
    ///
    /// Same as [`query`](Self::query), plus [`QueryError::Decode`] if `data`
    /// does not match `T`.
    pub async fn execute_as<T: DeserializeOwned>(
        &self,
        request: &GraphqlRequest,
    ) -> Result<T, QueryError> {
        let data = self.execute(request).await?;
        serde_json::from_value(serde_json::Value::Object(data)).map_err(QueryError::Decode)
    }

    /// Splits a GraphQL response body into data or errors.
    fn interpret_response(
        code: u16,
        body: serde_json::Value,
    ) -> Result<serde_json::Map<String, serde_json::Value>, QueryError> {
        let serde_json::Value::Object(mut body) = body else {
            return Err(HttpError::from(InvalidResponseBodyError {
                code,
                reason: "expected a JSON object".to_string(),
            })
            .into());
        };

        let data = body.remove("data").filter(|data| !data.is_null());

        if let Some(errors) = body.remove("errors") {
            let mut errors: Vec<ResponseError> = match errors {
                serde_json::Value::Null => Vec::new(),
                serde_json::Value::Array(entries) => {
                    entries.iter().map(ResponseError::from_value).collect()
                }
                other => vec![ResponseError::from_value(&other)],
            };
            // A present `errors` key fails the query even when it lists nothing.
            if errors.is_empty() {
                errors.push(ResponseError::from_message(UNSPECIFIED_ERROR));
            }
            tracing::debug!(count = errors.len(), "GraphQL response reported errors");
            return Err(QueryError::Graphql(GraphqlErrors::new(errors, data)));
        }

        match data {
            None => Ok(serde_json::Map::new()),
            Some(serde_json::Value::Object(data)) => Ok(data),
            Some(_) => Err(HttpError::from(InvalidResponseBodyError {
                code,
                reason: "`data` is not a JSON object".to_string(),
            })
            .into()),
        }
    }
}
