//! # Tomorrow School GraphQL client
//!
//! An async client for the Tomorrow School GraphQL API: sign in with a
//! username and password (or reuse a stored token), then run GraphQL queries
//! with separately passed variables.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - Validated newtypes for endpoints, credentials and tokens
//! - HTTP Basic sign-in returning a bearer [`Token`]
//! - [`GraphqlClient`] with a two-state (unauthenticated / authenticated) lifecycle
//! - Typed failures that keep transport errors apart from GraphQL `errors`
//! - Credential discovery from the environment or a token file via [`auth::credentials`]
//! - Schema [`introspection`] helpers and timestamped JSON [`output`] files
//!
//! ## Quick Start
//!
//! ```rust
//! use school_graphql::{ClientConfig, EndpointUrl};
//!
//! let config = ClientConfig::builder()
//!     .api_url(EndpointUrl::new("https://01.tomorrow-school.ai/api/graphql-engine/v1/graphql").unwrap())
//!     .user_agent_prefix("progress-report/1.0")
//!     .build();
//!
//! assert_eq!(config.api_url().host_name(), "01.tomorrow-school.ai");
//! ```
//!
//! ## Authenticating and Querying
//!
//! ```rust,ignore
//! use school_graphql::{ClientConfig, GraphqlClient, GraphqlRequest};
//!
//! let mut client = GraphqlClient::new(ClientConfig::default())?;
//! client.authenticate("student", "secret").await?;
//!
//! let request = GraphqlRequest::new(
//!     "query($login: String!) { user(where: {login: {_eq: $login}}) { id auditRatio } }",
//! )
//! .variable("login", "student");
//! let data = client.execute(&request).await?;
//! println!("{}", data["user"]);
//! ```
//!
//! ## Stored Credentials
//!
//! ```rust,ignore
//! use std::path::Path;
//! use school_graphql::{auth::credentials, ClientConfig, GraphqlClient};
//!
//! // TOMORROW_SCHOOL_JWT, then GRAPHQL_TOKEN in .env, then
//! // TOMORROW_SCHOOL_USERNAME / TOMORROW_SCHOOL_PASSWORD
//! let credential = credentials::resolve(Some(Path::new(".env")))?;
//! let client = GraphqlClient::from_credential(ClientConfig::from_env()?, credential).await?;
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use school_graphql::{ConfigError, Password, Username};
//!
//! assert!(matches!(Username::new("  "), Err(ConfigError::EmptyUsername)));
//! assert!(matches!(Password::new(""), Err(ConfigError::EmptyPassword)));
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: clients and configuration are explicit instances
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime
//! - **No silent fallbacks**: a response without a recognised token is an error

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod introspection;
pub mod output;

// Re-export public types at crate root for convenience
pub use auth::{AuthError, Credential, CredentialError, Token, TokenClaims};
pub use config::{ClientConfig, ClientConfigBuilder, EndpointUrl, Password, Username};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    ClientState, GraphqlClient, GraphqlErrors, GraphqlRequest, HttpClient, HttpError,
    HttpResponse, HttpResponseError, QueryError, ResponseError, Variables,
};
pub use output::{save_json, OutputError};
