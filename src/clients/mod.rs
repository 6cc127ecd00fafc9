//! HTTP and GraphQL client types.
//!
//! # Overview
//!
//! - [`HttpClient`]: the async transport shared by sign-in and queries
//! - [`Authorization`]: the scheme attached to one request (Basic or Bearer)
//! - [`HttpResponse`]: a response with its body parsed as JSON
//! - [`HttpError`]: transport-level failures
//! - [`graphql::GraphqlClient`]: the authenticated GraphQL client
//! - [`graphql::QueryError`]: query failures
//!
//! # Retry Behavior
//!
//! Nothing is retried. [`HttpError::is_retryable`] classifies network
//! errors, `429` and `5xx` responses as transient for callers that want to
//! layer their own retry policy.

mod errors;
pub mod graphql;
mod http_client;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidResponseBodyError};
pub use http_client::{Authorization, HttpClient, SDK_VERSION};
pub use http_response::HttpResponse;

pub use graphql::{
    ClientState, GraphqlClient, GraphqlErrors, GraphqlRequest, QueryError, ResponseError,
    Variables,
};
