//! GraphQL API client.
//!
//! This module provides the authenticated client built on top of the
//! [`HttpClient`](crate::clients::HttpClient).
//!
//! # Overview
//!
//! - [`GraphqlClient`]: owns the session token and runs queries
//! - [`ClientState`]: whether the client currently holds a token
//! - [`GraphqlRequest`]: a query document plus its [`Variables`]
//! - [`QueryError`]: query failures, split into transport and GraphQL errors
//! - [`GraphqlErrors`] / [`ResponseError`]: the `errors` a response reported
//!
//! # Response Structure
//!
//! GraphQL responses carry `data` and, on failure, `errors`. A response with
//! an `errors` key is a failure even when `data` is also present or the
//! list is empty; the partial data is kept on [`GraphqlErrors`] for
//! diagnostics only.
//!
//! # Example
//!
//! ```rust,ignore
//! use school_graphql::{ClientConfig, GraphqlClient, GraphqlRequest};
//!
//! let mut client = GraphqlClient::new(ClientConfig::default())?;
//! client.authenticate("student", "secret").await?;
//!
//! let request = GraphqlRequest::new(
//!     "query($limit: Int!) { transaction(limit: $limit, order_by: {createdAt: desc}) { amount } }",
//! )
//! .variable("limit", 5);
//! let data = client.execute(&request).await?;
//! ```

mod client;
mod errors;
mod request;

pub use client::{ClientState, GraphqlClient, UNSPECIFIED_ERROR};
pub use errors::{GraphqlErrors, QueryError, ResponseError};
pub use request::{GraphqlRequest, Variables};
