//! Configuration types for the GraphQL client.
//!
//! # Overview
//!
//! - [`ClientConfig`]: endpoint URLs and transport settings
//! - [`ClientConfigBuilder`]: a builder for constructing [`ClientConfig`] instances
//! - [`EndpointUrl`]: a validated absolute URL
//! - [`Username`] / [`Password`]: validated sign-in credentials
//!
//! # Example
//!
//! ```rust
//! use school_graphql::{ClientConfig, EndpointUrl};
//!
//! let config = ClientConfig::builder()
//!     .api_url(EndpointUrl::new("https://example.com/v1/graphql").unwrap())
//!     .user_agent_prefix("audit-report/0.1")
//!     .build();
//!
//! assert_eq!(config.api_url().as_ref(), "https://example.com/v1/graphql");
//! ```

mod newtypes;

pub use newtypes::{EndpointUrl, Password, Username};

use std::time::Duration;

use crate::error::ConfigError;

/// Default sign-in endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://01.tomorrow-school.ai/api/auth/signin";

/// Default GraphQL endpoint.
pub const DEFAULT_API_URL: &str = "https://01.tomorrow-school.ai/api/graphql-engine/v1/graphql";

/// Environment variable overriding the sign-in endpoint.
pub const AUTH_URL_ENV: &str = "TOMORROW_SCHOOL_AUTH_URL";

/// Environment variable overriding the GraphQL endpoint.
pub const API_URL_ENV: &str = "TOMORROW_SCHOOL_API_URL";

/// Configuration for [`GraphqlClient`](crate::GraphqlClient).
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    auth_url: EndpointUrl,
    api_url: EndpointUrl,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Builds a configuration from the process environment.
    ///
    /// Reads [`AUTH_URL_ENV`] and [`API_URL_ENV`]; unset variables fall back
    /// to the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if a variable is set to an
    /// invalid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration using `lookup` to resolve variable names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if a variable resolves to an
    /// invalid URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = ClientConfigBuilder::new();
        if let Some(url) = Self::lookup_url(&lookup, AUTH_URL_ENV)? {
            builder = builder.auth_url(url);
        }
        if let Some(url) = Self::lookup_url(&lookup, API_URL_ENV)? {
            builder = builder.api_url(url);
        }
        Ok(builder.build())
    }

    fn lookup_url<F>(lookup: &F, name: &'static str) -> Result<Option<EndpointUrl>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(name).filter(|value| !value.trim().is_empty()) {
            None => Ok(None),
            Some(value) => EndpointUrl::new(value)
                .map(Some)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    name,
                    reason: e.to_string(),
                }),
        }
    }

    /// Returns the sign-in endpoint.
    #[must_use]
    pub const fn auth_url(&self) -> &EndpointUrl {
        &self.auth_url
    }

    /// Returns the GraphQL endpoint.
    #[must_use]
    pub const fn api_url(&self) -> &EndpointUrl {
        &self.api_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the transport timeout, if configured.
    ///
    /// `None` leaves the transport default in place.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfigBuilder::new().build()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// # Defaults
///
/// - `auth_url`: [`DEFAULT_AUTH_URL`]
/// - `api_url`: [`DEFAULT_API_URL`]
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    auth_url: Option<EndpointUrl>,
    api_url: Option<EndpointUrl>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sign-in endpoint.
    #[must_use]
    pub fn auth_url(mut self, url: EndpointUrl) -> Self {
        self.auth_url = Some(url);
        self
    }

    /// Sets the GraphQL endpoint.
    #[must_use]
    pub fn api_url(mut self, url: EndpointUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets a transport timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// Every field has a default, so building cannot fail.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        ClientConfig {
            auth_url: self.auth_url.unwrap_or_else(default_auth_url),
            api_url: self.api_url.unwrap_or_else(default_api_url),
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        }
    }
}

fn default_auth_url() -> EndpointUrl {
    EndpointUrl::new(DEFAULT_AUTH_URL).unwrap_or_else(|_| unreachable!("default auth URL is valid"))
}

fn default_api_url() -> EndpointUrl {
    EndpointUrl::new(DEFAULT_API_URL).unwrap_or_else(|_| unreachable!("default API URL is valid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ClientConfig::builder().build();

        assert_eq!(config.auth_url().as_ref(), DEFAULT_AUTH_URL);
        assert_eq!(config.api_url().as_ref(), DEFAULT_API_URL);
        assert!(config.user_agent_prefix().is_none());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = ClientConfig::builder()
            .auth_url(EndpointUrl::new("http://localhost:4000/signin").unwrap())
            .api_url(EndpointUrl::new("http://localhost:4000/graphql").unwrap())
            .user_agent_prefix("reporter/1.0")
            .timeout(Duration::from_secs(5))
            .build();

        assert_eq!(config.auth_url().as_ref(), "http://localhost:4000/signin");
        assert_eq!(config.api_url().as_ref(), "http://localhost:4000/graphql");
        assert_eq!(config.user_agent_prefix(), Some("reporter/1.0"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_from_lookup_overrides_endpoints() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (AUTH_URL_ENV, "http://127.0.0.1:9000/auth"),
            (API_URL_ENV, "http://127.0.0.1:9000/graphql"),
        ]);

        let config = ClientConfig::from_lookup(|name| vars.get(name).map(ToString::to_string))
            .unwrap();

        assert_eq!(config.auth_url().as_ref(), "http://127.0.0.1:9000/auth");
        assert_eq!(config.api_url().as_ref(), "http://127.0.0.1:9000/graphql");
    }

    #[test]
    fn test_from_lookup_ignores_blank_values() {
        let config = ClientConfig::from_lookup(|_| Some("  ".to_string())).unwrap();
        assert_eq!(config.api_url().as_ref(), DEFAULT_API_URL);
    }

    #[test]
    fn test_from_lookup_rejects_invalid_url() {
        let result = ClientConfig::from_lookup(|name| {
            (name == API_URL_ENV).then(|| "graphql.example.com".to_string())
        });

        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvVar { name: API_URL_ENV, .. })
        ));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClientConfig>();
    }
}
