//! Validated newtype wrappers for configuration and credential values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated sign-in username (login or email).
///
/// # Example
///
/// ```rust
/// use school_graphql::Username;
///
/// let username = Username::new("student").unwrap();
/// assert_eq!(username.as_ref(), "student");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Creates a new validated username.
    ///
    /// Usernames are sent exactly as given, like passwords.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] if the username is empty or
    /// only whitespace.
    pub fn new(username: impl Into<String>) -> Result<Self, ConfigError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated sign-in password.
///
/// # Security
///
/// The `Debug` implementation masks the value, displaying only
/// `Password(*****)`.
///
/// ```rust
/// use school_graphql::Password;
///
/// let password = Password::new("hunter2").unwrap();
/// assert_eq!(format!("{:?}", password), "Password(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Creates a new validated password.
    ///
    /// Passwords are kept verbatim; whitespace is significant.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPassword`] if the password is empty.
    pub fn new(password: impl Into<String>) -> Result<Self, ConfigError> {
        let password = password.into();
        if password.is_empty() {
            return Err(ConfigError::EmptyPassword);
        }
        Ok(Self(password))
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(*****)")
    }
}

/// A validated absolute endpoint URL.
///
/// Only `http` and `https` schemes are accepted.
///
/// # Example
///
/// ```rust
/// use school_graphql::EndpointUrl;
///
/// let url = EndpointUrl::new("https://example.com/api/graphql").unwrap();
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl EndpointUrl {
    /// Creates a new validated endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpointUrl`] if the URL has no
    /// `http`/`https` scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().to_string();
        let invalid = || ConfigError::InvalidEndpointUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start || remainder.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for EndpointUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rejects_empty_and_blank() {
        assert!(matches!(Username::new(""), Err(ConfigError::EmptyUsername)));
        assert!(matches!(
            Username::new("   "),
            Err(ConfigError::EmptyUsername)
        ));
    }

    #[test]
    fn test_username_keeps_surrounding_whitespace() {
        let username = Username::new(" alice ").unwrap();
        assert_eq!(username.as_ref(), " alice ");
    }

    #[test]
    fn test_password_keeps_whitespace() {
        let password = Password::new(" spaced ").unwrap();
        assert_eq!(password.as_ref(), " spaced ");
    }

    #[test]
    fn test_password_masks_value_in_debug() {
        let password = Password::new("super-secret").unwrap();
        let debug_output = format!("{:?}", password);
        assert_eq!(debug_output, "Password(*****)");
        assert!(!debug_output.contains("super-secret"));
    }

    #[test]
    fn test_password_rejects_empty() {
        assert!(matches!(Password::new(""), Err(ConfigError::EmptyPassword)));
    }

    #[test]
    fn test_endpoint_url_parts() {
        let url = EndpointUrl::new("http://127.0.0.1:8080/graphql").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), "127.0.0.1");
        assert_eq!(url.as_ref(), "http://127.0.0.1:8080/graphql");
        assert_eq!(url.to_string(), "http://127.0.0.1:8080/graphql");
    }

    #[test]
    fn test_endpoint_url_rejects_invalid() {
        assert!(EndpointUrl::new("example.com/graphql").is_err());
        assert!(EndpointUrl::new("https://").is_err());
        assert!(EndpointUrl::new("ftp://example.com").is_err());
        assert!(EndpointUrl::new("https://exa mple.com").is_err());
        assert!(EndpointUrl::new("https:///path").is_err());
    }
}
