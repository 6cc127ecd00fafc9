//! Credential discovery and token persistence.
//!
//! Credentials are looked up in this order, first hit wins:
//!
//! 1. [`TOKEN_ENV`]: a pre-issued bearer token
//! 2. [`TOKEN_FILE_KEY`] in a dotenv-style token file (default [`DEFAULT_TOKEN_FILE`])
//! 3. [`USERNAME_ENV`] and [`PASSWORD_ENV`]: sign-in credentials
//!
//! Stored tokens whose JWT `exp` claim has passed are skipped with a warning.
//!
//! # Example
//!
//! ```rust,ignore
//! use school_graphql::auth::credentials;
//!
//! let credential = credentials::resolve(Some(Path::new(".env")))?;
//! let client = GraphqlClient::from_credential(config, credential).await?;
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::auth::Token;
use crate::config::{Password, Username};
use crate::error::ConfigError;

/// Environment variable holding a pre-issued bearer token.
pub const TOKEN_ENV: &str = "TOMORROW_SCHOOL_JWT";

/// Environment variable holding the sign-in username.
pub const USERNAME_ENV: &str = "TOMORROW_SCHOOL_USERNAME";

/// Environment variable holding the sign-in password.
pub const PASSWORD_ENV: &str = "TOMORROW_SCHOOL_PASSWORD";

/// Key under which the token file stores the bearer token.
pub const TOKEN_FILE_KEY: &str = "GRAPHQL_TOKEN";

/// Default token file location, relative to the working directory.
pub const DEFAULT_TOKEN_FILE: &str = ".env";

/// A credential that can open an authenticated session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credential {
    /// Username and password, exchanged for a token by signing in.
    Basic {
        /// Sign-in username.
        username: Username,
        /// Sign-in password.
        password: Password,
    },
    /// A pre-issued bearer token.
    Token(Token),
}

impl Credential {
    /// Creates a username/password credential.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either value is empty.
    pub fn basic(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::Basic {
            username: Username::new(username)?,
            password: Password::new(password)?,
        })
    }

    /// Creates a bearer token credential.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the token is empty or malformed.
    pub fn token(token: impl Into<String>) -> Result<Self, ConfigError> {
        Token::new(token).map(Self::Token)
    }
}

/// Errors that can occur while discovering or persisting credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No credential source yielded anything.
    #[error("No credentials found. Set {TOKEN_ENV}, store {TOKEN_FILE_KEY} in the token file, or set {USERNAME_ENV} and {PASSWORD_ENV}.")]
    NotFound,

    /// A source held a value that is not a usable credential.
    #[error("Invalid credential from {origin}: {source}")]
    Invalid {
        /// Where the value came from.
        origin: String,
        /// The validation failure.
        #[source]
        source: ConfigError,
    },

    /// The token file could not be read or written.
    #[error("Token file '{}' could not be accessed: {source}", path.display())]
    Io {
        /// The token file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The token file is not valid `KEY=value` syntax.
    #[error("Token file '{}' could not be parsed: {source}", path.display())]
    Parse {
        /// The token file path.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: dotenv::Error,
    },
}

/// Resolves a credential from the process environment and `token_file`.
///
/// # Errors
///
/// See [`resolve_with`].
pub fn resolve(token_file: Option<&Path>) -> Result<Credential, CredentialError> {
    resolve_with(|name| std::env::var(name).ok(), token_file)
}

/// Resolves a credential using `lookup` for environment variables.
///
/// # Errors
///
/// - [`CredentialError::Invalid`] if a source holds a malformed value, or
///   only one of username/password is set
/// - [`CredentialError::Io`] / [`CredentialError::Parse`] if the token file
///   exists but cannot be read
/// - [`CredentialError::NotFound`] if no source yields a credential
pub fn resolve_with<F>(lookup: F, token_file: Option<&Path>) -> Result<Credential, CredentialError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(value) = non_blank(TOKEN_ENV) {
        let token = Token::new(value).map_err(|source| CredentialError::Invalid {
            origin: TOKEN_ENV.to_string(),
            source,
        })?;
        if token.is_expired() {
            tracing::warn!("Token from {} has expired; ignoring it", TOKEN_ENV);
        } else {
            tracing::debug!("Using token from {}", TOKEN_ENV);
            return Ok(Credential::Token(token));
        }
    }

    if let Some(path) = token_file {
        if let Some(token) = read_token_file(path)? {
            if token.is_expired() {
                tracing::warn!(path = %path.display(), "Stored token has expired; ignoring it");
            } else {
                tracing::debug!(path = %path.display(), "Using stored token");
                return Ok(Credential::Token(token));
            }
        }
    }

    match (non_blank(USERNAME_ENV), non_blank(PASSWORD_ENV)) {
        (None, None) => Err(CredentialError::NotFound),
        (username, password) => {
            tracing::debug!("Using sign-in credentials from {}", USERNAME_ENV);
            Credential::basic(username.unwrap_or_default(), password.unwrap_or_default()).map_err(
                |source| CredentialError::Invalid {
                    origin: format!("{USERNAME_ENV}/{PASSWORD_ENV}"),
                    source,
                },
            )
        }
    }
}

/// Reads the token stored under [`TOKEN_FILE_KEY`] in `path`.
///
/// A missing file or a file without the key yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`CredentialError::Parse`] for malformed files,
/// [`CredentialError::Io`] for unreadable ones and
/// [`CredentialError::Invalid`] if the stored value is not a valid token.
pub fn read_token_file(path: &Path) -> Result<Option<Token>, CredentialError> {
    let entries = match token_file_entries(path) {
        Ok(entries) => entries,
        Err(dotenv::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(dotenv::Error::Io(source)) => {
            return Err(CredentialError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
        Err(source) => {
            return Err(CredentialError::Parse {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    for entry in entries {
        let (key, value) = entry.map_err(|source| CredentialError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if key == TOKEN_FILE_KEY {
            return Token::new(value)
                .map(Some)
                .map_err(|source| CredentialError::Invalid {
                    origin: path.display().to_string(),
                    source,
                });
        }
    }

    Ok(None)
}

// `from_path_iter` is the only dotenv 0.15 reader that leaves the process
// environment untouched; its suggested replacement loads every entry into it.
#[allow(deprecated)]
fn token_file_entries(
    path: &Path,
) -> dotenv::Result<impl Iterator<Item = dotenv::Result<(String, String)>>> {
    dotenv::from_path_iter(path)
}

/// Stores `token` under [`TOKEN_FILE_KEY`] in `path`.
///
/// Other entries already in the file are preserved; a previous token line
/// is replaced.
///
/// # Errors
///
/// Returns [`CredentialError::Io`] if the file cannot be read or written.
pub fn write_token_file(path: &Path, token: &Token) -> Result<(), CredentialError> {
    let io_error = |source| CredentialError::Io {
        path: path.to_path_buf(),
        source,
    };

    let existing = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(io_error(e)),
    };

    let mut content: String = existing
        .lines()
        .filter(|line| !is_token_line(line))
        .flat_map(|line| [line, "\n"])
        .collect();
    content.push_str(&format!("{TOKEN_FILE_KEY}={}\n", token.as_ref()));

    fs::write(path, content).map_err(io_error)?;
    tracing::debug!(path = %path.display(), "Stored token");
    Ok(())
}

fn is_token_line(line: &str) -> bool {
    let line = line.trim_start();
    let line = line.strip_prefix("export ").unwrap_or(line).trim_start();
    line.strip_prefix(TOKEN_FILE_KEY)
        .is_some_and(|rest| rest.trim_start().starts_with('='))
}
