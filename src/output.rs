//! JSON result files.
//!
//! Query results are written as pretty-printed UTF-8 JSON to
//! `<dir>/<prefix>_<YYYYmmdd_HHMMSS>.json`. Non-ASCII text is written as-is.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use thiserror::Error;

/// Timestamp layout used in result file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Errors that can occur while saving a result file.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The file name prefix was empty or contained a path separator.
    #[error("Invalid file name prefix '{prefix}': must be non-empty and contain no path separators")]
    InvalidPrefix {
        /// The rejected prefix.
        prefix: String,
    },

    /// The value could not be serialized.
    #[error("Could not serialize result: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The directory or file could not be written.
    #[error("Could not write '{}': {source}", path.display())]
    Io {
        /// The path being written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Returns the file name for a result saved at `at`.
///
/// # Example
///
/// ```rust
/// use chrono::{Local, TimeZone};
/// use school_graphql::output::timestamped_file_name;
///
/// let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
/// assert_eq!(timestamped_file_name("audits", &at), "audits_20240309_140507.json");
/// ```
#[must_use]
pub fn timestamped_file_name<Tz: TimeZone>(prefix: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{prefix}_{}.json", at.format(TIMESTAMP_FORMAT))
}

/// Writes `value` to a timestamped file under `dir` and returns its path.
///
/// `dir` is created if it does not exist.
///
/// # Errors
///
/// Returns [`OutputError::InvalidPrefix`] for an unusable prefix and
/// [`OutputError::Io`] if the directory or file cannot be written.
pub fn save_json(
    dir: &Path,
    prefix: &str,
    value: &serde_json::Value,
) -> Result<PathBuf, OutputError> {
    if prefix.trim().is_empty() || prefix.contains(['/', '\\']) {
        return Err(OutputError::InvalidPrefix {
            prefix: prefix.to_string(),
        });
    }

    fs::create_dir_all(dir).map_err(|source| OutputError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(timestamped_file_name(prefix, &Local::now()));
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');

    fs::write(&path, content).map_err(|source| OutputError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), "Saved result");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_file_name_uses_prefix_and_timestamp() {
        let at = Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 1).unwrap();
        assert_eq!(
            timestamped_file_name("introspection", &at),
            "introspection_20250131_235901.json"
        );
    }

    #[test]
    fn test_save_json_writes_pretty_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let value = json!({"user": [{"login": "алия", "campus": "astanahub"}]});

        let path = save_json(dir.path(), "user", &value).unwrap();

        assert!(path.starts_with(dir.path()));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("user_"));
        assert!(name.ends_with(".json"));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("алия"));
        assert!(content.contains("\n  \"user\""));
        let reread: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(reread, value);
    }

    #[test]
    fn test_save_json_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("results").join("audits");

        let path = save_json(&nested, "audit", &json!([])).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_json_rejects_bad_prefix() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            save_json(dir.path(), "../escape", &json!({})),
            Err(OutputError::InvalidPrefix { .. })
        ));
        assert!(matches!(
            save_json(dir.path(), " ", &json!({})),
            Err(OutputError::InvalidPrefix { .. })
        ));
    }
}
