//! Error types for the pd-core crate.
//!
//! This module provides the [`ConfigError`] type for failures while loading or
//! validating a [`Config`](crate::Config).

use camino::Utf8PathBuf;

/// Errors that can occur during configuration loading and validation.
///
/// # Examples
///
/// ```
/// use pd_core::ConfigError;
///
/// let error = ConfigError::InvalidOption {
///     option: "post.fallback_flair".to_owned(),
///     reason: "must not be empty".to_owned(),
/// };
/// assert!(error.to_string().contains("fallback_flair"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration '{path}': {source}")]
    Io {
        /// The file that was being read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates an [`InvalidOption`](Self::InvalidOption) error.
    #[must_use]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_option_display() {
        let error = ConfigError::invalid_option("post.fallback_flair", "must not be empty");
        let msg = error.to_string();
        assert!(msg.contains("post.fallback_flair"));
        assert!(msg.contains("must not be empty"));
    }

    #[test]
    fn test_io_display() {
        let error = ConfigError::Io {
            path: Utf8PathBuf::from("/missing/postdeck.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = error.to_string();
        assert!(msg.contains("/missing/postdeck.json"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_parse_from_serde() {
        let parse = serde_json::from_str::<u8>("not json").unwrap_err();
        let error = ConfigError::from(parse);
        assert!(error.to_string().starts_with("failed to parse configuration"));
    }
}
