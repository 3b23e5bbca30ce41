//! Configuration structures for the postdeck tool.
//!
//! - [`PostConfig`] - Batch defaults for create-post requests
//! - [`OutputConfig`] - Report formatting
//! - [`Config`] - Root configuration combining all settings
//!
//! Every section is `#[serde(default)]`, so a configuration file only needs to
//! name the options it changes.

use std::fs;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Tags;

/// Defaults applied to every create-post batch.
///
/// # Examples
///
/// ```
/// use pd_core::PostConfig;
///
/// let config = PostConfig::default();
/// assert_eq!(config.delay_minutes, 30);
/// assert_eq!(config.fallback_flair, "n/a");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostConfig {
    /// Title used for destinations without their own title.
    pub default_title: String,

    /// Comment posted under every submission.
    pub comment: String,

    /// Link to the image being posted.
    pub image_link: String,

    /// Tags used for destinations without their own tags.
    pub default_tags: Tags,

    /// Minutes from submission until posts go out.
    pub delay_minutes: u32,

    /// Flair chosen for destinations that offer none.
    pub fallback_flair: String,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            default_title: String::new(),
            comment: String::new(),
            image_link: String::new(),
            default_tags: Tags::new(),
            delay_minutes: 30,
            fallback_flair: "n/a".to_owned(),
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON reports.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Root configuration for the postdeck tool.
///
/// # Examples
///
/// ```
/// use pd_core::Config;
///
/// let config: Config = serde_json::from_str(r#"{"post": {"delay_minutes": 5}}"#).unwrap();
/// assert_eq!(config.post.delay_minutes, 5);
/// assert!(config.output.pretty);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Create-post defaults.
    pub post: PostConfig,

    /// Report output settings.
    pub output: OutputConfig,
}

impl Config {
    /// Parses and validates a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidOption`] if validation fails.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, plus the errors
    /// of [`from_json`](Self::from_json).
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Checks option values that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] naming the first invalid option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.post.fallback_flair.trim().is_empty() {
            return Err(ConfigError::invalid_option(
                "post.fallback_flair",
                "must not be empty",
            ));
        }
        Ok(())
    }
}
