//! Render configuration
//!
//! Configuration can be built in code or loaded from a TOML file:
//!
//! ```toml
//! [templates]
//! dir = "views"
//! extension = "html"
//!
//! [render]
//! strict_variables = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Extension appended to template names that have none
pub const DEFAULT_EXTENSION: &str = "html";

/// Errors that can occur when loading or parsing a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration for rendering templates from disk
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Directory template names are resolved against
    pub template_dir: PathBuf,
    /// Extension appended to template names without one
    pub extension: String,
    /// Fail on undefined variables instead of printing nothing
    pub strict_variables: bool,
}

/// TOML structure for deserializing configuration
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    templates: TomlTemplates,
    #[serde(default)]
    render: TomlRender,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlTemplates {
    dir: Option<PathBuf>,
    extension: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlRender {
    strict_variables: Option<bool>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from("."),
            extension: DEFAULT_EXTENSION.to_string(),
            strict_variables: true,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    ///
    /// A relative `templates.dir` is resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_str(&content)?;
        if config.template_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.template_dir = parent.join(&config.template_dir);
            }
        }
        Ok(config)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let defaults = Self::default();

        Ok(RenderConfig {
            template_dir: parsed.templates.dir.unwrap_or(defaults.template_dir),
            extension: parsed.templates.extension.unwrap_or(defaults.extension),
            strict_variables: parsed
                .render
                .strict_variables
                .unwrap_or(defaults.strict_variables),
        })
    }

    /// Set the template directory
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = dir.into();
        self
    }

    /// Set the default template extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Enable or disable strict variable lookup
    pub fn with_strict_variables(mut self, strict: bool) -> Self {
        self.strict_variables = strict;
        self
    }
}
