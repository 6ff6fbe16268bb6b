//! Template sources: in-memory registry and file loader

use std::collections::HashMap;
use std::path::PathBuf;

use log::trace;
use thiserror::Error;

/// Errors that can occur while loading or executing a template
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TemplateError {
    /// Template not found
    #[error("template not found: {name}")]
    NotFound { name: String },

    /// Duplicate template registration
    #[error("duplicate template definition: {name}")]
    Duplicate { name: String },

    /// Error reading template file
    #[error("error reading template file {path}: {message}")]
    FileReadError { path: PathBuf, message: String },

    /// Variable missing from the render data
    #[error("undefined variable '{name}' in template {template}")]
    UndefinedVariable { template: String, name: String },

    /// Variable that resolves to an array or table
    #[error("variable '{name}' in template {template} is not printable ({kind})")]
    Unprintable {
        template: String,
        name: String,
        kind: &'static str,
    },
}

/// Resolves template names to template source
pub trait TemplateLoader {
    /// Load the source of the named template
    fn load(&self, name: &str) -> Result<String, TemplateError>;
}

/// In-memory collection of named templates
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, String>,
}

impl TemplateRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template
    pub fn register(
        &mut self,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<(), TemplateError> {
        let name = name.into();
        if self.templates.contains_key(&name) {
            return Err(TemplateError::Duplicate { name });
        }
        self.templates.insert(name, source.into());
        Ok(())
    }

    /// Builder-style registration, replacing any earlier source for `name`
    pub fn with_template(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.templates.insert(name.into(), source.into());
        self
    }

    /// Get a template's source by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(|s| s.as_str())
    }

    /// Check if a template exists
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}

impl TemplateLoader for TemplateRegistry {
    fn load(&self, name: &str) -> Result<String, TemplateError> {
        self.get(name)
            .map(str::to_string)
            .ok_or_else(|| TemplateError::NotFound {
                name: name.to_string(),
            })
    }
}

/// Loads templates from files under a base directory
#[derive(Debug, Clone)]
pub struct FileLoader {
    base_path: PathBuf,
    /// Extension appended to names that have none
    extension: String,
}

impl FileLoader {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            extension: crate::config::DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Set the default extension (without the leading dot)
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Resolve a template name to a file path
    ///
    /// `page` becomes `<base>/page.<ext>`; `page.txt` is used as given.
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        let path = self.base_path.join(name);
        if path.extension().is_none() && !self.extension.is_empty() {
            path.with_extension(&self.extension)
        } else {
            path
        }
    }
}

impl TemplateLoader for FileLoader {
    fn load(&self, name: &str) -> Result<String, TemplateError> {
        let path = self.resolve_path(name);
        trace!("loading template '{}' from {}", name, path.display());

        if !path.is_file() {
            return Err(TemplateError::NotFound {
                name: name.to_string(),
            });
        }
        std::fs::read_to_string(&path).map_err(|e| TemplateError::FileReadError {
            path,
            message: e.to_string(),
        })
    }
}
