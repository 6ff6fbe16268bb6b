//! Render data bound to template variables

use std::path::Path;

use thiserror::Error;
use toml::{Table, Value};

/// Errors that can occur when loading render data
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read data file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse data TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Variables available to templates, stored as a TOML table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateData {
    values: Table,
}

impl TemplateData {
    /// Create empty data
    pub fn new() -> Self {
        Self::default()
    }

    /// Load data from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load data from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, DataError> {
        let values: Table = toml::from_str(content)?;
        Ok(Self { values })
    }

    /// Set a top-level variable
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value by path segments (`["user", "name"]`)
    pub fn lookup<'a, I>(&self, path: I) -> Option<&Value>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut segments = path.into_iter();
        let mut value = self.values.get(segments.next()?)?;
        for segment in segments {
            value = value.as_table()?.get(segment)?;
        }
        Some(value)
    }
}

impl From<Table> for TemplateData {
    fn from(values: Table) -> Self {
        Self { values }
    }
}

/// Text for a scalar value, or the kind of value that cannot be printed
pub fn display_value(value: &Value) -> Result<String, &'static str> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Datetime(d) => Ok(d.to_string()),
        Value::Array(_) => Err("array"),
        Value::Table(_) => Err("table"),
    }
}
