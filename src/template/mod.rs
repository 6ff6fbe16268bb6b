//! Built-in template collaborators
//!
//! The inheritance core only needs a [`TemplateEngine`](crate::inherit::TemplateEngine).
//! This module provides one: templates are loaded through a [`TemplateLoader`],
//! parsed with the crate's parser and executed by the [`Interpreter`] against
//! [`TemplateData`].
//!
//! # Example
//!
//! ```text
//! {% extends "layout" %}
//! {% block title %}{{ page.title }}{% endblock %}
//! ```

mod data;
mod interpreter;
mod registry;

pub use data::{display_value, DataError, TemplateData};
pub use interpreter::Interpreter;
pub use registry::{FileLoader, TemplateError, TemplateLoader, TemplateRegistry};
