//! view-inherit - template inheritance for layout/page templates
//!
//! A page template declares the layout it extends and overrides named blocks;
//! rendering produces the outermost layout's markup with every block filled by
//! the most specific template that declared it.
//!
//! # Example
//!
//! ```rust
//! use view_inherit::{Interpreter, Renderer, TemplateData, TemplateRegistry};
//!
//! let templates = TemplateRegistry::new()
//!     .with_template("page", r#"{% extends "layout" %}{% block title %}Home{% endblock %}"#)
//!     .with_template("layout", "<h1>{% block title %}Default{% endblock %}</h1>Body");
//!
//! let renderer = Renderer::new(Interpreter::new(templates));
//! let html = renderer.render_to_string("page", &TemplateData::new()).unwrap();
//! assert_eq!(html, "<h1>Home</h1>Body");
//! ```

pub mod config;
pub mod error;
pub mod inherit;
pub mod parser;
pub mod template;

pub use config::{ConfigError, RenderConfig};
pub use error::ParseError;
pub use inherit::{InheritError, Pass, Renderer, TemplateEngine, ViewScope};
pub use parser::{parse, Document};
pub use template::{
    FileLoader, Interpreter, TemplateData, TemplateError, TemplateLoader, TemplateRegistry,
};

use std::io::Write;

use thiserror::Error;

/// Errors that can occur during a render
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template source could not be parsed
    #[error("parse errors in template '{template}': {}", format_parse_errors(.errors))]
    Parse {
        template: String,
        /// The source that failed to parse, for error reports
        text: String,
        errors: Vec<ParseError>,
    },

    /// Template could not be loaded or evaluated
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Templates describe an invalid inheritance structure
    #[error(transparent)]
    Inherit(#[from] InheritError),

    /// Output could not be written
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Build a renderer for templates on disk
pub fn file_renderer(config: &RenderConfig) -> Renderer<Interpreter<FileLoader>> {
    let loader = FileLoader::new(&config.template_dir).with_extension(&config.extension);
    Renderer::new(Interpreter::new(loader).with_strict_variables(config.strict_variables))
}

/// Render `view` from the current directory and return the output
///
/// # Example
///
/// ```rust,no_run
/// let html = view_inherit::render("page", &view_inherit::TemplateData::new()).unwrap();
/// println!("{}", html);
/// ```
pub fn render(view: &str, data: &TemplateData) -> Result<String, RenderError> {
    render_with_config(view, data, &RenderConfig::default())
}

/// Render `view` with custom configuration and return the output
pub fn render_with_config(
    view: &str,
    data: &TemplateData,
    config: &RenderConfig,
) -> Result<String, RenderError> {
    file_renderer(config).render_to_string(view, data)
}

/// Render `view` with custom configuration, writing the output to `out`
pub fn render_to<W: Write>(
    view: &str,
    data: &TemplateData,
    config: &RenderConfig,
    out: &mut W,
) -> Result<(), RenderError> {
    file_renderer(config).render_to(view, data, out)
}
