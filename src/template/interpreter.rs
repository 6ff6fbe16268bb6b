//! Built-in template engine

use crate::inherit::{Pass, TemplateEngine, ViewScope};
use crate::parser::{parse, Node, VariablePath};
use crate::RenderError;

use super::data::{display_value, TemplateData};
use super::registry::{TemplateError, TemplateLoader};

/// Executes templates written in the built-in syntax
///
/// Templates are loaded and parsed on every execution.
#[derive(Debug, Clone)]
pub struct Interpreter<L> {
    loader: L,
    /// Fail on undefined variables instead of printing nothing
    strict_variables: bool,
}

impl<L: TemplateLoader> Interpreter<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            strict_variables: true,
        }
    }

    pub fn with_strict_variables(mut self, strict: bool) -> Self {
        self.strict_variables = strict;
        self
    }

    fn variable(
        &self,
        template: &str,
        path: &VariablePath,
        data: &TemplateData,
    ) -> Result<String, TemplateError> {
        match data.lookup(path.segments()) {
            Some(value) => display_value(value).map_err(|kind| TemplateError::Unprintable {
                template: template.to_string(),
                name: path.to_string(),
                kind,
            }),
            None if self.strict_variables => Err(TemplateError::UndefinedVariable {
                template: template.to_string(),
                name: path.to_string(),
            }),
            None => Ok(String::new()),
        }
    }
}

impl<L: TemplateLoader> TemplateEngine for Interpreter<L> {
    fn execute(
        &self,
        template: &str,
        data: &TemplateData,
        scope: &mut dyn ViewScope,
    ) -> Result<(), RenderError> {
        let source = self.loader.load(template)?;
        let doc = parse(&source).map_err(|errors| RenderError::Parse {
            template: template.to_string(),
            text: source.clone(),
            errors,
        })?;

        for node in &doc.nodes {
            match &node.node {
                Node::Text(text) => scope.write(text),
                Node::Variable(path) => {
                    // Output is suppressed while building, so skip the lookup.
                    if scope.pass() == Pass::Render {
                        let value = self.variable(template, path, data)?;
                        scope.write(&value);
                    }
                }
                Node::Extends(target) => scope.extends(target)?,
                Node::BlockStart(name) => scope.start_block(name.as_str())?,
                Node::BlockEnd(name) => scope.end_block(name.as_ref().map(|n| n.as_str()))?,
            }
        }
        Ok(())
    }
}
