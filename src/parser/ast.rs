//! Abstract Syntax Tree types for templates

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Valid identifier (alphanumeric, underscore or dash, starts with letter/_)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dotted variable reference: `user.name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariablePath(pub Vec<Identifier>);

impl VariablePath {
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(Identifier::as_str)
    }
}

impl std::fmt::Display for VariablePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self.segments().collect::<Vec<_>>().join(".");
        write!(f, "{}", joined)
    }
}

/// Root AST node - a parsed template body
///
/// Block markers are kept flat, in source order. Whether they balance is a
/// property of execution, not of syntax.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub nodes: Vec<Spanned<Node>>,
}

/// One piece of a template body
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text copied to the output
    Text(String),
    /// Variable substitution: `{{ user.name }}`
    Variable(VariablePath),
    /// Extend declaration: `{% extends "layout" %}`
    Extends(String),
    /// Block open: `{% block title %}`
    BlockStart(Identifier),
    /// Block close: `{% endblock %}` or `{% endblock title %}`
    BlockEnd(Option<Identifier>),
}
