//! Error types for chain construction and block resolution

use thiserror::Error;

/// Structural errors raised while building or rendering an inheritance chain.
///
/// Every variant points at a defect in the templates themselves, so none of
/// them is retried; the render that hit it is abandoned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InheritError {
    /// A view body declared more than one `extends`
    #[error("view '{view}' extends more than once ('{first}', then '{second}')")]
    Structure {
        view: String,
        first: String,
        second: String,
    },

    /// Two blocks with the same name in one view's tree
    #[error("block '{name}' is declared more than once in view '{view}'")]
    DuplicateBlock { view: String, name: String },

    /// `endblock` named a block other than the one currently open
    #[error("endblock '{found}' in view '{view}' does not match open block '{expected}'")]
    BlockMismatch {
        view: String,
        expected: String,
        found: String,
    },

    /// `endblock` with nothing open, or a body that ended with a block still open
    #[error("unbalanced blocks in view '{view}': {}", describe_unbalanced(.open))]
    UnbalancedBlock { view: String, open: Option<String> },

    /// A block opened during rendering was never seen while building the chain
    #[error("block '{name}' in view '{view}' was not declared when the chain was built")]
    MissingBlock { view: String, name: String },

    /// An `extends` target already appears in the chain
    #[error("circular extends: {}", chain.join(" -> "))]
    CircularExtend { chain: Vec<String> },
}

fn describe_unbalanced(open: &Option<String>) -> String {
    match open {
        Some(name) => format!("block '{}' is never closed", name),
        None => "endblock without a matching block".to_string(),
    }
}

impl InheritError {
    /// Create an unclosed-block error
    pub fn unclosed(view: impl Into<String>, block: impl Into<String>) -> Self {
        Self::UnbalancedBlock {
            view: view.into(),
            open: Some(block.into()),
        }
    }

    /// Create an error for an `endblock` with nothing open
    pub fn stray_end(view: impl Into<String>) -> Self {
        Self::UnbalancedBlock {
            view: view.into(),
            open: None,
        }
    }
}
