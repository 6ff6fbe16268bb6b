//! Per-render session state and the callbacks template bodies use

use log::{debug, trace, warn};

use super::capture::OutputCapture;
use super::chain::{BlockId, Chain, ViewId};
use super::error::InheritError;
use super::resolver::{self, Emission};

/// Which of the two traversals is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Discover the chain and block skeletons; output is suppressed
    Build,
    /// Capture block text and resolve overrides
    Render,
}

/// Callbacks available to a template body while it executes
///
/// A template engine receives one of these for the view it is running and
/// forwards its `extends` declarations, block markers and literal output.
pub trait ViewScope {
    /// The pass currently running
    fn pass(&self) -> Pass;

    /// Declare that the current view extends `target`
    fn extends(&mut self, target: &str) -> Result<(), InheritError>;

    /// Open a named block
    fn start_block(&mut self, name: &str) -> Result<(), InheritError>;

    /// Close the innermost open block, optionally checking its name
    fn end_block(&mut self, name: Option<&str>) -> Result<(), InheritError>;

    /// Write text produced by the template body
    fn write(&mut self, text: &str);
}

/// State for one render call
#[derive(Debug)]
pub struct RenderSession {
    chain: Chain,
    pass: Pass,
    current_view: ViewId,
    current_block: BlockId,
    capture: OutputCapture,
}

impl RenderSession {
    /// Start a session whose chain holds only the leaf view
    pub fn new(leaf: impl Into<String>) -> Self {
        let chain = Chain::new(leaf);
        let current_view = chain.leaf();
        let current_block = chain.view(current_view).head();
        Self {
            chain,
            pass: Pass::Build,
            current_view,
            current_block,
            capture: OutputCapture::new(),
        }
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn current_view(&self) -> ViewId {
        self.current_view
    }

    /// Switch from building to rendering
    pub fn start_render(&mut self) {
        debug!(
            "chain built with {} views: {}",
            self.chain.view_count(),
            self.chain.templates().join(" -> ")
        );
        self.pass = Pass::Render;
    }

    /// Make `view` current, with its head as the current block
    pub fn enter_view(&mut self, view: ViewId) {
        trace!(
            "{:?} pass entering view '{}'",
            self.pass,
            self.chain.view(view).template()
        );
        self.current_view = view;
        self.current_block = self.chain.view(view).head();
    }

    /// Check that the current view's body closed every block it opened
    pub fn leave_view(&mut self) -> Result<(), InheritError> {
        let block = self.chain.block(self.current_block);
        if let Some(name) = block.name() {
            self.capture.discard();
            return Err(InheritError::unclosed(self.view_name(), name));
        }
        Ok(())
    }

    /// Consume the session and return the terminal view's output
    pub fn into_output(self) -> String {
        self.capture.finish()
    }

    fn view_name(&self) -> String {
        self.chain.view(self.current_view).template().to_string()
    }
}

impl ViewScope for RenderSession {
    fn pass(&self) -> Pass {
        self.pass
    }

    fn extends(&mut self, target: &str) -> Result<(), InheritError> {
        match self.pass {
            Pass::Build => {
                let id = self.chain.extend(self.current_view, target)?;
                debug!(
                    "'{}' extends '{}'",
                    self.view_name(),
                    self.chain.view(id).template()
                );
            }
            Pass::Render => {
                let view = self.chain.view(self.current_view);
                let linked = view.next().map(|id| self.chain.view(id).template());
                if linked != Some(target) {
                    warn!(
                        "'{}' extends '{}' while rendering but was built against {:?}",
                        view.template(),
                        target,
                        linked
                    );
                }
            }
        }
        Ok(())
    }

    fn start_block(&mut self, name: &str) -> Result<(), InheritError> {
        match self.pass {
            Pass::Build => {
                self.current_block =
                    self.chain
                        .open_block(self.current_view, self.current_block, name)?;
            }
            Pass::Render => {
                let block = self
                    .chain
                    .view(self.current_view)
                    .find_block(name)
                    .ok_or_else(|| InheritError::MissingBlock {
                        view: self.view_name(),
                        name: name.to_string(),
                    })?;
                self.current_block = block;
                self.capture.begin();
            }
        }
        Ok(())
    }

    fn end_block(&mut self, name: Option<&str>) -> Result<(), InheritError> {
        let block = self.chain.block(self.current_block);
        let (Some(open), Some(parent)) = (block.name(), block.parent()) else {
            return Err(InheritError::stray_end(self.view_name()));
        };
        if let Some(expected) = name {
            if expected != open {
                return Err(InheritError::BlockMismatch {
                    view: self.view_name(),
                    expected: open.to_string(),
                    found: expected.to_string(),
                });
            }
        }

        if self.pass == Pass::Render {
            let content = self
                .capture
                .end()
                .ok_or_else(|| InheritError::stray_end(self.view_name()))?;
            let closed = self.current_block;
            self.chain.set_content(closed, content);

            if resolver::resolve(&mut self.chain, self.current_view, closed) == Emission::Emit {
                let content = self.chain.block(closed).content().to_string();
                self.capture.write(&content);
            }
        }

        self.current_block = parent;
        Ok(())
    }

    fn write(&mut self, text: &str) {
        if self.pass == Pass::Build {
            return;
        }
        // Top-level text only reaches the output from the terminal view.
        if self.capture.is_capturing() || self.chain.view(self.current_view).is_terminal() {
            self.capture.write(text);
        }
    }
}
