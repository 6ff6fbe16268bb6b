//! The two-pass driver

use std::io::Write;

use log::debug;

use super::chain::ViewId;
use super::session::{RenderSession, ViewScope};
use crate::template::TemplateData;
use crate::RenderError;

/// Something that can execute a template body against a [`ViewScope`]
pub trait TemplateEngine {
    /// Run `template`, forwarding its output and block markers to `scope`
    fn execute(
        &self,
        template: &str,
        data: &TemplateData,
        scope: &mut dyn ViewScope,
    ) -> Result<(), RenderError>;
}

/// Resolves template inheritance on top of a [`TemplateEngine`]
///
/// A renderer holds no per-render state: every call builds its own chain,
/// so one renderer can serve any number of independent renders.
#[derive(Debug, Clone)]
pub struct Renderer<E> {
    engine: E,
}

impl<E: TemplateEngine> Renderer<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Render `view` and return the terminal view's output
    pub fn render_to_string(&self, view: &str, data: &TemplateData) -> Result<String, RenderError> {
        let mut session = self.build(view, data)?;
        session.start_render();
        self.walk(&mut session, data)?;
        Ok(session.into_output())
    }

    /// Render `view` and write the terminal view's output to `out`
    pub fn render_to<W: Write>(
        &self,
        view: &str,
        data: &TemplateData,
        out: &mut W,
    ) -> Result<(), RenderError> {
        let output = self.render_to_string(view, data)?;
        out.write_all(output.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Template names of the inheritance chain for `view`, leaf first
    ///
    /// Only the build pass runs; no output is produced.
    pub fn chain(&self, view: &str, data: &TemplateData) -> Result<Vec<String>, RenderError> {
        Ok(self.build(view, data)?.chain().templates())
    }

    /// Run the build pass, following `extends` until a view declares none
    fn build(&self, view: &str, data: &TemplateData) -> Result<RenderSession, RenderError> {
        debug!("building chain for '{}'", view);
        let mut session = RenderSession::new(view);
        let mut current = Some(session.chain().leaf());
        while let Some(id) = current {
            self.run_view(&mut session, id, data)?;
            current = session.chain().view(id).next();
        }
        Ok(session)
    }

    /// Run every view of an already built chain, leaf to terminal
    fn walk(&self, session: &mut RenderSession, data: &TemplateData) -> Result<(), RenderError> {
        let views: Vec<ViewId> = session.chain().views().collect();
        for id in views {
            self.run_view(session, id, data)?;
        }
        Ok(())
    }

    fn run_view(
        &self,
        session: &mut RenderSession,
        view: ViewId,
        data: &TemplateData,
    ) -> Result<(), RenderError> {
        let template = session.chain().view(view).template().to_string();
        session.enter_view(view);
        self.engine.execute(&template, data, session)?;
        session.leave_view()?;
        Ok(())
    }
}
