//! Template inheritance resolution
//!
//! Rendering a view runs two full walks over its inheritance chain:
//!
//! 1. **Build**: every template body runs once with output suppressed. `extends`
//!    declarations grow the chain from the leaf towards the terminal view, and
//!    block markers build each view's block tree.
//! 2. **Render**: the same chain is walked again, leaf first. Each block's text
//!    is captured; when it closes, the leaf-most declaration of its name wins
//!    and the emission rule decides whether it becomes output now or is only
//!    kept for a later override.
//!
//! The final output is whatever the terminal view emits, plus any block that no
//! base-ward view declares, which surfaces where it was declared.
//!
//! # Example
//!
//! ```text
//! {# page #}
//! {% extends "layout" %}
//! {% block title %}Home{% endblock %}
//!
//! {# layout #}
//! <h1>{% block title %}Default{% endblock %}</h1>Body
//! ```
//!
//! Rendering `page` produces `<h1>Home</h1>Body`.

mod capture;
mod chain;
mod error;
mod renderer;
mod resolver;
mod session;

pub use capture::OutputCapture;
pub use chain::{Block, BlockId, Chain, View, ViewId};
pub use error::InheritError;
pub use renderer::{Renderer, TemplateEngine};
pub use resolver::{emission, override_content, resolve, Emission};
pub use session::{Pass, RenderSession, ViewScope};
