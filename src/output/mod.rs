//! Output renderers: framed terminal blocks for agent answers, JSON and
//! text for fetched merge request contexts.

pub mod json;
pub mod terminal;

use crate::models::ReviewContext;

/// Trait for rendering a fetched review context to an output format.
pub trait OutputRenderer {
    /// Render the context to a string.
    fn render(&self, ctx: &ReviewContext) -> String;
}

/// Text renderer: exactly what the reviewing agent receives from its tool.
pub struct TextRenderer;

impl OutputRenderer for TextRenderer {
    fn render(&self, ctx: &ReviewContext) -> String {
        crate::context::render_tool_payload(ctx)
    }
}
