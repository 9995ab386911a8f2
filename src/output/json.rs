//! JSON output renderer.
//!
//! Outputs the review context as `{"info": {...}, "diffs": [...], "editor_config": ...}`.

use crate::models::ReviewContext;
use crate::output::OutputRenderer;

/// JSON output renderer.
pub struct JsonRenderer;

impl OutputRenderer for JsonRenderer {
    fn render(&self, ctx: &ReviewContext) -> String {
        serde_json::to_string_pretty(ctx).unwrap_or_else(|_| "{}".to_string())
    }
}
