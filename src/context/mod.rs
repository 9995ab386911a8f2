//! Review context assembly.
//!
//! Combines the fetched merge request pieces into one [`ReviewContext`]
//! and renders it into the text the reviewing agent receives from the
//! `get_merge_request_data` tool.

use std::fmt::Write;

use crate::constants;
use crate::models::{DiffEntry, MergeRequestInfo, ReviewContext};

/// Compose the fetched resources into a review context.
///
/// Pure: identical inputs always produce identical values.
pub fn assemble(
    info: MergeRequestInfo,
    diffs: Vec<DiffEntry>,
    editor_config: Option<String>,
) -> ReviewContext {
    ReviewContext {
        info,
        diffs,
        editor_config,
    }
}

/// Render the context as the markdown document handed to the agent.
///
/// An absent `.editorconfig` is stated explicitly so the agent does not
/// mistake it for an empty rule set.
pub fn render_tool_payload(ctx: &ReviewContext) -> String {
    let info = &ctx.info;
    let mut out = String::new();

    let _ = writeln!(out, "# Merge Request !{}: {}", info.iid, info.title);
    let _ = writeln!(out);
    let _ = writeln!(out, "- Author: {}", info.author);
    let _ = writeln!(out, "- State: {}", info.state);
    let _ = writeln!(
        out,
        "- Branches: {} -> {}",
        info.source_branch, info.target_branch
    );
    let _ = writeln!(out, "- URL: {}", info.web_url);
    let _ = writeln!(out);

    out.push_str("## Description\n\n");
    if info.description.trim().is_empty() {
        out.push_str("(no description)\n");
    } else {
        out.push_str(info.description.trim_end());
        out.push('\n');
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "## Editor Config ({} at {})\n",
        constants::EDITOR_CONFIG_PATH,
        info.target_branch
    );
    match &ctx.editor_config {
        Some(content) => push_fenced(&mut out, "ini", content),
        None => {
            let _ = writeln!(
                out,
                "ABSENT: the repository has no {} on the target branch.",
                constants::EDITOR_CONFIG_PATH
            );
        }
    }
    out.push('\n');

    let _ = writeln!(out, "## Changed Files ({})", ctx.diffs.len());
    for entry in &ctx.diffs {
        let _ = writeln!(out, "\n### {} ({})\n", entry.path(), change_kind(entry));
        if entry.diff.is_empty() {
            out.push_str("(no textual diff)\n");
        } else {
            push_fenced(&mut out, "diff", &entry.diff);
        }
    }

    out
}

/// Append `body` as a fenced code block whose fence is longer than any
/// backtick run inside it.
fn push_fenced(out: &mut String, lang: &str, body: &str) {
    let longest = body
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest.max(2) + 1);
    let _ = writeln!(out, "{fence}{lang}");
    out.push_str(body.trim_end());
    let _ = writeln!(out, "\n{fence}");
}

fn change_kind(entry: &DiffEntry) -> String {
    if entry.new_file {
        "new file".to_string()
    } else if entry.deleted_file {
        "deleted".to_string()
    } else if entry.renamed_file {
        format!("renamed from {}", entry.old_path)
    } else {
        "modified".to_string()
    }
}
