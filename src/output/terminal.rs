//! Terminal renderer: agent answers inside a titled frame.

use colored::Colorize;

/// Wrap `body` between a `===== TITLE =====` banner and a matching rule.
pub fn framed(title: &str, body: &str) -> String {
    let banner = format!("===== {title} =====");
    let rule = "=".repeat(banner.chars().count());
    format!(
        "\n{}\n\n{}\n\n{}\n",
        banner.cyan().bold(),
        body.trim_end(),
        rule.cyan()
    )
}
