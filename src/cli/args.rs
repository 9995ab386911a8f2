//! Clap argument types.

use clap::{Parser, ValueEnum};

use mrpilot::models::{Formality, ReviewContext};

/// AI-assisted GitLab merge request review and text rewriting.
#[derive(Parser, Debug)]
#[command(name = "mrpilot", version = mrpilot::constants::VERSION)]
pub struct Cli {
    /// Log debug events to stderr (overridden by MRPILOT_LOG).
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Review a GitLab merge request.
    Review(ReviewArgs),

    /// Translate and polish free text.
    Translate(TranslateArgs),

    /// Fetch a merge request and print what the reviewer would receive.
    Fetch(FetchArgs),

    /// Print version and build information.
    Version,
}

/// Arguments for the `review` subcommand.
#[derive(Parser, Debug)]
pub struct ReviewArgs {
    /// Merge request URL, e.g. https://gitlab.example.com/group/project/-/merge_requests/42
    pub url: String,

    /// Model to use instead of the configured one.
    #[arg(long)]
    pub model: Option<String>,

    /// Max tool-calling turns (default: [review] max_turns).
    #[arg(long)]
    pub max_turns: Option<usize>,
}

/// Arguments for the `translate` subcommand.
#[derive(Parser, Debug)]
pub struct TranslateArgs {
    /// Text to translate. Use `-` to read from stdin.
    pub text: String,

    /// Where the text will be used (email, chat, gitlab_comment, ...).
    #[arg(long)]
    pub context: Option<String>,

    /// Formality level.
    #[arg(long)]
    pub formality: Option<Formality>,

    /// Target language (default: [translate] target_language).
    #[arg(long)]
    pub language: Option<String>,

    /// Model to use instead of the configured one.
    #[arg(long)]
    pub model: Option<String>,
}

/// Arguments for the `fetch` subcommand.
#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Merge request URL.
    pub url: String,

    /// Output format.
    #[arg(long, default_value = "text")]
    pub format: FetchFormat,
}

/// Output formats of `fetch`.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum FetchFormat {
    Text,
    Json,
}

impl FetchFormat {
    /// Render the context using the renderer for this format.
    pub fn render(&self, ctx: &ReviewContext) -> String {
        use mrpilot::output::OutputRenderer;
        match self {
            FetchFormat::Text => mrpilot::output::TextRenderer.render(ctx),
            FetchFormat::Json => mrpilot::output::json::JsonRenderer.render(ctx),
        }
    }
}
