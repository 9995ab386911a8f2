//! mrpilot: AI-assisted GitLab merge request review CLI.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use std::io::Read;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Command, FetchArgs, ReviewArgs, TranslateArgs};
use mrpilot::agents::{AgentSession, ReviewAgent, TranslationAgent};
use mrpilot::config::Config;
use mrpilot::constants;
use mrpilot::env::Env;
use mrpilot::gitlab::{GitLabClient, ReviewContextFetcher};
use mrpilot::models::TranslationRequest;
use mrpilot::output::terminal;

/// Exit code when a review (or fetch) fails.
const EXIT_REVIEW_FAILED: i32 = 1;
/// Exit code when a translation fails.
const EXIT_TRANSLATE_FAILED: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);

    let exit_code = match cli.command {
        Command::Translate(_) => EXIT_TRANSLATE_FAILED,
        _ => EXIT_REVIEW_FAILED,
    };

    if let Err(err) = run(cli.command).await {
        eprintln!("Error: {err:#}");
        process::exit(exit_code);
    }
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Review(args) => run_review(args).await,
        Command::Translate(args) => run_translate(args).await,
        Command::Fetch(args) => run_fetch(args).await,
        Command::Version => run_version(),
    }
}

/// Print detailed version and build information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

fn load_config() -> Result<Config> {
    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    Config::load(Some(&cwd), &Env::real()).context("failed to load configuration")
}

fn build_fetcher(config: &Config) -> Result<ReviewContextFetcher> {
    let settings = config
        .gitlab_settings()
        .context("GitLab connection is not configured")?;
    let client = GitLabClient::new(&settings).context("failed to create GitLab client")?;
    Ok(ReviewContextFetcher::new(Arc::new(client)))
}

async fn run_review(args: ReviewArgs) -> Result<()> {
    let mut config = load_config()?;
    if let Some(model) = args.model {
        config.provider.model = model;
    }
    let max_turns = args.max_turns.unwrap_or(config.review.max_turns);

    let fetcher = build_fetcher(&config)?;
    let agent = ReviewAgent::new(fetcher, max_turns);

    let mut session = AgentSession::new(config.provider.clone());
    session.start().context("failed to start agent session")?;

    let cancel = cli::cancel_on_ctrl_c();
    let review = agent
        .review(&session, &args.url, &cancel)
        .await
        .with_context(|| format!("review of {} failed", args.url.trim()))?;
    session.close();

    print!("{}", terminal::framed("AI CODE REVIEW", &review));
    Ok(())
}

async fn run_translate(args: TranslateArgs) -> Result<()> {
    let mut config = load_config()?;
    if let Some(model) = args.model {
        config.provider.model = model;
    }

    let text = if args.text == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read text from stdin")?;
        buf
    } else {
        args.text
    };

    let request = TranslationRequest::new(text)
        .with_context(args.context.unwrap_or(config.translate.default_context))
        .with_formality(args.formality.unwrap_or(config.translate.default_formality));
    let language = args.language.unwrap_or(config.translate.target_language);
    let agent = TranslationAgent::new(language);

    let mut session = AgentSession::new(config.provider.clone());
    session.start().context("failed to start agent session")?;

    let cancel = cli::cancel_on_ctrl_c();
    let translation = agent
        .translate(&session, &request, &cancel)
        .await
        .context("translation failed")?;
    session.close();

    print!("{}", terminal::framed("TRANSLATION", &translation));
    Ok(())
}

async fn run_fetch(args: FetchArgs) -> Result<()> {
    let config = load_config()?;
    let fetcher = build_fetcher(&config)?;
    let cancel = cli::cancel_on_ctrl_c();

    let ctx = fetcher
        .fetch(&args.url, &cancel)
        .await
        .with_context(|| format!("failed to fetch {}", args.url.trim()))?;

    println!("{}", args.format.render(&ctx));
    Ok(())
}
