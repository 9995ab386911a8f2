//! CLI command definitions, logging setup and cancellation wiring.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use mrpilot::constants;

/// Install the stderr tracing subscriber.
///
/// `MRPILOT_LOG` takes a full filter directive; otherwise only warnings
/// are shown, or debug events from this crate with `--verbose`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "warn,mrpilot=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(constants::ENV_LOG)
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}

/// A token cancelled on the first Ctrl-C.
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling");
            child.cancel();
        }
    });
    token
}
