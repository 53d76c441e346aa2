//! CLI entry point for ej-properties.

use entirej_properties::cli;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize tracing with WARN level by default, respecting RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run() {
        tracing::debug!(key = e.message_key(), args = ?e.args(), "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
