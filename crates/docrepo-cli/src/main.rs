//! DocRepo CLI entry point.

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

mod commands;
mod output;

use commands::Cli;
use docrepo_core::config::ClientConfig;
use docrepo_core::error::AppError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            output::print_error(&e.message);
            std::process::exit(1);
        }
    };
    init_logging(&config);

    if let Err(e) = cli.execute(&config).await {
        report_failure(&e);
        std::process::exit(1);
    }
}

/// Log a failed command and show its message.
fn report_failure(err: &AppError) {
    error!(kind = %err.kind, status = ?err.status(), "{}", err.message);
    output::print_error(&err.message);
}

/// Install the tracing subscriber. Logs go to stderr so that JSON output
/// on stdout stays parseable.
fn init_logging(config: &ClientConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
