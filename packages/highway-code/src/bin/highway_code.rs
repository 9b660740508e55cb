//! CLI entry point for the Highway Code reader.

use std::process::ExitCode;

use highway_code::cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing with WARN level by default, respecting RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "highway-code failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
