//! Main entry point for the `typeahead` binary.
//!
//! This executable hosts the incremental-search TUI against a lookup
//! service endpoint.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tk_tui::AppConfig;

/// Incremental search against a remote lookup service.
#[derive(Debug, Parser)]
#[command(name = "typeahead", version, about)]
struct Args {
    /// Base URL of the search endpoint; the query is appended as a path
    /// segment.
    #[arg(long, default_value = "http://localhost:8080/search")]
    endpoint: String,

    /// Page size requested per lookup.
    #[arg(long, default_value_t = 10)]
    limit: u32,

    /// Quiet window between the last keystroke and the lookup, in
    /// milliseconds.
    #[arg(long = "debounce-ms", default_value_t = 300)]
    debounce_ms: u64,

    /// Write diagnostics to this file, filtered via RUST_LOG. Stderr is the
    /// UI's canvas, so there is no stderr logging.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = std::fs::File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .init();
    }

    let config = AppConfig {
        endpoint: args.endpoint,
        limit: args.limit,
        debounce: Duration::from_millis(args.debounce_ms),
    };

    tk_tui::run_app(config)
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e))
}
