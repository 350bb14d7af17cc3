//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn";

fn main() {
    init_logging();
    if let Err(err) = savemetoilet_cli::run() {
        eprintln!("savemetoilet: {err}");
        std::process::exit(1);
    }
}

/// Route `log` records to stderr so stdout carries only JSON.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("savemetoilet: logging disabled: {err}");
    }
}
