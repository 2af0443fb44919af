use std::io;

use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr; stdout is reserved for digests handed back to the host
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = session_context::cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
