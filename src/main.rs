//! Binary entry point for `osredit`.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use osredit::cli::{self, Cli};

fn main() {
    // Logs go to stderr; stdout is reserved for reports.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    if let Err(error) = cli::execute(&args) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
