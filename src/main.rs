//! CLI entry point for editing and inspecting movement overlays

use clap::Parser;
use tilegrid::io::cli::{Cli, SessionRunner};
use tilegrid::io::configuration::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;

fn main() -> tilegrid::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let mut runner = SessionRunner::new(cli);
    runner.run().map(|_| ())
}
