//! CLI entry point for the sliding-ball puzzle engine

use clap::Parser;
use inertia::io::cli::{Cli, CommandProcessor};

fn main() -> inertia::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();
    let processor = CommandProcessor::new(cli);
    processor.process()
}
