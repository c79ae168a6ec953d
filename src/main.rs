use std::io;
use std::process::ExitCode;

use anyhow::Result;
use decode_combinations::{app, config};

fn main() -> Result<ExitCode> {
    let config = config::CliConfig::parse();

    let level = if config.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    // Logs go to stderr so stdout carries only the counts
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let mut stdout = io::stdout().lock();
    if app::run(&config, &mut stdout)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
