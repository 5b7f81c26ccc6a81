mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{CliArgs, Command};
use crate::config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    let config = CliConfig::load(args.config.as_deref())?;

    // RUST_LOG wins over the config file; logs go to stderr so stdout stays parseable.
    let default_filter = config.log_filter.as_deref().unwrap_or("warn");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let output = match args.command {
        Command::Next { date, repeat, now } => commands::next(&date, &repeat, now.as_deref())?,
        Command::Upcoming {
            date,
            repeat,
            from,
            count,
        } => commands::upcoming(&config, &date, &repeat, from.as_deref(), count)?,
        Command::Check { rule } => commands::check(&rule)?,
        Command::Agenda(agenda) => commands::agenda(&config, &agenda).await?,
    };

    println!("{output}");
    Ok(())
}
