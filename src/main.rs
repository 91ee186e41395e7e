//! Stamp - HTTP conditional caching validation
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use stamp::cli::args::{ConfigAction, ConfigArgs};
use stamp::cli::{Cli, Commands, LogFormat};
use stamp::config::ConfigStore;
use stamp::error::StampResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> StampResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("stamp=warn"),
        1 => EnvFilter::new("stamp=info"),
        _ => EnvFilter::new("stamp=debug"),
    };

    match cli.log_format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }

    let store = ConfigStore::locate(cli.config.clone());

    // Config init doesn't need the existing config to parse
    if let Commands::Config(ConfigArgs {
        action: Some(ConfigAction::Init { force }),
    }) = cli.command
    {
        return stamp::cli::commands::config::init_config(&store, force).await;
    }

    let (config, origin) = store.load_with_origin().await?;
    debug!(?origin, "Using config {}", store.path().display());

    // Dispatch to command
    match cli.command {
        Commands::Etag(args) => stamp::cli::commands::etag(args, &config).await,
        Commands::Check(args) => stamp::cli::commands::check(args, &config).await,
        Commands::Directives(args) => stamp::cli::commands::directives(args, &config).await,
        Commands::Config(args) => stamp::cli::commands::config(args, &config, &store).await,
    }
}
