//! Config command - show or initialize configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigStore, InitOutcome};
use crate::error::StampResult;
use console::style;

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    config: &Config,
    store: &ConfigStore,
) -> StampResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => show_path(store),
        Some(ConfigAction::Init { force }) => init_config(store, force).await?,
    }

    Ok(())
}

fn show_config(config: &Config) -> StampResult<()> {
    let toml = toml::to_string_pretty(config)?;
    println!("{}", toml);
    Ok(())
}

fn show_path(store: &ConfigStore) {
    println!("{}", store.path().display());
}

/// Write the default configuration, keeping an existing file unless forced
pub async fn init_config(store: &ConfigStore, force: bool) -> StampResult<()> {
    let path = store.path().display();

    match store.init(force).await? {
        InitOutcome::Written => {
            println!("{} Configuration initialized: {}", style("[OK]").green(), path);
        }
        InitOutcome::Kept => {
            eprintln!("{} Config already exists at {}", style("[WARN]").yellow(), path);
            eprintln!("  Use --force to overwrite");
        }
    }

    Ok(())
}
