//! Directives command - show the default Cache-Control value

use crate::cli::args::DirectivesArgs;
use crate::config::Config;
use crate::error::StampResult;

/// Execute the directives command
pub async fn execute(args: DirectivesArgs, config: &Config) -> StampResult<()> {
    let directives = config.caching.default_directives().unwrap_or_default();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&directives)?);
    } else if directives.is_empty() {
        eprintln!("No default directives configured");
    } else {
        println!("{}", directives);
    }

    Ok(())
}
