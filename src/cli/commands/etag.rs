//! Etag command - fingerprint a file

use crate::cli::args::EtagArgs;
use crate::config::Config;
use crate::error::{StampError, StampResult};
use crate::fingerprint::{compute_fingerprint, Algorithm};
use std::fs::File;
use tracing::debug;

/// Execute the etag command
pub async fn execute(args: EtagArgs, config: &Config) -> StampResult<()> {
    let algorithm: Algorithm = args
        .algorithm
        .as_deref()
        .unwrap_or(config.caching.algorithm.as_str())
        .parse()?;
    let weak = args.weak || config.caching.weak;

    let mut file = File::open(&args.file)
        .map_err(|e| StampError::io(format!("opening {}", args.file.display()), e))?;

    debug!("Fingerprinting {} with {}", args.file.display(), algorithm);
    let fingerprint = compute_fingerprint(&mut file, algorithm, weak)?;

    println!("{}", fingerprint);
    Ok(())
}
