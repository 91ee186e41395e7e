//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Stamp - HTTP conditional caching validation
///
/// Computes ETag fingerprints, renders Cache-Control directives and
/// evaluates If-None-Match against served content.
#[derive(Parser, Debug)]
#[command(name = "stamp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "STAMP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the ETag fingerprint of a file
    Etag(EtagArgs),

    /// Serve a file through the caching interceptor and show the result
    Check(CheckArgs),

    /// Print the configured default Cache-Control value
    Directives(DirectivesArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the etag command
#[derive(Parser, Debug)]
pub struct EtagArgs {
    /// File to fingerprint
    pub file: PathBuf,

    /// Digest algorithm (defaults to the configured one)
    #[arg(short, long)]
    pub algorithm: Option<String>,

    /// Emit a weak fingerprint
    #[arg(short, long)]
    pub weak: bool,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// File served as the response body
    pub file: PathBuf,

    /// Request method
    #[arg(short, long, default_value = "GET")]
    pub method: String,

    /// Status code of the served response
    #[arg(short, long, default_value_t = 200)]
    pub status: u16,

    /// If-None-Match request header value (repeat for several header lines)
    #[arg(short = 'i', long)]
    pub if_none_match: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the directives command
#[derive(Parser, Debug)]
pub struct DirectivesArgs {
    /// Print the directive map as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Config action
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Log formatter selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}
