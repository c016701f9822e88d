use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "tokenlens",
    version,
    about = "A terminal image previewer for numbered collections",
    long_about = None
)]
pub struct CliArgs {
    /// Identifier to preview at startup instead of the configured default.
    #[arg(value_name = "ID")]
    pub id: Option<String>,

    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Root URL the collection is served from.
    #[arg(short, long, value_name = "URL")]
    pub base_url: Option<String>,

    /// HTTPS gateway host for rewriting ipfs:// image URLs.
    #[arg(long, value_name = "HOST")]
    pub ipfs_gateway: Option<String>,

    /// Identifier shown when the input is empty.
    #[arg(long, value_name = "ID")]
    pub default_id: Option<String>,

    /// Inclusive upper bound for identifiers.
    #[arg(long, value_name = "N")]
    pub max_id: Option<u32>,

    /// Request timeout for index fetches, in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}
