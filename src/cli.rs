use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::config::StoreConfig;

/// Capture, process, organise.
/// State lives in memory for the lifetime of the process.
#[derive(Parser, Debug)]
#[command(name = "gtd", version, about = "Inbox-driven task manager")]
pub struct Cli {
    /// Start with an empty store instead of the sample tasks.
    #[arg(long, global = true)]
    pub no_seed: bool,

    /// Context label available for next actions. May be repeated; replaces the defaults.
    #[arg(long = "context", global = true, value_name = "LABEL")]
    pub contexts: Vec<String>,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::from_flags(&self.contexts, self.no_seed)
    }
}
