//! `gtd` command-line entry point.
//!
//! ```bash
//! # Open the terminal UI with the sample tasks
//! gtd
//!
//! # Start empty, with your own contexts
//! gtd ui --no-seed --context desk --context car
//!
//! # Print the next actions waiting in @phone
//! gtd show next --by-context @phone
//! ```
//!
//! Logging goes through `tracing`. Set `RUST_LOG=gtd=debug` to see every
//! store mutation, and `--log-file` to keep it off the UI's screen.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gtd::cli::Cli;
use gtd::cmd::*;

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    // Quiet by default; RUST_LOG overrides.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let store = cli.store_config().build_store();

    match cli.command.unwrap_or(Commands::Ui) {
        Commands::Ui => cmd_ui(store)?,
        Commands::Show { view, by_context, by_project, status, json } =>
            cmd_show(&store, view, by_context, by_project, status, json)?,
        Commands::Contexts => cmd_contexts(&store),
        Commands::Completions { shell } => cmd_completions(shell),
    }
    Ok(())
}
