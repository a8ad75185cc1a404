//! Markdraft - a terminal rich-text editor with markdown typing triggers.
//!
//! # Usage
//!
//! ```bash
//! markdraft
//! markdraft --store ~/notes.json --key journal
//! markdraft --fresh --log-file markdraft.log
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use markdraft::app::App;
use markdraft::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use markdraft::persist::DEFAULT_KEY;

/// A terminal rich-text editor with markdown typing triggers
#[derive(Parser, Debug)]
#[command(name = "markdraft", version, about, long_about = None)]
struct Cli {
    /// JSON file used as the key-value store (in-memory when omitted)
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Record key inside the store
    #[arg(long, value_name = "NAME")]
    key: Option<String>,

    /// Start with an empty document, ignoring the stored record
    #[arg(long)]
    fresh: bool,

    /// Write log output to a file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// WARN unless `directives` (the `RUST_LOG` value) says otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives.unwrap_or_default())
}

/// Logs only reach a file; the terminal belongs to the editor while it runs.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = ConfigFlags {
        fresh: cli.fresh,
        store: cli.store.clone(),
        key: cli.key.clone(),
        log_file: cli.log_file.clone(),
    };

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;

    let mut app = App::new()
        .with_store_path(effective.store)
        .with_key(effective.key.unwrap_or_else(|| DEFAULT_KEY.to_string()))
        .with_fresh(effective.fresh);

    app.run().context("Application error")
}
