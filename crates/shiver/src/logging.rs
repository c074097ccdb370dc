//! Log file setup. Stdout belongs to the terminal UI, so logs go to a file.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::eyre::{OptionExt, eyre};
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "shiver.log";

/// Install the global subscriber, returning the log file path.
///
/// `RUST_LOG` is honoured; the default level is `info`.
pub fn init() -> color_eyre::Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "shiver", "shiver")
        .ok_or_eyre("could not resolve the platform data directory")?;
    let dir = dirs.data_dir();
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = File::create(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))?;
    Ok(path)
}
