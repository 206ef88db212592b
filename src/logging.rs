use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_NAME: &str = "atlas.log";

fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        "atlas_search=debug,atlas=debug"
    } else {
        "atlas_search=warn,atlas=warn"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into())
}

/// Logs to stderr, leaving stdout to command output.
pub fn init_tracing(verbose: bool) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Opens `<dir>/atlas.log` for appending, creating the directory first.
pub fn open_log_file(dir: &Path) -> Result<(PathBuf, File)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    Ok((path, file))
}

/// Logs to `<dir>/atlas.log`. The terminal belongs to the UI while it runs.
///
/// Returns the log path. When the file cannot be opened a warning goes to
/// stderr, logs are discarded and `None` is returned; the UI still starts.
pub fn init_file_tracing(dir: &Path, verbose: bool) -> Option<PathBuf> {
    match open_log_file(dir) {
        Ok((path, file)) => {
            let _ = tracing_subscriber::registry()
                .with(env_filter(verbose))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init();
            Some(path)
        }
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            let _ = tracing_subscriber::registry()
                .with(env_filter(verbose))
                .with(tracing_subscriber::fmt::layer().with_writer(io::sink))
                .try_init();
            None
        }
    }
}
