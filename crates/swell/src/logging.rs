//! File logging.
//!
//! Stdout belongs to the terminal UI, so log lines go to
//! `<data_dir>/swell.log` instead. Filter with `SWELL_LOG`.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SWELL_LOG";
const LOG_FILE: &str = "swell.log";

/// Install the global subscriber. Returns the log file path, or `None`
/// when no log file could be opened (logging is then disabled).
pub fn init() -> Option<PathBuf> {
    let dir = swell_config::project_dirs()?.data_dir().to_path_buf();
    let path = dir.join(LOG_FILE);
    let file = open(&dir, &path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .ok()?;
    Some(path)
}

fn open(dir: &Path, path: &Path) -> Option<File> {
    fs::create_dir_all(dir).ok()?;
    OpenOptions::new().create(true).append(true).open(path).ok()
}
