//! File-backed tracing setup. The terminal belongs to the UI, so nothing is
//! written to stdout or stderr.

use anyhow::{anyhow, Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CAMPUS_ASSISTANT_LOG";
const LOG_FILE: &str = "campus-assistant.log";
const DEFAULT_DIRECTIVE: &str = "info";

pub fn log_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow!("Could not determine data directory"))?;
    Ok(data_dir.join("campus-assistant"))
}

pub fn open_log_file(dir: &Path) -> Result<(File, PathBuf)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    Ok((file, path))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber. Returns the log file path.
pub fn init() -> Result<PathBuf> {
    let (file, path) = open_log_file(&log_dir()?)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let (_file, path) = open_log_file(&nested).unwrap();
        assert!(path.exists());
        assert_eq!(path.file_name().unwrap(), LOG_FILE);
    }

    #[test]
    fn test_open_log_file_appends() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let (mut file, path) = open_log_file(dir.path()).unwrap();
        writeln!(file, "first").unwrap();
        let (mut file, _) = open_log_file(dir.path()).unwrap();
        writeln!(file, "second").unwrap();

        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }
}
