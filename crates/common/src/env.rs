//! Environment/runtime helpers
//!
//! Sanity checks run once at startup before any store is opened.

use std::io;
use std::path::Path;

use tracing::{info, warn};

/// Ensure the data directory used by file-backed stores exists.
pub fn ensure_data_dir(data_dir: &Path) -> io::Result<()> {
    if data_dir.is_dir() {
        return Ok(());
    }
    if data_dir.exists() {
        warn!(data_dir = %data_dir.display(), "data path exists but is not a directory");
        return Err(io::Error::new(io::ErrorKind::AlreadyExists, "data path is not a directory"));
    }
    std::fs::create_dir_all(data_dir)?;
    info!(data_dir = %data_dir.display(), "created data directory");
    Ok(())
}
