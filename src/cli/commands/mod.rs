//! CLI command handlers for `ectstracker`.
//!
//! Each command is implemented in its own submodule. Handlers return the
//! user-facing failure message; `main` prints it and sets the exit code.

pub mod config;
pub mod courses;
pub mod electives;
pub mod report;
pub mod snapshot;
pub mod status;

use ects_tracker::config::Config;
use ects_tracker::core::storage::FileStore;
use ects_tracker::core::tracker::Tracker;
use ects_tracker::debug;
use std::path::Path;

/// Result of a command handler
pub type CommandResult = Result<(), String>;

/// Open the tracker backed by the configured data directory and catalog
pub fn open_tracker(config: &Config) -> Result<Tracker<FileStore>, String> {
    let catalog = config.catalog().map_err(|e| e.to_string())?;
    let store = FileStore::open(Path::new(&config.storage.data_dir)).map_err(|e| e.to_string())?;
    debug!(
        "Opening tracker with {} catalog courses at {}",
        catalog.courses().len(),
        store.dir().display()
    );
    Tracker::open(catalog, store).map_err(|e| e.to_string())
}
