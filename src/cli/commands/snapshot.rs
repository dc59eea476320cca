//! Export and import handlers

use super::{open_tracker, CommandResult};
use ects_tracker::config::Config;
use ects_tracker::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Default snapshot file name inside the exports directory
const EXPORT_FILE_NAME: &str = "ects-tracker-export.json";

/// Write the current state as a JSON snapshot
pub fn export(config: &Config, output: Option<&Path>) -> CommandResult {
    let tracker = open_tracker(config)?;
    let path = output.map_or_else(
        || PathBuf::from(&config.paths.exports_dir).join(EXPORT_FILE_NAME),
        Path::to_path_buf,
    );
    let json = tracker.export_json().map_err(|e| e.to_string())?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
    }
    fs::write(&path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))?;

    info!("Exported snapshot to {}", path.display());
    println!("✓ Exported to {}", path.display());
    Ok(())
}

/// Replace all state with a JSON snapshot; nothing changes on failure
pub fn import(config: &Config, file: &Path) -> CommandResult {
    let json = fs::read_to_string(file)
        .map_err(|e| format!("Import failed: cannot read {}: {e}", file.display()))?;
    let mut tracker = open_tracker(config)?;
    tracker.import_json(&json).map_err(|e| e.to_string())?;

    let state = tracker.state();
    println!("✓ Imported {}", file.display());
    println!(
        "  {} completed courses, {} electives, {} free electives, {} grades",
        state.completed_courses.len(),
        state.elective_courses.len(),
        state.free_elective_courses.len(),
        state.grades.len()
    );
    Ok(())
}
