//! Integration tests for logger behavior.

use ects_tracker::logger::{init_file_logging, set_level, set_level_from_str, Level};
use ects_tracker::{debug, error, info, warn};
use std::fs;
use tempfile::TempDir;

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}

#[test]
fn file_logging_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logs").join("ects.log");
    assert!(init_file_logging(&path));
    error!("written to file");
    assert!(fs::read_to_string(&path).unwrap().contains("written to file"));
}
