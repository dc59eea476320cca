//! Integration tests for configuration management

use ects_tracker::config::{Config, ConfigOverrides, CONFIG_KEYS};
use ects_tracker::core::catalog::Catalog;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(!config.logging.level.is_empty(), "Default log level should not be empty");
    assert!(!config.storage.data_dir.is_empty(), "Default data_dir should not be empty");
    assert!(!config.paths.exports_dir.is_empty());
    assert!(!config.paths.reports_dir.is_empty());
    assert!(config.paths.catalog_file.is_empty(), "Built-in catalog by default");
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[storage]
data_dir = "/var/lib/ects"

[paths]
exports_dir = "./exports"
reports_dir = "./reports"
catalog_file = "./catalog.toml"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.storage.data_dir, "/var/lib/ects");
    assert_eq!(config.paths.exports_dir, "./exports");
    assert_eq!(config.paths.reports_dir, "./reports");
    assert_eq!(config.paths.catalog_file, "./catalog.toml");
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.storage.data_dir, "");
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$ECTS_TRACKER/test.log"

[storage]
data_dir = "$ECTS_TRACKER/data"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("ectstracker"));
    assert!(!config.logging.file.contains("$ECTS_TRACKER"));
    assert!(config.storage.data_dir.ends_with("data"));
    assert!(!config.storage.data_dir.contains("$ECTS_TRACKER"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config.set("verbose", "true").expect("Failed to set verbose");
    assert_eq!(config.get("verbose").unwrap(), "true");
    assert!(config.logging.verbose);
    assert!(config.set("verbose", "maybe").is_err());

    config.set("reports-dir", "/tmp/reports").unwrap();
    assert_eq!(config.paths.reports_dir, "/tmp/reports");

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("data_dir", "/elsewhere").unwrap();
    config.unset("data-dir", &defaults).expect("Failed to unset data_dir");
    assert_eq!(config.storage.data_dir, defaults.storage.data_dir);

    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_reload() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("nested").join("config.toml");

    let mut config = Config::from_defaults();
    config.set("level", "info").unwrap();
    config.set("catalog_file", "/opt/catalog.toml").unwrap();
    config.save_to(&config_file).expect("Failed to save config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded = Config::from_toml(&content).expect("Failed to parse saved config");

    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.paths.catalog_file, "/opt/catalog.toml");
    assert_eq!(loaded.storage.data_dir, config.storage.data_dir);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        data_dir: Some("/custom/data".to_string()),
        exports_dir: Some("./custom_exports".to_string()),
        reports_dir: Some("./custom_reports".to_string()),
        catalog_file: Some("./catalog.toml".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.storage.data_dir, "/custom/data");
    assert_eq!(config.paths.exports_dir, "./custom_exports");
    assert_eq!(config.paths.reports_dir, "./custom_reports");
    assert_eq!(config.paths.catalog_file, "./catalog.toml");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };
    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.storage.data_dir, defaults.storage.data_dir);
}

#[test]
fn test_config_display_format() {
    let display_str = Config::from_defaults().to_string();

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[storage]"));
    assert!(display_str.contains("[paths]"));
    for key in CONFIG_KEYS {
        assert!(display_str.contains(key), "missing {key}");
    }
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.storage.data_dir, defaults.storage.data_dir);
    assert!(!config.merge_defaults(&defaults), "second merge changes nothing");
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[storage]
data_dir = "/my/data"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    config.merge_defaults(&Config::from_defaults());

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.storage.data_dir, "/my/data");
}

#[test]
fn test_catalog_from_configured_file() {
    let temp_dir = TempDir::new().unwrap();
    let catalog_path = temp_dir.path().join("catalog.toml");
    fs::write(
        &catalog_path,
        r#"
[[courses]]
id = "stats"
name = "Statistics"
credits = 8
category = "foundation"
"#,
    )
    .unwrap();

    let mut config = Config::from_defaults();
    config.set("catalog_file", &catalog_path.to_string_lossy()).unwrap();
    let catalog = config.catalog().expect("catalog should load");
    assert_eq!(catalog.courses().len(), 1);

    config.set("catalog_file", "/does/not/exist.toml").unwrap();
    assert!(config.catalog().is_err());

    config.set("catalog_file", "").unwrap();
    assert_eq!(config.catalog().unwrap(), Catalog::standard());
}

#[test]
fn test_get_app_dir() {
    let dir = Config::get_app_dir();
    assert!(dir.to_string_lossy().contains("ectstracker"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();
    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
