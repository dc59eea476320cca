//! Config command handler

use super::CommandResult;
use crate::args::ConfigSubcommand;
use ects_tracker::config::{Config, CONFIG_KEYS};
use std::io::{self, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) -> CommandResult {
    match subcommand {
        None => show(config, None),
        Some(ConfigSubcommand::Get { key }) => show(config, key.as_deref()),
        Some(ConfigSubcommand::Set { key, value }) => set(config, &key, &value),
        Some(ConfigSubcommand::Unset { key }) => unset(config, defaults, &key),
        Some(ConfigSubcommand::Reset) => reset(),
    }
}

fn show(config: &Config, key: Option<&str>) -> CommandResult {
    let Some(key) = key else {
        println!("\n=== Configuration ===\n");
        print!("{config}");
        return Ok(());
    };
    let value = config.get(key).ok_or_else(|| {
        format!(
            "Unknown config key: '{key}' (expected one of: {})",
            CONFIG_KEYS.join(", ")
        )
    })?;
    println!("{value}");
    Ok(())
}

fn set(config: &mut Config, key: &str, value: &str) -> CommandResult {
    config.set(key, value)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    println!("✓ Set {key} = {value}");
    Ok(())
}

fn unset(config: &mut Config, defaults: &Config, key: &str) -> CommandResult {
    config.unset(key, defaults)?;
    config
        .save()
        .map_err(|e| format!("Failed to save config: {e}"))?;
    println!("✓ Reset {key} to default");
    Ok(())
}

fn reset() -> CommandResult {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    print!("Are you sure you want to reset config to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();

    let answer = response.trim();
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        Config::reset().map_err(|e| format!("Failed to remove config file: {e}"))?;
        println!("✓ Config reset to defaults");
    } else {
        println!("✗ Reset cancelled");
    }
    Ok(())
}
