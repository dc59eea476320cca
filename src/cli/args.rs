//! CLI argument definitions for `ectstracker`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ects_tracker::config::ConfigOverrides;
use ects_tracker::core::models::Area;
use ects_tracker::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `Level` for
/// runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

/// Course area accepted on the command line
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum AreaArg {
    /// Foundation (cog/stats)
    Foundation,
    /// Computer Science
    Cs,
    /// Mathematics
    Math,
    /// Artificial Intelligence
    Ai,
    /// Philosophy
    Philosophy,
    /// Psychology and Neuroscience
    Psychology,
}

impl From<AreaArg> for Area {
    fn from(arg: AreaArg) -> Self {
        match arg {
            AreaArg::Foundation => Self::Foundation,
            AreaArg::Cs => Self::Cs,
            AreaArg::Math => Self::Math,
            AreaArg::Ai => Self::Ai,
            AreaArg::Philosophy => Self::Philosophy,
            AreaArg::Psychology => Self::Psychology,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    Get {
        /// Optional configuration key (e.g., `level`, `data_dir`, `catalog_file`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum ElectiveSubcommand {
    /// Record an elective course in one of the areas.
    Add {
        /// Course name
        #[arg(value_name = "NAME")]
        name: String,
        /// ECTS credits (1-30)
        #[arg(value_name = "CREDITS")]
        credits: String,
        /// Area the elective counts toward
        #[arg(short, long, value_enum)]
        area: AreaArg,
        /// Optional grade (1.0-4.0)
        #[arg(short, long, value_name = "GRADE")]
        grade: Option<String>,
    },
    /// Remove an elective and its grade.
    Remove {
        /// Elective id as shown by `elective list`
        #[arg(value_name = "ID")]
        id: String,
    },
    /// List recorded electives.
    List,
}

#[derive(Debug, Subcommand)]
pub enum FreeSubcommand {
    /// Record a free elective course.
    Add {
        /// Course name
        #[arg(value_name = "NAME")]
        name: String,
        /// ECTS credits (1-30)
        #[arg(value_name = "CREDITS")]
        credits: String,
    },
    /// Remove a free elective.
    Remove {
        /// Free elective id as shown by `free list`
        #[arg(value_name = "ID")]
        id: String,
    },
    /// List recorded free electives.
    List,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Show progress, area credits and the weighted grade.
    Status,
    /// Mark a mandatory course complete or incomplete.
    Toggle {
        /// Course id (e.g., `stats`, `math`, `neuroinfo`)
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Set a grade for a completed course or an elective; `-` clears it.
    Grade {
        /// Course or elective id
        #[arg(value_name = "ID")]
        id: String,
        /// Grade between 1.0 and 4.0, or `-`
        #[arg(value_name = "GRADE", allow_hyphen_values = true)]
        grade: String,
    },
    /// Manage electives.
    Elective {
        #[command(subcommand)]
        subcommand: ElectiveSubcommand,
    },
    /// Manage free electives.
    Free {
        #[command(subcommand)]
        subcommand: FreeSubcommand,
    },
    /// Switch the math course between 9 and 6 ECTS.
    MathToggle,
    /// Export all progress as a JSON snapshot.
    Export {
        /// Output file (defaults to the configured exports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Replace all progress with a JSON snapshot.
    Import {
        /// Snapshot file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Generate a progress report.
    Report {
        /// Report format: markdown (md), html, or pdf
        #[arg(short, long, value_name = "FORMAT", default_value = "markdown")]
        format: String,

        /// Output file path (defaults to the configured reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "ectstracker",
    about = "Track ECTS progress and weighted grades",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the data directory holding tracker state
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default exports directory
    #[arg(long = "exports-dir", value_name = "DIR")]
    pub exports_dir: Option<PathBuf>,

    /// Override the default reports directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Use a course catalog TOML instead of the built-in one
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides for this run
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            data_dir: path_string(self.data_dir.as_ref()),
            exports_dir: path_string(self.exports_dir.as_ref()),
            reports_dir: path_string(self.reports_dir.as_ref()),
            catalog_file: path_string(self.catalog.as_ref()),
        }
    }
}
