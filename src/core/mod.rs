//! Core module: tracking domain, calculators and their collaborators

pub mod catalog;
pub mod config;
pub mod error;
pub mod grading;
pub mod models;
pub mod progress;
pub mod report;
pub mod snapshot;
pub mod state;
pub mod storage;
pub mod tracker;

pub use error::TrackerError;

/// Returns the current version of the `EctsTracker` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
