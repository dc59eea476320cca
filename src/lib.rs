//! Library for `EctsTracker`
//! Holds the pure tracking core (catalog, reducer, progress and grade
//! calculators) plus the swappable storage, snapshot and report collaborators.

pub mod core;
pub mod logger;

pub use core::{config, get_version};
