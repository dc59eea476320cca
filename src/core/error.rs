//! Error taxonomy for tracker operations
//!
//! Nothing here is fatal: a rejected action leaves the state untouched and
//! the `Display` text is the message shown to the user.

use crate::core::models::Area;
use thiserror::Error;

/// Errors produced by tracker operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// Course name was empty
    #[error("Please enter a course name")]
    MissingName,

    /// Credits field was empty
    #[error("Please enter the number of credits")]
    MissingCredits,

    /// Credits field was not a whole number
    #[error("Credits must be a whole number, got '{0}'")]
    InvalidCredits(String),

    /// Credits outside the accepted [1, 30] range
    #[error("Credits must be between 1 and 30 (got {credits})")]
    CreditsOutOfRange {
        /// Rejected credit value
        credits: i64,
    },

    /// Adding the course would push the area over its ceiling
    #[error(
        "Cannot add course. Maximum of {limit} ECTS credits allowed for {}. Current credits: {current}",
        .area.display_name()
    )]
    AreaCeilingExceeded {
        /// Area the course was added to
        area: Area,
        /// Area ceiling
        limit: u32,
        /// Credits already stored in the area
        current: u32,
    },

    /// Snapshot payload could not be imported
    #[error("Import failed: {0}")]
    Import(String),

    /// Key-value backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Catalog file could not be loaded
    #[error("Invalid catalog: {0}")]
    Catalog(String),
}

impl TrackerError {
    /// Whether the error is a user-correctable validation rejection
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingName
                | Self::MissingCredits
                | Self::InvalidCredits(_)
                | Self::CreditsOutOfRange { .. }
                | Self::AreaCeilingExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_message_names_area_and_numbers() {
        let err = TrackerError::AreaCeilingExceeded {
            area: Area::Cs,
            limit: 9,
            current: 6,
        };
        assert_eq!(
            err.to_string(),
            "Cannot add course. Maximum of 9 ECTS credits allowed for Computer Science. Current credits: 6"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_import_is_not_validation() {
        assert!(!TrackerError::Import("missing field".to_string()).is_validation());
    }
}
