//! Math credit toggle

use serde::{Deserialize, Serialize};
use std::fmt;

/// Credit weight of the mandatory math course (9 or 6).
///
/// The choice also moves the free-elective ceiling: the ECTS dropped from
/// math are added to the free-elective pool (33 vs 36).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum MathCredits {
    /// Full 9 ECTS course, graded
    #[default]
    Nine,
    /// Reduced 6 ECTS course, ungraded
    Six,
}

impl MathCredits {
    /// Credits counted for the math course
    #[must_use]
    pub const fn credits(self) -> u32 {
        match self {
            Self::Nine => 9,
            Self::Six => 6,
        }
    }

    /// Free-elective pool ceiling that goes with this setting
    #[must_use]
    pub const fn free_elective_ceiling(self) -> u32 {
        match self {
            Self::Nine => 33,
            Self::Six => 36,
        }
    }

    /// The other setting
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Nine => Self::Six,
            Self::Six => Self::Nine,
        }
    }

    /// Whether the math course can carry a grade
    #[must_use]
    pub const fn is_graded(self) -> bool {
        matches!(self, Self::Nine)
    }
}

impl TryFrom<u32> for MathCredits {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            9 => Ok(Self::Nine),
            6 => Ok(Self::Six),
            other => Err(format!("math credits must be 9 or 6, got {other}")),
        }
    }
}

impl From<MathCredits> for u32 {
    fn from(value: MathCredits) -> Self {
        value.credits()
    }
}

impl fmt::Display for MathCredits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.credits())
    }
}
