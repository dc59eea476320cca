//! Course category / elective area

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a mandatory course, also used as the area of an elective record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    /// Methods of Cognitive Science
    Foundation,
    /// Computer Science
    Cs,
    /// Mathematics
    Math,
    /// Artificial Intelligence and Machine Learning
    Ai,
    /// Mind, Ethics, and Society
    Philosophy,
    /// Psychology, Communication, Neuroscience, and Behavior
    Psychology,
}

impl Area {
    /// All areas in display order
    pub const ALL: [Self; 6] = [
        Self::Ai,
        Self::Philosophy,
        Self::Psychology,
        Self::Cs,
        Self::Math,
        Self::Foundation,
    ];

    /// Areas that compete for the two graded slots, in tie-break priority order
    pub const RANKED: [Self; 3] = [Self::Ai, Self::Philosophy, Self::Psychology];

    /// Maximum elective credits that may be stored in this area
    #[must_use]
    pub const fn ceiling(self) -> u32 {
        match self {
            Self::Foundation => 4,
            Self::Cs | Self::Math => 9,
            Self::Ai | Self::Philosophy | Self::Psychology => 48,
        }
    }

    /// Human-readable area name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Ai => "Artificial Intelligence and Machine Learning",
            Self::Philosophy => "Mind, Ethics, and Society",
            Self::Psychology => "Psychology, Communication, Neuroscience, and Behavior",
            Self::Cs => "Computer Science",
            Self::Math => "Mathematics",
            Self::Foundation => "Methods of Cognitive Science",
        }
    }

    /// Stable lowercase key, identical to the serialized form
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Foundation => "foundation",
            Self::Cs => "cs",
            Self::Math => "math",
            Self::Ai => "ai",
            Self::Philosophy => "philosophy",
            Self::Psychology => "psychology",
        }
    }
}

impl FromStr for Area {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|area| area.key() == wanted)
            .ok_or_else(|| format!("Unknown area: '{s}'"))
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
