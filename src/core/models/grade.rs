//! Grade values, grade input parsing and the grade map

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Best (lowest) grade on the scale
pub const MIN_GRADE: f64 = 1.0;

/// Worst passing grade on the scale
pub const MAX_GRADE: f64 = 4.0;

/// Placeholder marker meaning "no grade"
pub const NO_GRADE: &str = "-";

/// Grade steps offered by selection widgets, placeholder first
pub const VALID_GRADES: [&str; 11] = [
    NO_GRADE, "1.0", "1.3", "1.7", "2.0", "2.3", "2.7", "3.0", "3.3", "3.7", "4.0",
];

/// A stored grade: a number, or a non-numeric marker treated as ungraded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GradeEntry {
    /// Numeric grade
    Value(f64),
    /// Placeholder or other non-numeric marker
    Marker(String),
}

impl GradeEntry {
    /// The grade if it is numeric and on the 1.0-4.0 scale
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(grade) if in_range(*grade) => Some(*grade),
            _ => None,
        }
    }
}

impl fmt::Display for GradeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(grade) => write!(f, "{grade:.1}"),
            Self::Marker(marker) => write!(f, "{marker}"),
        }
    }
}

fn in_range(grade: f64) -> bool {
    grade.is_finite() && (MIN_GRADE..=MAX_GRADE).contains(&grade)
}

/// Parsed user grade input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradeInput {
    /// Remove the grade entry
    Clear,
    /// Record this grade
    Set(f64),
    /// Out of range or non-numeric; dropped without error
    Invalid,
}

impl GradeInput {
    /// Parse raw grade text.
    ///
    /// `""` and `"-"` clear the grade, a finite number within [1.0, 4.0] sets
    /// it, everything else is `Invalid`.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() || text == NO_GRADE {
            return Self::Clear;
        }
        Self::from_value(text.parse::<f64>().unwrap_or(f64::NAN))
    }

    /// Classify an already-numeric grade
    #[must_use]
    pub fn from_value(grade: f64) -> Self {
        if in_range(grade) {
            Self::Set(grade)
        } else {
            Self::Invalid
        }
    }
}

/// Mapping from course id (mandatory or elective) to its grade
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradeMap(BTreeMap<String, GradeEntry>);

impl GradeMap {
    /// Create an empty grade map
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Numeric grade recorded for `id`; markers and missing entries are `None`
    #[must_use]
    pub fn grade(&self, id: &str) -> Option<f64> {
        self.0.get(id).and_then(GradeEntry::value)
    }

    /// Raw entry for `id`
    #[must_use]
    pub fn entry(&self, id: &str) -> Option<&GradeEntry> {
        self.0.get(id)
    }

    /// Record a numeric grade
    pub fn set(&mut self, id: &str, grade: f64) {
        self.0.insert(id.to_string(), GradeEntry::Value(grade));
    }

    /// Remove the entry for `id`. Returns `true` if one existed.
    pub fn remove(&mut self, id: &str) -> bool {
        self.0.remove(id).is_some()
    }

    /// Whether an entry (of any kind) exists for `id`
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (id, entry) pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &GradeEntry)> {
        self.0.iter()
    }
}
