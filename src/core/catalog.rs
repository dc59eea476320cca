//! Mandatory course catalog
//!
//! The catalog is read-only configuration. `Catalog::standard` is the
//! built-in programme; an alternative can be loaded from a TOML file of
//! `[[courses]]` tables.

use crate::core::models::course::{
    CS_COURSE_ID, FOUNDATION_COURSE_ID, MATH_COURSE_ID, STATS_COURSE_ID,
};
use crate::core::models::{Area, MandatoryCourse, MathCredits};
use crate::core::TrackerError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Ordered list of mandatory courses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    courses: Vec<MandatoryCourse>,
}

impl Catalog {
    /// Build a catalog from courses, rejecting duplicate ids
    ///
    /// # Errors
    /// Returns `TrackerError::Catalog` if two courses share an id
    pub fn new(courses: Vec<MandatoryCourse>) -> Result<Self, TrackerError> {
        let mut seen = HashSet::new();
        for course in &courses {
            if !seen.insert(course.id.as_str()) {
                return Err(TrackerError::Catalog(format!(
                    "duplicate course id '{}'",
                    course.id
                )));
            }
        }
        Ok(Self { courses })
    }

    /// The built-in cognitive science programme
    #[must_use]
    pub fn standard() -> Self {
        let courses = vec![
            MandatoryCourse::required(
                FOUNDATION_COURSE_ID,
                "Foundation of Cognitive Science",
                3,
                Area::Foundation,
            ),
            MandatoryCourse::required(
                STATS_COURSE_ID,
                "Intro to Statistics and Data Analysis",
                8,
                Area::Foundation,
            ),
            MandatoryCourse::required(
                CS_COURSE_ID,
                "Introduction to Computer Science",
                9,
                Area::Cs,
            ),
            MandatoryCourse::required(MATH_COURSE_ID, "Intro to Mathematics", 9, Area::Math),
            MandatoryCourse::required(
                "neuroinfo",
                "Introduction to Neuroinformatics",
                8,
                Area::Ai,
            ),
            MandatoryCourse::grouped(
                "ai",
                "Introduction to Cognition in Artificial Systems",
                8,
                Area::Ai,
                1,
                2,
            ),
            MandatoryCourse::required(
                "logic",
                "Introduction to Logic and Critical Thinking",
                6,
                Area::Philosophy,
            ),
            MandatoryCourse::required(
                "phil",
                "Introduction to Philosophy for CogSci",
                4,
                Area::Philosophy,
            ),
            MandatoryCourse::required(
                "ethics",
                "Introduction to the Ethics of AI",
                4,
                Area::Philosophy,
            ),
            MandatoryCourse::grouped(
                "neurosci1",
                "Introduction to Neuroscience I",
                4,
                Area::Psychology,
                2,
                3,
            ),
            MandatoryCourse::grouped(
                "neurosci2",
                "Introduction to Neuroscience II",
                4,
                Area::Psychology,
                2,
                3,
            ),
            MandatoryCourse::grouped(
                "biosys1",
                "Introduction to Cognition in Biological Systems I",
                4,
                Area::Psychology,
                2,
                3,
            ),
            MandatoryCourse::grouped(
                "biosys2",
                "Introduction to Cognition in Biological Systems II",
                4,
                Area::Psychology,
                2,
                3,
            ),
        ];
        Self { courses }
    }

    /// Parse a catalog from a TOML string
    ///
    /// # Errors
    /// Returns `TrackerError::Catalog` if the TOML is malformed or ids repeat
    pub fn from_toml(toml_str: &str) -> Result<Self, TrackerError> {
        let parsed: Self =
            toml::from_str(toml_str).map_err(|e| TrackerError::Catalog(e.to_string()))?;
        Self::new(parsed.courses)
    }

    /// Load a catalog file
    ///
    /// # Errors
    /// Returns `TrackerError::Catalog` if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, TrackerError> {
        let content = fs::read_to_string(path)
            .map_err(|e| TrackerError::Catalog(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// Courses in catalog order
    #[must_use]
    pub fn courses(&self) -> &[MandatoryCourse] {
        &self.courses
    }

    /// Look up a course by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MandatoryCourse> {
        self.courses.iter().find(|course| course.id == id)
    }

    /// Total mandatory credits under the given math setting
    #[must_use]
    pub fn total_credits(&self, math: MathCredits) -> u32 {
        self.courses
            .iter()
            .map(|course| course.effective_credits(math))
            .fold(0, u32::saturating_add)
    }

    /// Courses in `area`, in catalog order
    pub fn in_area(&self, area: Area) -> impl Iterator<Item = &MandatoryCourse> {
        self.courses
            .iter()
            .filter(move |course| course.category == area)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
