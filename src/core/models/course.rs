//! Mandatory course model

use super::{Area, MathCredits};
use serde::{Deserialize, Serialize};

/// Catalog id of the math course whose weight follows the math-credit toggle
pub const MATH_COURSE_ID: &str = "math";

/// Catalog id of the introductory computer science course
pub const CS_COURSE_ID: &str = "cs";

/// Catalog id of the statistics course (always counted when graded)
pub const STATS_COURSE_ID: &str = "stats";

/// Catalog id of the foundation course (never graded)
pub const FOUNDATION_COURSE_ID: &str = "cog";

/// Represents a mandatory course in the programme catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MandatoryCourse {
    /// Stable unique id (e.g., "stats")
    pub id: String,

    /// Course name (e.g., "Intro to Statistics and Data Analysis")
    pub name: String,

    /// Nominal ECTS credits
    pub credits: u32,

    /// Category the course belongs to
    pub category: Area,

    /// Whether the course is required (as opposed to one option of a group)
    #[serde(default)]
    pub required: bool,

    /// Number of courses to pick from the group, if part of one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<u32>,

    /// Size of the group, if part of one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_in_group: Option<u32>,
}

impl MandatoryCourse {
    /// Create a new required course
    ///
    /// # Arguments
    /// * `id` - Stable course id
    /// * `name` - Full course name
    /// * `credits` - Nominal ECTS credits
    /// * `category` - Course category
    #[must_use]
    pub fn required(id: &str, name: &str, credits: u32, category: Area) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            credits,
            category,
            required: true,
            options: None,
            total_in_group: None,
        }
    }

    /// Create a course that is one choice out of a group ("pick `options` of `total`")
    #[must_use]
    pub fn grouped(
        id: &str,
        name: &str,
        credits: u32,
        category: Area,
        options: u32,
        total: u32,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            credits,
            category,
            required: false,
            options: Some(options),
            total_in_group: Some(total),
        }
    }

    /// Whether this is the math course with switchable weight
    #[must_use]
    pub fn is_math(&self) -> bool {
        self.id == MATH_COURSE_ID
    }

    /// Credits counted for this course under the given math setting
    #[must_use]
    pub fn effective_credits(&self, math: MathCredits) -> u32 {
        if self.is_math() {
            math.credits()
        } else {
            self.credits
        }
    }

    /// Whether the course can carry a grade under the given math setting
    #[must_use]
    pub fn is_gradeable(&self, math: MathCredits) -> bool {
        self.id != FOUNDATION_COURSE_ID && !(self.is_math() && !math.is_graded())
    }

    /// Group annotation such as "(2 out of 3 courses)"
    #[must_use]
    pub fn group_label(&self) -> Option<String> {
        match (self.options, self.total_in_group) {
            (Some(options), Some(total)) => Some(format!("({options} out of {total} courses)")),
            _ => None,
        }
    }
}
