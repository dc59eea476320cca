//! User-created elective and free-elective records

use super::Area;
use serde::{Deserialize, Serialize};

/// A mandatory-elective course logged by the user against an area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectiveRecord {
    /// Generated unique id, never reused
    pub id: String,
    /// Free-text course name
    pub name: String,
    /// ECTS credits (1-30 when created through the tracker)
    pub credits: u32,
    /// Area the credits count toward
    pub area: Area,
}

/// A free-elective course; no area and no grade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeElectiveRecord {
    /// Generated unique id, never reused
    pub id: String,
    /// Free-text course name
    pub name: String,
    /// ECTS credits (1-30 when created through the tracker)
    pub credits: u32,
}

/// Sum of elective credits stored in `area`
#[must_use]
pub fn area_credits(electives: &[ElectiveRecord], area: Area) -> u32 {
    electives
        .iter()
        .filter(|record| record.area == area)
        .map(|record| record.credits)
        .fold(0, u32::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, credits: u32, area: Area) -> ElectiveRecord {
        ElectiveRecord {
            id: id.to_string(),
            name: format!("Course {id}"),
            credits,
            area,
        }
    }

    #[test]
    fn test_area_credits() {
        let electives = vec![
            record("a", 6, Area::Ai),
            record("b", 5, Area::Ai),
            record("c", 3, Area::Cs),
        ];
        assert_eq!(area_credits(&electives, Area::Ai), 11);
        assert_eq!(area_credits(&electives, Area::Cs), 3);
        assert_eq!(area_credits(&electives, Area::Math), 0);
    }

    #[test]
    fn test_elective_json_shape() {
        let json = serde_json::to_value(record("x", 6, Area::Philosophy)).unwrap();
        assert_eq!(json["id"], "x");
        assert_eq!(json["credits"], 6);
        assert_eq!(json["area"], "philosophy");
    }
}
