//! Progress calculator
//!
//! Pure functions over the catalog and a state snapshot. Everything is
//! recomputed on each call; percentages are raw ratios ×100 and may exceed
//! 100 for the uncapped pools.

use crate::core::catalog::Catalog;
use crate::core::models::Area;
use crate::core::state::TrackerState;

/// Elective credits required (and counted at most) toward the degree
pub const ELECTIVE_CREDIT_CAP: u32 = 60;

/// Progress within a single elective area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaProgress {
    /// Area
    pub area: Area,
    /// Credits reported for the area (always 0 for foundation)
    pub credits: u32,
    /// Area ceiling
    pub ceiling: u32,
    /// credits / ceiling × 100
    pub percent: f64,
}

/// Full set of derived progress numbers
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    /// Total mandatory credits (math substituted by the current setting)
    pub mandatory_total: u32,
    /// Mandatory credits of completed courses
    pub mandatory_completed: u32,
    /// Mandatory completion percentage
    pub mandatory_percent: f64,
    /// Uncapped elective credits
    pub elective_total: u32,
    /// Elective credits counted toward the overall total
    pub elective_counted: u32,
    /// elective total / 60 × 100
    pub elective_percent: f64,
    /// Uncapped free-elective credits
    pub free_elective_total: u32,
    /// Free-elective pool ceiling (33 or 36)
    pub free_elective_ceiling: u32,
    /// Free-elective credits counted toward the overall total
    pub free_elective_counted: u32,
    /// free-elective total / ceiling × 100
    pub free_elective_percent: f64,
    /// Per-area elective progress in `Area::ALL` order
    pub areas: Vec<AreaProgress>,
    /// Credits counted toward the degree
    pub overall_completed: u32,
    /// Credits required for the degree
    pub overall_required: u32,
    /// Overall completion percentage
    pub overall_percent: f64,
}

impl ProgressReport {
    /// Derive all progress numbers from the current state
    #[must_use]
    pub fn compute(catalog: &Catalog, state: &TrackerState) -> Self {
        let math = state.math_credits;
        let mandatory_total = catalog.total_credits(math);
        let mandatory_completed = completed_mandatory_credits(catalog, state);

        let elective_total = state
            .elective_courses
            .iter()
            .map(|c| c.credits)
            .fold(0, u32::saturating_add);
        let elective_counted = u32::min(elective_total, ELECTIVE_CREDIT_CAP);

        let free_elective_ceiling = math.free_elective_ceiling();
        let free_elective_total = state
            .free_elective_courses
            .iter()
            .map(|c| c.credits)
            .fold(0, u32::saturating_add);
        let free_elective_counted = u32::min(free_elective_total, free_elective_ceiling);

        let overall_completed = mandatory_completed
            .saturating_add(elective_counted)
            .saturating_add(free_elective_counted);
        let overall_required = mandatory_total
            .saturating_add(ELECTIVE_CREDIT_CAP)
            .saturating_add(free_elective_ceiling);

        Self {
            mandatory_total,
            mandatory_completed,
            mandatory_percent: percent(mandatory_completed, mandatory_total),
            elective_total,
            elective_counted,
            elective_percent: percent(elective_total, ELECTIVE_CREDIT_CAP),
            free_elective_total,
            free_elective_ceiling,
            free_elective_counted,
            free_elective_percent: percent(free_elective_total, free_elective_ceiling),
            areas: Area::ALL
                .into_iter()
                .map(|area| area_progress(state, area))
                .collect(),
            overall_completed,
            overall_required,
            overall_percent: percent(overall_completed, overall_required),
        }
    }

    /// Whether stored elective credits exceed what is counted
    #[must_use]
    pub const fn elective_exceeds_cap(&self) -> bool {
        self.elective_total > ELECTIVE_CREDIT_CAP
    }

    /// Whether stored free-elective credits exceed what is counted
    #[must_use]
    pub const fn free_elective_exceeds_cap(&self) -> bool {
        self.free_elective_total > self.free_elective_ceiling
    }

    /// Progress entry for one area
    #[must_use]
    pub fn area(&self, area: Area) -> Option<&AreaProgress> {
        self.areas.iter().find(|entry| entry.area == area)
    }
}

/// Mandatory credits of courses marked complete
#[must_use]
pub fn completed_mandatory_credits(catalog: &Catalog, state: &TrackerState) -> u32 {
    catalog
        .courses()
        .iter()
        .filter(|course| state.is_completed(&course.id))
        .map(|course| course.effective_credits(state.math_credits))
        .fold(0, u32::saturating_add)
}

/// Elective credits reported for `area`; foundation always reports zero
#[must_use]
pub fn area_credits(state: &TrackerState, area: Area) -> u32 {
    if area == Area::Foundation {
        return 0;
    }
    state.area_credits(area)
}

/// Progress of one elective area against its ceiling
#[must_use]
pub fn area_progress(state: &TrackerState, area: Area) -> AreaProgress {
    let credits = area_credits(state, area);
    let ceiling = area.ceiling();
    AreaProgress {
        area,
        credits,
        ceiling,
        percent: percent(credits, ceiling),
    }
}

fn percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    f64::from(part) / f64::from(whole) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{ElectiveRecord, FreeElectiveRecord, MathCredits};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn elective(id: &str, credits: u32, area: Area) -> ElectiveRecord {
        ElectiveRecord {
            id: id.to_string(),
            name: id.to_string(),
            credits,
            area,
        }
    }

    fn free(id: &str, credits: u32) -> FreeElectiveRecord {
        FreeElectiveRecord {
            id: id.to_string(),
            name: id.to_string(),
            credits,
        }
    }

    #[test]
    fn test_empty_state() {
        let report = ProgressReport::compute(&Catalog::standard(), &TrackerState::default());
        assert_eq!(report.mandatory_total, 75);
        assert_eq!(report.mandatory_completed, 0);
        assert_eq!(report.overall_required, 75 + 60 + 33);
        assert!(close(report.overall_percent, 0.0));
        assert_eq!(report.areas.len(), Area::ALL.len());
    }

    #[test]
    fn test_math_substitution() {
        let state = TrackerState {
            completed_courses: vec!["math".to_string(), "stats".to_string()],
            math_credits: MathCredits::Six,
            ..TrackerState::default()
        };
        let report = ProgressReport::compute(&Catalog::standard(), &state);
        assert_eq!(report.mandatory_total, 72);
        assert_eq!(report.mandatory_completed, 14);
        assert_eq!(report.free_elective_ceiling, 36);
        assert_eq!(report.overall_required, 72 + 60 + 36);
        assert!(close(report.mandatory_percent, 14.0 / 72.0 * 100.0));
    }

    #[test]
    fn test_unknown_completed_ids_ignored() {
        let state = TrackerState {
            completed_courses: vec!["ghost".to_string()],
            ..TrackerState::default()
        };
        let report = ProgressReport::compute(&Catalog::standard(), &state);
        assert_eq!(report.mandatory_completed, 0);
    }

    #[test]
    fn test_caps_apply_to_overall_only() {
        let state = TrackerState {
            elective_courses: vec![
                elective("a", 30, Area::Ai),
                elective("b", 30, Area::Philosophy),
                elective("c", 10, Area::Psychology),
            ],
            free_elective_courses: vec![free("f1", 30), free("f2", 10)],
            ..TrackerState::default()
        };
        let report = ProgressReport::compute(&Catalog::standard(), &state);
        assert_eq!(report.elective_total, 70);
        assert_eq!(report.elective_counted, 60);
        assert!(report.elective_exceeds_cap());
        assert!(close(report.elective_percent, 70.0 / 60.0 * 100.0));
        assert_eq!(report.free_elective_total, 40);
        assert_eq!(report.free_elective_counted, 33);
        assert!(report.free_elective_exceeds_cap());
        assert_eq!(report.overall_completed, 93);
    }

    #[test]
    fn test_area_progress() {
        let state = TrackerState {
            elective_courses: vec![
                elective("a", 12, Area::Ai),
                elective("b", 3, Area::Cs),
                elective("c", 4, Area::Foundation),
            ],
            ..TrackerState::default()
        };
        let ai = area_progress(&state, Area::Ai);
        assert_eq!(ai.credits, 12);
        assert!(close(ai.percent, 25.0));

        let cs = area_progress(&state, Area::Cs);
        assert!(close(cs.percent, 100.0 / 3.0));

        let foundation = area_progress(&state, Area::Foundation);
        assert_eq!(foundation.credits, 0);
        assert!(close(foundation.percent, 0.0));
    }

    #[test]
    fn test_empty_catalog_does_not_divide_by_zero() {
        let catalog = Catalog::new(Vec::new()).unwrap();
        let report = ProgressReport::compute(&catalog, &TrackerState::default());
        assert!(close(report.mandatory_percent, 0.0));
    }
}
