//! End-to-end behavior of the tracker over an in-memory store

use ects_tracker::core::catalog::Catalog;
use ects_tracker::core::grading::Inclusion;
use ects_tracker::core::models::{Area, MathCredits};
use ects_tracker::core::state::SequentialIds;
use ects_tracker::core::storage::{KeyValueStore, MemoryStore};
use ects_tracker::core::tracker::Tracker;
use ects_tracker::core::TrackerError;

fn tracker() -> Tracker<MemoryStore> {
    Tracker::open(Catalog::standard(), MemoryStore::new())
        .expect("memory store never fails")
        .with_ids(SequentialIds::new("rec"))
}

fn complete_and_grade(t: &mut Tracker<MemoryStore>, id: &str, grade: &str) {
    assert!(t.toggle_course(id).unwrap(), "{id} should now be complete");
    assert!(t.set_grade(id, grade).unwrap(), "{id} grade should change");
}

#[test]
fn math_course_counts_with_math_elective_at_nine_credits() {
    let mut t = tracker();
    t.add_elective_course("Linear Algebra", "6", Area::Math, Some("1.0"))
        .unwrap();
    complete_and_grade(&mut t, "math", "2.0");

    let breakdown = t.grading();
    let math = breakdown
        .contributions
        .iter()
        .find(|c| c.course_id == "math")
        .expect("math must be included");
    assert_eq!(math.credits, 9);
    assert!((math.grade - 2.0).abs() < f64::EPSILON);
    assert_eq!(math.reason, Inclusion::Mathematics);

    // (6 * 1.0 + 9 * 2.0) / 15
    assert_eq!(t.weighted_grade(), Some(1.6));
}

#[test]
fn math_toggle_to_six_clears_and_excludes_math_grade() {
    let mut t = tracker();
    t.add_elective_course("Linear Algebra", "6", Area::Math, None)
        .unwrap();
    complete_and_grade(&mut t, "math", "1.3");
    assert_eq!(t.weighted_grade(), Some(1.3));

    assert_eq!(t.toggle_math_credits().unwrap(), MathCredits::Six);
    assert!(!t.state().grades.contains("math"));
    assert_eq!(t.weighted_grade(), None);

    // regrading is ignored while the flag is 6
    assert!(!t.set_grade("math", "1.0").unwrap());
    assert!(!t.state().grades.contains("math"));
    assert!(!t.grading().is_used_in_grading("math"));

    assert_eq!(t.toggle_math_credits().unwrap(), MathCredits::Nine);
    assert!(t.set_grade("math", "1.0").unwrap());
    assert!(t.grading().is_used_in_grading("math"));
}

#[test]
fn only_top_two_areas_admit_mandatory_courses() {
    let mut t = tracker();
    t.add_elective_course("Deep Learning", "20", Area::Ai, Some("2.0"))
        .unwrap();
    t.add_elective_course("Epistemology", "10", Area::Philosophy, Some("2.0"))
        .unwrap();
    t.add_elective_course("Cognitive Psychology", "30", Area::Psychology, Some("2.0"))
        .unwrap();
    complete_and_grade(&mut t, "neuroinfo", "1.0");
    complete_and_grade(&mut t, "logic", "1.0");
    complete_and_grade(&mut t, "neurosci1", "1.0");

    let breakdown = t.grading();
    assert_eq!(breakdown.top_areas, [Area::Psychology, Area::Ai]);
    assert!(breakdown.is_used_in_grading("neurosci1"));
    assert!(breakdown.is_used_in_grading("neuroinfo"));
    assert!(!breakdown.is_used_in_grading("logic"));

    // (60 * 2.0 + 8 * 1.0 + 4 * 1.0) / 72
    assert_eq!(t.weighted_grade(), Some(1.83));
}

#[test]
fn lowest_area_mandatory_courses_are_excluded_even_if_graded() {
    let mut t = tracker();
    t.add_elective_course("Deep Learning", "10", Area::Ai, None)
        .unwrap();
    t.add_elective_course("Epistemology", "20", Area::Philosophy, None)
        .unwrap();
    t.add_elective_course("Cognitive Psychology", "30", Area::Psychology, None)
        .unwrap();
    complete_and_grade(&mut t, "neuroinfo", "1.0");
    complete_and_grade(&mut t, "ai", "1.0");
    complete_and_grade(&mut t, "logic", "3.0");
    complete_and_grade(&mut t, "biosys1", "2.0");

    let breakdown = t.grading();
    assert_eq!(breakdown.top_areas, [Area::Psychology, Area::Philosophy]);
    assert!(!breakdown.is_used_in_grading("neuroinfo"));
    assert!(!breakdown.is_used_in_grading("ai"));

    // (6 * 3.0 + 4 * 2.0) / 10
    assert_eq!(t.weighted_grade(), Some(2.6));
}

#[test]
fn import_missing_grades_changes_nothing() {
    let mut t = tracker();
    t.toggle_course("cs").unwrap();
    t.set_grade("cs", "1.7").unwrap();
    t.add_free_elective_course("Spanish", "5").unwrap();
    let before = t.state().clone();
    let stored_before = t.store().get("completedCourses").unwrap();

    let payload = r#"{
        "version": 1,
        "completedCourses": ["stats"],
        "electiveCourses": [],
        "freeElectiveCourses": [],
        "mathCredits": 6
    }"#;
    let err = t.import_json(payload).unwrap_err();
    assert!(matches!(err, TrackerError::Import(_)));
    assert!(err.to_string().starts_with("Import failed"));

    assert_eq!(t.state(), &before);
    assert_eq!(t.store().get("completedCourses").unwrap(), stored_before);
}

#[test]
fn import_replaces_every_field() {
    let mut source = tracker();
    source.toggle_course("stats").unwrap();
    source.set_grade("stats", "2.3").unwrap();
    source
        .add_elective_course("Robotics", "6", Area::Ai, Some("1.7"))
        .unwrap();
    source.toggle_math_credits().unwrap();
    let json = source.export_json().unwrap();

    let mut target = tracker();
    target.toggle_course("cs").unwrap();
    target.import_json(&json).unwrap();

    assert_eq!(target.state(), source.state());
    let reopened = Tracker::open(Catalog::standard(), target.store().clone()).unwrap();
    assert_eq!(reopened.state(), source.state());
}

#[test]
fn toggle_membership_follows_parity() {
    let mut t = tracker();
    for n in 1..=7 {
        let done = t.toggle_course("phil").unwrap();
        assert_eq!(done, n % 2 == 1);
        assert_eq!(t.state().is_completed("phil"), n % 2 == 1);
    }
}

#[test]
fn out_of_range_grades_leave_map_unchanged() {
    let mut t = tracker();
    t.toggle_course("stats").unwrap();
    t.set_grade("stats", "2.0").unwrap();
    let before = t.state().grades.clone();

    for bad in ["0.9", "4.1", "5", "abc", "NaN", "inf", "-1"] {
        assert!(!t.set_grade("stats", bad).unwrap(), "{bad}");
        assert_eq!(t.state().grades, before, "{bad}");
    }

    for good in ["1.0", "2.7", "4.0"] {
        t.set_grade("stats", good).unwrap();
        assert_eq!(
            t.state().grades.grade("stats"),
            Some(good.parse::<f64>().unwrap())
        );
    }
}

#[test]
fn area_sums_never_exceed_ceilings() {
    let mut t = tracker();
    let attempts = [
        (Area::Cs, "6"),
        (Area::Cs, "4"),
        (Area::Cs, "3"),
        (Area::Math, "9"),
        (Area::Math, "1"),
        (Area::Foundation, "4"),
        (Area::Foundation, "1"),
        (Area::Ai, "30"),
        (Area::Ai, "18"),
        (Area::Ai, "1"),
    ];
    for (area, credits) in attempts {
        let before = t.state().area_credits(area);
        match t.add_elective_course("Course", credits, area, None) {
            Ok(_) => {}
            Err(TrackerError::AreaCeilingExceeded { limit, current, .. }) => {
                assert_eq!(limit, area.ceiling());
                assert_eq!(current, before);
                assert_eq!(t.state().area_credits(area), before);
            }
            Err(other) => panic!("unexpected rejection: {other}"),
        }
        for area in Area::ALL {
            assert!(t.state().area_credits(area) <= area.ceiling());
        }
    }
    assert_eq!(t.state().area_credits(Area::Cs), 9);
    assert_eq!(t.state().area_credits(Area::Ai), 48);
}

#[test]
fn ceiling_rejection_message_reports_numbers() {
    let mut t = tracker();
    t.add_elective_course("Algorithms", "6", Area::Cs, None).unwrap();
    let err = t
        .add_elective_course("Databases", "6", Area::Cs, None)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot add course. Maximum of 9 ECTS credits allowed for Computer Science. Current credits: 6"
    );
}

#[test]
fn removing_elective_removes_grade_and_is_idempotent() {
    let mut t = tracker();
    let id = t
        .add_elective_course("Robotics", "6", Area::Ai, Some("1.3"))
        .unwrap();
    assert!(t.state().grades.contains(&id));

    assert!(t.remove_elective_course(&id).unwrap());
    let after_first = t.state().clone();
    assert!(!after_first.grades.contains(&id));
    assert!(after_first.elective(&id).is_none());

    assert!(!t.remove_elective_course(&id).unwrap());
    assert_eq!(t.state(), &after_first);
}

#[test]
fn weighted_grade_sentinel_and_rounding() {
    let mut t = tracker();
    assert_eq!(t.weighted_grade(), None);

    t.add_elective_course("A", "5", Area::Ai, Some("1.3")).unwrap();
    t.add_elective_course("B", "7", Area::Ai, Some("2.7")).unwrap();
    // (6.5 + 18.9) / 12 = 2.11666...
    assert_eq!(t.weighted_grade(), Some(2.12));
}

#[test]
fn invalid_records_are_rejected_without_change() {
    let mut t = tracker();
    let cases = [
        ("", "5", TrackerError::MissingName),
        ("Spanish", "", TrackerError::MissingCredits),
        ("Spanish", "0", TrackerError::CreditsOutOfRange { credits: 0 }),
        ("Spanish", "31", TrackerError::CreditsOutOfRange { credits: 31 }),
    ];
    for (name, credits, expected) in cases {
        assert_eq!(t.add_free_elective_course(name, credits).unwrap_err(), expected);
    }
    assert!(t.state().free_elective_courses.is_empty());
    assert!(t.store().get("freeElectiveCourses").unwrap().is_none());
}

#[test]
fn progress_caps_count_but_not_totals() {
    let mut t = tracker();
    for area in [Area::Ai, Area::Philosophy, Area::Psychology] {
        t.add_elective_course("Seminar", "25", area, None).unwrap();
    }
    t.add_free_elective_course("X", "30").unwrap();
    t.add_free_elective_course("Y", "10").unwrap();

    let progress = t.progress();
    assert_eq!(progress.elective_total, 75);
    assert_eq!(progress.elective_counted, 60);
    assert!((progress.elective_percent - 125.0).abs() < 1e-9);
    assert_eq!(progress.free_elective_counted, 33);
    assert_eq!(progress.overall_completed, 93);
    assert_eq!(progress.overall_required, 168);

    t.toggle_math_credits().unwrap();
    let progress = t.progress();
    assert_eq!(progress.free_elective_ceiling, 36);
    assert_eq!(progress.mandatory_total, 72);
    assert_eq!(progress.overall_required, 168);
}

/// Memory store that fails exactly one write, counted from 1
#[derive(Debug, Clone, Default)]
struct FailingStore {
    inner: MemoryStore,
    writes: usize,
    fail_on: Option<usize>,
}

impl FailingStore {
    fn failing_on(inner: MemoryStore, write: usize) -> Self {
        Self {
            inner,
            writes: 0,
            fail_on: Some(write),
        }
    }
}

impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>, TrackerError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TrackerError> {
        self.writes += 1;
        if self.fail_on == Some(self.writes) {
            return Err(TrackerError::Storage("disk full".to_string()));
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), TrackerError> {
        self.inner.remove(key)
    }
}

#[test]
fn failed_write_commits_nothing() {
    let store = FailingStore::failing_on(MemoryStore::new(), 1);
    let mut t = Tracker::open(Catalog::standard(), store).unwrap();

    let err = t.toggle_course("cs").unwrap_err();
    assert!(matches!(err, TrackerError::Storage(_)));
    assert!(t.state().completed_courses.is_empty());
    assert!(t.store().inner.get("completedCourses").unwrap().is_none());

    assert!(t.toggle_course("cs").unwrap());
    assert_eq!(t.state().completed_courses, vec!["cs".to_string()]);
}

#[test]
fn failed_second_write_restores_first_field() {
    let mut inner = MemoryStore::new();
    inner.set("completedCourses", r#"["cs"]"#).unwrap();
    inner.set("grades", r#"{"cs":1.7}"#).unwrap();
    let mut t = Tracker::open(Catalog::standard(), FailingStore::failing_on(inner, 2)).unwrap();
    let before = t.state().clone();

    // un-completing writes completedCourses, then grades
    assert!(t.toggle_course("cs").is_err());
    assert_eq!(t.state(), &before);
    assert_eq!(
        t.store().inner.get("completedCourses").unwrap().as_deref(),
        Some(r#"["cs"]"#)
    );
    let reopened = Tracker::open(Catalog::standard(), t.store().inner.clone()).unwrap();
    assert_eq!(reopened.state(), &before);
}

#[test]
fn failed_import_write_leaves_store_as_before() {
    let mut inner = MemoryStore::new();
    inner.set("completedCourses", r#"["stats"]"#).unwrap();
    let mut t = Tracker::open(Catalog::standard(), FailingStore::failing_on(inner, 3)).unwrap();
    let before = t.state().clone();

    let payload = r#"{
        "version": 1,
        "completedCourses": ["cs"],
        "electiveCourses": [{"id": "e1", "name": "Ethics", "credits": 6, "area": "philosophy"}],
        "freeElectiveCourses": [],
        "mathCredits": 6,
        "grades": {}
    }"#;
    let err = t.import_json(payload).unwrap_err();
    assert!(matches!(err, TrackerError::Storage(_)));
    assert_eq!(t.state(), &before);

    assert!(t.store().inner.get("electiveCourses").unwrap().is_none());
    let reopened = Tracker::open(Catalog::standard(), t.store().inner.clone()).unwrap();
    assert_eq!(reopened.state(), &before);
    assert_eq!(reopened.state().completed_courses, vec!["stats".to_string()]);
    assert_eq!(reopened.state().math_credits, MathCredits::Nine);
}

#[test]
fn import_rejects_out_of_range_credits() {
    let mut t = tracker();
    t.toggle_course("cs").unwrap();
    let before = t.state().clone();

    for electives in [
        r#"[{"id": "a", "name": "Huge", "credits": 4294967295, "area": "ai"},
            {"id": "b", "name": "One", "credits": 1, "area": "ai"}]"#,
        r#"[{"id": "a", "name": "Empty", "credits": 0, "area": "ai"}]"#,
        r#"[{"id": "a", "name": "Big", "credits": 500, "area": "cs"}]"#,
        r#"[{"id": "a", "name": "A", "credits": 6, "area": "cs"},
            {"id": "b", "name": "B", "credits": 6, "area": "cs"}]"#,
    ] {
        let payload = format!(
            r#"{{"version": 1, "completedCourses": [], "electiveCourses": {electives},
                "freeElectiveCourses": [], "mathCredits": 9, "grades": {{}}}}"#
        );
        let err = t.import_json(&payload).unwrap_err();
        assert!(matches!(err, TrackerError::Import(_)), "{electives}");
        assert_eq!(t.state(), &before);
    }

    let report = t.progress();
    assert_eq!(report.elective_total, 0);
    assert_eq!(t.state().area_credits(Area::Cs), 0);
}

#[test]
fn import_drops_grades_that_cannot_count() {
    let mut t = tracker();
    let payload = r#"{
        "version": 1,
        "completedCourses": ["cs", "math"],
        "electiveCourses": [],
        "freeElectiveCourses": [],
        "mathCredits": 6,
        "grades": {"cs": 1.3, "math": 1.0, "stats": 2.0}
    }"#;
    t.import_json(payload).unwrap();
    assert_eq!(t.state().grades.len(), 1);
    assert_eq!(t.state().grades.grade("cs"), Some(1.3));
    assert!(!t.state().grades.contains("math"));
}
