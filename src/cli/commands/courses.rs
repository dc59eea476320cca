//! Mandatory course handlers: completion, grades and the math setting

use super::{open_tracker, CommandResult};
use ects_tracker::config::Config;
use ects_tracker::core::models::course::MATH_COURSE_ID;
use ects_tracker::core::models::{GradeInput, VALID_GRADES};
use ects_tracker::verbose;

/// Flip completion of a mandatory course
pub fn toggle(config: &Config, id: &str) -> CommandResult {
    let mut tracker = open_tracker(config)?;
    let Some(course) = tracker.catalog().get(id).cloned() else {
        return Err(format!("Unknown course id: '{id}'"));
    };
    let had_grade = tracker.state().grades.contains(id);

    let done = tracker.toggle_course(id).map_err(|e| e.to_string())?;
    if done {
        println!("✓ {} marked complete", course.name);
    } else {
        println!("✓ {} marked incomplete", course.name);
        if had_grade {
            println!("  Grade for {id} removed");
        }
    }
    verbose!(
        "  Mandatory credits: {}/{}",
        tracker.progress().mandatory_completed,
        tracker.progress().mandatory_total
    );
    Ok(())
}

/// Set or clear a grade
pub fn grade(config: &Config, id: &str, grade: &str) -> CommandResult {
    let mut tracker = open_tracker(config)?;
    let known = tracker.catalog().get(id).is_some() || tracker.state().elective(id).is_some();
    if !known {
        return Err(format!("Unknown course or elective id: '{id}'"));
    }
    if !tracker.state().is_gradeable(id) {
        return Err(format!(
            "'{id}' cannot be graded right now (complete it first; cog and 6 ECTS math are never graded)"
        ));
    }
    if GradeInput::parse(grade) == GradeInput::Invalid {
        return Err(format!(
            "Invalid grade '{grade}' (expected one of: {})",
            VALID_GRADES.join(", ")
        ));
    }

    tracker.set_grade(id, grade).map_err(|e| e.to_string())?;
    match tracker.state().grades.grade(id) {
        Some(value) => println!("✓ Grade for {id} set to {value:.1}"),
        None => println!("✓ Grade for {id} cleared"),
    }

    if let Some(average) = tracker.weighted_grade() {
        verbose!("  Weighted grade: {average:.2}");
    }
    Ok(())
}

/// Switch the math course between 9 and 6 ECTS
pub fn math_toggle(config: &Config) -> CommandResult {
    let mut tracker = open_tracker(config)?;
    let had_grade = tracker.state().grades.contains(MATH_COURSE_ID);
    let math = tracker.toggle_math_credits().map_err(|e| e.to_string())?;
    println!(
        "✓ Math set to {math} ECTS (free elective ceiling {} ECTS)",
        math.free_elective_ceiling()
    );
    if had_grade && !math.is_graded() {
        println!("  Math grade removed");
    }
    Ok(())
}
