//! Status command handler

use super::{open_tracker, CommandResult};
use ects_tracker::config::Config;
use ects_tracker::core::models::{Area, NO_GRADE};
use ects_tracker::core::progress::ELECTIVE_CREDIT_CAP;
use ects_tracker::verbose;

/// Print progress, per-area credits, the course checklist and the weighted grade
pub fn run(config: &Config) -> CommandResult {
    let tracker = open_tracker(config)?;
    let state = tracker.state();
    let progress = tracker.progress();
    let grading = tracker.grading();

    println!("\n=== ECTS Progress ===\n");
    println!(
        "Overall          {:>3}/{:<3} ECTS  {:5.1}%",
        progress.overall_completed, progress.overall_required, progress.overall_percent
    );
    println!(
        "Mandatory        {:>3}/{:<3} ECTS  {:5.1}%",
        progress.mandatory_completed, progress.mandatory_total, progress.mandatory_percent
    );
    println!(
        "Electives        {:>3}/{:<3} ECTS  {:5.1}%{}",
        progress.elective_total,
        ELECTIVE_CREDIT_CAP,
        progress.elective_percent,
        if progress.elective_exceeds_cap() { "  (capped)" } else { "" }
    );
    println!(
        "Free electives   {:>3}/{:<3} ECTS  {:5.1}%{}",
        progress.free_elective_total,
        progress.free_elective_ceiling,
        progress.free_elective_percent,
        if progress.free_elective_exceeds_cap() { "  (capped)" } else { "" }
    );

    println!("\nElective areas:");
    for entry in progress.areas.iter().filter(|entry| entry.area != Area::Foundation) {
        println!(
            "  {:<28} {:>2}/{:<2} ECTS",
            entry.area.display_name(),
            entry.credits,
            entry.ceiling
        );
    }

    println!("\nMandatory courses (math at {} ECTS):", state.math_credits);
    for course in tracker.catalog().courses() {
        let mark = if state.is_completed(&course.id) { "x" } else { " " };
        let grade = state
            .grades
            .grade(&course.id)
            .map_or_else(|| NO_GRADE.to_string(), |g| format!("{g:.1}"));
        let group = course.group_label().unwrap_or_default();
        println!(
            "  [{mark}] {:<10} {:<50} {:>2} ECTS  {grade:<4} {group}",
            course.id,
            course.name,
            course.effective_credits(state.math_credits)
        );
    }

    match grading.average() {
        Some(average) => println!("\nWeighted grade: {average:.2}"),
        None => println!("\nWeighted grade: {NO_GRADE}"),
    }
    let [first, second] = grading.top_areas;
    verbose!(
        "Top areas: {}, {}",
        first.display_name(),
        second.display_name()
    );
    for item in &grading.contributions {
        verbose!(
            "  {:<12} {:>2} ECTS x {:.1}  {}",
            item.course_id,
            item.credits,
            item.grade,
            item.reason
        );
    }
    Ok(())
}
