//! Elective and free-elective handlers

use super::{open_tracker, CommandResult};
use crate::args::{ElectiveSubcommand, FreeSubcommand};
use ects_tracker::config::Config;
use ects_tracker::core::models::{Area, NO_GRADE};
use ects_tracker::core::progress::ELECTIVE_CREDIT_CAP;
use ects_tracker::verbose;

/// Dispatch `elective` subcommands
pub fn run_elective(config: &Config, subcommand: ElectiveSubcommand) -> CommandResult {
    let mut tracker = open_tracker(config)?;
    match subcommand {
        ElectiveSubcommand::Add {
            name,
            credits,
            area,
            grade,
        } => {
            let area = Area::from(area);
            let id = tracker
                .add_elective_course(&name, &credits, area, grade.as_deref())
                .map_err(|e| e.to_string())?;
            let progress = tracker.progress();
            println!("✓ Added {} to {} ({id})", name.trim(), area.display_name());
            if let Some(entry) = progress.area(area) {
                println!("  {}: {}/{} ECTS", area.display_name(), entry.credits, entry.ceiling);
            }
            if progress.elective_exceeds_cap() {
                println!(
                    "  Note: {} elective ECTS recorded, only {ELECTIVE_CREDIT_CAP} count",
                    progress.elective_total
                );
            }
        }
        ElectiveSubcommand::Remove { id } => {
            let name = tracker.state().elective(&id).map(|record| record.name.clone());
            if !tracker.remove_elective_course(&id).map_err(|e| e.to_string())? {
                return Err(format!("No elective with id '{id}'"));
            }
            println!("✓ Removed {}", name.unwrap_or(id));
        }
        ElectiveSubcommand::List => {
            let grading = tracker.grading();
            let state = tracker.state();
            if state.elective_courses.is_empty() {
                println!("No electives recorded.");
                return Ok(());
            }
            for area in Area::ALL {
                let records: Vec<_> = state
                    .elective_courses
                    .iter()
                    .filter(|record| record.area == area)
                    .collect();
                if records.is_empty() {
                    continue;
                }
                println!(
                    "{} ({}/{} ECTS)",
                    area.display_name(),
                    state.area_credits(area),
                    area.ceiling()
                );
                for record in records {
                    let grade = state
                        .grades
                        .grade(&record.id)
                        .map_or_else(|| NO_GRADE.to_string(), |g| format!("{g:.1}"));
                    let marker = if grading.is_used_in_grading(&record.id) { "*" } else { " " };
                    println!(
                        "  {marker} {:<40} {:>2} ECTS  grade {grade:<4} [{}]",
                        record.name, record.credits, record.id
                    );
                }
            }
            verbose!("\n* counted in the weighted grade");
        }
    }
    Ok(())
}

/// Dispatch `free` subcommands
pub fn run_free(config: &Config, subcommand: FreeSubcommand) -> CommandResult {
    let mut tracker = open_tracker(config)?;
    match subcommand {
        FreeSubcommand::Add { name, credits } => {
            let id = tracker
                .add_free_elective_course(&name, &credits)
                .map_err(|e| e.to_string())?;
            let progress = tracker.progress();
            println!("✓ Added free elective {} ({id})", name.trim());
            println!(
                "  Free electives: {}/{} ECTS",
                progress.free_elective_total, progress.free_elective_ceiling
            );
            if progress.free_elective_exceeds_cap() {
                println!(
                    "  Note: only {} ECTS count toward the degree",
                    progress.free_elective_counted
                );
            }
        }
        FreeSubcommand::Remove { id } => {
            let name = tracker
                .state()
                .free_elective_courses
                .iter()
                .find(|record| record.id == id)
                .map(|record| record.name.clone());
            if !tracker
                .remove_free_elective_course(&id)
                .map_err(|e| e.to_string())?
            {
                return Err(format!("No free elective with id '{id}'"));
            }
            println!("✓ Removed {}", name.unwrap_or(id));
        }
        FreeSubcommand::List => {
            let state = tracker.state();
            if state.free_elective_courses.is_empty() {
                println!("No free electives recorded.");
                return Ok(());
            }
            for record in &state.free_elective_courses {
                println!("  {:<40} {:>2} ECTS  [{}]", record.name, record.credits, record.id);
            }
        }
    }
    Ok(())
}
