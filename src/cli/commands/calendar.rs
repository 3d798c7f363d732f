//! Calendar command handler
//!
//! Prints the month around a chosen day, marking selected and busy days, then
//! lists what is due on that day.

use super::{load_store, resolve_today};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::fmt::Write;
use studyflow::config::Config;
use studyflow::core::models::Course;
use studyflow::core::planner::{due_counts_in_month, effective_status, on_date};
use studyflow::error;

const WEEKDAY_HEADER: &str = " Su   Mo   Tu   We   Th   Fr   Sa";

/// Show the calendar for the month containing `date` (default: today)
pub fn run(date: Option<&str>, config: &Config) {
    let day = match resolve_today(date) {
        Ok(day) => day,
        Err(e) => {
            error!("{e}");
            eprintln!("✗ {e}");
            return;
        }
    };
    let Some(store) = load_store(config) else {
        return;
    };
    let assignments = store.assignments.records();
    let courses = store.courses.records();

    println!("\n{}\n", day.format("%B %Y"));
    for line in month_grid(day, &due_counts_in_month(assignments, day)) {
        println!("{line}");
    }
    println!("\n[dd] selected day, * assignments due\n");

    let due = on_date(assignments, day);
    println!("Due {}:", day.format("%b %-d, %Y"));
    if due.is_empty() {
        println!("  (none)");
        return;
    }
    for assignment in due {
        println!(
            "  #{} [{}] {} ({}) {}",
            assignment.id,
            assignment.priority,
            assignment.title,
            course_label(courses, assignment.course_id),
            effective_status(assignment, day)
        );
    }
}

/// Weeks of the month containing `selected`, Sunday first
fn month_grid(selected: NaiveDate, counts: &BTreeMap<NaiveDate, usize>) -> Vec<String> {
    let Some(first) = selected.with_day(1) else {
        return Vec::new();
    };

    let mut lines = vec![WEEKDAY_HEADER.to_string()];
    let mut week = "     ".repeat(first.weekday().num_days_from_sunday() as usize);
    let mut filled = first.weekday().num_days_from_sunday();

    for day in first.iter_days().take_while(|d| d.month() == first.month()) {
        let (open, close) = if day == selected { ('[', ']') } else { (' ', ' ') };
        let mark = if counts.contains_key(&day) { '*' } else { ' ' };
        let _ = write!(week, "{open}{:>2}{close}{mark}", day.day());

        filled += 1;
        if filled % 7 == 0 {
            lines.push(week.trim_end().to_string());
            week.clear();
        }
    }
    if !week.is_empty() {
        lines.push(week.trim_end().to_string());
    }
    lines
}

fn course_label(courses: &[Course], id: u32) -> String {
    courses
        .iter()
        .find(|c| c.id == id)
        .map_or_else(|| format!("course #{id}"), Course::label)
}
