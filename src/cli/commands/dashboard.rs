//! Dashboard command handler

use super::{load_store, resolve_today};
use studyflow::config::Config;
use studyflow::core::grades;
use studyflow::core::models::{Assignment, Course};
use studyflow::core::planner::{days_until_due, study_minutes_by_course, DashboardStats};
use studyflow::{error, verbose};

/// Print GPA, assignment counts, and deadlines as of `today`
pub fn run(today: Option<&str>, config: &Config) {
    let today = match resolve_today(today) {
        Ok(date) => date,
        Err(e) => {
            error!("{e}");
            eprintln!("✗ {e}");
            return;
        }
    };
    let Some(store) = load_store(config) else {
        return;
    };

    let courses = store.courses.records();
    let sessions = store.study_sessions.records();
    let stats = DashboardStats::compute(courses, store.assignments.records(), sessions, today);

    println!("\n=== Dashboard ({today}) ===\n");
    if stats.is_empty() {
        println!("Nothing tracked yet. Add courses and assignments to the data file.");
        return;
    }

    println!(
        "GPA:          {} ({})",
        grades::format_gpa(stats.gpa),
        grades::gpa_letter(stats.gpa)
    );
    println!("Courses:      {}", stats.course_count);
    println!(
        "Assignments:  {} total, {} pending, {} completed, {} overdue ({:.0}% done)",
        stats.total_assignments,
        stats.pending,
        stats.completed,
        stats.overdue,
        stats.completion_rate()
    );
    println!("Study time:   {} min", stats.study_minutes);

    println!("\nDue today:");
    print_list(&stats.due_today, courses, today);

    println!("\nUpcoming (next 7 days):");
    print_list(&stats.upcoming, courses, today);

    for (course_id, minutes) in study_minutes_by_course(sessions) {
        let name = course_name(courses, course_id);
        verbose!("  studied {name}: {minutes} min");
    }
}

fn print_list(assignments: &[&Assignment], courses: &[Course], today: chrono::NaiveDate) {
    if assignments.is_empty() {
        println!("  (none)");
        return;
    }
    for assignment in assignments {
        let days = days_until_due(assignment.due_date, today);
        let when = match days {
            d if d < 0 => format!("{} days late", -d),
            0 => "today".to_string(),
            1 => "tomorrow".to_string(),
            d => format!("in {d} days"),
        };
        println!(
            "  [{}] {} ({}) {}, {}",
            assignment.priority,
            assignment.title,
            course_name(courses, assignment.course_id),
            assignment.due_date,
            when
        );
    }
}

fn course_name(courses: &[Course], id: u32) -> String {
    courses
        .iter()
        .find(|c| c.id == id)
        .map_or_else(|| format!("course #{id}"), Course::label)
}
