//! Assignments command handler

use super::{data_path, load_store, save_store};
use crate::args::{AssignmentsSubcommand, PriorityArg, StatusArg};
use std::io::{self, Write};
use studyflow::config::Config;
use studyflow::core::models::{Assignment, AssignmentStatus};
use studyflow::core::records;
use studyflow::core::planner::{effective_status, filter_assignments, AssignmentFilter};
use studyflow::core::store::{Repository, Store};
use studyflow::{error, info};

/// Fields for a new assignment, as given on the command line
pub struct NewAssignment<'a> {
    /// Title
    pub title: &'a str,
    /// Owning course id
    pub course_id: u32,
    /// Due date (`YYYY-MM-DD`)
    pub due: &'a str,
    /// Priority
    pub priority: PriorityArg,
    /// Description
    pub description: Option<&'a str>,
}

/// Dispatch the assignments command
pub fn run(
    course: Option<u32>,
    search: Option<&str>,
    status: Option<StatusArg>,
    action: Option<AssignmentsSubcommand>,
    config: &Config,
) {
    match action {
        Some(AssignmentsSubcommand::Add {
            title,
            course,
            due,
            priority,
            description,
        }) => {
            let new = NewAssignment {
                title: &title,
                course_id: course,
                due: &due,
                priority,
                description: description.as_deref(),
            };
            handle_add(&new, config);
        }
        Some(AssignmentsSubcommand::Complete { id }) => {
            handle_set_status(id, AssignmentStatus::Completed, config);
        }
        Some(AssignmentsSubcommand::Status { id, status }) => {
            handle_set_status(id, status.into(), config);
        }
        Some(AssignmentsSubcommand::Delete { id, yes }) => handle_delete(id, yes, config),
        None => handle_list(course, search, status, config),
    }
}

fn handle_list(
    course: Option<u32>,
    search: Option<&str>,
    status: Option<StatusArg>,
    config: &Config,
) {
    let Some(store) = load_store(config) else {
        return;
    };
    let today = chrono::Local::now().date_naive();
    let filter = AssignmentFilter {
        course_id: course,
        status: status.map(Into::into),
        search,
    };
    let assignments = filter_assignments(store.assignments.records(), filter, today);

    if assignments.is_empty() {
        println!("No matching assignments.");
        return;
    }

    println!("{:>4}  {:<10} {:<10} {:<8} {:<32} Course", "Id", "Due", "Status", "Priority", "Title");
    for assignment in assignments {
        let course_code = store
            .courses
            .records()
            .iter()
            .find(|c| c.id == assignment.course_id)
            .map_or_else(|| format!("#{}", assignment.course_id), |c| c.code.clone());
        println!(
            "{:>4}  {:<10} {:<10} {:<8} {:<32} {}",
            assignment.id,
            assignment.due_date,
            effective_status(assignment, today),
            assignment.priority,
            assignment.title,
            course_code
        );
    }
}

/// Validate `new` and insert it as a pending assignment
///
/// The title must be non-blank, the course must exist, and the due date must parse.
fn add_assignment(store: &mut Store, new: &NewAssignment<'_>) -> Result<Assignment, String> {
    let title = new.title.trim();
    if title.is_empty() {
        return Err("Assignment title is required".to_string());
    }
    if store.courses.get_by_id(new.course_id).is_err() {
        return Err(format!("Unknown course id: {}", new.course_id));
    }
    let due_date = records::parse_date(new.due)
        .ok_or_else(|| format!("Invalid due date '{}' (expected YYYY-MM-DD)", new.due))?;

    let mut assignment = Assignment::new(0, new.course_id, title.to_string(), due_date);
    assignment.priority = new.priority.into();
    assignment.description = new.description.unwrap_or_default().trim().to_string();
    Ok(store.assignments.create(assignment))
}

fn handle_add(new: &NewAssignment<'_>, config: &Config) {
    let Some(mut store) = load_store(config) else {
        return;
    };

    match add_assignment(&mut store, new) {
        Ok(created) => {
            if save_store(&store, &data_path(config)) {
                info!("Added assignment {} to course {}", created.id, created.course_id);
                println!("✓ Added #{}: {} (due {})", created.id, created.title, created.due_date);
            }
        }
        Err(e) => {
            error!("{e}");
            eprintln!("✗ {e}");
        }
    }
}

fn handle_set_status(id: u32, status: AssignmentStatus, config: &Config) {
    let Some(mut store) = load_store(config) else {
        return;
    };

    let updated = store.assignments.update(id, &mut |a: &mut Assignment| {
        a.status = status;
    });
    match updated {
        Ok(assignment) => {
            if save_store(&store, &data_path(config)) {
                info!("Marked assignment {id} {status}");
                println!("✓ {}: {status}", assignment.title);
            }
        }
        Err(e) => {
            error!("{e}");
            eprintln!("✗ {e}");
        }
    }
}

fn handle_delete(id: u32, yes: bool, config: &Config) {
    let Some(mut store) = load_store(config) else {
        return;
    };

    let title = match store.assignments.get_by_id(id) {
        Ok(assignment) => assignment.title,
        Err(e) => {
            error!("{e}");
            eprintln!("✗ {e}");
            return;
        }
    };

    if !yes {
        print!("Delete assignment #{id} \"{title}\"? (y/n): ");
        io::stdout().flush().ok();

        let mut response = String::new();
        io::stdin().read_line(&mut response).ok();
        let response = response.trim();
        if !(response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")) {
            println!("✗ Delete cancelled");
            return;
        }
    }

    if let Err(e) = store.assignments.delete(id) {
        error!("{e}");
        eprintln!("✗ {e}");
        return;
    }
    if save_store(&store, &data_path(config)) {
        info!("Deleted assignment {id}");
        println!("✓ Deleted: {title}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studyflow::core::models::{Course, Priority};
    use studyflow::core::records::Snapshot;

    fn store_with_course() -> Store {
        Store::from_snapshot(Snapshot {
            courses: vec![Course::new(2, "Chemistry".to_string(), "CHEM 1".to_string(), 4)],
            ..Snapshot::default()
        })
    }

    fn new_assignment<'a>(title: &'a str, course_id: u32, due: &'a str) -> NewAssignment<'a> {
        NewAssignment {
            title,
            course_id,
            due,
            priority: PriorityArg::High,
            description: Some("  titration  "),
        }
    }

    #[test]
    fn test_add_assignment_assigns_id_and_fields() {
        let mut store = store_with_course();

        let created = add_assignment(&mut store, &new_assignment(" Lab 1 ", 2, "2024-10-20")).unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.title, "Lab 1");
        assert_eq!(created.priority, Priority::High);
        assert_eq!(created.status, AssignmentStatus::Pending);
        assert_eq!(created.description, "titration");
        assert_eq!(store.assignments.len(), 1);
    }

    #[test]
    fn test_add_assignment_rejects_bad_input() {
        let mut store = store_with_course();

        assert!(add_assignment(&mut store, &new_assignment("  ", 2, "2024-10-20")).is_err());
        assert!(add_assignment(&mut store, &new_assignment("Lab", 9, "2024-10-20")).is_err());
        assert!(add_assignment(&mut store, &new_assignment("Lab", 2, "next week")).is_err());
        assert!(store.assignments.is_empty());
    }

    #[test]
    fn test_status_and_delete_persist() {
        let dir = tempfile::TempDir::new().unwrap();
        let data = dir.path().join("data.json");
        let mut config = Config::default();
        config.paths.data_file = data.to_string_lossy().to_string();

        let mut store = store_with_course();
        add_assignment(&mut store, &new_assignment("Lab 1", 2, "2024-10-20")).unwrap();
        add_assignment(&mut store, &new_assignment("Lab 2", 2, "2024-10-27")).unwrap();
        assert!(save_store(&store, &data));

        handle_set_status(1, AssignmentStatus::Overdue, &config);
        handle_delete(2, true, &config);

        let reloaded = load_store(&config).unwrap();
        assert_eq!(reloaded.assignments.len(), 1);
        assert_eq!(
            reloaded.assignments.get_by_id(1).unwrap().status,
            AssignmentStatus::Overdue
        );
    }
}
