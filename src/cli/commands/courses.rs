//! Courses command handler

use super::load_store;
use studyflow::config::Config;
use studyflow::core::grades;
use studyflow::core::planner;

/// List courses, optionally filtered by a search term
pub fn run(search: Option<&str>, config: &Config) {
    let Some(store) = load_store(config) else {
        return;
    };
    let all = store.courses.records();
    let courses = planner::search_courses(all, search.unwrap_or(""));

    if courses.is_empty() {
        match search {
            Some(term) => println!("No courses match '{term}'."),
            None => println!("No courses yet."),
        }
        return;
    }

    println!("{:>4}  {:<12} {:<28} {:<20} {:>7} {:>6}", "Id", "Code", "Name", "Professor", "Credits", "Grade");
    for course in &courses {
        let percentage = grades::course_grade(&course.grade_categories);
        println!(
            "{:>4}  {:<12} {:<28} {:<20} {:>7} {:>6}",
            course.id,
            course.code,
            course.name,
            course.professor,
            course.credits,
            grades::format_letter(percentage)
        );
    }
    println!("\n{} of {} courses", courses.len(), all.len());
}
