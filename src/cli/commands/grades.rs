//! Grades command handler

use super::load_store;
use studyflow::config::Config;
use studyflow::core::grades::{self, CourseGrade};
use studyflow::core::models::Course;
use studyflow::error;

/// Print course grades, or one course's category breakdown
pub fn run(course_id: Option<u32>, config: &Config) {
    let Some(store) = load_store(config) else {
        return;
    };
    let courses = store.courses.records();

    if let Some(id) = course_id {
        match courses.iter().find(|c| c.id == id) {
            Some(course) => print_breakdown(course),
            None => {
                error!("Course not found: {id}");
                eprintln!("✗ Course not found: {id}");
            }
        }
        return;
    }

    if courses.is_empty() {
        println!("No courses yet.");
        return;
    }

    println!("\n=== Grades ===\n");
    println!("{:<36} {:>8} {:>6} {:>8}", "Course", "Grade", "Letter", "Credits");
    for course in courses {
        let grade = CourseGrade::of(course);
        println!(
            "{:<36} {:>8} {:>6} {:>8}",
            course.label(),
            grades::format_percentage(grade.percentage),
            grades::format_letter(grade.percentage),
            course.credits
        );
    }

    let gpa = grades::gpa(courses);
    println!(
        "\nGPA: {} ({})   Total credits: {}",
        grades::format_gpa(gpa),
        grades::gpa_letter(gpa),
        grades::total_credits(courses)
    );
}

fn print_breakdown(course: &Course) {
    let grade = CourseGrade::of(course);
    println!("\n=== {} ===\n", course.label());
    if !course.professor.is_empty() {
        println!("Professor: {}", course.professor);
    }
    println!("Credits:   {}", course.credits);
    println!(
        "Grade:     {} ({})\n",
        grades::format_percentage(grade.percentage),
        grades::format_letter(grade.percentage)
    );

    if course.grade_categories.is_empty() {
        println!("No grade categories.");
        return;
    }

    println!("{:<24} {:>7} {:>7} {:>9}", "Category", "Weight", "Grades", "Average");
    for category in &course.grade_categories {
        let average = if category.has_grades() {
            format!("{:.1}%", grades::category_average(category))
        } else {
            grades::NO_GRADE.to_string()
        };
        println!(
            "{:<24} {:>6}% {:>7} {:>9}",
            category.name,
            category.weight,
            category.grades.len(),
            average
        );
    }
}
