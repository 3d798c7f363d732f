//! Integration tests for the grade engine

use studyflow::core::grades::{category_average, course_grade, gpa, grade_points, letter_grade};
use studyflow::core::models::{Course, GradeCategory};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn course(id: u32, credits: u32, categories: Vec<GradeCategory>) -> Course {
    let mut course = Course::new(id, format!("Course {id}"), String::new(), credits);
    for category in categories {
        course.add_category(category);
    }
    course
}

#[test]
fn category_average_is_the_mean() {
    let category = GradeCategory::with_scores("Quizzes".to_string(), 20.0, &[80.0, 90.0, 100.0]);
    assert!(approx(category_average(&category), 90.0));
}

#[test]
fn empty_category_is_excluded_from_course_grade() {
    let categories = vec![
        GradeCategory::with_scores("A".to_string(), 60.0, &[90.0]),
        GradeCategory::new("B".to_string(), 40.0),
    ];

    let grade = course_grade(&categories).unwrap();
    assert!(approx(grade, 90.0), "got {grade}");
}

#[test]
fn course_grade_is_none_without_data() {
    let all_empty = vec![
        GradeCategory::new("A".to_string(), 50.0),
        GradeCategory::new("B".to_string(), 50.0),
    ];
    assert_eq!(course_grade(&all_empty), None);
    assert_eq!(course_grade(&[]), None);
}

#[test]
fn zero_weight_category_contributes_nothing() {
    let categories = vec![
        GradeCategory::with_scores("Extra".to_string(), 0.0, &[10.0]),
        GradeCategory::with_scores("Exams".to_string(), 50.0, &[80.0]),
    ];
    assert!(approx(course_grade(&categories).unwrap(), 80.0));

    let only_zero = vec![GradeCategory::with_scores("Extra".to_string(), 0.0, &[10.0])];
    assert_eq!(course_grade(&only_zero), None);
}

#[test]
fn letter_grade_boundaries() {
    assert_eq!(letter_grade(93.0), "A");
    assert_eq!(letter_grade(92.99), "A-");
    assert_eq!(letter_grade(59.9), "F");
    assert_eq!(letter_grade(150.0), "A+");
    assert_eq!(letter_grade(-5.0), "F");
}

#[test]
fn grade_points_plateau_at_a() {
    assert!(approx(grade_points(97.0), 4.0));
    assert!(approx(grade_points(94.0), 4.0));
    assert!(approx(grade_points(59.0), 0.0));
}

#[test]
fn gpa_of_nothing_is_zero() {
    assert!(approx(gpa(&[]), 0.0));
}

#[test]
fn gpa_single_course() {
    let courses = vec![course(
        1,
        3,
        vec![GradeCategory::with_scores("All".to_string(), 100.0, &[85.0])],
    )];
    assert!(approx(gpa(&courses), grade_points(85.0)));
    assert!(approx(gpa(&courses), 3.0));
}

#[test]
fn gpa_skips_ungraded_courses() {
    let courses = vec![
        course(1, 3, vec![GradeCategory::new("Exams".to_string(), 100.0)]),
        course(
            2,
            4,
            vec![GradeCategory::with_scores("All".to_string(), 100.0, &[100.0])],
        ),
    ];
    assert!(approx(gpa(&courses), 4.0));
}

#[test]
fn repeated_calls_are_identical_and_inputs_untouched() {
    let categories = vec![
        GradeCategory::with_scores("A".to_string(), 70.0, &[71.0, 88.5]),
        GradeCategory::with_scores("B".to_string(), 30.0, &[64.0]),
    ];
    let before = categories.clone();

    let first = course_grade(&categories);
    let second = course_grade(&categories);

    assert_eq!(first, second);
    assert_eq!(categories, before);
}

#[test]
fn score_order_does_not_matter() {
    let forward = GradeCategory::with_scores("A".to_string(), 100.0, &[61.0, 77.0, 98.0, 84.0]);
    let reversed = GradeCategory::with_scores("A".to_string(), 100.0, &[84.0, 98.0, 77.0, 61.0]);

    assert!(approx(category_average(&forward), category_average(&reversed)));
    assert!(approx(
        course_grade(std::slice::from_ref(&forward)).unwrap(),
        course_grade(std::slice::from_ref(&reversed)).unwrap()
    ));
}
