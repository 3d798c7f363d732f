//! Grade engine: weighted course grades, letter grades, and GPA
//!
//! Every function here is pure. Inputs are borrowed and never mutated, and no
//! rounding is applied; use the `format_*` helpers at the display edge.

use crate::core::models::{Course, GradeCategory};

/// Grade buckets from highest to lowest: (inclusive lower bound, letter, grade points).
///
/// A+ and A both map to 4.0.
const GRADE_SCALE: [(f64, &str, f64); 12] = [
    (97.0, "A+", 4.0),
    (93.0, "A", 4.0),
    (90.0, "A-", 3.7),
    (87.0, "B+", 3.3),
    (83.0, "B", 3.0),
    (80.0, "B-", 2.7),
    (77.0, "C+", 2.3),
    (73.0, "C", 2.0),
    (70.0, "C-", 1.7),
    (67.0, "D+", 1.3),
    (63.0, "D", 1.0),
    (60.0, "D-", 0.7),
];

/// Letter used below the lowest bucket
const FAILING_LETTER: &str = "F";

/// Text shown in place of a grade that does not exist yet
pub const NO_GRADE: &str = "N/A";

/// Find the bucket containing `percentage`, if it is at least 60
fn bucket(percentage: f64) -> Option<&'static (f64, &'static str, f64)> {
    GRADE_SCALE.iter().find(|(min, _, _)| percentage >= *min)
}

/// Arithmetic mean of the category's scores.
///
/// Returns `0.0` for a category with no graded items. That value is for
/// display only: [`course_grade`] skips such categories instead of counting
/// them as zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn category_average(category: &GradeCategory) -> f64 {
    if category.grades.is_empty() {
        return 0.0;
    }
    let total: f64 = category.grades.iter().map(|g| g.score).sum();
    total / category.grades.len() as f64
}

/// Weighted overall grade for one course, renormalized by active weight.
///
/// Only categories with at least one graded item take part. Each contributes
/// `average * weight / 100` to the numerator and `weight / 100` to the
/// denominator, so a course graded only in a 20% category reports that
/// category's average.
///
/// Returns `None` when there are no categories or the active weight is zero.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn course_grade(categories: &[GradeCategory]) -> Option<f64> {
    let (weighted_score, total_weight) = categories
        .iter()
        .filter(|category| category.has_grades())
        .fold((0.0_f64, 0.0_f64), |(score, weight), category| {
            let share = category.weight / 100.0;
            (score + category_average(category) * share, weight + share)
        });

    if total_weight == 0.0 {
        None
    } else {
        Some(weighted_score / total_weight)
    }
}

/// Letter grade for a percentage. Open-ended: above 100 is A+, below 0 is F.
#[must_use]
pub fn letter_grade(percentage: f64) -> &'static str {
    bucket(percentage).map_or(FAILING_LETTER, |&(_, letter, _)| letter)
}

/// Grade points on the 0.0-4.0 scale, using the same buckets as [`letter_grade`].
#[must_use]
pub fn grade_points(percentage: f64) -> f64 {
    bucket(percentage).map_or(0.0, |&(_, _, points)| points)
}

/// Credit-weighted GPA across courses.
///
/// Courses without a grade yet are left out of both the points and the
/// credits. Returns `0.0` (not `None`) when no credits are counted.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn gpa(courses: &[Course]) -> f64 {
    let (total_points, total_credits) = courses
        .iter()
        .filter_map(|course| {
            course_grade(&course.grade_categories).map(|grade| (grade, f64::from(course.credits)))
        })
        .fold((0.0_f64, 0.0_f64), |(points, credits), (grade, course_credits)| {
            (
                points + grade_points(grade) * course_credits,
                credits + course_credits,
            )
        });

    if total_credits == 0.0 {
        0.0
    } else {
        total_points / total_credits
    }
}

/// Sum of credits over all courses, graded or not
#[must_use]
pub fn total_credits(courses: &[Course]) -> u64 {
    courses.iter().map(|c| u64::from(c.credits)).sum()
}

/// Letter equivalent of a GPA, read as a percentage (`gpa * 25`)
#[must_use]
pub fn gpa_letter(gpa: f64) -> &'static str {
    letter_grade(gpa * 25.0)
}

/// Performance band for a course percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseStanding {
    /// 90 and above
    Excellent,
    /// 80 to 90
    Good,
    /// 70 to 80
    Fair,
    /// Below 70
    Failing,
}

impl CourseStanding {
    /// Band for a course percentage
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Self::Excellent
        } else if percentage >= 80.0 {
            Self::Good
        } else if percentage >= 70.0 {
            Self::Fair
        } else {
            Self::Failing
        }
    }

    /// Lowercase label used as a CSS class in reports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Failing => "failing",
        }
    }
}

/// Performance band for a GPA
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpaStanding {
    /// 3.5 and above
    Excellent,
    /// 3.0 to 3.5
    Good,
    /// 2.5 to 3.0
    Fair,
    /// Below 2.5
    AtRisk,
}

impl GpaStanding {
    /// Band for a GPA value
    #[must_use]
    pub fn from_gpa(gpa: f64) -> Self {
        if gpa >= 3.5 {
            Self::Excellent
        } else if gpa >= 3.0 {
            Self::Good
        } else if gpa >= 2.5 {
            Self::Fair
        } else {
            Self::AtRisk
        }
    }

    /// Lowercase label used as a CSS class in reports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::AtRisk => "at-risk",
        }
    }
}

/// Derived grade values for one course
#[derive(Debug, Clone, PartialEq)]
pub struct CourseGrade {
    /// Course id
    pub course_id: u32,
    /// Weighted percentage, `None` before any grade is recorded
    pub percentage: Option<f64>,
    /// Credit hours
    pub credits: u32,
}

impl CourseGrade {
    /// Compute the derived values for `course`
    #[must_use]
    pub fn of(course: &Course) -> Self {
        Self {
            course_id: course.id,
            percentage: course_grade(&course.grade_categories),
            credits: course.credits,
        }
    }

    /// Letter grade, if graded
    #[must_use]
    pub fn letter(&self) -> Option<&'static str> {
        self.percentage.map(letter_grade)
    }

    /// Grade points, if graded
    #[must_use]
    pub fn points(&self) -> Option<f64> {
        self.percentage.map(grade_points)
    }

    /// Performance band, if graded
    #[must_use]
    pub fn standing(&self) -> Option<CourseStanding> {
        self.percentage.map(CourseStanding::from_percentage)
    }
}

/// Format a percentage with one decimal, or [`NO_GRADE`]
#[must_use]
pub fn format_percentage(percentage: Option<f64>) -> String {
    percentage.map_or_else(|| NO_GRADE.to_string(), |p| format!("{p:.1}%"))
}

/// Letter grade for an optional percentage, or [`NO_GRADE`]
#[must_use]
pub fn format_letter(percentage: Option<f64>) -> &'static str {
    percentage.map_or(NO_GRADE, letter_grade)
}

/// Format a GPA with two decimals
#[must_use]
pub fn format_gpa(gpa: f64) -> String {
    format!("{gpa:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn category(weight: f64, scores: &[f64]) -> GradeCategory {
        GradeCategory::with_scores("Category".to_string(), weight, scores)
    }

    fn course(id: u32, credits: u32, categories: Vec<GradeCategory>) -> Course {
        let mut course = Course::new(id, format!("Course {id}"), format!("C{id}"), credits);
        course.grade_categories = categories;
        course
    }

    #[test]
    fn test_category_average() {
        assert!(approx(category_average(&category(50.0, &[80.0, 90.0, 100.0])), 90.0));
        assert!(approx(category_average(&category(50.0, &[])), 0.0));
    }

    #[test]
    fn test_course_grade_skips_empty_categories() {
        let categories = vec![category(60.0, &[90.0]), category(40.0, &[])];
        let grade = course_grade(&categories).unwrap();
        assert!(approx(grade, 90.0), "got {grade}");
    }

    #[test]
    fn test_course_grade_weighted() {
        // (85 * 0.6 + 95 * 0.4) / 1.0
        let categories = vec![category(60.0, &[80.0, 90.0]), category(40.0, &[95.0])];
        assert!(approx(course_grade(&categories).unwrap(), 89.0));
    }

    #[test]
    fn test_course_grade_none_without_data() {
        assert_eq!(course_grade(&[]), None);
        assert_eq!(
            course_grade(&[category(50.0, &[]), category(50.0, &[])]),
            None
        );
    }

    #[test]
    fn test_zero_weight_category_is_excluded() {
        assert_eq!(course_grade(&[category(0.0, &[70.0])]), None);

        let categories = vec![category(0.0, &[10.0]), category(30.0, &[80.0])];
        assert!(approx(course_grade(&categories).unwrap(), 80.0));
    }

    #[test]
    fn test_weights_need_not_sum_to_100() {
        let categories = vec![category(10.0, &[100.0]), category(30.0, &[60.0])];
        // (10 + 18) / 0.4
        assert!(approx(course_grade(&categories).unwrap(), 70.0));
    }

    #[test]
    fn test_letter_grade_boundaries() {
        assert_eq!(letter_grade(93.0), "A");
        assert_eq!(letter_grade(92.99), "A-");
        assert_eq!(letter_grade(97.0), "A+");
        assert_eq!(letter_grade(150.0), "A+");
        assert_eq!(letter_grade(60.0), "D-");
        assert_eq!(letter_grade(59.9), "F");
        assert_eq!(letter_grade(-5.0), "F");
    }

    #[test]
    fn test_grade_points_plateau() {
        assert!(approx(grade_points(97.0), 4.0));
        assert!(approx(grade_points(94.0), 4.0));
        assert!(approx(grade_points(90.0), 3.7));
        assert!(approx(grade_points(85.0), 3.0));
        assert!(approx(grade_points(60.0), 0.7));
        assert!(approx(grade_points(12.0), 0.0));
    }

    #[test]
    fn test_gpa_empty_is_zero() {
        assert!(approx(gpa(&[]), 0.0));
        assert!(approx(gpa(&[course(1, 3, vec![category(100.0, &[])])]), 0.0));
    }

    #[test]
    fn test_gpa_single_course() {
        let courses = vec![course(1, 3, vec![category(100.0, &[85.0])])];
        assert!(approx(gpa(&courses), 3.0));
    }

    #[test]
    fn test_gpa_ignores_ungraded_courses() {
        let courses = vec![
            course(1, 3, vec![category(100.0, &[])]),
            course(2, 4, vec![category(100.0, &[100.0])]),
        ];
        assert!(approx(gpa(&courses), 4.0));
    }

    #[test]
    fn test_gpa_weights_by_credits() {
        let courses = vec![
            course(1, 4, vec![category(100.0, &[95.0])]),
            course(2, 2, vec![category(100.0, &[81.0])]),
        ];
        // (4.0 * 4 + 2.7 * 2) / 6
        assert!(approx(gpa(&courses), 21.4 / 6.0));
    }

    #[test]
    fn test_functions_do_not_mutate_input() {
        let courses = vec![course(1, 3, vec![category(60.0, &[70.0, 90.0])])];
        let before = courses.clone();

        let first = gpa(&courses);
        let second = gpa(&courses);

        assert!(approx(first, second));
        assert_eq!(courses, before);
    }

    #[test]
    fn test_grade_order_does_not_matter() {
        let forward = vec![category(70.0, &[60.0, 75.0, 99.0]), category(30.0, &[88.0])];
        let reversed = vec![category(70.0, &[99.0, 75.0, 60.0]), category(30.0, &[88.0])];

        assert!(approx(
            category_average(&forward[0]),
            category_average(&reversed[0])
        ));
        assert!(approx(
            course_grade(&forward).unwrap(),
            course_grade(&reversed).unwrap()
        ));
    }

    #[test]
    fn test_standings() {
        assert_eq!(CourseStanding::from_percentage(90.0), CourseStanding::Excellent);
        assert_eq!(CourseStanding::from_percentage(89.9), CourseStanding::Good);
        assert_eq!(CourseStanding::from_percentage(70.0), CourseStanding::Fair);
        assert_eq!(CourseStanding::from_percentage(69.0), CourseStanding::Failing);

        assert_eq!(GpaStanding::from_gpa(3.5), GpaStanding::Excellent);
        assert_eq!(GpaStanding::from_gpa(3.2), GpaStanding::Good);
        assert_eq!(GpaStanding::from_gpa(2.5), GpaStanding::Fair);
        assert_eq!(GpaStanding::from_gpa(0.0), GpaStanding::AtRisk);
    }

    #[test]
    fn test_gpa_letter() {
        assert_eq!(gpa_letter(4.0), "A+");
        assert_eq!(gpa_letter(3.0), "C+");
        assert_eq!(gpa_letter(0.0), "F");
    }

    #[test]
    fn test_course_grade_summary() {
        let graded = CourseGrade::of(&course(7, 3, vec![category(100.0, &[91.0])]));
        assert_eq!(graded.course_id, 7);
        assert_eq!(graded.letter(), Some("A-"));
        assert_eq!(graded.standing(), Some(CourseStanding::Excellent));

        let ungraded = CourseGrade::of(&course(8, 3, Vec::new()));
        assert_eq!(ungraded.letter(), None);
        assert_eq!(ungraded.points(), None);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_percentage(Some(89.04)), "89.0%");
        assert_eq!(format_percentage(None), "N/A");
        assert_eq!(format_letter(Some(83.0)), "B");
        assert_eq!(format_letter(None), "N/A");
        assert_eq!(format_gpa(3.0), "3.00");
        assert_eq!(total_credits(&[course(1, 3, vec![]), course(2, 4, vec![])]), 7);
    }

    #[test]
    fn test_total_credits_at_u32_limit() {
        let courses = vec![course(1, u32::MAX, vec![]), course(2, 1, vec![])];

        assert_eq!(total_credits(&courses), u64::from(u32::MAX) + 1);
    }
}
