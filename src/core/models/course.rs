//! Course model and its grade categories

use serde::{Deserialize, Serialize};

/// A single graded item on the percentage scale (0-100 expected, not clamped)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradedItem {
    /// Score as a percentage
    pub score: f64,
}

impl GradedItem {
    /// Create a graded item from a percentage score
    #[must_use]
    pub const fn new(score: f64) -> Self {
        Self { score }
    }
}

/// A weighted group of graded items within a course (e.g., "Exams")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeCategory {
    /// Category name
    pub name: String,

    /// Intended share of the course grade, in percent
    pub weight: f64,

    /// Graded items recorded so far
    pub grades: Vec<GradedItem>,
}

impl GradeCategory {
    /// Create a category with no graded items
    ///
    /// # Arguments
    /// * `name` - Category name
    /// * `weight` - Percentage of the course grade
    #[must_use]
    pub const fn new(name: String, weight: f64) -> Self {
        Self {
            name,
            weight,
            grades: Vec::new(),
        }
    }

    /// Create a category with the given scores, in order
    #[must_use]
    pub fn with_scores(name: String, weight: f64, scores: &[f64]) -> Self {
        Self {
            name,
            weight,
            grades: scores.iter().copied().map(GradedItem::new).collect(),
        }
    }

    /// Record another graded item
    pub fn add_score(&mut self, score: f64) {
        self.grades.push(GradedItem::new(score));
    }

    /// Whether any graded item has been recorded
    #[must_use]
    pub fn has_grades(&self) -> bool {
        !self.grades.is_empty()
    }
}

/// An enrolled course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique identifier
    #[serde(rename = "Id")]
    pub id: u32,

    /// Course name (e.g., "Data Structures")
    pub name: String,

    /// Course code (e.g., "CS 2510")
    pub code: String,

    /// Instructor name
    pub professor: String,

    /// Meeting times (e.g., "MWF 10:00-11:00")
    pub schedule: String,

    /// Term label (e.g., "Fall 2024")
    pub semester: String,

    /// Display color
    pub color: String,

    /// Credit hours, used as the GPA weight
    pub credits: u32,

    /// Grade categories in display order
    pub grade_categories: Vec<GradeCategory>,
}

impl Course {
    /// Create a course with no categories and empty descriptive fields
    ///
    /// # Arguments
    /// * `id` - Unique identifier
    /// * `name` - Course name
    /// * `code` - Course code
    /// * `credits` - Credit hours
    #[must_use]
    pub const fn new(id: u32, name: String, code: String, credits: u32) -> Self {
        Self {
            id,
            name,
            code,
            professor: String::new(),
            schedule: String::new(),
            semester: String::new(),
            color: String::new(),
            credits,
            grade_categories: Vec::new(),
        }
    }

    /// Append a grade category
    pub fn add_category(&mut self, category: GradeCategory) {
        self.grade_categories.push(category);
    }

    /// Builder-style variant of [`add_category`](Self::add_category)
    #[must_use]
    pub fn with_category(mut self, category: GradeCategory) -> Self {
        self.add_category(category);
        self
    }

    /// Case-insensitive match of `term` against name, code, and professor
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.code.to_lowercase().contains(&needle)
            || self.professor.to_lowercase().contains(&needle)
    }

    /// Label used in tables (e.g., "CS 2510 - Data Structures")
    #[must_use]
    pub fn label(&self) -> String {
        if self.code.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.code, self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Course {
        let mut course = Course::new(
            1,
            "Data Structures".to_string(),
            "CS 2510".to_string(),
            4,
        );
        course.professor = "Dr. Marie Curie".to_string();
        course
    }

    #[test]
    fn test_course_creation() {
        let course = sample();

        assert_eq!(course.id, 1);
        assert_eq!(course.name, "Data Structures");
        assert_eq!(course.credits, 4);
        assert!(course.grade_categories.is_empty());
    }

    #[test]
    fn test_category_scores_keep_order() {
        let mut category = GradeCategory::with_scores("Exams".to_string(), 60.0, &[90.0, 70.0]);
        category.add_score(80.0);

        let scores: Vec<f64> = category.grades.iter().map(|g| g.score).collect();
        assert_eq!(scores, vec![90.0, 70.0, 80.0]);
        assert!(category.has_grades());
        assert!(!GradeCategory::new("Labs".to_string(), 10.0).has_grades());
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let course = sample();

        assert!(course.matches("data"));
        assert!(course.matches("cs 25"));
        assert!(course.matches("CURIE"));
        assert!(!course.matches("physics"));
    }

    #[test]
    fn test_label() {
        assert_eq!(sample().label(), "CS 2510 - Data Structures");

        let uncoded = Course::new(2, "Seminar".to_string(), String::new(), 1);
        assert_eq!(uncoded.label(), "Seminar");
    }

    #[test]
    fn test_serializes_with_record_field_names() {
        let course = sample().with_category(GradeCategory::new("Homework".to_string(), 40.0));
        let json = serde_json::to_value(&course).unwrap();

        assert_eq!(json["Id"], 1);
        assert_eq!(json["gradeCategories"][0]["name"], "Homework");
    }
}
