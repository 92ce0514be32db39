//! Course group domain models
//!
//! A course group is a section of a course within a university (a "team"
//! in the auth collaborator's vocabulary).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A course group within a university.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use campus_org::CourseGroup;
///
/// let group = CourseGroup::new(Uuid::now_v7(), "CS101-A", "CS101", "Intro to Computing", 3, "Fall 2025");
/// assert_eq!(group.course_code, "CS101");
/// assert!(group.lecturer_id.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseGroup {
    /// Unique identifier
    pub id: Uuid,

    /// University this group belongs to
    pub university_id: Uuid,

    /// Group name
    pub name: String,

    /// Course code (e.g. "CS101")
    pub course_code: String,

    /// Course title
    pub course_title: String,

    /// Credit hours
    pub credit_hours: u32,

    /// Semester label
    pub semester: String,

    /// Lecturer user ID
    pub lecturer_id: Option<Uuid>,

    /// Lab section label
    pub lab_section: Option<String>,

    /// When the group was created
    pub created_at: DateTime<Utc>,
}

impl CourseGroup {
    /// Creates a course group with no lecturer or lab section.
    pub fn new(
        university_id: Uuid,
        name: impl Into<String>,
        course_code: impl Into<String>,
        course_title: impl Into<String>,
        credit_hours: u32,
        semester: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            university_id,
            name: name.into(),
            course_code: course_code.into(),
            course_title: course_title.into(),
            credit_hours,
            semester: semester.into(),
            lecturer_id: None,
            lab_section: None,
            created_at: Utc::now(),
        }
    }

    /// Assign a lecturer.
    pub fn with_lecturer(mut self, lecturer_id: Uuid) -> Self {
        self.lecturer_id = Some(lecturer_id);
        self
    }

    /// Set the lab section.
    pub fn with_lab_section(mut self, section: impl Into<String>) -> Self {
        self.lab_section = Some(section.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_group_builders() {
        let uni = Uuid::now_v7();
        let lecturer = Uuid::now_v7();
        let group = CourseGroup::new(uni, "MATH201-B", "MATH201", "Linear Algebra", 4, "Spring")
            .with_lecturer(lecturer)
            .with_lab_section("L2");

        assert_eq!(group.university_id, uni);
        assert_eq!(group.credit_hours, 4);
        assert_eq!(group.lecturer_id, Some(lecturer));
        assert_eq!(group.lab_section.as_deref(), Some("L2"));
    }
}
