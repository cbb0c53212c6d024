//! Student model.

use super::CourseId;

/// Identifies a student within its owning session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StudentId(pub(crate) usize);

/// An enrolled student.
///
/// Like [`Instructor`](super::Instructor), the course list is an enrollment
/// back-reference set once at course construction; there is no course-drop
/// operation.
#[derive(Debug, Clone)]
pub struct Student {
    /// Unique student identifier (document-wide).
    pub id: String,
    /// Display name.
    pub name: String,
    pub(crate) courses: Vec<CourseId>,
}

impl Student {
    pub(crate) fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            courses: Vec::new(),
        }
    }

    /// Courses this student is enrolled in.
    pub fn courses(&self) -> &[CourseId] {
        &self.courses
    }
}
